//! Administrative pass-throughs.
//!
//! `migrate` and `delete` forward straight to the host platform. Neither
//! checks a witness here; if the host does not gate these calls upstream,
//! anyone can replace or destroy the contract.

use nep5_common::{MigrateRequest, TokenResult};
use tracing::warn;

use crate::TokenContext;

/// Replace the running code and metadata, keeping storage
pub fn migrate(ctx: &mut TokenContext<'_>, request: &MigrateRequest) -> TokenResult<()> {
    warn!(
        name = %request.name,
        version = %request.version,
        properties = request.properties.bits(),
        script_len = request.script.len(),
        "forwarding unguarded migrate"
    );
    ctx.platform.migrate(request)
}

/// Destroy the contract and its storage
pub fn delete(ctx: &mut TokenContext<'_>) -> TokenResult<()> {
    warn!("forwarding unguarded delete");
    ctx.platform.destroy()
}
