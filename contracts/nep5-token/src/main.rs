//! NEP5 Token - standalone host entry point
//!
//! Runs a single invocation against file-backed state:
//!
//! ```text
//! nep5-token-host <state-file> < invocation.cbor > outcome.cbor
//! ```
//!
//! The state path may also come from `NEP5_STATE`. Logs go to stderr and
//! respect `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Context;
use nep5_token::host;
use nep5_token::TokenConfig;

/// Initialize the tracing subscriber, keeping stdout free for the outcome.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let state_path: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NEP5_STATE").ok())
        .context("usage: nep5-token-host <state-file> (or set NEP5_STATE)")?
        .into();

    let invocation = host::read_invocation(std::io::stdin().lock()).context("reading invocation")?;

    tracing::info!(
        operation = %invocation.operation,
        trigger = ?invocation.trigger,
        args = invocation.args.len(),
        "invoking"
    );

    let outcome = host::invoke_persisted(&state_path, TokenConfig::default(), &invocation)
        .with_context(|| format!("running against {}", state_path.display()))?;

    host::write_outcome(&outcome, std::io::stdout().lock()).context("writing outcome")?;
    Ok(())
}
