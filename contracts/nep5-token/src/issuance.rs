//! Issuance
//!
//! `deploy` mints the configured supply to the owner exactly once. The
//! total-supply marker doubles as the deployment flag.

use nep5_common::{events::TokenEvent, TokenError, TokenResult};
use tracing::{debug, info};

use crate::TokenContext;

/// Mint the total supply to the owner. Fails without side effects if the
/// marker already exists.
pub fn deploy(ctx: &mut TokenContext<'_>) -> TokenResult<()> {
    // 1. Marker must be absent
    if let Some(total_supply) = ctx.store.total_supply_marker()? {
        debug!(%total_supply, "deploy rejected: already deployed");
        return Err(TokenError::AlreadyDeployed { total_supply });
    }

    let owner = ctx.config.owner();
    let supply = ctx.config.total_supply().clone();

    // 2. Credit owner and record supply
    ctx.store.set_balance(&owner, &supply);
    ctx.store.write_total_supply_marker(&supply);

    // 3. Emit mint notification
    ctx.events.emit(TokenEvent::Transfer {
        from: None,
        to: owner,
        amount: supply.clone(),
    });

    info!(%owner, %supply, "token deployed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStorage, RecordingPlatform, StaticWitness, TokenConfig};
    use nep5_common::{constants::storage::TOTAL_SUPPLY_KEY, Balance};

    #[test]
    fn test_deploy_mints_once() {
        let config = TokenConfig::default();
        let mut storage = MemoryStorage::new();
        let witness = StaticWitness::none();
        let mut platform = RecordingPlatform::new();
        let mut ctx = TokenContext::new(&config, &mut storage, &witness, &mut platform);

        assert!(deploy(&mut ctx).is_ok());
        assert_eq!(ctx.store.get_balance(&config.owner), Ok(config.total_supply.clone()));
        assert_eq!(ctx.events.len(), 1);
        assert!(ctx.events.events()[0].is_mint());

        let second = deploy(&mut ctx);
        assert_eq!(
            second,
            Err(TokenError::AlreadyDeployed { total_supply: config.total_supply.clone() })
        );
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.store.get_balance(&config.owner), Ok(config.total_supply.clone()));

        drop(ctx);
        // Owner entry plus marker, nothing else
        assert_eq!(storage.len(), 2);
        assert!(storage.contains_key(TOTAL_SUPPLY_KEY));
    }

    #[test]
    fn test_deploy_does_not_need_witness() {
        let config = TokenConfig::default();
        let mut storage = MemoryStorage::new();
        let witness = StaticWitness::none();
        let mut platform = RecordingPlatform::new();
        let mut ctx = TokenContext::new(&config, &mut storage, &witness, &mut platform);

        assert!(deploy(&mut ctx).is_ok());
        assert_eq!(
            ctx.store.total_supply_marker(),
            Ok(Some(Balance::from(10_000_000_000_000_000u64)))
        );
    }
}
