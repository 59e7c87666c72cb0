//! Transfer Engine
//!
//! Every check runs before the first write, so a rejected transfer leaves
//! storage and the event log exactly as they were. No rollback needed.

use nep5_common::{events::TokenEvent, AccountId, Amount, Balance, TokenError, TokenResult};
use num_traits::Signed;
use tracing::{debug, info};

use crate::TokenContext;

/// Move `amount` from `from` to `to`.
///
/// Check order matters and is observable through the error returned:
/// amount, witness, recipient length, then balance. A self-transfer still
/// has to pass the balance check but writes nothing and emits nothing.
pub fn transfer(
    ctx: &mut TokenContext<'_>,
    from: &AccountId,
    to: &[u8],
    amount: &Amount,
) -> TokenResult<()> {
    // 1. Amount must be positive
    if !amount.is_positive() {
        debug!(%from, %amount, "transfer rejected: non-positive amount");
        return Err(TokenError::NonPositiveAmount { amount: amount.clone() });
    }
    let requested = Balance::from_amount(amount)
        .ok_or(TokenError::NonPositiveAmount { amount: amount.clone() })?;

    // 2. Sender must be witnessed
    if !ctx.witness.check_witness(from) {
        debug!(%from, "transfer rejected: missing witness");
        return Err(TokenError::Unauthorized { account: *from });
    }

    // 3. Recipient must be a well-formed account
    let to = AccountId::from_slice(to).inspect_err(|_| {
        debug!(%from, len = to.len(), "transfer rejected: malformed recipient");
    })?;

    // 4. Sender must cover the amount
    let available = ctx.store.get_balance(from)?;
    let Some(remaining) = available.checked_sub(&requested) else {
        debug!(%from, %available, %requested, "transfer rejected: insufficient balance");
        return Err(TokenError::InsufficientBalance { available, requested });
    };

    // 5. Self-transfer: debit and credit cancel out
    if *from == to {
        return Ok(());
    }

    // 6. Debit, credit, notify
    let credited = &ctx.store.get_balance(&to)? + &requested;
    ctx.store.set_balance(from, &remaining);
    ctx.store.set_balance(&to, &credited);

    ctx.events.emit(TokenEvent::Transfer {
        from: Some(*from),
        to,
        amount: requested.clone(),
    });

    info!(%from, %to, amount = %requested, "transfer");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStorage, RecordingPlatform, StaticWitness, Storage, TokenConfig};
    use num_bigint::BigInt;

    fn alice() -> AccountId {
        AccountId::new([1u8; 20])
    }

    fn bob() -> AccountId {
        AccountId::new([2u8; 20])
    }

    fn funded_storage(balance: u64) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage.put(alice().as_bytes(), Balance::from(balance).to_storage_bytes());
        storage
    }

    /// Run one transfer against `storage`, returning its result and events
    fn run(
        storage: &mut MemoryStorage,
        witness: &StaticWitness,
        to: &[u8],
        amount: i64,
    ) -> (TokenResult<()>, usize) {
        let config = TokenConfig::with_owner(alice());
        let mut platform = RecordingPlatform::new();
        let mut ctx = TokenContext::new(&config, storage, witness, &mut platform);
        let result = transfer(&mut ctx, &alice(), to, &BigInt::from(amount));
        (result, ctx.events.len())
    }

    fn balance(storage: &mut MemoryStorage, account: &AccountId) -> Balance {
        crate::AccountStore::new(storage).get_balance(account).unwrap()
    }

    #[test]
    fn test_transfer_success() {
        let mut storage = funded_storage(1000);
        let witness = StaticWitness::new([alice()]);

        let (result, events) = run(&mut storage, &witness, bob().as_bytes(), 600);

        assert!(result.is_ok());
        assert_eq!(events, 1);
        assert_eq!(balance(&mut storage, &alice()), Balance::from(400u64));
        assert_eq!(balance(&mut storage, &bob()), Balance::from(600u64));
    }

    #[test]
    fn test_full_debit_removes_sender_entry() {
        let mut storage = funded_storage(500);
        let witness = StaticWitness::new([alice()]);

        let (result, _) = run(&mut storage, &witness, bob().as_bytes(), 500);

        assert!(result.is_ok());
        assert!(!storage.contains_key(alice().as_bytes()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_non_positive_amounts_always_fail() {
        let mut storage = funded_storage(1000);
        let witness = StaticWitness::new([alice()]);

        for amount in [0, -5] {
            let (result, events) = run(&mut storage, &witness, bob().as_bytes(), amount);
            assert!(matches!(result, Err(TokenError::NonPositiveAmount { .. })));
            assert_eq!(events, 0);
        }
        assert_eq!(balance(&mut storage, &alice()), Balance::from(1000u64));
    }

    #[test]
    fn test_amount_checked_before_witness() {
        let mut storage = funded_storage(1000);
        let (result, _) = run(&mut storage, &StaticWitness::none(), bob().as_bytes(), 0);
        assert!(matches!(result, Err(TokenError::NonPositiveAmount { .. })));
    }

    #[test]
    fn test_unauthorized_fails_even_when_funded() {
        let mut storage = funded_storage(1000);
        let witness = StaticWitness::new([bob()]);

        let (result, events) = run(&mut storage, &witness, bob().as_bytes(), 10);

        assert_eq!(result, Err(TokenError::Unauthorized { account: alice() }));
        assert_eq!(events, 0);
        assert_eq!(balance(&mut storage, &alice()), Balance::from(1000u64));
    }

    #[test]
    fn test_malformed_recipient() {
        let mut storage = funded_storage(1000);
        let witness = StaticWitness::new([alice()]);

        let (result, _) = run(&mut storage, &witness, &[2u8; 19], 1);

        assert_eq!(result, Err(TokenError::InvalidAccountLength { actual: 19 }));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut storage = funded_storage(499);
        let witness = StaticWitness::new([alice()]);

        let (result, events) = run(&mut storage, &witness, bob().as_bytes(), 500);

        assert_eq!(
            result,
            Err(TokenError::InsufficientBalance {
                available: Balance::from(499u64),
                requested: Balance::from(500u64),
            })
        );
        assert_eq!(events, 0);
        assert_eq!(balance(&mut storage, &bob()), Balance::zero());
    }

    #[test]
    fn test_self_transfer_leaves_balance_untouched() {
        let mut storage = funded_storage(700);
        let witness = StaticWitness::new([alice()]);

        let (result, events) = run(&mut storage, &witness, alice().as_bytes(), 700);
        assert!(result.is_ok());
        assert_eq!(events, 0);
        assert_eq!(balance(&mut storage, &alice()), Balance::from(700u64));

        let (result, _) = run(&mut storage, &witness, alice().as_bytes(), 701);
        assert!(matches!(result, Err(TokenError::InsufficientBalance { .. })));
    }

    #[test]
    fn test_corrupt_recipient_entry_leaves_sender_untouched() {
        let mut storage = funded_storage(1000);
        storage.put(bob().as_bytes(), vec![0xfb]);
        let witness = StaticWitness::new([alice()]);

        let (result, events) = run(&mut storage, &witness, bob().as_bytes(), 10);

        assert!(matches!(result, Err(TokenError::CorruptStorage { .. })));
        assert_eq!(events, 0);
        assert_eq!(balance(&mut storage, &alice()), Balance::from(1000u64));
    }
}
