//! Operation Dispatcher
//!
//! Bridge between the host's untyped calling convention (operation name
//! plus positional [`ContractParameter`]s) and the typed
//! [`TokenOperation`] the contract executes.
//!
//! ## Result policy
//!
//! Nothing faults across this boundary:
//! - failed operations return `false` (`balanceOf` returns `0`)
//! - argument count or kind mismatches return the same safe default
//! - unknown operation names return `true`
//! - non-application triggers return `true` without touching state

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nep5_common::{
    events::TokenEvent,
    types::{AccountId, ContractParameter, ContractPropertyState, MigrateRequest, TokenOperation, TriggerType},
    TokenError, TokenResult,
};

use crate::{execute, TokenContext};

const TRANSFER_ARGS: usize = 3;
const BALANCE_OF_ARGS: usize = 1;
const MIGRATE_ARGS: usize = 9;

// ============ Wire Types ============

/// One call into the contract as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub trigger: TriggerType,
    pub operation: String,
    pub args: Vec<ContractParameter>,
    /// Accounts whose witnesses accompany the call
    #[serde(default)]
    pub witnesses: Vec<AccountId>,
}

impl Invocation {
    /// Application-triggered call with no witnesses
    pub fn application(operation: impl Into<String>, args: Vec<ContractParameter>) -> Self {
        Self {
            trigger: TriggerType::Application,
            operation: operation.into(),
            args,
            witnesses: Vec::new(),
        }
    }

    pub fn with_witness(mut self, account: AccountId) -> Self {
        self.witnesses.push(account);
        self
    }
}

/// Result value plus the notifications to publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub value: ContractParameter,
    pub notifications: Vec<TokenEvent>,
}

impl Outcome {
    fn value(value: ContractParameter) -> Self {
        Self {
            value,
            notifications: Vec::new(),
        }
    }

    /// True when the value is boolean `true`
    pub fn succeeded(&self) -> bool {
        self.value == ContractParameter::Boolean(true)
    }
}

// ============ Dispatch ============

/// Route an invocation to the contract and collapse any error into the
/// operation's safe default.
pub fn dispatch(ctx: &mut TokenContext<'_>, invocation: &Invocation) -> Outcome {
    if invocation.trigger != TriggerType::Application {
        debug!(trigger = ?invocation.trigger, "non-application trigger, nothing to do");
        return Outcome::value(true.into());
    }

    let operation = match parse_operation(&invocation.operation, &invocation.args) {
        Ok(Some(operation)) => operation,
        Ok(None) => {
            debug!(operation = %invocation.operation, "unknown operation, falling through");
            return Outcome::value(true.into());
        }
        Err(err) => {
            debug!(operation = %invocation.operation, code = err.code(), %err, "malformed arguments");
            return Outcome::value(failure_value(&invocation.operation));
        }
    };

    match execute(ctx, &operation) {
        Ok(value) => Outcome {
            value,
            notifications: ctx.events.drain(),
        },
        Err(err) => {
            debug!(
                operation = operation.name(),
                code = err.code(),
                recoverable = err.is_recoverable(),
                %err,
                "operation failed"
            );
            ctx.events.clear();
            Outcome::value(failure_value(operation.name()))
        }
    }
}

/// Safe default returned when an operation fails
pub fn failure_value(operation: &str) -> ContractParameter {
    match operation {
        "balanceOf" => ContractParameter::Integer(BigInt::from(0)),
        _ => ContractParameter::Boolean(false),
    }
}

/// Decode an operation name and its positional arguments.
///
/// `Ok(None)` means the name is not one the contract knows. Operations
/// without parameters ignore any arguments supplied.
pub fn parse_operation(operation: &str, args: &[ContractParameter]) -> TokenResult<Option<TokenOperation>> {
    let parsed = match operation {
        "deploy" => TokenOperation::Deploy,
        "totalSupply" => TokenOperation::TotalSupply,
        "name" => TokenOperation::Name,
        "symbol" => TokenOperation::Symbol,
        "decimals" => TokenOperation::Decimals,
        "owner" => TokenOperation::Owner,
        "transfer" => {
            expect_args("transfer", args, TRANSFER_ARGS)?;
            TokenOperation::Transfer {
                from: AccountId::from_slice(bytes_arg(args, 0)?)?,
                to: bytes_arg(args, 1)?.to_vec(),
                amount: integer_arg(args, 2)?,
            }
        }
        "balanceOf" => {
            expect_args("balanceOf", args, BALANCE_OF_ARGS)?;
            TokenOperation::BalanceOf {
                account: AccountId::from_slice(bytes_arg(args, 0)?)?,
            }
        }
        "migrate" => {
            expect_args("migrate", args, MIGRATE_ARGS)?;
            TokenOperation::Migrate(MigrateRequest {
                script: bytes_arg(args, 0)?.to_vec(),
                parameter_list: bytes_arg(args, 1)?.to_vec(),
                return_type: byte_arg(args, 2)?,
                properties: ContractPropertyState::from_bits(byte_arg(args, 3)?),
                name: string_arg(args, 4)?,
                version: string_arg(args, 5)?,
                author: string_arg(args, 6)?,
                email: string_arg(args, 7)?,
                description: string_arg(args, 8)?,
            })
        }
        "delete" => TokenOperation::Delete,
        _ => return Ok(None),
    };
    Ok(Some(parsed))
}

// ============ Argument Helpers ============

fn expect_args(operation: &'static str, args: &[ContractParameter], expected: usize) -> TokenResult<()> {
    if args.len() != expected {
        return Err(TokenError::ArgumentCount {
            operation,
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn bytes_arg(args: &[ContractParameter], index: usize) -> TokenResult<&[u8]> {
    args[index]
        .as_bytes()
        .ok_or(TokenError::ArgumentType {
            index,
            expected: "byte array",
            actual: args[index].kind(),
        })
}

fn integer_arg(args: &[ContractParameter], index: usize) -> TokenResult<BigInt> {
    args[index]
        .as_integer()
        .ok_or(TokenError::ArgumentType {
            index,
            expected: "integer",
            actual: args[index].kind(),
        })
}

fn byte_arg(args: &[ContractParameter], index: usize) -> TokenResult<u8> {
    integer_arg(args, index)?.to_u8().ok_or(TokenError::ArgumentType {
        index,
        expected: "byte",
        actual: args[index].kind(),
    })
}

fn string_arg(args: &[ContractParameter], index: usize) -> TokenResult<String> {
    args[index]
        .as_str()
        .map(String::from)
        .ok_or(TokenError::ArgumentType {
            index,
            expected: "string",
            actual: args[index].kind(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(byte: u8) -> ContractParameter {
        ContractParameter::ByteArray(vec![byte; 20])
    }

    fn int(value: i64) -> ContractParameter {
        ContractParameter::Integer(BigInt::from(value))
    }

    fn text(value: &str) -> ContractParameter {
        ContractParameter::String(value.into())
    }

    #[test]
    fn test_parse_transfer() {
        let op = parse_operation("transfer", &[account(1), account(2), int(500)]).unwrap();
        assert_eq!(
            op,
            Some(TokenOperation::Transfer {
                from: AccountId::new([1u8; 20]),
                to: vec![2u8; 20],
                amount: BigInt::from(500),
            })
        );
    }

    #[test]
    fn test_transfer_keeps_malformed_recipient_raw() {
        let op = parse_operation("transfer", &[account(1), ContractParameter::ByteArray(vec![9; 4]), int(1)]);
        assert!(matches!(op, Ok(Some(TokenOperation::Transfer { ref to, .. })) if to.len() == 4));
    }

    #[test]
    fn test_argument_count_mismatch() {
        assert_eq!(
            parse_operation("transfer", &[account(1), account(2)]),
            Err(TokenError::ArgumentCount { operation: "transfer", expected: 3, actual: 2 })
        );
        assert!(parse_operation("balanceOf", &[]).is_err());
        assert!(parse_operation("migrate", &vec![int(0); 8]).is_err());
    }

    #[test]
    fn test_argument_kind_mismatch() {
        assert_eq!(
            parse_operation("transfer", &[int(1), account(2), int(5)]),
            Err(TokenError::ArgumentType { index: 0, expected: "byte array", actual: "integer" })
        );
        assert_eq!(
            parse_operation("transfer", &[account(1), account(2), text("5")]),
            Err(TokenError::ArgumentType { index: 2, expected: "integer", actual: "string" })
        );
    }

    #[test]
    fn test_parse_migrate() {
        let args = [
            ContractParameter::ByteArray(vec![0x51]),
            ContractParameter::ByteArray(vec![0x07, 0x10]),
            int(5),
            int(1),
            text("token"),
            text("2.0"),
            text("author"),
            text("a@b.c"),
            text("desc"),
        ];
        let Some(TokenOperation::Migrate(request)) = parse_operation("migrate", &args).unwrap() else {
            panic!("Expected Migrate operation");
        };
        assert_eq!(request.return_type, 5);
        assert!(request.properties.has_storage());
        assert_eq!(request.description, "desc");

        let mut bad = args.clone();
        bad[2] = int(300);
        assert_eq!(
            parse_operation("migrate", &bad),
            Err(TokenError::ArgumentType { index: 2, expected: "byte", actual: "integer" })
        );
    }

    #[test]
    fn test_unknown_and_parameterless_operations() {
        assert_eq!(parse_operation("approve", &[]), Ok(None));
        assert_eq!(parse_operation("Transfer", &[]), Ok(None));
        assert_eq!(parse_operation("name", &[int(1)]), Ok(Some(TokenOperation::Name)));
    }

    #[test]
    fn test_failure_values() {
        assert_eq!(failure_value("balanceOf"), int(0));
        assert_eq!(failure_value("transfer"), ContractParameter::Boolean(false));
        assert_eq!(failure_value("migrate"), ContractParameter::Boolean(false));
    }
}
