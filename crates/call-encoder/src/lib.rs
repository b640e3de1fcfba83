//! Contract call encoding for Safe transaction batches.
//!
//! Contains:
//! - function signatures and their parameter types: [FunctionSignature], [AbiType];
//! - typed argument values: [TypedValue];
//! - ABI encoding and decoding of calls: [encode], [decode], [EncodedCall];
//! - transaction descriptions ready for a Safe batch: [build_transaction],
//!   [TransactionDescription];
//! - packing several transactions into one MultiSend call: [multisend];
//! - signatures of the lending pool, ERC20 and WETH functions: [presets].
use core::result;

use alloy_primitives::I256;

mod abi_type;
mod decoding;
mod encoding;
pub mod multisend;
pub mod presets;
mod signature;
mod transaction;
mod value;

pub use abi_type::AbiType;
pub use alloy_primitives;
pub use decoding::decode;
pub use encoding::{encode, EncodedCall, SELECTOR_LENGTH, WORD_LENGTH};
pub use signature::{FunctionSignature, Param, StateMutability};
pub use transaction::{build_transaction, Operation, TransactionDescription};
pub use value::TypedValue;

/// Why a supplied argument does not fit its declared parameter type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MismatchReason {
    /// The value is of a different kind altogether (e.g. a string where an address is expected).
    WrongKind { supplied: &'static str },
    /// An unsigned integer was tagged with a different bit width than the declared one.
    WidthMismatch { supplied: usize },
    /// An unsigned integer does not fit in the declared bit width.
    Overflow { bits: usize },
}

impl core::fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WrongKind { supplied } => write!(f, "got a value of type `{supplied}`"),
            Self::WidthMismatch { supplied } => write!(f, "got a {supplied}-bit integer"),
            Self::Overflow { bits } => write!(f, "value does not fit in {bits} bits"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected {expected} arguments, got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("argument {index} does not match the declared type `{expected}`: {reason}")]
    TypeMismatch {
        index: usize,
        expected: AbiType,
        reason: MismatchReason,
    },

    #[error("unrecognized operation code {0}")]
    InvalidOperation(u8),

    #[error("native value cannot be negative, got {0}")]
    NegativeValue(I256),

    #[error("unsupported parameter type `{0}`")]
    UnknownType(String),

    #[error("malformed function signature `{0}`")]
    MalformedSignature(String),

    #[error("function `{0}` is not present in the ABI")]
    FunctionNotFound(String),

    #[error("failed to read JSON ABI: {0}")]
    JsonAbi(String),

    #[error("call data is meant for selector 0x{expected}, got 0x{actual}")]
    SelectorMismatch { expected: String, actual: String },

    #[error("call data is too short: at least {needed} bytes needed, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("call data cannot be decoded: {0}")]
    Decoding(String),

    #[error("argument {index} is not canonically encoded: {reason}")]
    InvalidEncoding { index: usize, reason: &'static str },
}

pub type Result<T> = result::Result<T, Error>;
