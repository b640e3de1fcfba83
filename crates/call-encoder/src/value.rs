use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{hex, Address, U256};
use serde_json::{json, Value};

use crate::{abi_type::MAX_UINT_BITS, AbiType, Error, MismatchReason};

/// A single argument of a function call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedValue {
    Address(Address),
    /// Unsigned integer tagged with the width of the parameter it is meant for.
    Uint {
        value: U256,
        bits: usize,
    },
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
}

impl TypedValue {
    pub fn uint(bits: usize, value: U256) -> Self {
        Self::Uint { value, bits }
    }

    pub fn uint256(value: U256) -> Self {
        Self::uint(MAX_UINT_BITS, value)
    }

    /// Name of the type this value carries.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Uint { .. } => "uint",
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
        }
    }

    /// Checks that the value can be passed where `expected` is declared. No coercion happens:
    /// an integer must be tagged with exactly the declared width and fit in it.
    pub fn check_type(&self, expected: &AbiType) -> Result<(), MismatchReason> {
        match (self, expected) {
            (Self::Address(_), AbiType::Address)
            | (Self::Bool(_), AbiType::Bool)
            | (Self::Bytes(_), AbiType::Bytes)
            | (Self::String(_), AbiType::String) => Ok(()),
            (Self::Uint { value, bits }, AbiType::Uint(declared)) => {
                if bits != declared {
                    Err(MismatchReason::WidthMismatch { supplied: *bits })
                } else if value.bit_len() > *declared {
                    Err(MismatchReason::Overflow { bits: *declared })
                } else {
                    Ok(())
                }
            }
            _ => Err(MismatchReason::WrongKind {
                supplied: self.kind_name(),
            }),
        }
    }

    /// JSON rendering used when printing decoded arguments. Integers are decimal strings, so
    /// that 256-bit values survive JSON consumers limited to doubles.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Address(address) => json!(address.to_checksum(None)),
            Self::Uint { value, .. } => json!(value.to_string()),
            Self::Bool(flag) => json!(flag),
            Self::Bytes(bytes) => json!(hex::encode_prefixed(bytes)),
            Self::String(string) => json!(string),
        }
    }

    pub fn to_sol_value(&self) -> DynSolValue {
        match self {
            Self::Address(address) => DynSolValue::Address(*address),
            Self::Uint { value, bits } => DynSolValue::Uint(*value, *bits),
            Self::Bool(flag) => DynSolValue::Bool(*flag),
            Self::Bytes(bytes) => DynSolValue::Bytes(bytes.clone()),
            Self::String(string) => DynSolValue::String(string.clone()),
        }
    }
}

impl TryFrom<DynSolValue> for TypedValue {
    type Error = Error;

    fn try_from(value: DynSolValue) -> Result<Self, Self::Error> {
        match value {
            DynSolValue::Address(address) => Ok(Self::Address(address)),
            DynSolValue::Uint(value, bits) => Ok(Self::Uint { value, bits }),
            DynSolValue::Bool(flag) => Ok(Self::Bool(flag)),
            DynSolValue::Bytes(bytes) => Ok(Self::Bytes(bytes)),
            DynSolValue::String(string) => Ok(Self::String(string)),
            other => Err(Error::Decoding(format!(
                "unsupported value of type `{}`",
                other
                    .sol_type_name()
                    .unwrap_or_else(|| "unknown".into())
            ))),
        }
    }
}

impl From<Address> for TypedValue {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<bool> for TypedValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<String> for TypedValue {
    fn from(string: String) -> Self {
        Self::String(string)
    }
}

impl From<Vec<u8>> for TypedValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
