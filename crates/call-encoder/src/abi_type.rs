use core::fmt;
use std::str::FromStr;

use alloy_dyn_abi::DynSolType;

use crate::Error;

/// Largest width of an unsigned integer parameter.
pub const MAX_UINT_BITS: usize = 256;

/// Type of a single function parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbiType {
    Address,
    /// Unsigned integer of the given width, a multiple of 8 in `8..=256`.
    Uint(usize),
    Bool,
    Bytes,
    String,
}

impl AbiType {
    /// Dynamic types are encoded as an offset in the head and their content in the tail.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes | Self::String)
    }

    pub fn to_sol_type(&self) -> DynSolType {
        match self {
            Self::Address => DynSolType::Address,
            Self::Uint(bits) => DynSolType::Uint(*bits),
            Self::Bool => DynSolType::Bool,
            Self::Bytes => DynSolType::Bytes,
            Self::String => DynSolType::String,
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Bool => f.write_str("bool"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
        }
    }
}

impl FromStr for AbiType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(Self::Address),
            "bool" => Ok(Self::Bool),
            "bytes" => Ok(Self::Bytes),
            "string" => Ok(Self::String),
            "uint" => Ok(Self::Uint(MAX_UINT_BITS)),
            _ => s
                .strip_prefix("uint")
                // `uint016` is not a valid type name.
                .filter(|width| !width.starts_with('0'))
                .and_then(|width| width.parse::<usize>().ok())
                .filter(|bits| *bits > 0 && *bits <= MAX_UINT_BITS && bits % 8 == 0)
                .map(Self::Uint)
                .ok_or_else(|| Error::UnknownType(s.to_string())),
        }
    }
}
