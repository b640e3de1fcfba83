use alloy_primitives::{Address, I256, U256};
use serde_json::{json, Value};
use tracing::debug;

use crate::{EncodedCall, Error, Result};

/// How the Safe executes the call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operation {
    Call = 0,
    /// Executes the target code in the storage context of the Safe itself.
    DelegateCall = 1,
}

impl TryFrom<u8> for Operation {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Call),
            1 => Ok(Self::DelegateCall),
            _ => Err(Error::InvalidOperation(code)),
        }
    }
}

impl From<Operation> for u8 {
    fn from(operation: Operation) -> Self {
        operation as u8
    }
}

/// A single transaction to be relayed by a Safe: where to call, how much native value to attach,
/// what to call and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDescription {
    pub target: Address,
    pub value: U256,
    pub data: EncodedCall,
    pub operation: Operation,
}

impl TransactionDescription {
    /// Entry of a Safe transaction batch: `[target, value, data, operation]`, with the address
    /// of the Safe prepended when given. The value is a decimal string and the data is
    /// `0x`-prefixed hex.
    pub fn to_batch_entry(&self, safe: Option<Address>) -> Value {
        let mut entry = Vec::with_capacity(5);
        if let Some(safe) = safe {
            entry.push(json!(safe.to_checksum(None)));
        }
        entry.push(json!(self.target.to_checksum(None)));
        entry.push(json!(self.value.to_string()));
        entry.push(json!(self.data.to_hex()));
        entry.push(json!(u8::from(self.operation)));
        Value::Array(entry)
    }
}

/// Wrap `call` into a transaction description.
///
/// `native_value` is the amount of the base currency sent along with the call and is unrelated
/// to any amount passed inside `call`. `operation` is the raw Safe operation code.
pub fn build_transaction(
    target: Address,
    native_value: I256,
    call: EncodedCall,
    operation: u8,
) -> Result<TransactionDescription> {
    if native_value.is_negative() {
        return Err(Error::NegativeValue(native_value));
    }
    let operation = Operation::try_from(operation)?;

    debug!(
        target = %target,
        value = %native_value,
        ?operation,
        "Built transaction description"
    );

    Ok(TransactionDescription {
        target,
        value: native_value.into_raw(),
        data: call,
        operation,
    })
}
