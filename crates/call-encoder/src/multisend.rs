//! Batching several transactions into a single Safe `MultiSend` call.
//!
//! The `MultiSend` contract takes one `bytes` argument: the transactions packed one after
//! another as `operation (1 byte) ++ to (20 bytes) ++ value (32 bytes) ++ data length (32 bytes)
//! ++ data`. The Safe must execute it with [Operation::DelegateCall].
use alloy_primitives::{Address, Bytes, I256, U256};
use alloy_sol_types::{sol_data, SolType};
use tracing::debug;

use crate::{
    build_transaction, encode, AbiType, Error, FunctionSignature,
    Operation, Param, Result, StateMutability, TransactionDescription, TypedValue,
};

/// `multiSend(bytes transactions) payable`
pub fn multi_send_signature() -> FunctionSignature {
    FunctionSignature::new(
        "multiSend",
        vec![Param::new("transactions", AbiType::Bytes)],
        StateMutability::Payable,
    )
}

/// Packed encoding of `transactions`, the argument of `multiSend`.
pub fn pack(transactions: &[TransactionDescription]) -> Vec<u8> {
    transactions
        .iter()
        .flat_map(|tx| {
            <(
                sol_data::Uint<8>,
                sol_data::Address,
                sol_data::Uint<256>,
                sol_data::Uint<256>,
                sol_data::Bytes,
            )>::abi_encode_packed(&(
                u8::from(tx.operation),
                tx.target,
                tx.value,
                U256::from(tx.data.len()),
                Bytes::copy_from_slice(tx.data.as_bytes()),
            ))
        })
        .collect()
}

/// One transaction executing all of `transactions` in order through the `MultiSend` contract
/// deployed at `multisend`. Native value of the inner transactions is paid from the Safe balance,
/// so the outer transaction carries none.
pub fn batch(
    multisend: Address,
    transactions: &[TransactionDescription],
) -> Result<TransactionDescription> {
    if transactions.is_empty() {
        return Err(Error::Arity {
            expected: 1,
            actual: 0,
        });
    }

    let packed = pack(transactions);
    debug!(
        count = transactions.len(),
        length = packed.len(),
        "Packed MultiSend batch"
    );

    let call = encode(&multi_send_signature(), &[TypedValue::Bytes(packed)])?;
    build_transaction(
        multisend,
        I256::ZERO,
        call,
        Operation::DelegateCall.into(),
    )
}
