use core::fmt;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::hex;
use tracing::debug;

use crate::{Error, FunctionSignature, Result, TypedValue};

pub const SELECTOR_LENGTH: usize = 4;
pub const WORD_LENGTH: usize = 32;

/// Call data of a single contract call: the 4-byte selector followed by the ABI-encoded argument
/// tuple. Once created, it is never modified.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedCall(Vec<u8>);

impl EncodedCall {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn selector(&self) -> [u8; SELECTOR_LENGTH] {
        let mut selector = [0u8; SELECTOR_LENGTH];
        selector.copy_from_slice(&self.0[..SELECTOR_LENGTH]);
        selector
    }

    /// The encoded argument tuple, without the selector.
    pub fn arguments(&self) -> &[u8] {
        &self.0[SELECTOR_LENGTH..]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex with the `0x` prefix, as expected by the Safe transaction builder.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.0)
    }
}

impl fmt::Debug for EncodedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedCall({})", self.to_hex())
    }
}

impl AsRef<[u8]> for EncodedCall {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<EncodedCall> for Vec<u8> {
    fn from(call: EncodedCall) -> Self {
        call.0
    }
}

/// Encode a call of `signature` with `args`.
///
/// The arguments are validated against the declared parameters before anything is encoded:
/// the count must match exactly and every value must carry the declared type.
pub fn encode(signature: &FunctionSignature, args: &[TypedValue]) -> Result<EncodedCall> {
    let params = signature.params();
    if params.len() != args.len() {
        return Err(Error::Arity {
            expected: params.len(),
            actual: args.len(),
        });
    }

    for (index, (param, arg)) in params.iter().zip(args).enumerate() {
        arg.check_type(&param.kind)
            .map_err(|reason| Error::TypeMismatch {
                index,
                expected: param.kind,
                reason,
            })?;
    }

    let selector = signature.selector();
    let arguments =
        DynSolValue::Tuple(args.iter().map(TypedValue::to_sol_value).collect()).abi_encode_params();

    let mut call_data = Vec::with_capacity(SELECTOR_LENGTH + arguments.len());
    call_data.extend_from_slice(&selector);
    call_data.extend_from_slice(&arguments);

    debug!(
        signature = %signature,
        selector = %hex::encode(selector),
        length = call_data.len(),
        "Encoded call"
    );

    Ok(EncodedCall(call_data))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Address, U256};

    use super::*;
    use crate::{AbiType, MismatchReason, Param, StateMutability};

    const ASSET: Address = address!("4200000000000000000000000000000000000006");
    const ON_BEHALF_OF: Address = address!("c9c19c9d84bf5f6af1047de5a0b5cb2abf90d5f2");
    const AMOUNT: u64 = 10_000_000_000_000_000;

    fn supply() -> FunctionSignature {
        FunctionSignature::parse("supply(address,uint256,address,uint16)").unwrap()
    }

    fn supply_args(referral_code: u64) -> Vec<TypedValue> {
        vec![
            TypedValue::Address(ASSET),
            TypedValue::uint256(U256::from(AMOUNT)),
            TypedValue::Address(ON_BEHALF_OF),
            TypedValue::uint(16, U256::from(referral_code)),
        ]
    }

    fn usize_word(value: usize) -> [u8; WORD_LENGTH] {
        U256::from(value).to_be_bytes::<WORD_LENGTH>()
    }

    fn word(hex_word: &str) -> Vec<u8> {
        let bytes = hex::decode(hex_word).unwrap();
        assert_eq!(bytes.len(), WORD_LENGTH);
        bytes
    }

    #[test]
    fn supply_layout() {
        let call = encode(&supply(), &supply_args(0)).unwrap();

        assert_eq!(call.len(), SELECTOR_LENGTH + 4 * WORD_LENGTH);
        assert_eq!(call.selector(), [0x61, 0x7b, 0xa0, 0x37]);

        let words = call.arguments().chunks(WORD_LENGTH).collect::<Vec<_>>();
        assert_eq!(
            words[0],
            word("0000000000000000000000004200000000000000000000000000000000000006")
        );
        assert_eq!(
            words[1],
            word("000000000000000000000000000000000000000000000000002386f26fc10000")
        );
        assert_eq!(
            words[2],
            word("000000000000000000000000c9c19c9d84bf5f6af1047de5a0b5cb2abf90d5f2")
        );
        assert_eq!(words[3], [0u8; WORD_LENGTH]);
    }

    #[test]
    fn arity_mismatch_produces_nothing() {
        let mut args = supply_args(0);
        args.pop();
        assert_eq!(
            encode(&supply(), &args),
            Err(Error::Arity {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn referral_code_overflow() {
        assert_eq!(
            encode(&supply(), &supply_args(65_536)),
            Err(Error::TypeMismatch {
                index: 3,
                expected: AbiType::Uint(16),
                reason: MismatchReason::Overflow { bits: 16 }
            })
        );
        assert!(encode(&supply(), &supply_args(65_535)).is_ok());
    }

    #[test]
    fn string_in_place_of_address() {
        let mut args = supply_args(0);
        args[2] = TypedValue::String(ON_BEHALF_OF.to_string());
        assert_eq!(
            encode(&supply(), &args),
            Err(Error::TypeMismatch {
                index: 2,
                expected: AbiType::Address,
                reason: MismatchReason::WrongKind { supplied: "string" }
            })
        );
    }

    #[test]
    fn no_arguments() {
        let deposit = FunctionSignature::parse("function deposit() payable").unwrap();
        let call = encode(&deposit, &[]).unwrap();
        assert_eq!(call.to_hex(), "0xd0e30db0");
        assert!(call.arguments().is_empty());
    }

    #[test]
    fn bool_is_a_full_word() {
        let signature = FunctionSignature::new(
            "setPaused",
            vec![Param::new("paused", AbiType::Bool)],
            StateMutability::NonPayable,
        );
        let call = encode(&signature, &[TypedValue::Bool(true)]).unwrap();
        let mut expected = [0u8; WORD_LENGTH];
        expected[WORD_LENGTH - 1] = 1;
        assert_eq!(call.arguments(), expected);
    }

    #[test]
    fn dynamic_arguments_go_to_the_tail() {
        let signature = FunctionSignature::parse("f(uint256,bytes,string)").unwrap();
        let call = encode(
            &signature,
            &[
                TypedValue::uint256(U256::from(7)),
                TypedValue::Bytes(vec![0xab; 33]),
                TypedValue::String("hi".to_string()),
            ],
        )
        .unwrap();

        let words = call.arguments().chunks(WORD_LENGTH).collect::<Vec<_>>();
        // head: value, offset of bytes, offset of string
        assert_eq!(words[0], usize_word(7));
        assert_eq!(words[1], usize_word(3 * WORD_LENGTH));
        assert_eq!(words[2], usize_word(7 * WORD_LENGTH));
        // bytes tail: length and two words of content
        assert_eq!(words[3], usize_word(33));
        assert_eq!(words[4], [0xab; WORD_LENGTH]);
        assert_eq!(words[5][0], 0xab);
        assert_eq!(words[5][1..], [0u8; WORD_LENGTH - 1]);
        // string tail
        assert_eq!(words[6], usize_word(2));
        assert_eq!(&words[7][..2], b"hi");
        assert_eq!(words.len(), 8);
    }

    #[test]
    fn empty_dynamic_value_is_only_a_length_word() {
        let signature = FunctionSignature::parse("f(bytes)").unwrap();
        let call = encode(&signature, &[TypedValue::Bytes(vec![])]).unwrap();
        assert_eq!(call.arguments().len(), 2 * WORD_LENGTH);
        assert_eq!(call.arguments()[WORD_LENGTH..], [0u8; WORD_LENGTH]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let first = encode(&supply(), &supply_args(3)).unwrap();
        let second = encode(&supply(), &supply_args(3)).unwrap();
        assert_eq!(first, second);
    }
}
