use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{hex, U256};

use crate::{
    encoding::{SELECTOR_LENGTH, WORD_LENGTH},
    AbiType, Error, FunctionSignature, Param, Result, TypedValue,
};

/// Decode the arguments of a call of `signature` from `call_data` (selector included).
///
/// Only canonical encodings are accepted: decoded arguments must encode back to the same bytes
/// and integers must fit in their declared width. Bytes past the encoded tuple are ignored.
pub fn decode(signature: &FunctionSignature, call_data: &[u8]) -> Result<Vec<TypedValue>> {
    if call_data.len() < SELECTOR_LENGTH {
        return Err(Error::Truncated {
            needed: SELECTOR_LENGTH,
            actual: call_data.len(),
        });
    }

    let (selector, arguments) = call_data.split_at(SELECTOR_LENGTH);
    let expected = signature.selector();
    if selector != expected {
        return Err(Error::SelectorMismatch {
            expected: hex::encode(expected),
            actual: hex::encode(selector),
        });
    }

    let params = signature.params();
    let head_length = params.len() * WORD_LENGTH;
    if arguments.len() < head_length {
        return Err(Error::Truncated {
            needed: SELECTOR_LENGTH + head_length,
            actual: call_data.len(),
        });
    }

    let tuple = DynSolType::Tuple(params.iter().map(|param| param.kind.to_sol_type()).collect());
    let DynSolValue::Tuple(decoded) = tuple
        .abi_decode_params(arguments)
        .map_err(|err| Error::Decoding(err.to_string()))?
    else {
        return Err(Error::Decoding("arguments did not decode to a tuple".to_string()));
    };

    let values = decoded
        .into_iter()
        .map(TypedValue::try_from)
        .collect::<Result<Vec<_>>>()?;

    for (index, (param, value)) in params.iter().zip(&values).enumerate() {
        value
            .check_type(&param.kind)
            .map_err(|_| Error::InvalidEncoding {
                index,
                reason: "integer exceeds the declared width",
            })?;
    }

    let canonical =
        DynSolValue::Tuple(values.iter().map(TypedValue::to_sol_value).collect())
            .abi_encode_params();
    if let Some(position) = first_difference(&canonical, arguments) {
        let index = owning_param(params, &canonical, position);
        return Err(Error::InvalidEncoding {
            index,
            reason: non_canonical_reason(&params[index].kind),
        });
    }

    Ok(values)
}

fn first_difference(canonical: &[u8], arguments: &[u8]) -> Option<usize> {
    canonical
        .iter()
        .zip(arguments)
        .position(|(expected, actual)| expected != actual)
        .or((arguments.len() < canonical.len()).then_some(arguments.len()))
}

/// Index of the parameter whose encoding covers `position` of the canonical tuple encoding.
/// Tails are laid out in parameter order, after the head.
fn owning_param(params: &[Param], canonical: &[u8], position: usize) -> usize {
    let head_length = params.len() * WORD_LENGTH;
    if position < head_length {
        return position / WORD_LENGTH;
    }

    params
        .iter()
        .enumerate()
        .filter(|(_, param)| param.kind.is_dynamic())
        .filter(|(index, _)| {
            let head = &canonical[index * WORD_LENGTH..(index + 1) * WORD_LENGTH];
            usize::try_from(U256::from_be_slice(head)).is_ok_and(|offset| offset <= position)
        })
        .map(|(index, _)| index)
        .last()
        .unwrap_or_default()
}

fn non_canonical_reason(kind: &AbiType) -> &'static str {
    match kind {
        AbiType::Address => "address has non-zero padding",
        AbiType::Uint(_) => "integer is not canonically encoded",
        AbiType::Bool => "boolean is neither 0 nor 1",
        AbiType::Bytes => "bytes are not canonically encoded",
        AbiType::String => "string is not valid UTF-8 or not canonically encoded",
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use rstest::rstest;

    use super::*;
    use crate::encode;

    fn supply() -> FunctionSignature {
        FunctionSignature::parse("supply(address,uint256,address,uint16)").unwrap()
    }

    fn supply_args() -> Vec<TypedValue> {
        vec![
            TypedValue::Address(address!("4200000000000000000000000000000000000006")),
            TypedValue::uint256(U256::from(10_000_000_000_000_000u64)),
            TypedValue::Address(address!("c9c19c9d84bf5f6af1047de5a0b5cb2abf90d5f2")),
            TypedValue::uint(16, U256::ZERO),
        ]
    }

    #[test]
    fn supply_round_trip() {
        let call = encode(&supply(), &supply_args()).unwrap();
        assert_eq!(decode(&supply(), call.as_bytes()), Ok(supply_args()));
    }

    #[rstest]
    #[case("f(bytes,string)", vec![TypedValue::Bytes(vec![]), TypedValue::String(String::new())])]
    #[case(
        "f(string,bool,bytes)",
        vec![
            TypedValue::String("zażółć gęślą jaźń".to_string()),
            TypedValue::Bool(true),
            TypedValue::Bytes(vec![0x11; 65]),
        ]
    )]
    fn dynamic_round_trip(#[case] signature: &str, #[case] args: Vec<TypedValue>) {
        let signature = FunctionSignature::parse(signature).unwrap();
        let call = encode(&signature, &args).unwrap();
        assert_eq!(decode(&signature, call.as_bytes()), Ok(args));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut data = Vec::from(encode(&supply(), &supply_args()).unwrap());
        data.extend_from_slice(&[0xff; 3]);
        assert_eq!(decode(&supply(), &data), Ok(supply_args()));
    }

    #[test]
    fn other_function_is_rejected() {
        let call = encode(&supply(), &supply_args()).unwrap();
        let withdraw = FunctionSignature::parse("withdraw(address,uint256,address)").unwrap();
        assert!(matches!(
            decode(&withdraw, call.as_bytes()),
            Err(Error::SelectorMismatch { .. })
        ));
    }

    #[test]
    fn truncated_head() {
        let call = encode(&supply(), &supply_args()).unwrap();
        let short = &call.as_bytes()[..call.len() - 1];
        assert_eq!(
            decode(&supply(), short),
            Err(Error::Truncated {
                needed: call.len(),
                actual: call.len() - 1
            })
        );
        assert_eq!(
            decode(&supply(), &[0x61, 0x7b]),
            Err(Error::Truncated {
                needed: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn dirty_address_padding() {
        let mut data = Vec::from(encode(&supply(), &supply_args()).unwrap());
        data[SELECTOR_LENGTH] = 1;
        assert_eq!(
            decode(&supply(), &data),
            Err(Error::InvalidEncoding {
                index: 0,
                reason: "address has non-zero padding"
            })
        );
    }

    #[test]
    fn referral_code_wider_than_declared() {
        let mut data = Vec::from(encode(&supply(), &supply_args()).unwrap());
        // Third-to-last byte of the referral code word lies outside of 16 bits.
        let position = data.len() - 3;
        data[position] = 1;
        assert!(matches!(
            decode(&supply(), &data),
            Err(Error::InvalidEncoding { index: 3, .. })
        ));
    }

    #[test]
    fn boolean_out_of_range() {
        let signature = FunctionSignature::parse("f(bool)").unwrap();
        let mut data = Vec::from(encode(&signature, &[TypedValue::Bool(true)]).unwrap());
        let last = data.len() - 1;
        data[last] = 2;
        assert!(matches!(
            decode(&signature, &data),
            Err(Error::InvalidEncoding { index: 0, .. })
        ));
    }

    #[test]
    fn dirty_padding_of_the_second_dynamic_value() {
        let signature = FunctionSignature::parse("f(bytes,bytes)").unwrap();
        let mut data = Vec::from(
            encode(
                &signature,
                &[TypedValue::Bytes(vec![1]), TypedValue::Bytes(vec![2])],
            )
            .unwrap(),
        );
        let last = data.len() - 1;
        data[last] = 0xff;
        assert!(matches!(
            decode(&signature, &data),
            Err(Error::InvalidEncoding { index: 1, .. })
        ));
    }

    #[test]
    fn offset_out_of_bounds() {
        let signature = FunctionSignature::parse("f(bytes)").unwrap();
        let mut data =
            Vec::from(encode(&signature, &[TypedValue::Bytes(vec![1, 2])]).unwrap());
        // Point the offset past the end of the data.
        data[SELECTOR_LENGTH + WORD_LENGTH - 1] = 0xff;
        assert!(matches!(decode(&signature, &data), Err(Error::Decoding(_))));
    }

    #[test]
    fn invalid_utf8() {
        let signature = FunctionSignature::parse("f(string)").unwrap();
        let mut data =
            Vec::from(encode(&signature, &[TypedValue::String("ab".to_string())]).unwrap());
        data[SELECTOR_LENGTH + 2 * WORD_LENGTH] = 0xff;
        assert!(matches!(
            decode(&signature, &data),
            Err(Error::InvalidEncoding { index: 0, .. }) | Err(Error::Decoding(_))
        ));
    }
}
