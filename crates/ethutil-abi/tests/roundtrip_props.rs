//! Property tests for the ABI codec

use ethutil_abi::{
    build_value, decode, encode, parse_type, split_top_level, ParamType, Token, I256,
};
use ethutil_primitives::{Address, U256};
use proptest::collection::vec;
use proptest::prelude::*;

fn param_type() -> impl Strategy<Value = ParamType> {
    let leaf = prop_oneof![
        Just(ParamType::Address),
        Just(ParamType::Bool),
        Just(ParamType::String),
        Just(ParamType::Bytes),
        (1usize..=32).prop_map(ParamType::FixedBytes),
        (1usize..=32).prop_map(|n| ParamType::Uint(n * 8)),
        (1usize..=32).prop_map(|n| ParamType::Int(n * 8)),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            (inner.clone(), proptest::option::of(1usize..4)).prop_map(|(ty, len)| match ty {
                ParamType::Tuple(fields) => ParamType::TupleArray(fields, len),
                other => ParamType::Array(Box::new(other), len),
            }),
            vec(inner, 1..4).prop_map(ParamType::Tuple),
        ]
    })
}

fn token_for(ty: &ParamType) -> BoxedStrategy<Token> {
    match ty.clone() {
        ParamType::Address => any::<[u8; 20]>()
            .prop_map(|bytes| Token::Address(Address::from_bytes(bytes)))
            .boxed(),
        ParamType::Bool => any::<bool>().prop_map(Token::Bool).boxed(),
        ParamType::String => "[a-z0-9 ,]{0,40}".prop_map(Token::String).boxed(),
        ParamType::Bytes => vec(any::<u8>(), 0..70).prop_map(Token::Bytes).boxed(),
        ParamType::FixedBytes(size) => vec(any::<u8>(), size).prop_map(Token::FixedBytes).boxed(),
        ParamType::Uint(bits) => any::<[u8; 32]>()
            .prop_map(move |bytes| {
                let value = U256::from_big_endian(&bytes);
                let value = if bits == 256 {
                    value
                } else {
                    value & ((U256::one() << bits) - 1)
                };
                Token::Uint(value, bits)
            })
            .boxed(),
        ParamType::Int(bits) => any::<i64>()
            .prop_map(move |v| {
                let v = if bits < 64 { v >> (64 - bits) } else { v };
                Token::Int(I256::from_i128(v as i128), bits)
            })
            .boxed(),
        ParamType::Array(inner, len) => {
            let size = len.map_or(0..4, |k| k..k + 1);
            vec(token_for(&inner), size).prop_map(Token::Array).boxed()
        }
        ParamType::TupleArray(fields, len) => {
            let size = len.map_or(0..4, |k| k..k + 1);
            vec(token_for(&ParamType::Tuple(fields)), size)
                .prop_map(Token::Array)
                .boxed()
        }
        ParamType::Tuple(fields) => fields
            .iter()
            .map(token_for)
            .collect::<Vec<_>>()
            .prop_map(Token::Tuple)
            .boxed(),
    }
}

fn typed_value() -> impl Strategy<Value = (ParamType, Token)> {
    param_type().prop_flat_map(|ty| {
        let token = token_for(&ty);
        (Just(ty), token)
    })
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip((ty, token) in typed_value()) {
        let encoded = encode(&[ty.clone()], &[token.clone()]).unwrap();
        prop_assert_eq!(encoded.len() % 32, 0);
        let decoded = decode(&[ty], &encoded).unwrap();
        prop_assert_eq!(decoded, vec![token]);
    }

    #[test]
    fn prop_canonical_type_string_reparses(ty in param_type()) {
        prop_assert_eq!(parse_type(&ty.to_string()).unwrap(), ty);
    }

    #[test]
    fn prop_decode_arbitrary_bytes_never_panics(ty in param_type(), data in vec(any::<u8>(), 0..320)) {
        let _ = decode(&[ty], &data);
    }

    #[test]
    fn prop_uint_literal_roundtrip(v in any::<u128>()) {
        let token = build_value(&ParamType::Uint(256), &v.to_string()).unwrap();
        let encoded = encode(&[ParamType::Uint(256)], &[token]).unwrap();
        let decoded = decode(&[ParamType::Uint(256)], &encoded).unwrap();
        prop_assert_eq!(decoded, vec![Token::Uint(U256::from(v), 256)]);
    }

    #[test]
    fn prop_int_literal_roundtrip(v in any::<i64>()) {
        let ty = ParamType::Int(64);
        let token = build_value(&ty, &v.to_string()).unwrap();
        let encoded = encode(&[ty.clone()], &[token]).unwrap();
        let decoded = decode(&[ty], &encoded).unwrap();
        prop_assert_eq!(decoded[0].to_string(), v.to_string());
    }

    #[test]
    fn prop_split_never_fails(input in ".{0,64}") {
        prop_assert!(!split_top_level(&input).is_empty());
    }

    #[test]
    fn prop_uint_array_literal_roundtrip(values in vec(any::<u64>(), 0..8)) {
        let ty = parse_type("uint256[]").unwrap();
        let literal = format!(
            "[{}]",
            values.iter().map(u64::to_string).collect::<Vec<_>>().join(", ")
        );
        let token = build_value(&ty, &literal).unwrap();
        let encoded = encode(&[ty.clone()], &[token.clone()]).unwrap();
        prop_assert_eq!(encoded.len(), 64 + 32 * values.len());
        prop_assert_eq!(decode(&[ty], &encoded).unwrap(), vec![token]);
    }
}
