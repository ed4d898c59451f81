//! Property tests for FID token acknowledgment encoding.

use iap_general::protocol::fid::fid_ack_record;
use iap_general::protocol::{
    ack_fid_tokens, encode_fid_tokens, FidToken, ResponseMessage, MAX_FID_TOKENS,
};
use proptest::prelude::*;

fn token() -> impl Strategy<Value = FidToken> {
    prop_oneof![
        // Bias toward the recognised range
        (0u8..=1, 0u8..=9).prop_map(|(t, s)| FidToken::new(t, s)),
        any::<(u8, u8)>().prop_map(|(t, s)| FidToken::new(t, s)),
    ]
}

proptest! {
    #[test]
    fn count_matches_input(tokens in prop::collection::vec(token(), 0..400)) {
        match ack_fid_tokens(&tokens) {
            Some(ResponseMessage::RetFIDTokenValueACKs { count, .. }) => {
                prop_assert!(tokens.len() <= MAX_FID_TOKENS);
                prop_assert_eq!(count as usize, tokens.len());
            },
            None => prop_assert!(tokens.len() > MAX_FID_TOKENS),
            Some(other) => prop_assert!(false, "unexpected response {:?}", other),
        }
    }

    #[test]
    fn output_is_concatenated_records(tokens in prop::collection::vec(token(), 0..400)) {
        let expected: Vec<u8> = tokens
            .iter()
            .filter_map(|t| fid_ack_record(*t))
            .flatten()
            .copied()
            .collect();
        let encoded = encode_fid_tokens(&tokens);
        prop_assert_eq!(encoded.to_vec(), expected);
    }

    #[test]
    fn unknown_types_encode_nothing(
        raw in prop::collection::vec((2u8..=u8::MAX, any::<u8>()), 0..32)
    ) {
        let tokens: Vec<_> = raw.into_iter().map(|(t, s)| FidToken::new(t, s)).collect();
        prop_assert!(encode_fid_tokens(&tokens).is_empty());
    }
}
