//! FID token acknowledgments.
//!
//! During IDPS the accessory declares its capabilities as FID tokens. Each
//! token the handler recognises is acknowledged with a fixed record: record
//! length, FID type, FID subtype, then status bytes. Unrecognised tokens
//! produce no record but still count toward the number of acknowledgments
//! reported back.

use bytes::{BufMut, Bytes, BytesMut};

use super::response::ResponseMessage;
use super::types::FidToken;

/// Acknowledgment record for a single token, `None` for unknown tokens
pub fn fid_ack_record(token: FidToken) -> Option<&'static [u8]> {
    let record: &'static [u8] = match (token.fid_type, token.fid_subtype) {
        // IdentifyToken
        (0x00, 0x00) => &[0x03, 0x00, 0x00, 0x00],
        // AccCapsToken
        (0x00, 0x01) => &[0x03, 0x00, 0x01, 0x00],
        // AccInfoToken
        (0x00, 0x02) => &[0x04, 0x00, 0x02, 0x00],
        // iPodPreferenceToken
        (0x00, 0x03) => &[0x04, 0x00, 0x03, 0x00, 0x00],
        // EAProtocolToken
        (0x00, 0x04) => &[0x04, 0x00, 0x04, 0x00, 0x00],
        // BundleSeedIDPrefToken
        (0x00, 0x05) => &[0x03, 0x00, 0x05, 0x00],
        // ScreenInfoToken
        (0x00, 0x07) => &[0x03, 0x00, 0x07, 0x00],
        // EAProtocolMetadataToken
        (0x00, 0x08) => &[0x03, 0x00, 0x08, 0x00],
        // MicrophoneCapsToken
        (0x01, 0x00) => &[0x03, 0x01, 0x00, 0x00],
        _ => return None,
    };
    Some(record)
}

/// Concatenate the acknowledgment records for `tokens`, in order
pub fn encode_fid_tokens(tokens: &[FidToken]) -> Bytes {
    let mut buf = BytesMut::new();
    for token in tokens {
        match fid_ack_record(*token) {
            Some(record) => buf.put_slice(record),
            None => tracing::debug!(
                "No ack record for FID token {:#04x}/{:#04x}",
                token.fid_type,
                token.fid_subtype
            ),
        }
    }
    buf.freeze()
}

/// Largest batch whose token count fits the one-byte count field
pub const MAX_FID_TOKENS: usize = u8::MAX as usize;

/// Build the `RetFIDTokenValueACKs` response for a `SetFIDTokenValues` batch.
///
/// Returns `None` when the batch holds more than [`MAX_FID_TOKENS`] tokens.
pub fn ack_fid_tokens(tokens: &[FidToken]) -> Option<ResponseMessage> {
    let count = u8::try_from(tokens.len()).ok()?;
    Some(ResponseMessage::RetFIDTokenValueACKs {
        count,
        acks: encode_fid_tokens(tokens),
    })
}
