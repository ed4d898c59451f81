//! Authentication handshakes.
//!
//! Two exchanges run over the General lingo:
//!
//! - **Device authentication**: the handler asks the accessory for its
//!   certificate (`GetDevAuthenticationInfo`, sent after IDPS), then for a
//!   signature. Verdicts come from an [`AuthVerifier`].
//! - **iPod authentication**: the accessory asks the handler to prove itself.
//!   The handler answers with an empty version 1.1 certificate and echoes the
//!   challenge back as the signature.
//!
//! No cryptography happens here. [`PermissiveVerifier`] accepts everything and
//! is the default; a real verifier plugs in behind the same trait.

use bytes::Bytes;

use super::ack::ack_success;
use super::message::Request;
use super::response::ResponseMessage;
use super::types::{DevAuthInfoStatus, DevAuthStatus};

/// One section of the accessory certificate.
#[derive(Debug, Clone, Copy)]
pub struct CertificateSection<'a> {
    /// Authentication protocol major version
    pub major: u8,
    /// Authentication protocol minor version
    pub minor: u8,
    /// Index of this section
    pub current: u8,
    /// Index of the last section
    pub max: u8,
    /// Certificate bytes carried by this section
    pub data: &'a [u8],
}

impl CertificateSection<'_> {
    /// Whether more sections follow this one
    pub fn has_more(&self) -> bool {
        self.current < self.max
    }
}

/// Decides the outcome of device authentication.
pub trait AuthVerifier: Send + Sync {
    /// Verdict for the final certificate section
    fn verify_certificate(&self, section: &CertificateSection<'_>) -> DevAuthInfoStatus;

    /// Verdict for the accessory's signature
    fn verify_signature(&self, signature: &[u8]) -> DevAuthStatus;
}

/// Accepts every certificate and signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveVerifier;

impl AuthVerifier for PermissiveVerifier {
    fn verify_certificate(&self, _section: &CertificateSection<'_>) -> DevAuthInfoStatus {
        DevAuthInfoStatus::Supported
    }

    fn verify_signature(&self, _signature: &[u8]) -> DevAuthStatus {
        DevAuthStatus::Passed
    }
}

/// Refuses device authentication outright.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingVerifier;

impl AuthVerifier for RejectingVerifier {
    fn verify_certificate(&self, _section: &CertificateSection<'_>) -> DevAuthInfoStatus {
        DevAuthInfoStatus::Unsupported
    }

    fn verify_signature(&self, _signature: &[u8]) -> DevAuthStatus {
        DevAuthStatus::Failed
    }
}

/// Response to a `RetDevAuthenticationInfo` section.
///
/// Sections before the last are acknowledged with ACK-success so the
/// accessory sends the next one. Version 1 info arrives as a single section.
pub fn certificate_response(
    req: &Request,
    verifier: &dyn AuthVerifier,
    section: &CertificateSection<'_>,
) -> ResponseMessage {
    if section.has_more() {
        tracing::debug!(
            "Certificate section {}/{} received",
            section.current,
            section.max
        );
        return ack_success(req);
    }

    let status = verifier.verify_certificate(section);
    if status != DevAuthInfoStatus::Supported {
        tracing::warn!("Device certificate refused: {:?}", status);
    }
    ResponseMessage::AckDevAuthenticationInfo { status }
}

/// Response to a `RetDevAuthenticationSignature`
pub fn signature_response(verifier: &dyn AuthVerifier, signature: &[u8]) -> ResponseMessage {
    let status = verifier.verify_signature(signature);
    match status {
        DevAuthStatus::Passed => tracing::info!("Device authentication passed"),
        DevAuthStatus::Failed => tracing::warn!("Device authentication failed"),
    }
    ResponseMessage::AckDevAuthenticationStatus { status }
}

/// Response to `GetiPodAuthenticationInfo`: version 1.1, no certificate
pub fn ipod_authentication_info() -> ResponseMessage {
    ResponseMessage::RetiPodAuthenticationInfo {
        major: 1,
        minor: 1,
        cert_current_section: 0,
        cert_max_section: 0,
        cert_data: Bytes::new(),
    }
}

/// Response to `GetiPodAuthenticationSignature`: the challenge, unchanged
pub fn ipod_authentication_signature(challenge: &Bytes) -> ResponseMessage {
    ResponseMessage::RetiPodAuthenticationSignature {
        signature: challenge.clone(),
    }
}
