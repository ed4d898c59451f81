//! Value types shared by General lingo messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transaction identifier correlating a request with its responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u16);

impl TransactionId {
    /// Transaction used for the device authentication request issued after IDPS.
    pub const DEV_AUTH: TransactionId = TransactionId(0x0001);
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Accessory UI mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum UiMode {
    /// Standard UI, controlled from the iPod itself
    #[default]
    Standard = 0x00,
    /// Extended interface, controlled by the accessory
    Extended = 0x01,
}

/// Status codes carried by ACK responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
#[allow(missing_docs)]
pub enum AckStatus {
    Success = 0x00,
    UnknownDatabaseCategory = 0x01,
    CommandFailed = 0x02,
    OutOfResources = 0x03,
    BadParameter = 0x04,
    UnknownId = 0x05,
    Pending = 0x06,
    NotAuthenticated = 0x07,
    BadAuthenticationVersion = 0x08,
}

/// Capability declaration submitted during IDPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FidToken {
    /// FID type
    #[serde(rename = "type")]
    pub fid_type: u8,
    /// FID subtype
    #[serde(rename = "subtype")]
    pub fid_subtype: u8,
}

impl FidToken {
    /// Create a token from its type and subtype.
    pub fn new(fid_type: u8, fid_subtype: u8) -> Self {
        Self {
            fid_type,
            fid_subtype,
        }
    }
}

/// Outcome requested by the accessory when it ends IDPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AccEndIdpsStatus {
    /// Identification done, proceed to authentication
    Continue = 0x00,
    /// Restart identification
    Reset = 0x01,
    /// Give up on identification
    Abandon = 0x02,
    /// Accessory will reconnect on a new link
    NewLink = 0x03,
}

/// IDPS result reported back to the accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum IdpsStatus {
    /// Identification accepted
    Ok = 0x00,
    /// Accessory may retry, the IDPS time limit has not run out
    TimeLimitNotExceeded = 0x04,
    /// Identification rejected
    WillNotAccept = 0x06,
}

/// Verdict on the certificate delivered by `RetDevAuthenticationInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DevAuthInfoStatus {
    /// Authentication info supported, signature will be requested
    Supported = 0x00,
    /// Authentication info not supported
    Unsupported = 0x08,
    /// Certificate is invalid
    CertificateInvalid = 0x0A,
    /// Certificate permissions are invalid
    PermissionsInvalid = 0x0B,
}

/// Verdict on the signature delivered by `RetDevAuthenticationSignature`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DevAuthStatus {
    /// Authentication passed
    Passed = 0x00,
    /// Authentication failed
    Failed = 0x01,
}
