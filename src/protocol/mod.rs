//! General lingo message handling and session management.
//!
//! Implements the accessory-facing side of the iAP General lingo: request
//! dispatch, the Identify Device Protocol Sequence (IDPS), device and iPod
//! authentication, and extended UI mode transitions.
//!
//! # Protocol Overview
//!
//! The transport decodes each packet into a [`Request`] and hands it to
//! [`Dispatcher::handle`] together with the [`GeneralDevice`] and a
//! [`ResponseSink`]. The dispatcher answers with zero or more [`Outbound`]
//! messages, each tagged with a transaction id.
//!
//! ## Message Flow
//!
//! ```text
//! Accessory                            Handler
//!    |                                    |
//!    |-------- StartIDPS --------------->|  Identification
//!    |<------- ACK ----------------------|
//!    |-------- SetFIDTokenValues ------->|
//!    |<------- RetFIDTokenValueACKs -----|
//!    |-------- EndIDPS(continue) ------->|
//!    |<------- IDPSStatus(ok) -----------|
//!    |                                    |
//!    |<------- GetDevAuthenticationInfo -|  Device authentication (tr 0x0001)
//!    |-------- RetDevAuthenticationInfo >|
//!    |<------- AckDevAuthenticationInfo -|
//!    |-------- RetDevAuthSignature ----->|
//!    |<------- AckDevAuthenticationStatus|
//!    |                                    |
//!    |-------- EnterRemoteUIMode ------->|  UI mode
//!    |<------- ACK(pending, 300) --------|
//!    |<------- ACK(success) -------------|
//! ```
//!
//! ## Policy Points
//!
//! | Policy                   | Default                | Alternative                    |
//! |--------------------------|------------------------|--------------------------------|
//! | Device authentication    | [`PermissiveVerifier`] | any [`AuthVerifier`]           |
//! | Unknown commands         | ignored, no response   | ACK with status `UnknownId`    |
//!
//! # Usage
//!
//! ```rust,ignore
//! use iap_general::device::VirtualDevice;
//! use iap_general::protocol::{Dispatcher, ProtocolMessage, Request};
//!
//! let dispatcher = Dispatcher::new();
//! let mut device = VirtualDevice::default();
//! let mut out = Vec::new();
//!
//! dispatcher.handle(
//!     &Request::new(1, ProtocolMessage::EnterRemoteUIMode),
//!     &mut device,
//!     &mut out,
//! );
//! assert_eq!(out.len(), 2); // pending, then success
//! ```

pub mod ack;
pub mod auth;
mod command;
mod device;
mod dispatch;
pub mod fid;
pub mod idps;
mod message;
mod response;
mod script;
mod session;
mod types;
pub mod ui_mode;

pub use auth::{AuthVerifier, CertificateSection, PermissiveVerifier, RejectingVerifier};
pub use command::{CommandId, LINGO_GENERAL};
pub use device::GeneralDevice;
pub use dispatch::{Dispatcher, UnknownMessagePolicy};
pub use fid::{ack_fid_tokens, encode_fid_tokens, MAX_FID_TOKENS};
pub use message::{ProtocolMessage, Request};
pub use response::{Outbound, ResponseMessage, ResponseSink};
pub use script::parse_script;
pub use session::{Session, SessionState, SessionStats};
pub use types::{
    AccEndIdpsStatus, AckStatus, DevAuthInfoStatus, DevAuthStatus, FidToken, IdpsStatus,
    TransactionId, UiMode,
};
