//! # iAP General - accessory protocol General lingo handler
//!
//! Session handler for the General lingo of the iPod Accessory Protocol
//! (iAP). It is the part of a media device that an accessory such as a car
//! head unit or dock talks to first: it answers identity queries, runs the
//! Identify Device Protocol Sequence (IDPS), drives device authentication, and
//! switches the device in and out of extended UI mode.
//!
//! ## Architecture
//!
//! ```text
//!  transport (framing, checksums, I/O)
//!        |  Request { transaction, message }
//!        v
//!  Dispatcher::handle ------> GeneralDevice (all session state)
//!        |
//!        |  Outbound { transaction, message }
//!        v
//!  ResponseSink (back to the transport)
//! ```
//!
//! Framing and the per-command byte layout belong to the transport. The only
//! bit-exact encoding in this crate is the FID token acknowledgment table used
//! during IDPS (see [`protocol::fid`]).
//!
//! The dispatcher is synchronous and never fails. Each call handles exactly
//! one request; there are no timers, even where an ACK-pending response
//! advertises a wait time.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use iap_general::{Config, Session, VirtualDevice};
//! use iap_general::protocol::{AccEndIdpsStatus, ProtocolMessage, Request};
//!
//! let config = Config::default();
//! let device = VirtualDevice::new(config.device.clone());
//! let mut session = Session::with_dispatcher(device, config.policy.dispatcher());
//!
//! session.process(&Request::new(1, ProtocolMessage::StartIDPS));
//! let out = session.process(&Request::new(
//!     2,
//!     ProtocolMessage::EndIDPS { status: AccEndIdpsStatus::Continue },
//! ));
//! // IDPSStatus(ok), then GetDevAuthenticationInfo on transaction 0x0001
//! assert_eq!(out.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`protocol`]: Messages, dispatcher, handshakes and sessions
//! - [`device`]: In-memory reference device
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod config;
pub mod device;
pub mod error;
pub mod protocol;

// Re-exports for convenience
pub use config::Config;
pub use device::VirtualDevice;
pub use error::{IapError, Result};
pub use protocol::{Dispatcher, GeneralDevice, Outbound, ProtocolMessage, Request, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
