//! Identify Device Protocol Sequence (IDPS).
//!
//! ```text
//! Accessory                          Handler
//!    |------ StartIDPS ------------->|  device.start_idps()
//!    |<----- ACK ------------------- |
//!    |------ SetFIDTokenValues ----->|  (repeatable)
//!    |<----- RetFIDTokenValueACKs ---|
//!    |------ EndIDPS(continue) ----->|
//!    |<----- IDPSStatus(ok) ---------|
//!    |<----- GetDevAuthenticationInfo|  transaction 0x0001
//! ```
//!
//! After a successful IDPS the handler turns requester: it sends
//! `GetDevAuthenticationInfo` on transaction 0x0001 to start device
//! authentication.

use super::ack::{ack_status, ack_success};
use super::device::GeneralDevice;
use super::fid::{ack_fid_tokens, MAX_FID_TOKENS};
use super::message::Request;
use super::response::{Outbound, ResponseMessage, ResponseSink};
use super::types::{AccEndIdpsStatus, AckStatus, FidToken, IdpsStatus, TransactionId};

/// Handle `StartIDPS`
pub fn start<D, S>(req: &Request, device: &mut D, sink: &mut S)
where
    D: GeneralDevice + ?Sized,
    S: ResponseSink + ?Sized,
{
    device.start_idps();
    tracing::info!("IDPS started");
    sink.send(Outbound::reply(req, ack_success(req)));
}

/// Handle `SetFIDTokenValues`
pub fn set_fid_token_values<S>(req: &Request, tokens: &[FidToken], sink: &mut S)
where
    S: ResponseSink + ?Sized,
{
    tracing::debug!("FID token batch of {}", tokens.len());
    let response = ack_fid_tokens(tokens).unwrap_or_else(|| {
        tracing::warn!(
            "FID token batch of {} exceeds {} tokens",
            tokens.len(),
            MAX_FID_TOKENS
        );
        ack_status(req, AckStatus::BadParameter)
    });
    sink.send(Outbound::reply(req, response));
}

/// Status reported for an `EndIDPS` outcome, `None` when no reply is due
pub fn end_status(status: AccEndIdpsStatus) -> Option<IdpsStatus> {
    match status {
        AccEndIdpsStatus::Continue => Some(IdpsStatus::Ok),
        AccEndIdpsStatus::Reset => Some(IdpsStatus::TimeLimitNotExceeded),
        AccEndIdpsStatus::Abandon => Some(IdpsStatus::WillNotAccept),
        AccEndIdpsStatus::NewLink => None,
    }
}

/// Handle `EndIDPS`
pub fn end<S>(req: &Request, status: AccEndIdpsStatus, sink: &mut S)
where
    S: ResponseSink + ?Sized,
{
    tracing::info!("IDPS ended: {:?}", status);

    let Some(idps_status) = end_status(status) else {
        return;
    };
    sink.send(Outbound::reply(
        req,
        ResponseMessage::IDPSStatus {
            status: idps_status,
        },
    ));

    if status == AccEndIdpsStatus::Continue {
        sink.send(Outbound::with_transaction(
            TransactionId::DEV_AUTH,
            ResponseMessage::GetDevAuthenticationInfo,
        ));
    }
}
