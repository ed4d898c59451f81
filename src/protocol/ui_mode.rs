//! Extended UI mode transitions.
//!
//! Entering or leaving extended mode is a two step exchange: if the device is
//! not already in the target mode the accessory first receives ACK-pending
//! with the advertised maximum wait, then ACK-success once the mode is
//! switched. The switch itself is synchronous.

use super::ack::{ack_pending, ack_success, PENDING_MAX_WAIT};
use super::device::GeneralDevice;
use super::message::Request;
use super::response::{Outbound, ResponseSink};
use super::types::UiMode;

/// Move `device` to `target`, emitting the ACK sequence for `req`.
pub fn transition<D, S>(req: &Request, device: &mut D, sink: &mut S, target: UiMode)
where
    D: GeneralDevice + ?Sized,
    S: ResponseSink + ?Sized,
{
    if device.ui_mode() == target {
        sink.send(Outbound::reply(req, ack_success(req)));
        return;
    }

    sink.send(Outbound::reply(req, ack_pending(req, PENDING_MAX_WAIT)));
    device.set_ui_mode(target);
    tracing::info!("UI mode switched to {:?}", target);
    sink.send(Outbound::reply(req, ack_success(req)));
}

/// Handle `EnterRemoteUIMode`
pub fn enter_extended<D, S>(req: &Request, device: &mut D, sink: &mut S)
where
    D: GeneralDevice + ?Sized,
    S: ResponseSink + ?Sized,
{
    transition(req, device, sink, UiMode::Extended);
}

/// Handle `ExitRemoteUIMode`
pub fn exit_extended<D, S>(req: &Request, device: &mut D, sink: &mut S)
where
    D: GeneralDevice + ?Sized,
    S: ResponseSink + ?Sized,
{
    transition(req, device, sink, UiMode::Standard);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::VirtualDevice;
    use crate::protocol::message::ProtocolMessage;
    use crate::protocol::response::ResponseMessage;
    use crate::protocol::types::AckStatus;

    fn success(cmd_id: u8) -> ResponseMessage {
        ResponseMessage::Ack {
            status: AckStatus::Success,
            cmd_id,
        }
    }

    #[test]
    fn test_enter_from_standard() {
        let mut device = VirtualDevice::default();
        let mut out = Vec::new();
        let req = Request::new(4, ProtocolMessage::EnterRemoteUIMode);

        enter_extended(&req, &mut device, &mut out);

        let messages: Vec<_> = out.into_iter().map(|o| o.message).collect();
        assert_eq!(
            messages,
            vec![
                ResponseMessage::AckPending {
                    cmd_id: 0x05,
                    max_wait: 300
                },
                success(0x05),
            ]
        );
        assert_eq!(device.ui_mode(), UiMode::Extended);
    }

    #[test]
    fn test_enter_when_extended() {
        let mut device = VirtualDevice::default();
        device.set_ui_mode(UiMode::Extended);
        let mut out = Vec::new();
        let req = Request::new(4, ProtocolMessage::EnterRemoteUIMode);

        enter_extended(&req, &mut device, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, success(0x05));
    }

    #[test]
    fn test_exit_round_trip() {
        let mut device = VirtualDevice::default();
        device.set_ui_mode(UiMode::Extended);
        let mut out = Vec::new();

        exit_extended(
            &Request::new(5, ProtocolMessage::ExitRemoteUIMode),
            &mut device,
            &mut out,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(device.ui_mode(), UiMode::Standard);

        out.clear();
        exit_extended(
            &Request::new(6, ProtocolMessage::ExitRemoteUIMode),
            &mut device,
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, success(0x06));
    }
}
