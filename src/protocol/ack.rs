//! Acknowledgment builders.

use super::message::Request;
use super::response::ResponseMessage;
use super::types::AckStatus;

/// Maximum wait advertised in ACK-pending responses.
///
/// The value is a hint for the accessory only; the handler never waits.
pub const PENDING_MAX_WAIT: u32 = 300;

/// ACK with `status` for the command carried by `req`
pub fn ack_status(req: &Request, status: AckStatus) -> ResponseMessage {
    ResponseMessage::Ack {
        status,
        cmd_id: req.command_id(),
    }
}

/// Successful ACK for the command carried by `req`
pub fn ack_success(req: &Request) -> ResponseMessage {
    ack_status(req, AckStatus::Success)
}

/// Pending ACK for the command carried by `req`
pub fn ack_pending(req: &Request, max_wait: u32) -> ResponseMessage {
    ResponseMessage::AckPending {
        cmd_id: req.command_id(),
        max_wait,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::message::ProtocolMessage;

    #[test]
    fn test_ack_echoes_command() {
        let req = Request::new(9, ProtocolMessage::StartIDPS);
        assert_eq!(
            ack_success(&req),
            ResponseMessage::Ack {
                status: AckStatus::Success,
                cmd_id: 0x38
            }
        );
    }

    #[test]
    fn test_ack_pending() {
        let req = Request::new(9, ProtocolMessage::EnterRemoteUIMode);
        assert_eq!(
            ack_pending(&req, PENDING_MAX_WAIT),
            ResponseMessage::AckPending {
                cmd_id: 0x05,
                max_wait: 300
            }
        );
    }
}
