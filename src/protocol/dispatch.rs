//! Message dispatcher for the General lingo.
//!
//! [`Dispatcher::handle`] routes one decoded request to its behaviour and
//! writes the resulting responses, in order, to a [`ResponseSink`]. It keeps
//! no state between calls: everything the session remembers lives in the
//! [`GeneralDevice`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ack::{ack_status, ack_success};
use super::auth::{self, AuthVerifier, CertificateSection, PermissiveVerifier};
use super::device::GeneralDevice;
use super::idps;
use super::message::{ProtocolMessage, Request};
use super::response::{Outbound, ResponseMessage, ResponseSink};
use super::types::{AckStatus, UiMode};
use super::ui_mode;

/// What to do with commands the decoder could not map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownMessagePolicy {
    /// Drop silently, no response
    #[default]
    Ignore,
    /// Answer with ACK status `UnknownId`
    Reject,
}

/// Routes inbound General lingo messages.
#[derive(Clone)]
pub struct Dispatcher {
    verifier: Arc<dyn AuthVerifier>,
    unknown: UnknownMessagePolicy,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            verifier: Arc::new(PermissiveVerifier),
            unknown: UnknownMessagePolicy::Ignore,
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("unknown", &self.unknown)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Dispatcher with the permissive verifier that ignores unknown commands
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `verifier` for device authentication verdicts
    pub fn with_verifier(mut self, verifier: impl AuthVerifier + 'static) -> Self {
        self.verifier = Arc::new(verifier);
        self
    }

    /// Set the policy for unknown commands
    pub fn with_unknown_policy(mut self, policy: UnknownMessagePolicy) -> Self {
        self.unknown = policy;
        self
    }

    /// Policy for unknown commands
    pub fn unknown_policy(&self) -> UnknownMessagePolicy {
        self.unknown
    }

    /// Handle one inbound request.
    ///
    /// Never fails. Responses are written to `sink` in protocol order;
    /// messages that call for no response leave `sink` untouched.
    pub fn handle<D, S>(&self, req: &Request, device: &mut D, sink: &mut S)
    where
        D: GeneralDevice + ?Sized,
        S: ResponseSink + ?Sized,
    {
        tracing::debug!("Req: {:?}", req);

        match &req.message {
            // UI mode
            ProtocolMessage::RequestRemoteUIMode => respond(
                req,
                sink,
                ResponseMessage::ReturnRemoteUIMode {
                    extended: device.ui_mode() == UiMode::Extended,
                },
            ),
            ProtocolMessage::EnterRemoteUIMode => ui_mode::enter_extended(req, device, sink),
            ProtocolMessage::ExitRemoteUIMode => ui_mode::exit_extended(req, device, sink),
            ProtocolMessage::GetUIMode => respond(
                req,
                sink,
                ResponseMessage::RetUIMode {
                    ui_mode: device.ui_mode(),
                },
            ),
            ProtocolMessage::SetUIMode { ui_mode } => {
                tracing::debug!("SetUIMode({:?}) acknowledged without switching", ui_mode);
                respond(req, sink, ack_success(req));
            },

            // Identity
            ProtocolMessage::RequestiPodName => {
                respond(req, sink, ResponseMessage::ReturniPodName { name: device.name() });
            },
            ProtocolMessage::RequestiPodSoftwareVersion => {
                let (major, minor, rev) = device.software_version();
                respond(
                    req,
                    sink,
                    ResponseMessage::ReturniPodSoftwareVersion { major, minor, rev },
                );
            },
            ProtocolMessage::RequestiPodSerialNum => respond(
                req,
                sink,
                ResponseMessage::ReturniPodSerialNum {
                    serial: device.serial_num(),
                },
            ),
            ProtocolMessage::RequestLingoProtocolVersion { lingo } => {
                let (major, minor) = device.lingo_protocol_version(*lingo);
                respond(
                    req,
                    sink,
                    ResponseMessage::ReturnLingoProtocolVersion {
                        lingo: *lingo,
                        major,
                        minor,
                    },
                );
            },
            ProtocolMessage::RequestTransportMaxPayloadSize => respond(
                req,
                sink,
                ResponseMessage::ReturnTransportMaxPayloadSize {
                    max_payload: device.max_payload(),
                },
            ),
            ProtocolMessage::IdentifyDeviceLingoes { .. } => respond(req, sink, ack_success(req)),
            ProtocolMessage::GetiPodOptions => {
                respond(req, sink, ResponseMessage::RetiPodOptions { options: 0 });
            },
            ProtocolMessage::GetiPodOptionsForLingo { lingo_id } => respond(
                req,
                sink,
                ResponseMessage::RetiPodOptionsForLingo {
                    lingo_id: *lingo_id,
                    options: device.lingo_options(*lingo_id),
                },
            ),

            // Device authentication
            ProtocolMessage::RetDevAuthenticationInfoV1 {
                major,
                minor,
                cert_data,
            } => {
                let section = CertificateSection {
                    major: *major,
                    minor: *minor,
                    current: 0,
                    max: 0,
                    data: cert_data,
                };
                respond(
                    req,
                    sink,
                    auth::certificate_response(req, self.verifier.as_ref(), &section),
                );
            },
            ProtocolMessage::RetDevAuthenticationInfoV2 {
                major,
                minor,
                cert_current_section,
                cert_max_section,
                cert_data,
            } => {
                let section = CertificateSection {
                    major: *major,
                    minor: *minor,
                    current: *cert_current_section,
                    max: *cert_max_section,
                    data: cert_data,
                };
                respond(
                    req,
                    sink,
                    auth::certificate_response(req, self.verifier.as_ref(), &section),
                );
            },
            ProtocolMessage::RetDevAuthenticationSignatureV1 { signature }
            | ProtocolMessage::RetDevAuthenticationSignatureV2 { signature } => respond(
                req,
                sink,
                auth::signature_response(self.verifier.as_ref(), signature),
            ),

            // iPod authentication
            ProtocolMessage::GetiPodAuthenticationInfo => {
                respond(req, sink, auth::ipod_authentication_info());
            },
            ProtocolMessage::GetiPodAuthenticationSignature { challenge, .. } => {
                respond(req, sink, auth::ipod_authentication_signature(challenge));
            },
            ProtocolMessage::AckiPodAuthenticationInfo { status }
            | ProtocolMessage::AckiPodAuthenticationStatus { status } => {
                tracing::debug!("Accessory acknowledged iPod authentication: {:#04x}", status);
            },

            // Preferences
            ProtocolMessage::GetiPodPreferences { pref_class_id } => respond(
                req,
                sink,
                ResponseMessage::RetiPodPreferences {
                    pref_class_id: *pref_class_id,
                    pref_class_setting_id: device.pref_setting_id(*pref_class_id),
                },
            ),
            ProtocolMessage::SetiPodPreferences {
                pref_class_id,
                pref_class_setting_id,
                restore_on_exit,
            } => {
                device.set_pref_setting_id(*pref_class_id, *pref_class_setting_id, *restore_on_exit);
                // acknowledged like every other setter, so the accessory sees completion
                respond(req, sink, ack_success(req));
            },

            // IDPS
            ProtocolMessage::StartIDPS => idps::start(req, device, sink),
            ProtocolMessage::SetFIDTokenValues { tokens } => {
                idps::set_fid_token_values(req, tokens, sink);
            },
            ProtocolMessage::EndIDPS { status } => idps::end(req, *status, sink),

            // Notifications
            ProtocolMessage::SetEventNotification { mask } => {
                device.set_event_notification_mask(*mask);
                respond(req, sink, ack_success(req));
            },
            ProtocolMessage::GetEventNotification => respond(
                req,
                sink,
                ResponseMessage::RetEventNotification {
                    mask: device.event_notification_mask(),
                },
            ),
            ProtocolMessage::GetSupportedEventNotification => respond(
                req,
                sink,
                ResponseMessage::RetSupportedEventNotification {
                    mask: device.supported_event_notification_mask(),
                },
            ),

            ProtocolMessage::CancelCommand {
                lingo_id,
                cmd_id,
                transaction_id,
            } => {
                device.cancel_command(*lingo_id, *cmd_id, *transaction_id);
                respond(req, sink, ack_success(req));
            },
            ProtocolMessage::RequestApplicationLaunch { app_id } => {
                tracing::debug!("Application launch requested: {}", app_id);
                respond(req, sink, ack_success(req));
            },
            ProtocolMessage::GetNowPlayingFocusApp => respond(
                req,
                sink,
                ResponseMessage::RetNowPlayingFocusApp {
                    app_id: String::new(),
                },
            ),

            // Accepted without a response
            ProtocolMessage::RetAccessoryInfo { .. }
            | ProtocolMessage::SetAvailableCurrent { .. }
            | ProtocolMessage::AccessoryStatusNotification { .. } => {},

            ProtocolMessage::Unknown { command_id, .. } => match self.unknown {
                UnknownMessagePolicy::Ignore => {
                    tracing::debug!("Ignoring unknown command {:#04x}", command_id);
                },
                UnknownMessagePolicy::Reject => {
                    tracing::warn!("Rejecting unknown command {:#04x}", command_id);
                    respond(req, sink, ack_status(req, AckStatus::UnknownId));
                },
            },
        }
    }
}

fn respond<S: ResponseSink + ?Sized>(req: &Request, sink: &mut S, message: ResponseMessage) {
    sink.send(Outbound::reply(req, message));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeviceConfig, LingoConfig};
    use crate::device::VirtualDevice;
    use crate::protocol::auth::RejectingVerifier;
    use crate::protocol::types::{DevAuthInfoStatus, TransactionId};
    use bytes::Bytes;

    fn run(dispatcher: &Dispatcher, device: &mut VirtualDevice, msg: ProtocolMessage) -> Vec<Outbound> {
        let mut out = Vec::new();
        dispatcher.handle(&Request::new(0x0010, msg), device, &mut out);
        out
    }

    fn messages(out: Vec<Outbound>) -> Vec<ResponseMessage> {
        out.into_iter().map(|o| o.message).collect()
    }

    #[test]
    fn test_unknown_ignored_by_default() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();
        let before = device.clone();

        let out = run(
            &dispatcher,
            &mut device,
            ProtocolMessage::Unknown {
                command_id: 0x7F,
                payload: Bytes::from_static(&[1, 2]),
            },
        );

        assert!(out.is_empty());
        assert_eq!(device, before);
    }

    #[test]
    fn test_unknown_rejected_by_policy() {
        let dispatcher = Dispatcher::new().with_unknown_policy(UnknownMessagePolicy::Reject);
        let mut device = VirtualDevice::default();

        let out = run(
            &dispatcher,
            &mut device,
            ProtocolMessage::Unknown {
                command_id: 0x7F,
                payload: Bytes::new(),
            },
        );

        assert_eq!(
            messages(out),
            vec![ResponseMessage::Ack {
                status: AckStatus::UnknownId,
                cmd_id: 0x7F
            }]
        );
    }

    #[test]
    fn test_silent_notifications() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();

        for msg in [
            ProtocolMessage::SetAvailableCurrent { current_limit: 1000 },
            ProtocolMessage::AccessoryStatusNotification {
                status_type: 1,
                data: Bytes::new(),
            },
            ProtocolMessage::RetAccessoryInfo {
                info_type: 0,
                data: Bytes::new(),
            },
            ProtocolMessage::AckiPodAuthenticationInfo { status: 0 },
            ProtocolMessage::AckiPodAuthenticationStatus { status: 0 },
        ] {
            assert!(run(&dispatcher, &mut device, msg).is_empty());
        }
    }

    #[test]
    fn test_preferences_round_trip() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();

        let out = run(
            &dispatcher,
            &mut device,
            ProtocolMessage::SetiPodPreferences {
                pref_class_id: 0x03,
                pref_class_setting_id: 0x01,
                restore_on_exit: true,
            },
        );
        assert_eq!(
            messages(out),
            vec![ResponseMessage::Ack {
                status: AckStatus::Success,
                cmd_id: 0x2B
            }]
        );

        let out = run(
            &dispatcher,
            &mut device,
            ProtocolMessage::GetiPodPreferences { pref_class_id: 0x03 },
        );
        assert_eq!(
            messages(out),
            vec![ResponseMessage::RetiPodPreferences {
                pref_class_id: 0x03,
                pref_class_setting_id: 0x01
            }]
        );
    }

    #[test]
    fn test_identity_queries() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();

        let out = run(&dispatcher, &mut device, ProtocolMessage::RequestiPodName);
        assert_eq!(
            messages(out),
            vec![ResponseMessage::ReturniPodName {
                name: device.name()
            }]
        );

        let out = run(
            &dispatcher,
            &mut device,
            ProtocolMessage::RequestTransportMaxPayloadSize,
        );
        assert_eq!(
            messages(out),
            vec![ResponseMessage::ReturnTransportMaxPayloadSize {
                max_payload: device.max_payload()
            }]
        );

        let out = run(&dispatcher, &mut device, ProtocolMessage::GetNowPlayingFocusApp);
        assert_eq!(
            messages(out),
            vec![ResponseMessage::RetNowPlayingFocusApp {
                app_id: String::new()
            }]
        );
    }

    #[test]
    fn test_event_mask() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();

        run(
            &dispatcher,
            &mut device,
            ProtocolMessage::SetEventNotification { mask: 0x0C },
        );
        let out = run(&dispatcher, &mut device, ProtocolMessage::GetEventNotification);
        assert_eq!(
            messages(out),
            vec![ResponseMessage::RetEventNotification { mask: 0x0C }]
        );
    }

    #[test]
    fn test_cancel_command_forwarded() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();

        let out = run(
            &dispatcher,
            &mut device,
            ProtocolMessage::CancelCommand {
                lingo_id: 0x04,
                cmd_id: 0x0026,
                transaction_id: 0x0009,
            },
        );

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].transaction, Some(TransactionId(0x0010)));
        assert_eq!(device.cancelled(), &[(0x04, 0x0026, 0x0009)]);
    }

    #[test]
    fn test_set_ui_mode_does_not_switch() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();

        run(
            &dispatcher,
            &mut device,
            ProtocolMessage::SetUIMode {
                ui_mode: UiMode::Extended,
            },
        );
        assert_eq!(device.ui_mode(), UiMode::Standard);
    }

    #[test]
    fn test_custom_verifier() {
        let dispatcher = Dispatcher::new().with_verifier(RejectingVerifier);
        let mut device = VirtualDevice::default();

        let out = run(
            &dispatcher,
            &mut device,
            ProtocolMessage::RetDevAuthenticationInfoV1 {
                major: 1,
                minor: 0,
                cert_data: Bytes::new(),
            },
        );
        assert_eq!(
            messages(out),
            vec![ResponseMessage::AckDevAuthenticationInfo {
                status: DevAuthInfoStatus::Unsupported
            }]
        );
    }

    fn success(cmd_id: u8) -> ResponseMessage {
        ResponseMessage::Ack {
            status: AckStatus::Success,
            cmd_id,
        }
    }

    #[test]
    fn test_query_routes() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::new(DeviceConfig {
            serial_num: "8K7341ABCDE".to_string(),
            software_version: [2, 3, 4],
            lingoes: vec![
                LingoConfig::new(0x00, 1, 9, 0),
                LingoConfig::new(0x04, 1, 14, 0x0000_0000_0000_00FF),
            ],
            ..DeviceConfig::default()
        });

        let cases = vec![
            (
                ProtocolMessage::RequestRemoteUIMode,
                ResponseMessage::ReturnRemoteUIMode { extended: false },
            ),
            (
                ProtocolMessage::RequestiPodSoftwareVersion,
                ResponseMessage::ReturniPodSoftwareVersion {
                    major: 2,
                    minor: 3,
                    rev: 4,
                },
            ),
            (
                ProtocolMessage::RequestiPodSerialNum,
                ResponseMessage::ReturniPodSerialNum {
                    serial: "8K7341ABCDE".to_string(),
                },
            ),
            (
                ProtocolMessage::RequestLingoProtocolVersion { lingo: 0x04 },
                ResponseMessage::ReturnLingoProtocolVersion {
                    lingo: 0x04,
                    major: 1,
                    minor: 14,
                },
            ),
            (
                ProtocolMessage::RequestLingoProtocolVersion { lingo: 0x0A },
                ResponseMessage::ReturnLingoProtocolVersion {
                    lingo: 0x0A,
                    major: 0,
                    minor: 0,
                },
            ),
            (
                ProtocolMessage::GetiPodOptions,
                ResponseMessage::RetiPodOptions { options: 0 },
            ),
            (
                ProtocolMessage::GetiPodOptionsForLingo { lingo_id: 0x04 },
                ResponseMessage::RetiPodOptionsForLingo {
                    lingo_id: 0x04,
                    options: 0xFF,
                },
            ),
            (
                ProtocolMessage::GetiPodOptionsForLingo { lingo_id: 0x0A },
                ResponseMessage::RetiPodOptionsForLingo {
                    lingo_id: 0x0A,
                    options: 0,
                },
            ),
            (
                ProtocolMessage::GetSupportedEventNotification,
                ResponseMessage::RetSupportedEventNotification { mask: 0x0FFC },
            ),
            (
                ProtocolMessage::GetUIMode,
                ResponseMessage::RetUIMode {
                    ui_mode: UiMode::Standard,
                },
            ),
        ];

        for (request, expected) in cases {
            let label = format!("{request:?}");
            let out = run(&dispatcher, &mut device, request);
            assert_eq!(out.len(), 1, "{label}");
            assert_eq!(out[0].transaction, Some(TransactionId(0x0010)), "{label}");
            assert_eq!(out[0].message, expected, "{label}");
        }
    }

    #[test]
    fn test_acknowledged_routes() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();
        let before = device.clone();

        let cases = vec![
            (
                ProtocolMessage::IdentifyDeviceLingoes {
                    lingoes: 0x0000_0015,
                    options: 0x02,
                    device_id: 0x0000_0200,
                },
                0x13,
            ),
            (
                ProtocolMessage::RequestApplicationLaunch {
                    app_id: "com.acme.nav".to_string(),
                },
                0x64,
            ),
            (ProtocolMessage::StartIDPS, 0x38),
        ];

        for (request, cmd_id) in cases {
            let out = run(&dispatcher, &mut device, request);
            assert_eq!(messages(out), vec![success(cmd_id)]);
        }

        // only StartIDPS touches the device
        assert_eq!(device.idps_starts(), 1);
        assert_eq!(device.ui_mode(), before.ui_mode());
        assert_eq!(device.event_notification_mask(), before.event_notification_mask());
    }

    #[test]
    fn test_ipod_authentication_routes() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();

        let out = run(&dispatcher, &mut device, ProtocolMessage::GetiPodAuthenticationInfo);
        assert_eq!(
            messages(out),
            vec![ResponseMessage::RetiPodAuthenticationInfo {
                major: 1,
                minor: 1,
                cert_current_section: 0,
                cert_max_section: 0,
                cert_data: Bytes::new(),
            }]
        );

        let challenge = Bytes::from_static(&[0xDE, 0xAD, 0xBE, 0xEF, 0x01]);
        let out = run(
            &dispatcher,
            &mut device,
            ProtocolMessage::GetiPodAuthenticationSignature {
                challenge: challenge.clone(),
                retry_counter: 1,
            },
        );
        assert_eq!(
            messages(out),
            vec![ResponseMessage::RetiPodAuthenticationSignature {
                signature: challenge
            }]
        );
    }

    #[test]
    fn test_request_remote_ui_mode_tracks_transition() {
        let dispatcher = Dispatcher::new();
        let mut device = VirtualDevice::default();

        run(&dispatcher, &mut device, ProtocolMessage::EnterRemoteUIMode);
        let out = run(&dispatcher, &mut device, ProtocolMessage::RequestRemoteUIMode);
        assert_eq!(
            messages(out),
            vec![ResponseMessage::ReturnRemoteUIMode { extended: true }]
        );
    }
}
