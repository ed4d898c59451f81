//! Inbound General lingo messages.
//!
//! The transport decodes each packet into a [`Request`]: the decoded
//! [`ProtocolMessage`] plus the transaction id it arrived with. Commands the
//! decoder does not recognise are delivered as [`ProtocolMessage::Unknown`].

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::command::CommandId;
use super::types::{AccEndIdpsStatus, FidToken, TransactionId, UiMode};

/// Decoded inbound message, one case per General lingo command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(missing_docs)]
pub enum ProtocolMessage {
    RequestRemoteUIMode,
    EnterRemoteUIMode,
    ExitRemoteUIMode,
    RequestiPodName,
    RequestiPodSoftwareVersion,
    RequestiPodSerialNum,
    RequestLingoProtocolVersion {
        lingo: u8,
    },
    RequestTransportMaxPayloadSize,
    IdentifyDeviceLingoes {
        lingoes: u32,
        #[serde(default)]
        options: u32,
        #[serde(default)]
        device_id: u32,
    },

    RetDevAuthenticationInfoV1 {
        major: u8,
        minor: u8,
        #[serde(default)]
        cert_data: Bytes,
    },
    RetDevAuthenticationInfoV2 {
        major: u8,
        minor: u8,
        cert_current_section: u8,
        cert_max_section: u8,
        #[serde(default)]
        cert_data: Bytes,
    },
    RetDevAuthenticationSignatureV1 {
        #[serde(default)]
        signature: Bytes,
    },
    RetDevAuthenticationSignatureV2 {
        #[serde(default)]
        signature: Bytes,
    },
    GetiPodAuthenticationInfo,
    AckiPodAuthenticationInfo {
        status: u8,
    },
    GetiPodAuthenticationSignature {
        challenge: Bytes,
        #[serde(default)]
        retry_counter: u8,
    },
    AckiPodAuthenticationStatus {
        status: u8,
    },

    GetiPodOptions,
    RetAccessoryInfo {
        info_type: u8,
        #[serde(default)]
        data: Bytes,
    },
    GetiPodPreferences {
        pref_class_id: u8,
    },
    SetiPodPreferences {
        pref_class_id: u8,
        pref_class_setting_id: u8,
        #[serde(default)]
        restore_on_exit: bool,
    },
    GetUIMode,
    SetUIMode {
        ui_mode: UiMode,
    },

    StartIDPS,
    SetFIDTokenValues {
        tokens: Vec<FidToken>,
    },
    EndIDPS {
        status: AccEndIdpsStatus,
    },

    AccessoryStatusNotification {
        status_type: u8,
        #[serde(default)]
        data: Bytes,
    },
    SetEventNotification {
        mask: u64,
    },
    GetiPodOptionsForLingo {
        lingo_id: u8,
    },
    GetEventNotification,
    GetSupportedEventNotification,
    CancelCommand {
        lingo_id: u8,
        cmd_id: u16,
        transaction_id: u16,
    },
    SetAvailableCurrent {
        current_limit: u16,
    },
    RequestApplicationLaunch {
        app_id: String,
    },
    GetNowPlayingFocusApp,

    /// Command the decoder could not map to a known message
    Unknown {
        command_id: u8,
        #[serde(default)]
        payload: Bytes,
    },
}

impl ProtocolMessage {
    /// General lingo command id this message was received with
    pub fn command_id(&self) -> u8 {
        let cmd = match self {
            Self::RequestRemoteUIMode => CommandId::RequestRemoteUIMode,
            Self::EnterRemoteUIMode => CommandId::EnterRemoteUIMode,
            Self::ExitRemoteUIMode => CommandId::ExitRemoteUIMode,
            Self::RequestiPodName => CommandId::RequestiPodName,
            Self::RequestiPodSoftwareVersion => CommandId::RequestiPodSoftwareVersion,
            Self::RequestiPodSerialNum => CommandId::RequestiPodSerialNum,
            Self::RequestLingoProtocolVersion { .. } => CommandId::RequestLingoProtocolVersion,
            Self::RequestTransportMaxPayloadSize => CommandId::RequestTransportMaxPayloadSize,
            Self::IdentifyDeviceLingoes { .. } => CommandId::IdentifyDeviceLingoes,
            Self::RetDevAuthenticationInfoV1 { .. } | Self::RetDevAuthenticationInfoV2 { .. } => {
                CommandId::RetDevAuthenticationInfo
            },
            Self::RetDevAuthenticationSignatureV1 { .. }
            | Self::RetDevAuthenticationSignatureV2 { .. } => {
                CommandId::RetDevAuthenticationSignature
            },
            Self::GetiPodAuthenticationInfo => CommandId::GetiPodAuthenticationInfo,
            Self::AckiPodAuthenticationInfo { .. } => CommandId::AckiPodAuthenticationInfo,
            Self::GetiPodAuthenticationSignature { .. } => CommandId::GetiPodAuthenticationSignature,
            Self::AckiPodAuthenticationStatus { .. } => CommandId::AckiPodAuthenticationStatus,
            Self::GetiPodOptions => CommandId::GetiPodOptions,
            Self::RetAccessoryInfo { .. } => CommandId::RetAccessoryInfo,
            Self::GetiPodPreferences { .. } => CommandId::GetiPodPreferences,
            Self::SetiPodPreferences { .. } => CommandId::SetiPodPreferences,
            Self::GetUIMode => CommandId::GetUIMode,
            Self::SetUIMode { .. } => CommandId::SetUIMode,
            Self::StartIDPS => CommandId::StartIDPS,
            Self::SetFIDTokenValues { .. } => CommandId::SetFIDTokenValues,
            Self::EndIDPS { .. } => CommandId::EndIDPS,
            Self::AccessoryStatusNotification { .. } => CommandId::AccessoryStatusNotification,
            Self::SetEventNotification { .. } => CommandId::SetEventNotification,
            Self::GetiPodOptionsForLingo { .. } => CommandId::GetiPodOptionsForLingo,
            Self::GetEventNotification => CommandId::GetEventNotification,
            Self::GetSupportedEventNotification => CommandId::GetSupportedEventNotification,
            Self::CancelCommand { .. } => CommandId::CancelCommand,
            Self::SetAvailableCurrent { .. } => CommandId::SetAvailableCurrent,
            Self::RequestApplicationLaunch { .. } => CommandId::RequestApplicationLaunch,
            Self::GetNowPlayingFocusApp => CommandId::GetNowPlayingFocusApp,
            Self::Unknown { command_id, .. } => return *command_id,
        };
        cmd.as_u8()
    }
}

/// A decoded inbound packet as handed over by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Transaction id (absent on links that predate transaction ids)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionId>,
    /// Decoded message
    pub message: ProtocolMessage,
}

impl Request {
    /// Create a request with a transaction id
    pub fn new(transaction: u16, message: ProtocolMessage) -> Self {
        Self {
            transaction: Some(TransactionId(transaction)),
            message,
        }
    }

    /// Create a request without a transaction id
    pub fn untracked(message: ProtocolMessage) -> Self {
        Self {
            transaction: None,
            message,
        }
    }

    /// Command id of the carried message
    pub fn command_id(&self) -> u8 {
        self.message.command_id()
    }
}
