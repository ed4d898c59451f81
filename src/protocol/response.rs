//! Outbound General lingo messages and the sink they are written to.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::command::CommandId;
use super::message::Request;
use crate::error::Result;

use super::types::{
    AckStatus, DevAuthInfoStatus, DevAuthStatus, IdpsStatus, TransactionId, UiMode,
};

/// Outbound message, one case per General lingo command the handler emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(missing_docs)]
pub enum ResponseMessage {
    /// Final acknowledgment of `cmd_id`
    Ack { status: AckStatus, cmd_id: u8 },
    /// Interim acknowledgment, the final ACK follows within `max_wait`
    AckPending { cmd_id: u8, max_wait: u32 },

    ReturnRemoteUIMode { extended: bool },
    ReturniPodName { name: String },
    ReturniPodSoftwareVersion { major: u8, minor: u8, rev: u8 },
    ReturniPodSerialNum { serial: String },
    ReturnLingoProtocolVersion { lingo: u8, major: u8, minor: u8 },
    ReturnTransportMaxPayloadSize { max_payload: u16 },

    /// Request sent by the handler to start device authentication
    GetDevAuthenticationInfo,
    AckDevAuthenticationInfo { status: DevAuthInfoStatus },
    AckDevAuthenticationStatus { status: DevAuthStatus },
    RetiPodAuthenticationInfo {
        major: u8,
        minor: u8,
        cert_current_section: u8,
        cert_max_section: u8,
        cert_data: Bytes,
    },
    RetiPodAuthenticationSignature { signature: Bytes },

    RetiPodOptions { options: u64 },
    RetiPodPreferences { pref_class_id: u8, pref_class_setting_id: u8 },
    RetUIMode { ui_mode: UiMode },

    RetFIDTokenValueACKs { count: u8, acks: Bytes },
    IDPSStatus { status: IdpsStatus },

    RetiPodOptionsForLingo { lingo_id: u8, options: u64 },
    RetEventNotification { mask: u64 },
    RetSupportedEventNotification { mask: u64 },
    RetNowPlayingFocusApp { app_id: String },
}

impl ResponseMessage {
    /// General lingo command id this message is sent with
    pub fn command_id(&self) -> CommandId {
        match self {
            Self::Ack { .. } | Self::AckPending { .. } => CommandId::Ack,
            Self::ReturnRemoteUIMode { .. } => CommandId::ReturnRemoteUIMode,
            Self::ReturniPodName { .. } => CommandId::ReturniPodName,
            Self::ReturniPodSoftwareVersion { .. } => CommandId::ReturniPodSoftwareVersion,
            Self::ReturniPodSerialNum { .. } => CommandId::ReturniPodSerialNum,
            Self::ReturnLingoProtocolVersion { .. } => CommandId::ReturnLingoProtocolVersion,
            Self::ReturnTransportMaxPayloadSize { .. } => CommandId::ReturnTransportMaxPayloadSize,
            Self::GetDevAuthenticationInfo => CommandId::GetDevAuthenticationInfo,
            Self::AckDevAuthenticationInfo { .. } => CommandId::AckDevAuthenticationInfo,
            Self::AckDevAuthenticationStatus { .. } => CommandId::AckDevAuthenticationStatus,
            Self::RetiPodAuthenticationInfo { .. } => CommandId::RetiPodAuthenticationInfo,
            Self::RetiPodAuthenticationSignature { .. } => CommandId::RetiPodAuthenticationSignature,
            Self::RetiPodOptions { .. } => CommandId::RetiPodOptions,
            Self::RetiPodPreferences { .. } => CommandId::RetiPodPreferences,
            Self::RetUIMode { .. } => CommandId::RetUIMode,
            Self::RetFIDTokenValueACKs { .. } => CommandId::RetFIDTokenValueACKs,
            Self::IDPSStatus { .. } => CommandId::IDPSStatus,
            Self::RetiPodOptionsForLingo { .. } => CommandId::RetiPodOptionsForLingo,
            Self::RetEventNotification { .. } => CommandId::RetEventNotification,
            Self::RetSupportedEventNotification { .. } => CommandId::RetSupportedEventNotification,
            Self::RetNowPlayingFocusApp { .. } => CommandId::RetNowPlayingFocusApp,
        }
    }
}

/// Outbound message addressed with a transaction id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    /// Transaction id the transport frames the message with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionId>,
    /// Message payload
    pub message: ResponseMessage,
}

impl Outbound {
    /// Address a response to the transaction of `request`
    pub fn reply(request: &Request, message: ResponseMessage) -> Self {
        Self {
            transaction: request.transaction,
            message,
        }
    }

    /// Address a message to an explicit transaction.
    ///
    /// Only used for messages the handler originates itself rather than
    /// answers, such as the `GetDevAuthenticationInfo` request that follows a
    /// successful IDPS.
    pub fn with_transaction(transaction: TransactionId, message: ResponseMessage) -> Self {
        Self {
            transaction: Some(transaction),
            message,
        }
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Destination for outbound messages, normally the transport's packet writer.
pub trait ResponseSink {
    /// Queue one outbound message. Messages must go out in call order.
    fn send(&mut self, outbound: Outbound);
}

impl ResponseSink for Vec<Outbound> {
    fn send(&mut self, outbound: Outbound) {
        self.push(outbound);
    }
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn send(&mut self, outbound: Outbound) {
        (**self).send(outbound);
    }
}
