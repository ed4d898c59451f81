//! General lingo command identifiers.
//!
//! Every General lingo packet carries a one-byte command id after the lingo
//! byte. ACK responses echo the command id of the request they acknowledge.

use crate::error::{IapError, Result};

/// Lingo id of the General lingo.
pub const LINGO_GENERAL: u8 = 0x00;

/// General lingo command ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum CommandId {
    RequestIdentify = 0x00,
    Identify = 0x01,
    Ack = 0x02,
    RequestRemoteUIMode = 0x03,
    ReturnRemoteUIMode = 0x04,
    EnterRemoteUIMode = 0x05,
    ExitRemoteUIMode = 0x06,
    RequestiPodName = 0x07,
    ReturniPodName = 0x08,
    RequestiPodSoftwareVersion = 0x09,
    ReturniPodSoftwareVersion = 0x0A,
    RequestiPodSerialNum = 0x0B,
    ReturniPodSerialNum = 0x0C,
    RequestiPodModelNum = 0x0D,
    ReturniPodModelNum = 0x0E,
    RequestLingoProtocolVersion = 0x0F,
    ReturnLingoProtocolVersion = 0x10,
    RequestTransportMaxPayloadSize = 0x11,
    ReturnTransportMaxPayloadSize = 0x12,
    IdentifyDeviceLingoes = 0x13,
    GetDevAuthenticationInfo = 0x14,
    RetDevAuthenticationInfo = 0x15,
    AckDevAuthenticationInfo = 0x16,
    GetDevAuthenticationSignature = 0x17,
    RetDevAuthenticationSignature = 0x18,
    AckDevAuthenticationStatus = 0x19,
    GetiPodAuthenticationInfo = 0x1A,
    RetiPodAuthenticationInfo = 0x1B,
    AckiPodAuthenticationInfo = 0x1C,
    GetiPodAuthenticationSignature = 0x1D,
    RetiPodAuthenticationSignature = 0x1E,
    AckiPodAuthenticationStatus = 0x1F,
    NotifyiPodStateChange = 0x23,
    GetiPodOptions = 0x24,
    RetiPodOptions = 0x25,
    GetAccessoryInfo = 0x27,
    RetAccessoryInfo = 0x28,
    GetiPodPreferences = 0x29,
    RetiPodPreferences = 0x2A,
    SetiPodPreferences = 0x2B,
    GetUIMode = 0x35,
    RetUIMode = 0x36,
    SetUIMode = 0x37,
    StartIDPS = 0x38,
    SetFIDTokenValues = 0x39,
    RetFIDTokenValueACKs = 0x3A,
    EndIDPS = 0x3B,
    IDPSStatus = 0x3C,
    OpenDataSessionForProtocol = 0x3F,
    CloseDataSession = 0x40,
    DevACK = 0x41,
    DevDataTransfer = 0x42,
    IPodDataTransfer = 0x43,
    SetAccStatusNotification = 0x46,
    RetAccStatusNotification = 0x47,
    AccessoryStatusNotification = 0x48,
    SetEventNotification = 0x49,
    IPodNotification = 0x4A,
    GetiPodOptionsForLingo = 0x4B,
    RetiPodOptionsForLingo = 0x4C,
    GetEventNotification = 0x4D,
    RetEventNotification = 0x4E,
    GetSupportedEventNotification = 0x4F,
    CancelCommand = 0x50,
    RetSupportedEventNotification = 0x51,
    SetAvailableCurrent = 0x54,
    RequestApplicationLaunch = 0x64,
    GetNowPlayingFocusApp = 0x65,
    RetNowPlayingFocusApp = 0x66,
}

impl CommandId {
    /// Every known command id, in wire order.
    pub const ALL: [CommandId; 69] = [
        Self::RequestIdentify,
        Self::Identify,
        Self::Ack,
        Self::RequestRemoteUIMode,
        Self::ReturnRemoteUIMode,
        Self::EnterRemoteUIMode,
        Self::ExitRemoteUIMode,
        Self::RequestiPodName,
        Self::ReturniPodName,
        Self::RequestiPodSoftwareVersion,
        Self::ReturniPodSoftwareVersion,
        Self::RequestiPodSerialNum,
        Self::ReturniPodSerialNum,
        Self::RequestiPodModelNum,
        Self::ReturniPodModelNum,
        Self::RequestLingoProtocolVersion,
        Self::ReturnLingoProtocolVersion,
        Self::RequestTransportMaxPayloadSize,
        Self::ReturnTransportMaxPayloadSize,
        Self::IdentifyDeviceLingoes,
        Self::GetDevAuthenticationInfo,
        Self::RetDevAuthenticationInfo,
        Self::AckDevAuthenticationInfo,
        Self::GetDevAuthenticationSignature,
        Self::RetDevAuthenticationSignature,
        Self::AckDevAuthenticationStatus,
        Self::GetiPodAuthenticationInfo,
        Self::RetiPodAuthenticationInfo,
        Self::AckiPodAuthenticationInfo,
        Self::GetiPodAuthenticationSignature,
        Self::RetiPodAuthenticationSignature,
        Self::AckiPodAuthenticationStatus,
        Self::NotifyiPodStateChange,
        Self::GetiPodOptions,
        Self::RetiPodOptions,
        Self::GetAccessoryInfo,
        Self::RetAccessoryInfo,
        Self::GetiPodPreferences,
        Self::RetiPodPreferences,
        Self::SetiPodPreferences,
        Self::GetUIMode,
        Self::RetUIMode,
        Self::SetUIMode,
        Self::StartIDPS,
        Self::SetFIDTokenValues,
        Self::RetFIDTokenValueACKs,
        Self::EndIDPS,
        Self::IDPSStatus,
        Self::OpenDataSessionForProtocol,
        Self::CloseDataSession,
        Self::DevACK,
        Self::DevDataTransfer,
        Self::IPodDataTransfer,
        Self::SetAccStatusNotification,
        Self::RetAccStatusNotification,
        Self::AccessoryStatusNotification,
        Self::SetEventNotification,
        Self::IPodNotification,
        Self::GetiPodOptionsForLingo,
        Self::RetiPodOptionsForLingo,
        Self::GetEventNotification,
        Self::RetEventNotification,
        Self::GetSupportedEventNotification,
        Self::CancelCommand,
        Self::RetSupportedEventNotification,
        Self::SetAvailableCurrent,
        Self::RequestApplicationLaunch,
        Self::GetNowPlayingFocusApp,
        Self::RetNowPlayingFocusApp,
    ];

    /// Raw wire value
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CommandId {
    type Error = IapError;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.as_u8() == value)
            .ok_or_else(|| {
                IapError::InvalidMessage(format!("Unknown General lingo command 0x{value:02X}"))
            })
    }
}

impl From<CommandId> for u8 {
    fn from(cmd: CommandId) -> Self {
        cmd as u8
    }
}
