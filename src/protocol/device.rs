//! Device capability consumed by the General lingo handler.

use super::types::UiMode;

/// The part of the media device the General lingo reads and mutates.
///
/// All session state lives behind this trait. The dispatcher borrows the
/// device mutably for the duration of one message, so implementations shared
/// between sessions must serialise access themselves.
pub trait GeneralDevice {
    /// Current UI mode
    fn ui_mode(&self) -> UiMode;
    /// Switch UI mode. Assumed to be synchronous and infallible.
    fn set_ui_mode(&mut self, mode: UiMode);

    /// Device name
    fn name(&self) -> String;
    /// Software version as (major, minor, revision)
    fn software_version(&self) -> (u8, u8, u8);
    /// Device serial number
    fn serial_num(&self) -> String;

    /// Protocol version implemented for `lingo` as (major, minor)
    fn lingo_protocol_version(&self, lingo: u8) -> (u8, u8);
    /// Option bits supported for `lingo`
    fn lingo_options(&self, lingo: u8) -> u64;

    /// Current setting of preference class `class_id`
    fn pref_setting_id(&self, class_id: u8) -> u8;
    /// Change preference class `class_id`
    fn set_pref_setting_id(&mut self, class_id: u8, setting_id: u8, restore_on_exit: bool);

    /// Open (or reset) the identification context
    fn start_idps(&mut self);

    /// Replace the event notification mask
    fn set_event_notification_mask(&mut self, mask: u64);
    /// Current event notification mask
    fn event_notification_mask(&self) -> u64;
    /// Events the device can notify about
    fn supported_event_notification_mask(&self) -> u64;

    /// Cancel an earlier command identified by lingo, command and transaction
    fn cancel_command(&mut self, lingo: u8, cmd: u16, transaction: u16);

    /// Maximum payload size the transport accepts
    fn max_payload(&self) -> u16;
}
