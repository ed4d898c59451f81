//! In-memory reference device.
//!
//! [`VirtualDevice`] implements [`GeneralDevice`] from a [`DeviceConfig`]
//! profile. It backs the `iap` binary and the test suites, and is a starting
//! point for wiring the handler to real hardware.

use std::collections::BTreeMap;

use crate::config::DeviceConfig;
use crate::protocol::{GeneralDevice, UiMode};

/// Preference entry with the value to restore when the accessory detaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Preference {
    setting_id: u8,
    restore_to: Option<u8>,
}

/// Emulated media device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualDevice {
    profile: DeviceConfig,
    ui_mode: UiMode,
    preferences: BTreeMap<u8, Preference>,
    event_mask: u64,
    idps_starts: u32,
    cancelled: Vec<(u8, u16, u16)>,
}

impl Default for VirtualDevice {
    fn default() -> Self {
        Self::new(DeviceConfig::default())
    }
}

impl VirtualDevice {
    /// Create a device from a profile
    pub fn new(profile: DeviceConfig) -> Self {
        Self {
            ui_mode: profile.ui_mode,
            profile,
            preferences: BTreeMap::new(),
            event_mask: 0,
            idps_starts: 0,
            cancelled: Vec::new(),
        }
    }

    /// Number of times IDPS was started
    pub fn idps_starts(&self) -> u32 {
        self.idps_starts
    }

    /// Commands cancelled so far as (lingo, command, transaction)
    pub fn cancelled(&self) -> &[(u8, u16, u16)] {
        &self.cancelled
    }

    /// Accessory detached: put back preferences set with restore-on-exit and
    /// clear event notifications.
    pub fn detach(&mut self) {
        for pref in self.preferences.values_mut() {
            if let Some(original) = pref.restore_to.take() {
                pref.setting_id = original;
            }
        }
        self.event_mask = 0;
    }
}

impl GeneralDevice for VirtualDevice {
    fn ui_mode(&self) -> UiMode {
        self.ui_mode
    }

    fn set_ui_mode(&mut self, mode: UiMode) {
        self.ui_mode = mode;
    }

    fn name(&self) -> String {
        self.profile.name.clone()
    }

    fn software_version(&self) -> (u8, u8, u8) {
        let [major, minor, rev] = self.profile.software_version;
        (major, minor, rev)
    }

    fn serial_num(&self) -> String {
        self.profile.serial_num.clone()
    }

    fn lingo_protocol_version(&self, lingo: u8) -> (u8, u8) {
        self.profile
            .lingo(lingo)
            .map(|l| (l.major, l.minor))
            .unwrap_or((0, 0))
    }

    fn lingo_options(&self, lingo: u8) -> u64 {
        self.profile.lingo(lingo).map(|l| l.options).unwrap_or(0)
    }

    fn pref_setting_id(&self, class_id: u8) -> u8 {
        self.preferences
            .get(&class_id)
            .map(|p| p.setting_id)
            .unwrap_or(0)
    }

    fn set_pref_setting_id(&mut self, class_id: u8, setting_id: u8, restore_on_exit: bool) {
        let previous = self.pref_setting_id(class_id);
        let entry = self.preferences.entry(class_id).or_insert(Preference {
            setting_id: previous,
            restore_to: None,
        });
        if restore_on_exit && entry.restore_to.is_none() {
            entry.restore_to = Some(previous);
        }
        entry.setting_id = setting_id;
    }

    fn start_idps(&mut self) {
        self.idps_starts += 1;
    }

    fn set_event_notification_mask(&mut self, mask: u64) {
        // only supported events can be enabled
        self.event_mask = mask & self.profile.supported_event_mask;
    }

    fn event_notification_mask(&self) -> u64 {
        self.event_mask
    }

    fn supported_event_notification_mask(&self) -> u64 {
        self.profile.supported_event_mask
    }

    fn cancel_command(&mut self, lingo: u8, cmd: u16, transaction: u16) {
        tracing::debug!(
            "Cancel lingo {:#04x} command {:#06x} transaction {:#06x}",
            lingo,
            cmd,
            transaction
        );
        self.cancelled.push((lingo, cmd, transaction));
    }

    fn max_payload(&self) -> u16 {
        self.profile.max_payload
    }
}
