//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//!
//! ```toml
//! [device]
//! name = "Garage iPod"
//! serial_num = "8K7341ABCDE"
//! software_version = [1, 1, 2]
//! max_payload = 500
//!
//! [[device.lingoes]]
//! id = 0x00
//! major = 1
//! minor = 9
//! options = 0
//!
//! [policy]
//! authentication = "permissive"
//! unknown_messages = "ignore"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IapError, Result};
use crate::protocol::{
    Dispatcher, PermissiveVerifier, RejectingVerifier, UiMode, UnknownMessagePolicy,
    LINGO_GENERAL,
};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Emulated device
    #[serde(default)]
    pub device: DeviceConfig,

    /// Handler policy points
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay `IAP_*` environment variables onto this config
    pub fn apply_env(&mut self) {
        if let Ok(name) = std::env::var("IAP_DEVICE_NAME") {
            self.device.name = name;
        }
        if let Ok(serial) = std::env::var("IAP_SERIAL_NUM") {
            self.device.serial_num = serial;
        }
        if let Ok(val) = std::env::var("IAP_MAX_PAYLOAD") {
            match val.parse() {
                Ok(max_payload) => self.device.max_payload = max_payload,
                Err(_) => tracing::warn!("Ignoring invalid IAP_MAX_PAYLOAD={}", val),
            }
        }
        if let Ok(val) = std::env::var("IAP_AUTH_POLICY") {
            match val.to_lowercase().as_str() {
                "permissive" => self.policy.authentication = AuthPolicy::Permissive,
                "reject" => self.policy.authentication = AuthPolicy::Reject,
                _ => tracing::warn!("Ignoring invalid IAP_AUTH_POLICY={}", val),
            }
        }
    }

    /// Default config file location (`<config dir>/iap/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("iap").join("config.toml"))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| IapError::Config(e.to_string()))
    }

    /// Check values the protocol cannot carry
    pub fn validate(&self) -> Result<()> {
        if self.device.name.is_empty() {
            return Err(IapError::Config("device.name must not be empty".to_string()));
        }
        if self.device.max_payload == 0 {
            return Err(IapError::Config("device.max_payload must be non-zero".to_string()));
        }
        let mut seen = std::collections::HashSet::new();
        for lingo in &self.device.lingoes {
            if !seen.insert(lingo.id) {
                return Err(IapError::Config(format!(
                    "lingo 0x{:02X} declared more than once",
                    lingo.id
                )));
            }
        }
        Ok(())
    }
}

/// Emulated device profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Device name returned by `RequestiPodName`
    pub name: String,

    /// Serial number returned by `RequestiPodSerialNum`
    pub serial_num: String,

    /// Software version as [major, minor, revision]
    pub software_version: [u8; 3],

    /// Maximum transport payload in bytes
    pub max_payload: u16,

    /// UI mode at session start
    pub ui_mode: UiMode,

    /// Events the device can notify about
    pub supported_event_mask: u64,

    /// Per-lingo protocol versions and options
    pub lingoes: Vec<LingoConfig>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "iPod".to_string(),
            serial_num: "000000000000".to_string(),
            software_version: [1, 1, 2],
            max_payload: 500,
            ui_mode: UiMode::Standard,
            supported_event_mask: 0x0000_0000_0000_0FFC,
            lingoes: vec![
                LingoConfig::new(LINGO_GENERAL, 1, 9, 0),
                // Simple remote
                LingoConfig::new(0x02, 1, 2, 0),
                // Extended interface
                LingoConfig::new(0x04, 1, 14, 0),
            ],
        }
    }
}

impl DeviceConfig {
    /// Entry for `lingo`, if configured
    pub fn lingo(&self, id: u8) -> Option<&LingoConfig> {
        self.lingoes.iter().find(|l| l.id == id)
    }
}

/// Protocol version and options of one lingo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LingoConfig {
    /// Lingo id
    pub id: u8,
    /// Protocol major version
    pub major: u8,
    /// Protocol minor version
    pub minor: u8,
    /// Option bits
    #[serde(default)]
    pub options: u64,
}

impl LingoConfig {
    /// Create a lingo entry
    pub fn new(id: u8, major: u8, minor: u8, options: u64) -> Self {
        Self {
            id,
            major,
            minor,
            options,
        }
    }
}

/// Device authentication policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPolicy {
    /// Accept every certificate and signature
    #[default]
    Permissive,
    /// Refuse every certificate and signature
    Reject,
}

/// Handler policy configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Device authentication verdicts
    pub authentication: AuthPolicy,

    /// Handling of unknown commands
    pub unknown_messages: UnknownMessagePolicy,
}

impl PolicyConfig {
    /// Build a dispatcher applying these policies
    pub fn dispatcher(&self) -> Dispatcher {
        let dispatcher = Dispatcher::new().with_unknown_policy(self.unknown_messages);
        match self.authentication {
            AuthPolicy::Permissive => dispatcher.with_verifier(PermissiveVerifier),
            AuthPolicy::Reject => dispatcher.with_verifier(RejectingVerifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.device.name, "iPod");
        assert_eq!(config.device.max_payload, 500);
        assert_eq!(config.policy.authentication, AuthPolicy::Permissive);
        assert_eq!(config.policy.unknown_messages, UnknownMessagePolicy::Ignore);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [device]
            name = "Dock"
            serial_num = "ABC123"
            software_version = [2, 0, 1]
            max_payload = 1024
            ui_mode = "extended"

            [[device.lingoes]]
            id = 0
            major = 1
            minor = 9

            [[device.lingoes]]
            id = 4
            major = 1
            minor = 12
            options = 7

            [policy]
            authentication = "reject"
            unknown_messages = "reject"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.device.name, "Dock");
        assert_eq!(config.device.software_version, [2, 0, 1]);
        assert_eq!(config.device.ui_mode, UiMode::Extended);
        assert_eq!(config.device.lingo(4).unwrap().options, 7);
        assert_eq!(config.device.lingo(0).unwrap().options, 0);
        // unspecified fields keep their defaults
        assert_eq!(config.device.supported_event_mask, 0x0FFC);
        assert_eq!(config.policy.authentication, AuthPolicy::Reject);
        assert_eq!(
            config.policy.dispatcher().unknown_policy(),
            UnknownMessagePolicy::Reject
        );
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[device]\nname = \"Car\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.device.name, "Car");
        assert_eq!(config.device.max_payload, 500);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/nonexistent/iap.toml").unwrap_err();
        assert!(matches!(err, IapError::Io(_)));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[device\nname = ").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, IapError::Config(_)));
    }

    #[test]
    fn test_general_lingo_in_defaults() {
        let config = Config::default();
        let general = config.device.lingo(LINGO_GENERAL).unwrap();
        assert_eq!((general.major, general.minor), (1, 9));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("IAP_DEVICE_NAME", "Env iPod");
        std::env::set_var("IAP_MAX_PAYLOAD", "not-a-number");
        std::env::set_var("IAP_AUTH_POLICY", "REJECT");

        let config = Config::from_env();

        std::env::remove_var("IAP_DEVICE_NAME");
        std::env::remove_var("IAP_MAX_PAYLOAD");
        std::env::remove_var("IAP_AUTH_POLICY");

        assert_eq!(config.device.name, "Env iPod");
        assert_eq!(config.device.max_payload, 500);
        assert_eq!(config.policy.authentication, AuthPolicy::Reject);
    }

    #[test]
    fn test_duplicate_lingo_rejected() {
        let mut config = Config::default();
        config.device.lingoes.push(LingoConfig::new(0x00, 1, 0, 0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
