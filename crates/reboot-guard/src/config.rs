// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Agent configuration loaded from TOML files or constructed programmatically.
//!
//! Only deployment wiring and the status refresh interval are configurable;
//! button and probe timings are fixed constants.
//!
//! # TOML Format
//! ```toml
//! refresh_interval_secs = 1.0
//! button_gpio = 17
//! i2c_bus = "/dev/i2c-1"
//! i2c_address = 60
//! reboot_command = ["/sbin/reboot"]
//! ```

use crate::AgentError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the status agent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Seconds between status frame refreshes.
    pub refresh_interval_secs: f64,
    /// BCM GPIO line of the reboot button (active low).
    pub button_gpio: u64,
    /// I²C bus device of the OLED panel.
    pub i2c_bus: PathBuf,
    /// 7-bit I²C address of the OLED panel.
    pub i2c_address: u8,
    /// Program and arguments executed in place of the agent to reboot.
    pub reboot_command: Vec<String>,
}

impl AgentConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, AgentError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgentError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, AgentError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| AgentError::ConfigError(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, AgentError> {
        toml::to_string_pretty(self)
            .map_err(|e| AgentError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), AgentError> {
        self.refresh_interval()?;
        if self.reboot_command.first().map_or(true, |p| p.trim().is_empty()) {
            return Err(AgentError::ConfigError(
                "reboot_command must name a program".to_string(),
            ));
        }
        Ok(())
    }

    /// The refresh interval as a [`Duration`]; must be finite and positive.
    pub fn refresh_interval(&self) -> Result<Duration, AgentError> {
        let secs = self.refresh_interval_secs;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(AgentError::ConfigError(format!(
                "refresh_interval_secs must be a positive number, got {secs}"
            )));
        }
        Duration::try_from_secs_f64(secs)
            .map_err(|e| AgentError::ConfigError(format!("invalid refresh interval: {e}")))
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 1.0,
            button_gpio: 17,
            i2c_bus: PathBuf::from("/dev/i2c-1"),
            i2c_address: 0x3C,
            reboot_command: vec!["/sbin/reboot".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = AgentConfig::default();
        assert_eq!(c.refresh_interval().unwrap(), Duration::from_secs(1));
        assert_eq!(c.i2c_address, 0x3C);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let c = AgentConfig::from_toml("refresh_interval_secs = 2.5\nbutton_gpio = 21\n").unwrap();
        assert_eq!(c.refresh_interval().unwrap(), Duration::from_millis(2500));
        assert_eq!(c.button_gpio, 21);
        assert_eq!(c.i2c_bus, PathBuf::from("/dev/i2c-1"));
    }

    #[test]
    fn test_from_toml_full() {
        let toml = r#"
refresh_interval_secs = 0.5
button_gpio = 4
i2c_bus = "/dev/i2c-3"
i2c_address = 61
reboot_command = ["systemctl", "reboot"]
"#;
        let c = AgentConfig::from_toml(toml).unwrap();
        assert_eq!(c.i2c_bus, PathBuf::from("/dev/i2c-3"));
        assert_eq!(c.i2c_address, 0x3D);
        assert_eq!(c.reboot_command, vec!["systemctl", "reboot"]);
    }

    #[test]
    fn test_rejects_bad_interval() {
        for bad in ["0.0", "-1.0", "nan", "inf"] {
            let r = AgentConfig::from_toml(&format!("refresh_interval_secs = {bad}\n"));
            assert!(r.is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_rejects_empty_reboot_command() {
        assert!(AgentConfig::from_toml("reboot_command = []\n").is_err());
        assert!(AgentConfig::from_toml("reboot_command = [\"  \"]\n").is_err());
    }

    #[test]
    fn test_rejects_unparseable() {
        assert!(AgentConfig::from_toml("button_gpio = \"seventeen\"\n").is_err());
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = AgentConfig::default();
        let back = AgentConfig::from_toml(&c.to_toml().unwrap()).unwrap();
        assert_eq!(back, c);
    }
}
