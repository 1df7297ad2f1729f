//! # Subsystem Configuration
//!
//! Compiled-in defaults, optionally overridden from the kernel command line
//! with `hwinfo.<key>=<value>` options:
//!
//! | Key | Values |
//! |---|---|
//! | `width_policy` | `reject`, `mask` |
//! | `record_fp` | `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` |
//! | `ddr_slot` | shared memory item number (decimal or `0x` hex) |
//! | `panel_platform` | `sagit`, `chiron`, `unknown` |

use crate::record::WidthPolicy;
use core::fmt;
use helix_hal::{HardwarePlatform, SmemId};

/// Command line option prefix
pub const CMDLINE_PREFIX: &str = "hwinfo.";

/// Hardware identity subsystem configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HwInfoConfig {
    /// Out-of-range write handling
    pub width_policy: WidthPolicy,
    /// Honour fingerprint presence writes
    pub record_fingerprint: bool,
    /// Shared memory item holding the DDR manufacturer ID
    pub ddr_slot: SmemId,
    /// Platform on which the panel line is reported
    pub panel_platform: HardwarePlatform,
    /// Text reported by the CPU max frequency node
    pub cpu_max_freq: &'static str,
}

impl HwInfoConfig {
    /// Create default configuration
    pub const fn new() -> Self {
        Self {
            width_policy: WidthPolicy::Reject,
            record_fingerprint: false,
            ddr_slot: SmemId::VENDOR2,
            panel_platform: HardwarePlatform::Sagit,
            // All shipping msm8998 boards top out at 2.45 GHz
            cpu_max_freq: "2.45",
        }
    }

    /// Build from defaults plus command line overrides
    pub fn from_cmdline(cmdline: &str) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        config.apply_cmdline(cmdline)?;
        Ok(config)
    }

    /// Apply `hwinfo.` options from a kernel command line
    ///
    /// Other options are skipped. Unknown `hwinfo.` keys are ignored so that
    /// newer command lines still boot older kernels.
    pub fn apply_cmdline(&mut self, cmdline: &str) -> Result<(), ConfigError> {
        for token in cmdline.split_whitespace() {
            let Some(option) = token.strip_prefix(CMDLINE_PREFIX) else {
                continue;
            };
            let (key, value) = option.split_once('=').ok_or(ConfigError::InvalidSyntax)?;
            self.apply_setting(key, value)?;
        }
        Ok(())
    }

    fn apply_setting(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "width_policy" | "width-policy" => self.width_policy = parse_policy(value)?,
            "record_fp" | "record-fp" => self.record_fingerprint = parse_bool(value)?,
            "ddr_slot" | "ddr-slot" => self.ddr_slot = SmemId::from_raw(parse_u32(value)?),
            "panel_platform" | "panel-platform" => self.panel_platform = parse_platform(value)?,
            _ => log::debug!("hwinfo: ignoring unknown option {}", key),
        }
        Ok(())
    }
}

impl Default for HwInfoConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Option is not of the form `key=value`
    InvalidSyntax,
    /// Value could not be parsed for its key
    InvalidValue,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSyntax => write!(f, "expected {}key=value", CMDLINE_PREFIX),
            Self::InvalidValue => write!(f, "invalid option value"),
        }
    }
}

fn parse_bool(s: &str) -> Result<bool, ConfigError> {
    match s {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_u32(s: &str) -> Result<u32, ConfigError> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| ConfigError::InvalidValue)
}

fn parse_policy(s: &str) -> Result<WidthPolicy, ConfigError> {
    match s {
        "reject" => Ok(WidthPolicy::Reject),
        "mask" => Ok(WidthPolicy::Mask),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_platform(s: &str) -> Result<HardwarePlatform, ConfigError> {
    match s {
        "sagit" => Ok(HardwarePlatform::Sagit),
        "chiron" => Ok(HardwarePlatform::Chiron),
        "unknown" => Ok(HardwarePlatform::Unknown),
        _ => Err(ConfigError::InvalidValue),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HwInfoConfig::default();
        assert_eq!(config.width_policy, WidthPolicy::Reject);
        assert!(!config.record_fingerprint);
        assert_eq!(config.ddr_slot, SmemId::VENDOR2);
        assert_eq!(config.panel_platform, HardwarePlatform::Sagit);
        assert_eq!(config.cpu_max_freq, "2.45");
    }

    #[test]
    fn test_cmdline_overrides() {
        let config = HwInfoConfig::from_cmdline(
            "console=ttyMSM0 hwinfo.width_policy=mask hwinfo.record_fp=1 \
             hwinfo.ddr_slot=0x87 quiet hwinfo.panel-platform=chiron",
        )
        .unwrap();

        assert_eq!(config.width_policy, WidthPolicy::Mask);
        assert!(config.record_fingerprint);
        assert_eq!(config.ddr_slot, SmemId::VENDOR1);
        assert_eq!(config.panel_platform, HardwarePlatform::Chiron);
    }

    #[test]
    fn test_cmdline_without_options() {
        let config = HwInfoConfig::from_cmdline("root=/dev/sda1 ro").unwrap();
        assert_eq!(config, HwInfoConfig::new());
    }

    #[test]
    fn test_unknown_key_ignored() {
        let config = HwInfoConfig::from_cmdline("hwinfo.colour=blue").unwrap();
        assert_eq!(config, HwInfoConfig::new());
    }

    #[test]
    fn test_invalid_options() {
        assert_eq!(
            HwInfoConfig::from_cmdline("hwinfo.record_fp"),
            Err(ConfigError::InvalidSyntax)
        );
        assert_eq!(
            HwInfoConfig::from_cmdline("hwinfo.width_policy=truncate"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            HwInfoConfig::from_cmdline("hwinfo.ddr_slot=0xZZ"),
            Err(ConfigError::InvalidValue)
        );
    }

    #[test]
    fn test_failed_apply_keeps_earlier_options() {
        let mut config = HwInfoConfig::new();
        let result = config.apply_cmdline("hwinfo.record_fp=on hwinfo.panel_platform=mars");

        assert_eq!(result, Err(ConfigError::InvalidValue));
        assert!(config.record_fingerprint);
        assert_eq!(config.panel_platform, HardwarePlatform::Sagit);
    }
}
