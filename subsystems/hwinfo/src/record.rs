//! # Hardware Identity Record
//!
//! One normalized code per [`Category`], packed into a single 64-bit word.
//!
//! ## Concurrency
//!
//! Every write is one atomic read-modify-write of the packed word that only
//! touches the bits of its own field. Detection drivers may therefore run
//! their bring-up concurrently, and a reader never observes a field value
//! outside that field's width.
//!
//! ## Width Policy
//!
//! Values wider than their field are handled according to [`WidthPolicy`]:
//! rejected with [`HwInfoError::OutOfRange`] (the default), or masked down to
//! the field width.

use crate::category::{Categories, Category};
use crate::config::HwInfoConfig;
use crate::{HwInfoError, HwInfoResult};
use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Value returned by [`HardwareIdentity::get_raw`] for an unrecognised selector
pub const UNKNOWN_CATEGORY: u32 = 0xFF;

/// What to do with a value wider than its field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthPolicy {
    /// Refuse the write and leave the field unchanged
    #[default]
    Reject,
    /// Keep only the low bits that fit the field
    Mask,
}

/// Hardware identity record
#[derive(Debug)]
pub struct HardwareIdentity {
    /// Packed field values
    word: AtomicU64,
    /// Categories written at least once
    populated: AtomicU32,
    /// Out-of-range handling
    policy: WidthPolicy,
    /// Whether fingerprint presence writes are honoured
    record_fingerprint: bool,
}

impl HardwareIdentity {
    /// Create a zeroed record with the default policy
    pub const fn new() -> Self {
        Self::with_config(&HwInfoConfig::new())
    }

    /// Create a zeroed record configured by `config`
    pub const fn with_config(config: &HwInfoConfig) -> Self {
        Self {
            word: AtomicU64::new(0),
            populated: AtomicU32::new(0),
            policy: config.width_policy,
            record_fingerprint: config.record_fingerprint,
        }
    }

    /// Get the width policy
    pub fn policy(&self) -> WidthPolicy {
        self.policy
    }

    /// Store `value` for `category`
    ///
    /// Writes to [`Category::FingerprintPresent`] are ignored unless the
    /// record was configured with `record_fingerprint`.
    pub fn set(&self, category: Category, value: u32) -> HwInfoResult<()> {
        if category == Category::FingerprintPresent && !self.record_fingerprint {
            log::debug!("hwinfo: ignoring write of {} to {}", value, category);
            return Ok(());
        }

        let value = self.fit(category, value)?;
        let mask = category.mask();
        let bits = u64::from(value) << category.shift();

        let previous = match self.word.fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
            Some((word & !mask) | bits)
        }) {
            Ok(word) | Err(word) => word,
        };
        let old = ((previous & mask) >> category.shift()) as u32;

        let flag = category.flag().bits();
        let seen = self.populated.fetch_or(flag, Ordering::AcqRel) & flag != 0;
        if seen && old != value {
            log::warn!("hwinfo: {} changed from {:#x} to {:#x}", category, old, value);
        }

        Ok(())
    }

    /// Get the stored value for `category`
    pub fn get(&self, category: Category) -> u32 {
        let word = self.word.load(Ordering::Acquire);
        ((word & category.mask()) >> category.shift()) as u32
    }

    /// Store a value using a raw category selector
    ///
    /// An unrecognised selector is a no-op.
    pub fn set_raw(&self, code: u32, value: u32) -> HwInfoResult<()> {
        match Category::from_raw(code) {
            Some(category) => self.set(category, value),
            None => {
                log::debug!("hwinfo: write to unknown category {}", code);
                Ok(())
            }
        }
    }

    /// Get a value using a raw category selector
    ///
    /// Returns [`UNKNOWN_CATEGORY`] for an unrecognised selector.
    pub fn get_raw(&self, code: u32) -> u32 {
        Category::from_raw(code).map_or(UNKNOWN_CATEGORY, |category| self.get(category))
    }

    /// Categories that have been written
    pub fn populated(&self) -> Categories {
        Categories::from_bits_truncate(self.populated.load(Ordering::Acquire))
    }

    /// Check whether `category` has been written
    pub fn is_populated(&self, category: Category) -> bool {
        self.populated().contains(category.flag())
    }

    /// Take a consistent copy of every field
    pub fn snapshot(&self) -> HardwareSnapshot {
        HardwareSnapshot::from_word(self.word.load(Ordering::Acquire))
    }

    fn fit(&self, category: Category, value: u32) -> HwInfoResult<u32> {
        let max = category.max_value();
        if value <= max {
            return Ok(value);
        }

        match self.policy {
            WidthPolicy::Reject => {
                log::warn!("hwinfo: rejected {} = {:#x} (max {:#x})", category, value, max);
                Err(HwInfoError::OutOfRange { category, value, max })
            }
            WidthPolicy::Mask => {
                log::debug!("hwinfo: masked {} = {:#x} to {:#x}", category, value, value & max);
                Ok(value & max)
            }
        }
    }
}

impl Default for HardwareIdentity {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed copy of the record at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HardwareSnapshot {
    /// Touch controller code
    pub touch_controller: u8,
    /// SoC variant code
    pub soc_variant: u8,
    /// Normalized DRAM vendor code
    pub dram_vendor: u8,
    /// Storage manufacturer code
    pub storage_type: u16,
    /// CPU variant code
    pub cpu_variant: u8,
    /// PMIC variant code
    pub pmic_variant: u8,
    /// Panel variant code
    pub panel_variant: u8,
    /// Touch panel manufacturer code
    pub touch_panel_maker: u8,
    /// Fingerprint sensor present
    pub fingerprint_present: bool,
}

impl HardwareSnapshot {
    fn from_word(word: u64) -> Self {
        let field = |category: Category| (word & category.mask()) >> category.shift();

        Self {
            touch_controller: field(Category::TouchController) as u8,
            soc_variant: field(Category::SocVariant) as u8,
            dram_vendor: field(Category::DramVendor) as u8,
            storage_type: field(Category::StorageType) as u16,
            cpu_variant: field(Category::CpuVariant) as u8,
            pmic_variant: field(Category::PmicVariant) as u8,
            panel_variant: field(Category::PanelVariant) as u8,
            touch_panel_maker: field(Category::TouchPanelMaker) as u8,
            fingerprint_present: field(Category::FingerprintPresent) != 0,
        }
    }

    /// Get a field by category
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::TouchController => u32::from(self.touch_controller),
            Category::SocVariant => u32::from(self.soc_variant),
            Category::DramVendor => u32::from(self.dram_vendor),
            Category::StorageType => u32::from(self.storage_type),
            Category::CpuVariant => u32::from(self.cpu_variant),
            Category::PmicVariant => u32::from(self.pmic_variant),
            Category::PanelVariant => u32::from(self.panel_variant),
            Category::TouchPanelMaker => u32::from(self.touch_panel_maker),
            Category::FingerprintPresent => u32::from(self.fingerprint_present),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::codes;

    fn masking() -> HardwareIdentity {
        let mut config = HwInfoConfig::new();
        config.width_policy = WidthPolicy::Mask;
        HardwareIdentity::with_config(&config)
    }

    fn with_fingerprint() -> HardwareIdentity {
        let mut config = HwInfoConfig::new();
        config.record_fingerprint = true;
        HardwareIdentity::with_config(&config)
    }

    #[test]
    fn test_starts_zeroed() {
        let identity = HardwareIdentity::new();
        for category in Category::ALL {
            assert_eq!(identity.get(category), 0);
        }
        assert!(identity.populated().is_empty());
        assert_eq!(identity.snapshot(), HardwareSnapshot::default());
    }

    #[test]
    fn test_set_only_touches_one_field() {
        for target in Category::ALL {
            if target == Category::FingerprintPresent {
                continue;
            }
            for value in [0, 1, target.max_value() / 2, target.max_value()] {
                let identity = HardwareIdentity::new();
                identity.set(target, value).unwrap();

                for other in Category::ALL {
                    let expected = if other == target { value } else { 0 };
                    assert_eq!(identity.get(other), expected, "{} after set {}", other, target);
                }
            }
        }
    }

    #[test]
    fn test_set_preserves_neighbours() {
        let identity = HardwareIdentity::new();
        identity.set(Category::DramVendor, 0xF).unwrap();
        identity.set(Category::StorageType, 0xFFFF).unwrap();
        identity.set(Category::SocVariant, 0xF).unwrap();

        identity.set(Category::StorageType, 0x01CE).unwrap();

        assert_eq!(identity.get(Category::DramVendor), 0xF);
        assert_eq!(identity.get(Category::SocVariant), 0xF);
        assert_eq!(identity.get(Category::StorageType), 0x01CE);
        assert_eq!(identity.get(Category::CpuVariant), 0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let identity = HardwareIdentity::new();
        identity.set(Category::CpuVariant, 2).unwrap();

        for _ in 0..3 {
            assert_eq!(
                identity.set(Category::CpuVariant, 4),
                Err(HwInfoError::OutOfRange {
                    category: Category::CpuVariant,
                    value: 4,
                    max: 3,
                })
            );
            assert_eq!(identity.get(Category::CpuVariant), 2);
        }

        assert!(identity.set(Category::StorageType, 0x1_0000).is_err());
        assert_eq!(identity.get(Category::StorageType), 0);
    }

    #[test]
    fn test_out_of_range_masked() {
        let identity = masking();
        assert_eq!(identity.policy(), WidthPolicy::Mask);

        for _ in 0..3 {
            identity.set(Category::TouchController, 0x13).unwrap();
            assert_eq!(identity.get(Category::TouchController), 0x3);
        }

        identity.set(Category::TouchPanelMaker, 0x41).unwrap();
        assert_eq!(identity.get(Category::TouchPanelMaker), 0x01);
        assert_eq!(identity.get(Category::PanelVariant), 0);
        assert_eq!(identity.get(Category::FingerprintPresent), 0);
    }

    #[test]
    fn test_fingerprint_write_ignored_by_default() {
        let identity = HardwareIdentity::new();
        identity.set(Category::FingerprintPresent, 1).unwrap();
        identity.set_raw(codes::FP, 1).unwrap();

        assert_eq!(identity.get(Category::FingerprintPresent), 0);
        assert!(!identity.is_populated(Category::FingerprintPresent));
        assert!(!identity.snapshot().fingerprint_present);
    }

    #[test]
    fn test_fingerprint_write_recorded_when_enabled() {
        let identity = with_fingerprint();
        identity.set(Category::FingerprintPresent, 1).unwrap();

        assert_eq!(identity.get(Category::FingerprintPresent), 1);
        assert!(identity.snapshot().fingerprint_present);
        assert!(identity.set(Category::FingerprintPresent, 2).is_err());
    }

    #[test]
    fn test_raw_selectors() {
        let identity = HardwareIdentity::new();
        identity.set_raw(codes::TOUCH, 3).unwrap();
        identity.set_raw(codes::EMMC, 0x0198).unwrap();

        assert_eq!(identity.get_raw(codes::TOUCH), 3);
        assert_eq!(identity.get_raw(codes::EMMC), 0x0198);
        assert_eq!(identity.get(Category::TouchController), 3);
    }

    #[test]
    fn test_unknown_selector() {
        let identity = HardwareIdentity::new();
        assert_eq!(identity.get_raw(9), UNKNOWN_CATEGORY);

        let before = identity.snapshot();
        identity.set_raw(9, 7).unwrap();
        identity.set_raw(u32::MAX, 7).unwrap();
        assert_eq!(identity.snapshot(), before);

        for category in Category::ALL {
            let _ = identity.set(category, category.max_value());
        }
        assert_eq!(identity.get_raw(9), 0xFF);
        assert_eq!(identity.get_raw(u32::MAX), 0xFF);
    }

    #[test]
    fn test_populated_tracking() {
        let identity = HardwareIdentity::new();
        identity.set(Category::DramVendor, 0).unwrap();
        identity.set(Category::PanelVariant, 1).unwrap();
        let _ = identity.set(Category::CpuVariant, 9);

        assert_eq!(
            identity.populated(),
            Categories::DRAM_VENDOR | Categories::PANEL_VARIANT
        );
        assert!(identity.is_populated(Category::DramVendor));
        assert!(!identity.is_populated(Category::CpuVariant));
    }

    #[test]
    fn test_snapshot_fields() {
        let identity = with_fingerprint();
        identity.set(Category::TouchController, 4).unwrap();
        identity.set(Category::SocVariant, 9).unwrap();
        identity.set(Category::DramVendor, 2).unwrap();
        identity.set(Category::StorageType, 0x01AD).unwrap();
        identity.set(Category::CpuVariant, 1).unwrap();
        identity.set(Category::PmicVariant, 3).unwrap();
        identity.set(Category::PanelVariant, 1).unwrap();
        identity.set(Category::TouchPanelMaker, 18).unwrap();
        identity.set(Category::FingerprintPresent, 1).unwrap();

        let snapshot = identity.snapshot();
        assert_eq!(
            snapshot,
            HardwareSnapshot {
                touch_controller: 4,
                soc_variant: 9,
                dram_vendor: 2,
                storage_type: 0x01AD,
                cpu_variant: 1,
                pmic_variant: 3,
                panel_variant: 1,
                touch_panel_maker: 18,
                fingerprint_present: true,
            }
        );
        for category in Category::ALL {
            assert_eq!(snapshot.get(category), identity.get(category));
        }
    }

    #[test]
    fn test_concurrent_field_writes() {
        extern crate std;

        let identity = with_fingerprint();
        let writers = [
            (Category::TouchController, 0xA),
            (Category::SocVariant, 0x5),
            (Category::DramVendor, 0x6),
            (Category::StorageType, 0x01CE),
            (Category::CpuVariant, 0x3),
            (Category::PmicVariant, 0x2),
            (Category::PanelVariant, 0x1),
            (Category::TouchPanelMaker, 0x11),
            (Category::FingerprintPresent, 0x1),
        ];

        std::thread::scope(|s| {
            for &(category, value) in &writers {
                let identity = &identity;
                s.spawn(move || {
                    for round in 0..1000u32 {
                        let v = if round % 2 == 0 { value } else { 0 };
                        identity.set(category, v).unwrap();
                    }
                    identity.set(category, value).unwrap();
                });
            }

            let identity = &identity;
            s.spawn(move || {
                for _ in 0..1000 {
                    for category in Category::ALL {
                        assert!(identity.get(category) <= category.max_value());
                    }
                }
            });
        });

        for (category, value) in writers {
            assert_eq!(identity.get(category), value, "{}", category);
        }
    }
}
