//! # Hardware Categories
//!
//! The closed set of component categories tracked by the identity record,
//! their raw selector codes, and their bit layout in the packed record word.

use crate::HwInfoError;
use bitflags::bitflags;
use core::fmt;
use static_assertions::const_assert;

/// Raw category selectors, as passed by detection drivers
pub mod codes {
    /// Touch controller IC
    pub const TOUCH: u32 = 0;
    /// SoC variant
    pub const SOC: u32 = 1;
    /// DRAM vendor
    pub const DDR: u32 = 2;
    /// Storage (UFS/eMMC) manufacturer
    pub const EMMC: u32 = 3;
    /// CPU variant
    pub const CPU: u32 = 4;
    /// PMIC variant
    pub const PMIC: u32 = 5;
    /// Display panel
    pub const PANEL: u32 = 6;
    /// Touch panel manufacturer
    pub const TP_MAKER: u32 = 7;
    /// Fingerprint sensor presence
    pub const FP: u32 = 8;
}

/// Hardware identity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum Category {
    /// Touch controller IC (4 bits)
    TouchController = codes::TOUCH,
    /// SoC variant (4 bits)
    SocVariant = codes::SOC,
    /// DRAM vendor, normalized (4 bits)
    DramVendor = codes::DDR,
    /// Storage manufacturer, raw JEDEC code (16 bits)
    StorageType = codes::EMMC,
    /// CPU variant (2 bits)
    CpuVariant = codes::CPU,
    /// PMIC variant (2 bits)
    PmicVariant = codes::PMIC,
    /// Display panel variant (4 bits)
    PanelVariant = codes::PANEL,
    /// Touch panel manufacturer (5 bits)
    TouchPanelMaker = codes::TP_MAKER,
    /// Fingerprint sensor present (1 bit)
    FingerprintPresent = codes::FP,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 9;

    /// All categories, in record order
    pub const ALL: [Category; Self::COUNT] = [
        Category::TouchController,
        Category::SocVariant,
        Category::DramVendor,
        Category::StorageType,
        Category::CpuVariant,
        Category::PmicVariant,
        Category::PanelVariant,
        Category::TouchPanelMaker,
        Category::FingerprintPresent,
    ];

    /// Look up a category by its raw selector
    pub const fn from_raw(code: u32) -> Option<Self> {
        match code {
            codes::TOUCH => Some(Self::TouchController),
            codes::SOC => Some(Self::SocVariant),
            codes::DDR => Some(Self::DramVendor),
            codes::EMMC => Some(Self::StorageType),
            codes::CPU => Some(Self::CpuVariant),
            codes::PMIC => Some(Self::PmicVariant),
            codes::PANEL => Some(Self::PanelVariant),
            codes::TP_MAKER => Some(Self::TouchPanelMaker),
            codes::FP => Some(Self::FingerprintPresent),
            _ => None,
        }
    }

    /// Get the raw selector
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Get the category name
    pub const fn name(self) -> &'static str {
        match self {
            Self::TouchController => "touch_controller",
            Self::SocVariant => "soc_variant",
            Self::DramVendor => "dram_vendor",
            Self::StorageType => "storage_type",
            Self::CpuVariant => "cpu_variant",
            Self::PmicVariant => "pmic_variant",
            Self::PanelVariant => "panel_variant",
            Self::TouchPanelMaker => "touch_panel_maker",
            Self::FingerprintPresent => "fingerprint_present",
        }
    }

    /// Field width in bits
    pub const fn width(self) -> u32 {
        match self {
            Self::TouchController => 4,
            Self::SocVariant => 4,
            Self::DramVendor => 4,
            Self::StorageType => 16,
            Self::CpuVariant => 2,
            Self::PmicVariant => 2,
            Self::PanelVariant => 4,
            Self::TouchPanelMaker => 5,
            Self::FingerprintPresent => 1,
        }
    }

    /// Largest value the field can hold
    pub const fn max_value(self) -> u32 {
        (1 << self.width()) - 1
    }

    /// Bit offset of the field in the packed record word
    pub const fn shift(self) -> u32 {
        let mut shift = 0;
        let mut i = 0;
        while i < self.raw() as usize {
            shift += Self::ALL[i].width();
            i += 1;
        }
        shift
    }

    /// Mask of the field in the packed record word
    pub const fn mask(self) -> u64 {
        (self.max_value() as u64) << self.shift()
    }

    /// Get the flag for this category
    pub const fn flag(self) -> Categories {
        Categories::from_bits_retain(1 << self.raw())
    }
}

impl TryFrom<u32> for Category {
    type Error = HwInfoError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_raw(code).ok_or(HwInfoError::UnknownCategory(code))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Total bits used by the packed record
pub const LAYOUT_BITS: u32 = {
    let mut bits = 0;
    let mut i = 0;
    while i < Category::COUNT {
        bits += Category::ALL[i].width();
        i += 1;
    }
    bits
};

const_assert!(LAYOUT_BITS <= u64::BITS);
const_assert!(Category::COUNT <= u32::BITS as usize);

bitflags! {
    /// Set of categories
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Categories: u32 {
        /// Touch controller
        const TOUCH_CONTROLLER = 1 << codes::TOUCH;
        /// SoC variant
        const SOC_VARIANT = 1 << codes::SOC;
        /// DRAM vendor
        const DRAM_VENDOR = 1 << codes::DDR;
        /// Storage type
        const STORAGE_TYPE = 1 << codes::EMMC;
        /// CPU variant
        const CPU_VARIANT = 1 << codes::CPU;
        /// PMIC variant
        const PMIC_VARIANT = 1 << codes::PMIC;
        /// Panel variant
        const PANEL_VARIANT = 1 << codes::PANEL;
        /// Touch panel maker
        const TOUCH_PANEL_MAKER = 1 << codes::TP_MAKER;
        /// Fingerprint presence
        const FINGERPRINT_PRESENT = 1 << codes::FP;
    }
}

impl Categories {
    /// Iterate over the categories in this set, in record order
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.contains(c.flag()))
    }
}
