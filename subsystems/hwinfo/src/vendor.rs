//! # Component Vendors
//!
//! Decoding tables for the normalized codes stored in the identity record.

/// Storage (UFS) manufacturer, by JEDEC manufacturer ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageVendor {
    /// Toshiba
    Toshiba,
    /// Samsung
    Samsung,
    /// SK Hynix
    Hynix,
}

impl StorageVendor {
    /// Decode a storage manufacturer code
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0x0198 => Some(Self::Toshiba),
            0x01CE => Some(Self::Samsung),
            0x01AD => Some(Self::Hynix),
            _ => None,
        }
    }

    /// Get the vendor name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Toshiba => "Toshiba",
            Self::Samsung => "Samsung",
            Self::Hynix => "Hynix",
        }
    }
}

/// DRAM vendor, by normalized code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DramVendor {
    /// Samsung
    Samsung = 0x01,
    /// SK Hynix
    Hynix = 0x02,
    /// Elpida
    Elpida = 0x03,
    /// Micron
    Micron = 0x04,
    /// Nanya
    Nanya = 0x05,
    /// Intel
    Intel = 0x06,
}

impl DramVendor {
    /// Normalized code meaning "not determined"
    pub const UNKNOWN: u8 = 0x00;

    /// Decode a normalized DRAM vendor code
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0x01 => Some(Self::Samsung),
            0x02 => Some(Self::Hynix),
            0x03 => Some(Self::Elpida),
            0x04 => Some(Self::Micron),
            0x05 => Some(Self::Nanya),
            0x06 => Some(Self::Intel),
            _ => None,
        }
    }

    /// Get the normalized code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Get the vendor name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Samsung => "Samsung",
            Self::Hynix => "Hynix",
            Self::Elpida => "Elpida",
            Self::Micron => "Micron",
            Self::Nanya => "Nanya",
            Self::Intel => "Intel",
        }
    }
}

/// Touch controller IC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchIc {
    /// Synaptics
    Synaptics,
    /// Atmel
    Atmel,
    /// Focaltech
    Focaltech,
    /// STMicroelectronics
    St,
}

impl TouchIc {
    /// Decode a touch controller code
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Synaptics),
            2 => Some(Self::Atmel),
            3 => Some(Self::Focaltech),
            4 => Some(Self::St),
            _ => None,
        }
    }

    /// Get the vendor name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Synaptics => "Synaptics",
            Self::Atmel => "Atmel",
            Self::Focaltech => "Focaltech",
            Self::St => "ST",
        }
    }
}

/// Touch panel (sensor glass) manufacturer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPanelMaker {
    /// Biel
    Biel,
    /// Lens
    Lens,
    /// O-film
    Ofilm,
    /// Sharp
    Sharp,
    /// EBBG
    Ebbg,
    /// LG
    Lg,
}

impl TouchPanelMaker {
    /// Decode a touch panel maker code
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Biel),
            2 => Some(Self::Lens),
            4 => Some(Self::Ofilm),
            8 => Some(Self::Sharp),
            17 => Some(Self::Ebbg),
            18 => Some(Self::Lg),
            _ => None,
        }
    }

    /// Get the vendor name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Biel => "Biel",
            Self::Lens => "Lens",
            Self::Ofilm => "Ofilm",
            Self::Sharp => "Sharp",
            Self::Ebbg => "Ebbg",
            Self::Lg => "Lg",
        }
    }
}

/// Display panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// JDI R63452 driver IC
    JdiR63452,
    /// LGD TD4322 driver IC
    LgdTd4322,
}

impl Panel {
    /// Decode a panel variant code
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::JdiR63452),
            1 => Some(Self::LgdTd4322),
            _ => None,
        }
    }

    /// Get the panel description
    pub const fn name(self) -> &'static str {
        match self {
            Self::JdiR63452 => "JDI R63452 FHD CMD INCELL",
            Self::LgdTd4322 => "LGD TD4322 FHD CMD INCELL",
        }
    }
}
