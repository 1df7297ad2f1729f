//! # Helix Hardware Identity Subsystem
//!
//! Tracks which discrete components are populated on the device: touch
//! controller, SoC, DRAM vendor, storage, CPU/PMIC variant, display panel,
//! touch panel maker and fingerprint sensor presence.
//!
//! ## Lifecycle
//!
//! 1. The bring-up controller creates a [`HwInfo`] with a zeroed record
//! 2. [`HwInfo::bring_up`] derives the DRAM vendor from shared memory
//! 3. Each detection driver writes its own category once, through
//!    [`HardwareIdentity::set`]
//! 4. Diagnostic readers render the record through [`HwInfo::show`]
//!
//! Nothing here is fatal: every failure leaves the affected field at its
//! "unknown" value and bring-up continues.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod category;
pub mod config;
pub mod ddr;
pub mod record;
pub mod report;
pub mod vendor;

use core::fmt;
use helix_hal::{HalError, PlatformIdentity, SharedMemory, SmemId};

pub use category::{Categories, Category};
pub use config::{ConfigError, HwInfoConfig};
pub use record::{HardwareIdentity, HardwareSnapshot, WidthPolicy, UNKNOWN_CATEGORY};
pub use report::{Node, ReportLine};

/// Hardware identity result type
pub type HwInfoResult<T> = Result<T, HwInfoError>;

/// Hardware identity errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInfoError {
    /// Raw category selector outside the known set
    UnknownCategory(u32),
    /// Value does not fit the category's field
    OutOfRange {
        /// Target category
        category: Category,
        /// Rejected value
        value: u32,
        /// Largest value the field holds
        max: u32,
    },
    /// Shared memory item could not be read or was empty
    MemorySourceUnavailable {
        /// Item that was requested
        slot: SmemId,
        /// Accessor error, `None` if the item was empty
        cause: Option<HalError>,
    },
}

impl fmt::Display for HwInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(code) => write!(f, "unknown hardware category {}", code),
            Self::OutOfRange { category, value, max } => {
                write!(f, "{:#x} does not fit {} (max {:#x})", value, category, max)
            }
            Self::MemorySourceUnavailable { slot, cause: Some(cause) } => {
                write!(f, "cannot read {}: {}", slot, cause)
            }
            Self::MemorySourceUnavailable { slot, cause: None } => {
                write!(f, "{} is empty", slot)
            }
        }
    }
}

/// Outcome of [`HwInfo::bring_up`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BringUpReport {
    /// Normalized DRAM vendor code that was stored
    pub dram_vendor: u8,
    /// Bootstrap failure, if the shared memory item was unusable
    pub error: Option<HwInfoError>,
}

impl BringUpReport {
    /// Check whether bring-up completed without failures
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

/// Hardware identity subsystem
///
/// Owns the identity record for the lifetime of the kernel. Detection
/// drivers and diagnostic readers receive it through [`HwInfo::identity`].
#[derive(Debug)]
pub struct HwInfo {
    config: HwInfoConfig,
    identity: HardwareIdentity,
}

impl HwInfo {
    /// Create the subsystem with a zeroed record
    pub const fn new(config: HwInfoConfig) -> Self {
        Self {
            identity: HardwareIdentity::with_config(&config),
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &HwInfoConfig {
        &self.config
    }

    /// Get the identity record
    pub fn identity(&self) -> &HardwareIdentity {
        &self.identity
    }

    /// Run the bring-up steps owned by this subsystem
    ///
    /// Derives the DRAM vendor from shared memory. Failures are logged and
    /// reported, never propagated.
    pub fn bring_up(&self, smem: &dyn SharedMemory) -> BringUpReport {
        match ddr::bootstrap_dram_vendor(&self.identity, smem, self.config.ddr_slot) {
            Ok(dram_vendor) => BringUpReport { dram_vendor, error: None },
            Err(err) => {
                log::warn!("hwinfo: DDR vendor unknown: {}", err);
                BringUpReport {
                    dram_vendor: self.identity.get(Category::DramVendor) as u8,
                    error: Some(err),
                }
            }
        }
    }

    /// Produce the contents of a diagnostic node
    pub fn show<W: fmt::Write>(
        &self,
        w: &mut W,
        node: Node,
        platform: &dyn PlatformIdentity,
    ) -> fmt::Result {
        report::show(w, node, &self.identity, &self.config, platform)
    }

    /// Render the hardware report
    pub fn render(&self, platform: &dyn PlatformIdentity) -> alloc::vec::Vec<ReportLine> {
        report::render(&self.identity, platform, self.config.panel_platform)
    }
}

impl Default for HwInfo {
    fn default() -> Self {
        Self::new(HwInfoConfig::new())
    }
}

// =============================================================================
// TESTS
// =============================================================================
