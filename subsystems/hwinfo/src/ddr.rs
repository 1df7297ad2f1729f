//! # DDR Vendor Bootstrap
//!
//! The boot firmware reads the DRAM manufacturer ID (LPDDR mode register 5)
//! and leaves it in a vendor shared memory item. During bring-up the first
//! byte of that item is translated into a normalized [`DramVendor`] code and
//! stored in the identity record.

use crate::category::Category;
use crate::record::HardwareIdentity;
use crate::vendor::DramVendor;
use crate::{HwInfoError, HwInfoResult};
use helix_hal::{SharedMemory, SmemId};

/// Raw MR5 manufacturer IDs
pub mod mr5 {
    /// Samsung
    pub const SAMSUNG: u8 = 0x01;
    /// SK Hynix
    pub const HYNIX: u8 = 0x06;
    /// Elpida
    pub const ELPIDA: u8 = 0x03;
    /// Micron
    pub const MICRON: u8 = 0xFF;
    /// Nanya
    pub const NANYA: u8 = 0x05;
    /// Intel
    pub const INTEL: u8 = 0x0E;
}

/// Raw manufacturer ID to vendor
pub const VENDOR_TABLE: [(u8, DramVendor); 6] = [
    (mr5::SAMSUNG, DramVendor::Samsung),
    (mr5::HYNIX, DramVendor::Hynix),
    (mr5::ELPIDA, DramVendor::Elpida),
    (mr5::MICRON, DramVendor::Micron),
    (mr5::NANYA, DramVendor::Nanya),
    (mr5::INTEL, DramVendor::Intel),
];

/// Look up the vendor for a raw manufacturer ID
pub fn lookup(raw: u8) -> Option<DramVendor> {
    VENDOR_TABLE
        .iter()
        .find(|&&(code, _)| code == raw)
        .map(|&(_, vendor)| vendor)
}

/// Translate a raw manufacturer ID into a normalized code
///
/// Unmapped IDs normalize to [`DramVendor::UNKNOWN`].
pub fn normalize(raw: u8) -> u8 {
    lookup(raw).map_or(DramVendor::UNKNOWN, DramVendor::code)
}

/// Populate the DRAM vendor field from shared memory
///
/// Returns the normalized code that was stored. If the item cannot be read
/// or is empty, the field is set to [`DramVendor::UNKNOWN`] and
/// [`HwInfoError::MemorySourceUnavailable`] is returned; callers log it and
/// carry on.
pub fn bootstrap_dram_vendor(
    identity: &HardwareIdentity,
    source: &dyn SharedMemory,
    slot: SmemId,
) -> HwInfoResult<u8> {
    let mut buf = [0u8; 1];
    let cause = match source.read(slot, &mut buf) {
        Ok(0) => None,
        Ok(_) => {
            let raw = buf[0];
            let code = normalize(raw);
            identity.set(Category::DramVendor, u32::from(code))?;

            match lookup(raw) {
                Some(vendor) => log::info!("hwinfo: DDR vendor {} (id {:#04x})", vendor.name(), raw),
                None => log::info!("hwinfo: unrecognised DDR manufacturer id {:#04x}", raw),
            }
            return Ok(code);
        }
        Err(err) => Some(err),
    };

    log::error!("hwinfo: error fetching DDR manufacturer id from {}", slot);
    identity.set(Category::DramVendor, u32::from(DramVendor::UNKNOWN))?;
    Err(HwInfoError::MemorySourceUnavailable { slot, cause })
}
