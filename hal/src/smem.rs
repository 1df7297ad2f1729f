//! # Shared Memory
//!
//! Boot firmware leaves small records for the kernel in a shared memory
//! region, addressed by numeric item IDs. Subsystems read them once during
//! bring-up.

use crate::{HalError, HalResult};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use spin::RwLock;

/// Shared memory item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SmemId(u32);

impl SmemId {
    /// First vendor-reserved item
    pub const VENDOR0: Self = Self(134);
    /// Second vendor-reserved item
    pub const VENDOR1: Self = Self(135);
    /// Third vendor-reserved item (DDR manufacturer identity)
    pub const VENDOR2: Self = Self(136);

    /// Create from raw value
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw item number
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SmemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "smem#{}", self.0)
    }
}

/// Shared memory accessor
pub trait SharedMemory: Send + Sync {
    /// Copy the contents of item `id` into `buf`
    ///
    /// Returns the number of bytes copied, which is the smaller of the item
    /// size and `buf.len()`. A present but empty item yields `Ok(0)`; a
    /// missing item yields [`HalError::NotFound`].
    fn read(&self, id: SmemId, buf: &mut [u8]) -> HalResult<usize>;
}

/// In-memory shared memory table
///
/// Filled by boot hand-off code with the items the firmware exported.
#[derive(Debug, Default)]
pub struct SmemTable {
    items: RwLock<BTreeMap<SmemId, Vec<u8>>>,
}

impl SmemTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// Publish an item, replacing any previous contents
    pub fn publish(&self, id: SmemId, data: &[u8]) {
        self.items.write().insert(id, data.to_vec());
        log::debug!("smem: published {} ({} bytes)", id, data.len());
    }

    /// Remove an item; returns whether it existed
    pub fn retract(&self, id: SmemId) -> bool {
        self.items.write().remove(&id).is_some()
    }

    /// Check whether an item is present
    pub fn contains(&self, id: SmemId) -> bool {
        self.items.read().contains_key(&id)
    }

    /// Number of published items
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Check if no items are published
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl SharedMemory for SmemTable {
    fn read(&self, id: SmemId, buf: &mut [u8]) -> HalResult<usize> {
        let items = self.items.read();
        let data = items.get(&id).ok_or(HalError::NotFound)?;
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_item() {
        let table = SmemTable::new();
        let mut buf = [0u8; 4];
        assert_eq!(table.read(SmemId::VENDOR2, &mut buf), Err(HalError::NotFound));
    }

    #[test]
    fn test_read_truncates_to_buffer() {
        let table = SmemTable::new();
        table.publish(SmemId::VENDOR2, &[0x06, 0x00, 0x00, 0x00]);

        let mut buf = [0u8; 1];
        assert_eq!(table.read(SmemId::VENDOR2, &mut buf), Ok(1));
        assert_eq!(buf[0], 0x06);
    }

    #[test]
    fn test_read_empty_item() {
        let table = SmemTable::new();
        table.publish(SmemId::VENDOR0, &[]);

        let mut buf = [0xAAu8; 2];
        assert_eq!(table.read(SmemId::VENDOR0, &mut buf), Ok(0));
        assert_eq!(buf, [0xAA, 0xAA]);
    }

    #[test]
    fn test_publish_and_retract() {
        let table = SmemTable::new();
        assert!(table.is_empty());

        table.publish(SmemId::VENDOR1, &[1, 2, 3]);
        table.publish(SmemId::VENDOR1, &[9]);
        assert_eq!(table.len(), 1);
        assert!(table.contains(SmemId::VENDOR1));

        let mut buf = [0u8; 8];
        assert_eq!(table.read(SmemId::VENDOR1, &mut buf), Ok(1));
        assert_eq!(buf[0], 9);

        assert!(table.retract(SmemId::VENDOR1));
        assert!(!table.retract(SmemId::VENDOR1));
        assert!(!table.contains(SmemId::VENDOR1));
    }

    #[test]
    fn test_smem_id_raw() {
        assert_eq!(SmemId::VENDOR2.as_u32(), 136);
        assert_eq!(SmemId::from_raw(136), SmemId::VENDOR2);
    }
}
