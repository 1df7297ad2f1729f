//! # Helix HAL - Hardware Abstraction Layer
//!
//! This crate defines the hardware-facing interfaces consumed by the
//! hardware identity subsystem.
//!
//! ## Interfaces
//!
//! - [`smem::SharedMemory`]: platform shared memory, populated by boot
//!   firmware and read by kernel subsystems during bring-up
//! - [`platform::PlatformIdentity`]: which board variant the kernel runs on
//!
//! Concrete implementations live next to the traits so that boot hand-off
//! code and host tests can drive the subsystems without real hardware.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod platform;
pub mod smem;

use core::fmt;

pub use platform::{HardwarePlatform, PlatformIdentity};
pub use smem::{SharedMemory, SmemId, SmemTable};

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;

/// Errors that can occur in HAL operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// The operation is not supported on this platform
    NotSupported,
    /// Invalid parameter provided
    InvalidParameter,
    /// Hardware reported an error
    HardwareError,
    /// Resource is not available
    ResourceBusy,
    /// The requested item does not exist
    NotFound,
    /// Feature not initialized
    NotInitialized,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NotSupported => "operation not supported",
            Self::InvalidParameter => "invalid parameter",
            Self::HardwareError => "hardware error",
            Self::ResourceBusy => "resource busy",
            Self::NotFound => "not found",
            Self::NotInitialized => "not initialized",
        };
        f.write_str(msg)
    }
}
