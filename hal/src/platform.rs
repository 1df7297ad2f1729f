//! # Platform Identity
//!
//! Board variant detection. Several boards share one kernel image, and a
//! few subsystems need to know which one they are running on.

/// Known hardware platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HardwarePlatform {
    /// Unrecognised or undetected board
    #[default]
    Unknown,
    /// Sagit board
    Sagit,
    /// Chiron board
    Chiron,
}

impl HardwarePlatform {
    /// Decode the platform field of the hardware version register
    pub const fn from_raw(value: u32) -> Self {
        match value {
            1 => Self::Sagit,
            2 => Self::Chiron,
            _ => Self::Unknown,
        }
    }

    /// Get the platform name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Sagit => "sagit",
            Self::Chiron => "chiron",
        }
    }
}

/// Platform identity query
pub trait PlatformIdentity: Send + Sync {
    /// Get the platform the kernel is currently running on
    fn current_platform(&self) -> HardwarePlatform;
}

/// A fixed platform is its own identity
impl PlatformIdentity for HardwarePlatform {
    fn current_platform(&self) -> HardwarePlatform {
        *self
    }
}
