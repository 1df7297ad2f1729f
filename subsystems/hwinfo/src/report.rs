//! # Diagnostic Report
//!
//! Human-readable rendering of the identity record, and the read-only
//! diagnostic nodes that serve it. Attaching the nodes to a filesystem is
//! left to the embedding kernel; this module only produces their text.

use crate::config::HwInfoConfig;
use crate::record::{HardwareIdentity, HardwareSnapshot};
use crate::vendor::{DramVendor, Panel, StorageVendor, TouchIc, TouchPanelMaker};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};
use helix_hal::{HardwarePlatform, PlatformIdentity};

/// Report line labels
pub mod labels {
    /// Storage manufacturer
    pub const UFS: &str = "UFS";
    /// DRAM vendor
    pub const DDR: &str = "DDR";
    /// Touch controller
    pub const TOUCH_IC: &str = "TOUCH IC";
    /// Touch panel manufacturer
    pub const TP_MAKER: &str = "TP Maker";
    /// Display panel
    pub const LCD: &str = "LCD";
}

/// One line of the hardware report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// Line label
    pub label: &'static str,
    /// Decoded value
    pub value: String,
}

impl ReportLine {
    fn decoded(label: &'static str, name: Option<&'static str>, code: u32) -> Self {
        let value = match name {
            Some(name) => String::from(name),
            None => format!("Unknown {:x}", code),
        };
        Self { label, value }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Render the record as report lines
///
/// The panel line is only emitted when `platform` reports `panel_platform`;
/// the panel code means nothing on other boards.
pub fn render(
    identity: &HardwareIdentity,
    platform: &dyn PlatformIdentity,
    panel_platform: HardwarePlatform,
) -> Vec<ReportLine> {
    render_snapshot(&identity.snapshot(), platform.current_platform() == panel_platform)
}

fn render_snapshot(hw: &HardwareSnapshot, with_panel: bool) -> Vec<ReportLine> {
    let storage = u32::from(hw.storage_type);
    let dram = u32::from(hw.dram_vendor);
    let touch = u32::from(hw.touch_controller);
    let tp_maker = u32::from(hw.touch_panel_maker);

    let mut lines = Vec::with_capacity(5);
    lines.push(ReportLine::decoded(
        labels::UFS,
        StorageVendor::from_code(storage).map(StorageVendor::name),
        storage,
    ));
    lines.push(ReportLine::decoded(
        labels::DDR,
        DramVendor::from_code(dram).map(DramVendor::name),
        dram,
    ));
    lines.push(ReportLine::decoded(
        labels::TOUCH_IC,
        TouchIc::from_code(touch).map(TouchIc::name),
        touch,
    ));
    lines.push(ReportLine::decoded(
        labels::TP_MAKER,
        TouchPanelMaker::from_code(tp_maker).map(TouchPanelMaker::name),
        tp_maker,
    ));

    if with_panel {
        let panel = u32::from(hw.panel_variant);
        let value = match Panel::from_code(panel) {
            Some(panel) => String::from(panel.name()),
            None => format!("UNKNOWN {:x}", panel),
        };
        lines.push(ReportLine { label: labels::LCD, value });
    }

    lines
}

/// Write report lines, one per text line
pub fn write_report<W: Write>(w: &mut W, lines: &[ReportLine]) -> fmt::Result {
    for line in lines {
        writeln!(w, "{}", line)?;
    }
    Ok(())
}

/// Read-only diagnostic nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Decoded component report
    HwInfo,
    /// Maximum CPU frequency, in GHz
    CpuMaxFreq,
}

impl Node {
    /// All nodes
    pub const ALL: [Node; 2] = [Node::HwInfo, Node::CpuMaxFreq];

    /// Node name
    pub const fn name(self) -> &'static str {
        match self {
            Self::HwInfo => "hwinfo",
            Self::CpuMaxFreq => "cpumaxfreq",
        }
    }

    /// Look up a node by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|node| node.name() == name)
    }
}

/// Produce the contents of `node`
pub fn show<W: Write>(
    w: &mut W,
    node: Node,
    identity: &HardwareIdentity,
    config: &HwInfoConfig,
    platform: &dyn PlatformIdentity,
) -> fmt::Result {
    match node {
        Node::HwInfo => write_report(w, &render(identity, platform, config.panel_platform)),
        Node::CpuMaxFreq => writeln!(w, "{}", config.cpu_max_freq),
    }
}

// =============================================================================
// TESTS
// =============================================================================
