//! Data model for remote host metrics
//!
//! Plain structured values produced by the parsers. Per-tick values live
//! in [`Snapshot`]; values that never change during a session live in
//! [`StaticInfo`] and are fetched once before the render loop starts.

use std::collections::HashSet;

/// Which column of the throttling panel a flag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleGroup {
    /// The condition is active right now
    Current,
    /// The condition occurred at some point since boot
    SinceBoot,
}

/// Meaningful bits of the firmware throttling register.
///
/// The register is 32 bits wide; only these eight indices carry meaning
/// and every other set bit is ignored. Index refers to the bit position
/// (LSB = 0).
pub const THROTTLE_FLAGS: &[(usize, &str, ThrottleGroup)] = &[
    (0, "Under voltage", ThrottleGroup::Current),
    (1, "Arm frequency capped", ThrottleGroup::Current),
    (2, "Throttled", ThrottleGroup::Current),
    (3, "Soft temperature limit", ThrottleGroup::Current),
    (16, "Under voltage", ThrottleGroup::SinceBoot),
    (17, "Arm frequency capped", ThrottleGroup::SinceBoot),
    (18, "Throttled", ThrottleGroup::SinceBoot),
    (19, "Soft temperature limit", ThrottleGroup::SinceBoot),
];

/// Video codecs the dashboard reports on, in display order.
pub const CODECS: &[&str] = &["H264", "MPG2", "WVC1", "MPG4", "MJPG", "WMV9"];

/// Decoded throttling state: matched flag labels per group, in bit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrottleStatus {
    pub current: Vec<&'static str>,
    pub since_boot: Vec<&'static str>,
}

/// One row of the remote `df` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskRow {
    pub filesystem: String,
    pub size: String,
    pub used: String,
    pub available: String,
    pub mounted: String,
}

/// Available CPU frequency governors and the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Governors {
    pub available: Vec<String>,
    pub active: String,
}

/// Load averages and process counts from `/proc/loadavg`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadInfo {
    /// 1-minute load average
    pub one: f32,
    /// 5-minute load average
    pub five: f32,
    /// 15-minute load average
    pub fifteen: f32,
    /// Runnable processes, excluding the sampling process itself
    pub active_procs: u32,
    /// Total processes, excluding the sampling process itself
    pub total_procs: u32,
}

/// Values fetched once at startup; they do not change within a session.
#[derive(Debug, Clone)]
pub struct StaticInfo {
    pub kernel: String,
    pub hostname: String,
    pub governors: Governors,
    /// Names of codecs the firmware reports as enabled
    pub codecs_enabled: HashSet<String>,
    pub gpu_memory: String,
}

/// The per-tick metric bundle: created, rendered, discarded.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub uptime: String,
    pub gpu_temp: f32,
    pub cpu_temp: f32,
    pub cpu_usage: f32,
    pub load: LoadInfo,
    pub ram: String,
    pub cpu_freq_mhz: u32,
    pub throttle: ThrottleStatus,
}
