//! Core types for the control loop

use crate::volume::{DEFAULT_VOLUME, DEFAULT_VOLUME_STEP};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Operating mode of the speaker
///
/// Exactly one mode owns the audio output path at any time. "No active
/// mode" is expressed as `Option<ModeId>` being `None` and is observed only
/// transiently while a transition is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeId {
    /// Internet radio streaming
    Radio,

    /// Bluetooth audio sink
    Bluetooth,

    /// Spoken clock announcement
    Clock,

    /// Bluetooth pairing with pairing-mode audio
    BtPairing,
}

impl ModeId {
    /// Number of modes (registry slots)
    pub const COUNT: usize = 4;

    /// All modes, in registry order
    pub const ALL: [ModeId; ModeId::COUNT] = [
        ModeId::Radio,
        ModeId::Bluetooth,
        ModeId::Clock,
        ModeId::BtPairing,
    ];

    /// Stable name used by UI surfaces and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeId::Radio => "radio",
            ModeId::Bluetooth => "bluetooth",
            ModeId::Clock => "clock",
            ModeId::BtPairing => "bt-pairing",
        }
    }

    /// Parse a stable name back into a mode
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "radio" => Some(ModeId::Radio),
            "bluetooth" => Some(ModeId::Bluetooth),
            "clock" => Some(ModeId::Clock),
            "bt-pairing" => Some(ModeId::BtPairing),
            _ => None,
        }
    }

    /// Stable numeric code used by the persisted options encoding
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parse a persisted numeric code back into a mode
    pub fn from_code(code: u8) -> Option<Self> {
        ModeId::ALL.get(code as usize).copied()
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted startup options
///
/// Loaded once by the startup sequencer and applied through `switch_to`
/// plus a volume set. The core never mutates them afterwards; saving is
/// the hosting process's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupOptions {
    /// Mode to enter after the startup trigger
    pub mode: ModeId,

    /// Volume to apply (0-100)
    pub volume: u8,

    /// Party mode flag (persisted, currently not wired to a transition)
    pub party_mode: bool,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            mode: ModeId::Radio,
            volume: DEFAULT_VOLUME,
            party_mode: false,
        }
    }
}

/// Configuration for the control loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Volume before startup options are applied (0-100, default: 50)
    pub volume: u8,

    /// Step applied by the volume keys (default: 10)
    pub volume_step: u8,

    /// Bounded capacity of the event bus (default: 32)
    pub bus_capacity: usize,

    /// Longest a blocking publisher waits for bus space (default: 100ms)
    pub publish_timeout: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            volume_step: DEFAULT_VOLUME_STEP,
            bus_capacity: 32,
            publish_timeout: Duration::from_millis(100),
        }
    }
}
