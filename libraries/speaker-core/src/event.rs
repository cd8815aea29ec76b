//! Event model for the shared bus
//!
//! Heterogeneous producers (UI surfaces, physical controls, modes, the
//! acoustic detector) publish one closed event type; the payload is typed
//! per kind, so a consumer never interprets opaque channel/code numbers.

use serde::{Deserialize, Serialize};

/// A single event on the shared bus
///
/// One variant per producer namespace. Events are value types, immutable
/// once published and consumed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Command from a UI surface (LCD menu, HTTP endpoint)
    Ui(UiCommand),

    /// Logical physical-control action (touch/button)
    Button(ButtonAction),

    /// Signal between modes and the control loop
    Signal(ModeSignal),

    /// Acoustic detection event
    Detection(Detection),
}

/// Commands accepted from UI surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiCommand {
    /// Toggle between the radio and Bluetooth outputs
    SwitchOutput,

    /// Step the volume up
    VolumeUp,

    /// Step the volume down
    VolumeDown,

    /// Next radio channel (meaningful in radio mode only)
    ChannelUp,

    /// Previous radio channel (meaningful in radio mode only)
    ChannelDown,

    /// Enable party mode
    PartyModeOn,

    /// Disable party mode
    PartyModeOff,

    /// Ask the clock to announce the current time
    AskClockTime,
}

impl UiCommand {
    /// All commands, in wire order
    pub const ALL: [UiCommand; 8] = [
        UiCommand::SwitchOutput,
        UiCommand::VolumeUp,
        UiCommand::VolumeDown,
        UiCommand::ChannelUp,
        UiCommand::ChannelDown,
        UiCommand::PartyModeOn,
        UiCommand::PartyModeOff,
        UiCommand::AskClockTime,
    ];

    /// Wire name used by the HTTP command surface
    pub fn as_str(&self) -> &'static str {
        match self {
            UiCommand::SwitchOutput => "switch-output",
            UiCommand::VolumeUp => "volume-up",
            UiCommand::VolumeDown => "volume-down",
            UiCommand::ChannelUp => "channel-up",
            UiCommand::ChannelDown => "channel-down",
            UiCommand::PartyModeOn => "party-mode-on",
            UiCommand::PartyModeOff => "party-mode-off",
            UiCommand::AskClockTime => "ask-clock-time",
        }
    }

    /// Parse a wire name back into a command
    pub fn from_str(s: &str) -> Option<Self> {
        UiCommand::ALL.into_iter().find(|cmd| cmd.as_str() == s)
    }
}

/// Logical buttons after hardware mapping
///
/// Mapping raw touch/button/ADC identifiers to these codes is the input
/// scanner's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    /// Output toggle (same behavior as [`UiCommand::SwitchOutput`])
    Play,

    /// Toggle the volume display
    Set,

    /// Step the volume up
    VolumeUp,

    /// Step the volume down
    VolumeDown,
}

/// Signals produced by modes for the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeSignal {
    /// The clock announcement finished playing
    ClockDone,

    /// The Bluetooth connection announcement finished playing
    BtDone,
}

/// Tone detection from the acoustic front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Detected tone frequency in Hz
    pub freq_hz: u32,
}
