//! Volume and mode indication collaborator

use crate::types::ModeId;

/// Observational sink for volume and mode changes
///
/// Receives "set volume to N" and "show mode X" calls plus the volume
/// display toggle. Purely one-way; implementations must not call back
/// into the core.
pub trait StatusSink: Send {
    /// Apply a new volume level (0-100)
    fn set_volume(&mut self, level: u8);

    /// Show the newly active mode
    fn show_mode(&mut self, mode: ModeId);

    /// Turn the volume display on or off
    fn set_display(&mut self, on: bool);
}
