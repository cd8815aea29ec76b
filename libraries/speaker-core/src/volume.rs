//! Volume state
//!
//! Level is a percentage clamped to 0..=100, stepped in fixed increments
//! by the volume keys. The state is pure; callers apply side effects
//! through the status sink.

/// Volume applied when no persisted options exist
pub const DEFAULT_VOLUME: u8 = 50;

/// Step applied by the volume-up/volume-down controls
pub const DEFAULT_VOLUME_STEP: u8 = 10;

/// Volume level state
#[derive(Debug, Clone)]
pub struct VolumeControl {
    level: u8,
    step: u8,
}

impl VolumeControl {
    /// Create with an initial level (clamped to 100) and step size
    pub fn new(level: u8, step: u8) -> Self {
        Self {
            level: level.min(100),
            step,
        }
    }

    /// Current level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Set an absolute level, clamped to 100; returns the applied level
    pub fn set(&mut self, level: u8) -> u8 {
        self.level = level.min(100);
        self.level
    }

    /// Step up, saturating at 100
    pub fn step_up(&mut self) -> u8 {
        self.level = self.level.saturating_add(self.step).min(100);
        self.level
    }

    /// Step down, saturating at 0
    pub fn step_down(&mut self) -> u8 {
        self.level = self.level.saturating_sub(self.step);
        self.level
    }
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME, DEFAULT_VOLUME_STEP)
    }
}
