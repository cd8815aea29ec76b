//! Log-backed status sink
//!
//! Stands in for the LED strip and LCD on the appliance: volume and mode
//! changes land in the log, the display toggle gates the volume bar.

use speaker_core::{ModeId, StatusSink};
use tracing::info;

/// Status sink writing volume and mode changes to the log
pub struct LogStatus {
    display_on: bool,
}

impl LogStatus {
    pub fn new() -> Self {
        Self { display_on: true }
    }
}

impl Default for LogStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for LogStatus {
    fn set_volume(&mut self, level: u8) {
        info!(level, "volume set");
        if self.display_on {
            // 30-segment bar, like the LED strip
            let lit = (usize::from(level) * 30 + 50) / 100;
            info!("volume leds: {}", "#".repeat(lit));
        }
    }

    fn show_mode(&mut self, mode: ModeId) {
        info!(mode = %mode, "now playing");
    }

    fn set_display(&mut self, on: bool) {
        self.display_on = on;
        if !on {
            info!("volume leds off");
        }
    }
}
