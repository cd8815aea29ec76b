//! Startup auto-configuration
//!
//! The first acoustic detection after boot applies the persisted startup
//! options (or the documented defaults); every later detection is ignored
//! for the lifetime of the process.

use crate::machine::StateMachine;
use crate::store::OptionsStore;
use crate::types::StartupOptions;
use crate::volume::VolumeControl;
use tracing::{debug, info, warn};

/// One-shot startup configuration latch
pub struct StartupSequencer {
    armed: bool,
}

impl StartupSequencer {
    /// Create an armed sequencer
    pub fn new() -> Self {
        Self { armed: true }
    }

    /// Whether the one-shot action is still pending
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// React to a detection event
    ///
    /// Fires at most once: the latch clears before anything fallible runs,
    /// so a failed load or switch never re-arms it. A load failure falls
    /// back to the default options (radio, volume 50). Returns the options
    /// that were applied, or `None` when the latch had already fired.
    pub fn handle_detection(
        &mut self,
        machine: &mut StateMachine,
        volume: &mut VolumeControl,
        store: &mut dyn OptionsStore,
    ) -> Option<StartupOptions> {
        if !self.armed {
            debug!("startup configuration already applied, ignoring detection");
            return None;
        }
        self.armed = false;

        let options = match store.load() {
            Ok(options) => {
                info!(?options, "applying persisted startup options");
                options
            }
            Err(err) => {
                warn!(%err, "no usable startup options, applying defaults");
                StartupOptions::default()
            }
        };

        if let Err(err) = machine.switch_to(options.mode) {
            warn!(%err, mode = %options.mode, "startup mode switch failed");
        }
        volume.set(options.volume);
        Some(options)
    }
}

impl Default for StartupSequencer {
    fn default() -> Self {
        Self::new()
    }
}
