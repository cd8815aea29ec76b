//! Mode behavior and registry

use crate::error::Result;
use crate::event::Event;
use crate::types::ModeId;

/// Behavior of one operating mode
///
/// `enter`/`exit` acquire and release the audio output path plus any
/// mode-specific peripherals; `run` reacts to bus events while the mode is
/// active; `can_enter` gates a transition before the old mode is touched.
/// Every method has a successful no-op default, so a mode implements only
/// what it needs.
///
/// Callbacks execute on the consumer thread and must bound their waits; a
/// mode whose teardown or setup is slow should finish in the background and
/// report completion through a bus signal instead of stalling the loop.
pub trait Mode: Send {
    /// Whether the mode can be entered right now
    fn can_enter(&mut self) -> bool {
        true
    }

    /// Acquire the audio output and mode resources
    fn enter(&mut self) -> Result<()> {
        Ok(())
    }

    /// React to a bus event while active
    fn run(&mut self, event: &Event) -> Result<()> {
        let _ = event;
        Ok(())
    }

    /// Release the audio output and mode resources
    fn exit(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Stand-in for unregistered modes; every callback is a successful no-op
struct NullMode;

impl Mode for NullMode {}

/// Registry mapping each [`ModeId`] to its behavior
///
/// Hosting code registers one mode per id before the loop starts; the
/// registry is immutable afterwards. Unregistered slots fall back to a
/// no-op mode.
pub struct ModeRegistry {
    modes: [Box<dyn Mode>; ModeId::COUNT],
}

impl ModeRegistry {
    /// Create a registry with every slot unregistered
    pub fn new() -> Self {
        Self {
            modes: [
                Box::new(NullMode),
                Box::new(NullMode),
                Box::new(NullMode),
                Box::new(NullMode),
            ],
        }
    }

    /// Supply the behavior for one mode
    pub fn register(&mut self, id: ModeId, mode: Box<dyn Mode>) -> &mut Self {
        self.modes[id.index()] = mode;
        self
    }

    pub(crate) fn get_mut(&mut self, id: ModeId) -> &mut dyn Mode {
        self.modes[id.index()].as_mut()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Detection, Event};

    #[test]
    fn unregistered_slots_are_noop() {
        let mut registry = ModeRegistry::new();
        for id in ModeId::ALL {
            let mode = registry.get_mut(id);
            assert!(mode.can_enter());
            assert!(mode.enter().is_ok());
            assert!(mode
                .run(&Event::Detection(Detection { freq_hz: 200 }))
                .is_ok());
            assert!(mode.exit().is_ok());
        }
    }

    #[test]
    fn register_replaces_slot() {
        struct Closed;
        impl Mode for Closed {
            fn can_enter(&mut self) -> bool {
                false
            }
        }

        let mut registry = ModeRegistry::new();
        registry.register(ModeId::Bluetooth, Box::new(Closed));

        assert!(!registry.get_mut(ModeId::Bluetooth).can_enter());
        assert!(registry.get_mut(ModeId::Radio).can_enter());
    }
}
