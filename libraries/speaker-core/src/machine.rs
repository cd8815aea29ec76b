//! Mode state machine
//!
//! Enforces the single-active-mode invariant and sequences every
//! transition as guard, exit of the old mode, then enter of the new one.
//! All state lives in the [`StateMachine`] owned by the consumer loop;
//! nothing is shared, so no lock guards it.

use crate::error::{Error, Result};
use crate::event::Event;
use crate::mode::ModeRegistry;
use crate::types::ModeId;
use tracing::{debug, warn};

/// The mode state machine
///
/// `current` is the mode owning the audio output, or `None` during the
/// window between a completed `exit` and the next `enter` (and after a
/// failed `enter`). `previous` is the mode active immediately before the
/// current one, used to return from a transient mode such as the clock.
pub struct StateMachine {
    registry: ModeRegistry,
    current: Option<ModeId>,
    previous: Option<ModeId>,
    switching: bool,
}

impl StateMachine {
    /// Create a machine with no active mode
    pub fn new(registry: ModeRegistry) -> Self {
        Self {
            registry,
            current: None,
            previous: None,
            switching: false,
        }
    }

    /// Mode currently owning the audio output, if any
    pub fn current(&self) -> Option<ModeId> {
        self.current
    }

    /// Mode active immediately before the current one
    pub fn previous(&self) -> Option<ModeId> {
        self.previous
    }

    /// Switch to `target`, releasing the current mode first
    ///
    /// Switching to the mode that is already active is a successful no-op
    /// and runs neither `exit` nor `enter`. On a guard or exit failure the
    /// current mode stays active. If the old mode released its resources
    /// but the target failed to start, no mode is active afterwards; the
    /// machine does not roll back to the previous mode, whose resources
    /// were already released, and a later explicit switch is required.
    pub fn switch_to(&mut self, target: ModeId) -> Result<()> {
        if self.current == Some(target) {
            debug!(mode = %target, "already active, ignoring switch");
            return Ok(());
        }
        if self.switching {
            return Err(Error::Reentrant);
        }

        self.switching = true;
        let result = self.transition(target);
        self.switching = false;
        result
    }

    fn transition(&mut self, target: ModeId) -> Result<()> {
        if !self.registry.get_mut(target).can_enter() {
            return Err(Error::GuardRejected(target));
        }

        if let Some(old) = self.current {
            debug!(mode = %old, "leaving mode");
            if let Err(err) = self.registry.get_mut(old).exit() {
                return Err(Error::ExitFailed {
                    mode: old,
                    reason: err.to_string(),
                });
            }
        }
        self.previous = self.current;
        self.current = None;

        debug!(mode = %target, "entering mode");
        if let Err(err) = self.registry.get_mut(target).enter() {
            return Err(Error::EnterFailed {
                mode: target,
                reason: err.to_string(),
            });
        }
        self.current = Some(target);
        Ok(())
    }

    /// Forward an event to the active mode
    ///
    /// No-op while no mode is active. A `run` failure is logged and
    /// swallowed; the mode stays active until something switches away.
    pub fn run_current(&mut self, event: &Event) {
        let Some(id) = self.current else {
            return;
        };
        if let Err(err) = self.registry.get_mut(id).run(event) {
            warn!(mode = %id, %err, "mode run failed");
        }
    }
}
