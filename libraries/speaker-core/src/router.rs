//! Event classification and dispatch
//!
//! The single consumer of the bus: pulls events in publish order and
//! applies them to the state machine, the volume state, and the startup
//! sequencer before forwarding them to the active mode. One event is
//! handled to completion before the next is fetched.

use crate::bus::BusReceiver;
use crate::error::Error;
use crate::event::{ButtonAction, Detection, Event, ModeSignal, UiCommand};
use crate::machine::StateMachine;
use crate::sequencer::StartupSequencer;
use crate::sink::StatusSink;
use crate::store::OptionsStore;
use crate::types::{ControllerConfig, ModeId};
use crate::volume::VolumeControl;
use tracing::{debug, info, warn};

/// The event-dispatch loop
pub struct InputRouter {
    machine: StateMachine,
    volume: VolumeControl,
    sequencer: StartupSequencer,
    store: Box<dyn OptionsStore>,
    sink: Box<dyn StatusSink>,
    party_mode: bool,
    display_on: bool,
}

impl InputRouter {
    /// Wire the router to its collaborators
    pub fn new(
        config: &ControllerConfig,
        machine: StateMachine,
        store: Box<dyn OptionsStore>,
        sink: Box<dyn StatusSink>,
    ) -> Self {
        Self {
            machine,
            volume: VolumeControl::new(config.volume, config.volume_step),
            sequencer: StartupSequencer::new(),
            store,
            sink,
            party_mode: false,
            display_on: true,
        }
    }

    /// Run the consumer loop until every publisher is gone
    pub fn run(&mut self, events: BusReceiver) {
        info!("entering main event loop");
        while let Some(event) = events.receive() {
            self.dispatch(event);
        }
        info!("event bus closed, leaving main event loop");
    }

    /// Mode currently owning the audio output, if any
    pub fn current_mode(&self) -> Option<ModeId> {
        self.machine.current()
    }

    /// Mode active immediately before the current one
    pub fn previous_mode(&self) -> Option<ModeId> {
        self.machine.previous()
    }

    /// Current volume level (0-100)
    pub fn volume_level(&self) -> u8 {
        self.volume.level()
    }

    /// Party mode flag (tracked, not wired to a transition)
    pub fn party_mode(&self) -> bool {
        self.party_mode
    }

    /// Apply one event to completion
    pub fn dispatch(&mut self, event: Event) {
        let forward = match event {
            Event::Ui(cmd) => self.handle_ui(cmd),
            Event::Button(action) => {
                self.handle_button(action);
                true
            }
            Event::Signal(signal) => {
                self.handle_signal(signal);
                true
            }
            Event::Detection(detection) => {
                self.handle_detection(detection);
                true
            }
        };
        if forward {
            self.machine.run_current(&event);
        }
    }

    /// Returns whether the event should still reach the active mode's `run`
    fn handle_ui(&mut self, cmd: UiCommand) -> bool {
        match cmd {
            UiCommand::SwitchOutput => self.switch_output(),
            UiCommand::VolumeUp => {
                let level = self.volume.step_up();
                self.apply_volume(level);
            }
            UiCommand::VolumeDown => {
                let level = self.volume.step_down();
                self.apply_volume(level);
            }
            UiCommand::ChannelUp | UiCommand::ChannelDown => {
                // Channel changes only make sense while the radio plays
                if self.machine.current() != Some(ModeId::Radio) {
                    debug!(command = cmd.as_str(), "channel change outside radio mode, ignoring");
                    return false;
                }
            }
            UiCommand::PartyModeOn => {
                info!("party mode on");
                self.party_mode = true;
            }
            UiCommand::PartyModeOff => {
                info!("party mode off");
                self.party_mode = false;
            }
            UiCommand::AskClockTime => self.switch_mode(ModeId::Clock),
        }
        true
    }

    fn handle_button(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::Play => self.switch_output(),
            ButtonAction::Set => {
                self.display_on = !self.display_on;
                self.sink.set_display(self.display_on);
            }
            ButtonAction::VolumeUp => {
                let level = self.volume.step_up();
                self.apply_volume(level);
            }
            ButtonAction::VolumeDown => {
                let level = self.volume.step_down();
                self.apply_volume(level);
            }
        }
    }

    fn handle_signal(&mut self, signal: ModeSignal) {
        match signal {
            ModeSignal::ClockDone => {
                // Restore whatever played before the announcement
                if let Some(previous) = self.machine.previous() {
                    self.switch_mode(previous);
                }
            }
            ModeSignal::BtDone => self.switch_mode(ModeId::Bluetooth),
        }
    }

    fn handle_detection(&mut self, detection: Detection) {
        debug!(freq_hz = detection.freq_hz, "tone detected");
        let applied = self.sequencer.handle_detection(
            &mut self.machine,
            &mut self.volume,
            self.store.as_mut(),
        );
        if let Some(options) = applied {
            self.party_mode = options.party_mode;
            self.sink.set_volume(self.volume.level());
            if let Some(mode) = self.machine.current() {
                self.sink.show_mode(mode);
            }
        }
    }

    /// Toggle between the radio and Bluetooth outputs
    ///
    /// Falls back to pairing mode when the Bluetooth sink rejects entry
    /// because no peer is known yet.
    fn switch_output(&mut self) {
        let target = if self.machine.current() == Some(ModeId::Radio) {
            ModeId::Bluetooth
        } else {
            ModeId::Radio
        };
        match self.machine.switch_to(target) {
            Ok(()) => self.show_current_mode(),
            Err(Error::GuardRejected(_)) if target == ModeId::Bluetooth => {
                debug!("no bluetooth peer known, entering pairing mode");
                self.switch_mode(ModeId::BtPairing);
            }
            Err(err) => warn!(%err, "output switch failed"),
        }
    }

    fn switch_mode(&mut self, target: ModeId) {
        match self.machine.switch_to(target) {
            Ok(()) => self.show_current_mode(),
            Err(err) => warn!(%err, mode = %target, "mode switch failed"),
        }
    }

    fn show_current_mode(&mut self) {
        if let Some(mode) = self.machine.current() {
            self.sink.show_mode(mode);
        }
    }

    fn apply_volume(&mut self, level: u8) {
        debug!(level, "volume changed");
        self.sink.set_volume(level);
    }
}
