//! Bench console
//!
//! Reads one command per stdin line and publishes the events the touch
//! scanner, the acoustic detector, and the Bluetooth stack would produce
//! on the appliance.

use speaker_core::{ButtonAction, Detection, Event, ModeSignal, Publisher};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// One parsed console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchCommand {
    /// Logical button press
    Button(ButtonAction),

    /// Tone picked up by the acoustic front end
    Tone,

    /// A Bluetooth peer paired and the connection ding finished
    Pair,
}

/// Parse one console line
pub fn parse(input: &str) -> Option<BenchCommand> {
    match input.trim() {
        "play" => Some(BenchCommand::Button(ButtonAction::Play)),
        "set" => Some(BenchCommand::Button(ButtonAction::Set)),
        "up" => Some(BenchCommand::Button(ButtonAction::VolumeUp)),
        "down" => Some(BenchCommand::Button(ButtonAction::VolumeDown)),
        "tone" => Some(BenchCommand::Tone),
        "pair" => Some(BenchCommand::Pair),
        _ => None,
    }
}

/// Stdin-driven stand-in for the appliance's input hardware
pub struct BenchConsole {
    /// Button presses must not vanish; give this a blocking publisher
    pub buttons: Publisher,

    /// Detections may drop on a full bus
    pub detector: Publisher,

    /// Inter-mode signals (pairing completion)
    pub signals: Publisher,

    /// Shared Bluetooth peer flag, set before the completion signal
    pub peer_known: Arc<AtomicBool>,
}

impl BenchConsole {
    /// Read stdin until EOF, publishing bench events
    pub fn run(self) {
        info!("bench console ready (play, set, up, down, tone, pair)");
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse(&line) {
                Some(command) => self.apply(command),
                None => warn!(input = line.trim(), "unknown bench command"),
            }
        }
        info!("bench console closed");
    }

    fn apply(&self, command: BenchCommand) {
        match command {
            BenchCommand::Button(action) => {
                if let Err(err) = self.buttons.publish(Event::Button(action)) {
                    warn!(%err, "button press lost");
                }
            }
            BenchCommand::Tone => {
                if let Err(err) = self
                    .detector
                    .publish(Event::Detection(Detection { freq_hz: 200 }))
                {
                    warn!(%err, "detection dropped");
                }
            }
            BenchCommand::Pair => {
                self.peer_known.store(true, Ordering::SeqCst);
                if let Err(err) = self.signals.publish(Event::Signal(ModeSignal::BtDone)) {
                    warn!(%err, "pairing signal lost");
                }
            }
        }
    }
}
