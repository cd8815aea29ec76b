//! Bench mode implementations
//!
//! Log-backed stand-ins for the appliance's audio pipelines. Each mode
//! follows the same enter/run/exit contract the hardware pipelines do;
//! only the audio itself is replaced by the log.

use chrono::Local;
use speaker_core::{Error, Event, Mode, ModeSignal, Publisher, Result, UiCommand};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// A named radio channel
#[derive(Debug, Clone)]
pub struct RadioChannel {
    pub name: &'static str,
    pub url: &'static str,
}

/// Built-in channel list
const CHANNELS: [RadioChannel; 2] = [
    RadioChannel {
        name: "Radio1Rock",
        url: "http://stream.radioreklama.bg:80/radio1rock128",
    },
    RadioChannel {
        name: "Radio 1 Classics",
        url: "http://icecast-servers.vrtcdn.be/radio1_classics_mid.mp3",
    },
];

/// Internet radio playback
pub struct RadioMode {
    channels: Vec<RadioChannel>,
    current: usize,
}

impl RadioMode {
    pub fn new() -> Self {
        Self {
            channels: CHANNELS.to_vec(),
            current: 0,
        }
    }

    /// Channel currently tuned
    pub fn current_channel(&self) -> &RadioChannel {
        &self.channels[self.current]
    }

    fn tune(&self) {
        let channel = self.current_channel();
        info!(channel = channel.name, url = channel.url, "tuning radio");
    }
}

impl Default for RadioMode {
    fn default() -> Self {
        Self::new()
    }
}

impl Mode for RadioMode {
    fn enter(&mut self) -> Result<()> {
        self.tune();
        Ok(())
    }

    fn run(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Ui(UiCommand::ChannelUp) => {
                self.current = (self.current + 1) % self.channels.len();
                self.tune();
            }
            Event::Ui(UiCommand::ChannelDown) => {
                self.current = self
                    .current
                    .checked_sub(1)
                    .unwrap_or(self.channels.len() - 1);
                self.tune();
            }
            _ => {}
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        info!("stopping radio stream");
        Ok(())
    }
}

/// Bluetooth audio sink, enterable only once a peer is known
pub struct BluetoothMode {
    peer_known: Arc<AtomicBool>,
}

impl BluetoothMode {
    pub fn new(peer_known: Arc<AtomicBool>) -> Self {
        Self { peer_known }
    }
}

impl Mode for BluetoothMode {
    fn can_enter(&mut self) -> bool {
        self.peer_known.load(Ordering::SeqCst)
    }

    fn enter(&mut self) -> Result<()> {
        info!("bluetooth sink active");
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        info!("bluetooth sink released");
        Ok(())
    }
}

/// Discoverable pairing mode with pairing-loop audio
pub struct BtPairingMode;

impl Mode for BtPairingMode {
    fn enter(&mut self) -> Result<()> {
        info!("bluetooth discoverable, playing pairing audio");
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        info!("pairing audio stopped");
        Ok(())
    }
}

/// Spoken clock announcement
///
/// Announces the time from `enter` and signals completion over the bus,
/// which sends the loop back to whatever played before.
pub struct ClockMode {
    signals: Publisher,
}

impl ClockMode {
    pub fn new(signals: Publisher) -> Self {
        Self { signals }
    }
}

impl Mode for ClockMode {
    fn enter(&mut self) -> Result<()> {
        let now = Local::now();
        info!("it is now {}", now.format("%H:%M"));
        self.signals
            .publish(Event::Signal(ModeSignal::ClockDone))
            .map_err(|err| Error::mode(format!("clock done signal lost: {err}")))?;
        Ok(())
    }
}
