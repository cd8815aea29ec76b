//! Smart Speaker - Control Core
//!
//! Mode state machine and event dispatch for a speaker appliance that
//! renders audio from exactly one source at a time.
//!
//! This crate provides:
//! - A closed event model for every producer (UI commands, physical
//!   controls, inter-mode signals, acoustic detections)
//! - A bounded multi-producer/single-consumer event bus with per-producer
//!   overflow policies
//! - The mode state machine (radio, Bluetooth, clock, pairing) with
//!   guarded exit-then-enter transitions
//! - The input router running the single consumer loop
//! - One-shot startup auto-configuration from persisted options
//!
//! # Architecture
//!
//! `speaker-core` is completely platform-agnostic: no audio pipelines, no
//! transports, no storage I/O. Hosting code supplies those through traits
//! ([`Mode`], [`OptionsStore`], [`StatusSink`]), publishes events from its
//! own threads, and runs the consumer loop on one dedicated thread. All
//! machine state is mutated on that thread only, so none of it is locked.
//!
//! # Example
//!
//! ```rust
//! use speaker_core::{
//!     ButtonAction, ControllerConfig, Event, EventBus, InputRouter, Mode, ModeId,
//!     ModeRegistry, OptionsStore, OverflowPolicy, Result, StartupOptions, StateMachine,
//!     StatusSink,
//! };
//!
//! // Hosting code implements the collaborators
//! struct Silence;
//! impl Mode for Silence {}
//!
//! struct NoStore;
//! impl OptionsStore for NoStore {
//!     fn load(&mut self) -> Result<StartupOptions> {
//!         Ok(StartupOptions::default())
//!     }
//!     fn save(&mut self, _options: &StartupOptions) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! struct Quiet;
//! impl StatusSink for Quiet {
//!     fn set_volume(&mut self, _level: u8) {}
//!     fn show_mode(&mut self, _mode: ModeId) {}
//!     fn set_display(&mut self, _on: bool) {}
//! }
//!
//! let mut registry = ModeRegistry::new();
//! registry.register(ModeId::Radio, Box::new(Silence));
//!
//! let config = ControllerConfig::default();
//! let bus = EventBus::new(config.bus_capacity);
//! let keys = bus.publisher(OverflowPolicy::Block {
//!     timeout: config.publish_timeout,
//! });
//!
//! let machine = StateMachine::new(registry);
//! let mut router = InputRouter::new(&config, machine, Box::new(NoStore), Box::new(Quiet));
//!
//! keys.publish(Event::Button(ButtonAction::VolumeUp))?;
//! drop(keys);
//!
//! // With every publisher gone the loop drains the bus and returns
//! router.run(bus.into_receiver());
//! assert_eq!(router.volume_level(), 60);
//! # Ok::<(), speaker_core::Error>(())
//! ```

mod bus;
mod error;
mod event;
mod machine;
mod mode;
mod router;
mod sequencer;
mod sink;
mod store;
pub mod types;
mod volume;

// Public exports
pub use bus::{BusReceiver, EventBus, OverflowPolicy, Publisher};
pub use error::{Error, Result};
pub use event::{ButtonAction, Detection, Event, ModeSignal, UiCommand};
pub use machine::StateMachine;
pub use mode::{Mode, ModeRegistry};
pub use router::InputRouter;
pub use sequencer::StartupSequencer;
pub use sink::StatusSink;
pub use store::OptionsStore;
pub use types::{ControllerConfig, ModeId, StartupOptions};
pub use volume::{VolumeControl, DEFAULT_VOLUME, DEFAULT_VOLUME_STEP};
