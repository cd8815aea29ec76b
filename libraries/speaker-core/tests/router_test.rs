//! Integration tests for the event-dispatch loop
//!
//! These drive full event sequences through the bus, the router, and the
//! state machine, the way the hosting process does.

use speaker_core::{
    ButtonAction, ControllerConfig, Detection, Error, Event, EventBus, InputRouter, Mode, ModeId,
    ModeRegistry, ModeSignal, OptionsStore, OverflowPolicy, Result, StartupOptions, StateMachine,
    StatusSink, UiCommand,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Test Helpers =====

/// Shared log of mode callbacks and sink calls, in invocation order
#[derive(Clone, Default)]
struct Trace(Arc<Mutex<Vec<String>>>);

impl Trace {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn contains(&self, entry: &str) -> bool {
        self.entries().iter().any(|e| e == entry)
    }
}

/// Mode that records its callbacks and can be gated or made to fail
struct ScriptedMode {
    name: &'static str,
    trace: Trace,
    allow: Arc<AtomicBool>,
    fail_enter: Arc<AtomicBool>,
}

impl ScriptedMode {
    fn new(name: &'static str, trace: Trace) -> Self {
        Self {
            name,
            trace,
            allow: Arc::new(AtomicBool::new(true)),
            fail_enter: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Mode for ScriptedMode {
    fn can_enter(&mut self) -> bool {
        self.allow.load(Ordering::SeqCst)
    }

    fn enter(&mut self) -> Result<()> {
        if self.fail_enter.load(Ordering::SeqCst) {
            return Err(Error::mode("enter refused"));
        }
        self.trace.push(format!("enter {}", self.name));
        Ok(())
    }

    fn run(&mut self, event: &Event) -> Result<()> {
        if let Event::Ui(UiCommand::ChannelUp | UiCommand::ChannelDown) = event {
            self.trace.push(format!("channel {}", self.name));
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.trace.push(format!("exit {}", self.name));
        Ok(())
    }
}

struct ScriptedStore {
    options: Option<StartupOptions>,
    loads: Arc<AtomicUsize>,
}

impl OptionsStore for ScriptedStore {
    fn load(&mut self) -> Result<StartupOptions> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.options
            .ok_or_else(|| Error::LoadFailed("no options file".into()))
    }

    fn save(&mut self, _options: &StartupOptions) -> Result<()> {
        Ok(())
    }
}

struct RecordingSink {
    trace: Trace,
}

impl StatusSink for RecordingSink {
    fn set_volume(&mut self, level: u8) {
        self.trace.push(format!("volume {level}"));
    }

    fn show_mode(&mut self, mode: ModeId) {
        self.trace.push(format!("mode {mode}"));
    }

    fn set_display(&mut self, on: bool) {
        self.trace.push(format!("display {on}"));
    }
}

struct Fixture {
    router: InputRouter,
    trace: Trace,
    bt_peer_known: Arc<AtomicBool>,
    bt_fail_enter: Arc<AtomicBool>,
    loads: Arc<AtomicUsize>,
}

fn fixture(options: Option<StartupOptions>) -> Fixture {
    let trace = Trace::default();
    let mut registry = ModeRegistry::new();

    let radio = ScriptedMode::new("radio", trace.clone());
    let bluetooth = ScriptedMode::new("bluetooth", trace.clone());
    let clock = ScriptedMode::new("clock", trace.clone());
    let pairing = ScriptedMode::new("bt-pairing", trace.clone());

    let bt_peer_known = bluetooth.allow.clone();
    let bt_fail_enter = bluetooth.fail_enter.clone();

    registry
        .register(ModeId::Radio, Box::new(radio))
        .register(ModeId::Bluetooth, Box::new(bluetooth))
        .register(ModeId::Clock, Box::new(clock))
        .register(ModeId::BtPairing, Box::new(pairing));

    let loads = Arc::new(AtomicUsize::new(0));
    let store = ScriptedStore {
        options,
        loads: loads.clone(),
    };
    let sink = RecordingSink {
        trace: trace.clone(),
    };

    let router = InputRouter::new(
        &ControllerConfig::default(),
        StateMachine::new(registry),
        Box::new(store),
        Box::new(sink),
    );

    Fixture {
        router,
        trace,
        bt_peer_known,
        bt_fail_enter,
        loads,
    }
}

fn tone() -> Event {
    Event::Detection(Detection { freq_hz: 200 })
}

// ===== Integration Tests =====

#[test]
fn test_first_switch_enters_radio() {
    let mut f = fixture(None);

    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));

    assert_eq!(f.router.current_mode(), Some(ModeId::Radio));
    assert_eq!(f.router.previous_mode(), None);
    assert_eq!(f.trace.entries(), vec!["enter radio", "mode radio"]);
}

#[test]
fn test_clock_round_trip_restores_previous_mode() {
    let mut f = fixture(None);
    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));

    f.router.dispatch(Event::Ui(UiCommand::AskClockTime));
    assert_eq!(f.router.current_mode(), Some(ModeId::Clock));
    assert_eq!(f.router.previous_mode(), Some(ModeId::Radio));

    f.router.dispatch(Event::Signal(ModeSignal::ClockDone));
    assert_eq!(f.router.current_mode(), Some(ModeId::Radio));

    assert_eq!(
        f.trace.entries(),
        vec![
            "enter radio",
            "mode radio",
            "exit radio",
            "enter clock",
            "mode clock",
            "exit clock",
            "enter radio",
            "mode radio",
        ]
    );
}

#[test]
fn test_switch_output_falls_back_to_pairing() {
    let mut f = fixture(None);
    f.bt_peer_known.store(false, Ordering::SeqCst);
    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));

    // Radio -> Bluetooth is rejected by the guard, pairing takes over
    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));
    assert_eq!(f.router.current_mode(), Some(ModeId::BtPairing));
    assert!(f.trace.contains("enter bt-pairing"));

    // Pairing found a peer and its announcement finished
    f.bt_peer_known.store(true, Ordering::SeqCst);
    f.router.dispatch(Event::Signal(ModeSignal::BtDone));
    assert_eq!(f.router.current_mode(), Some(ModeId::Bluetooth));
}

#[test]
fn test_play_button_acts_like_switch_output() {
    let mut f = fixture(None);

    f.router.dispatch(Event::Button(ButtonAction::Play));
    assert_eq!(f.router.current_mode(), Some(ModeId::Radio));

    f.router.dispatch(Event::Button(ButtonAction::Play));
    assert_eq!(f.router.current_mode(), Some(ModeId::Bluetooth));
}

#[test]
fn test_volume_steps_clamp_at_100() {
    let mut f = fixture(None);

    for _ in 0..6 {
        f.router.dispatch(Event::Button(ButtonAction::VolumeUp));
    }

    assert_eq!(f.router.volume_level(), 100);
    let volumes: Vec<String> = f
        .trace
        .entries()
        .into_iter()
        .filter(|e| e.starts_with("volume"))
        .collect();
    assert_eq!(
        volumes,
        vec![
            "volume 60",
            "volume 70",
            "volume 80",
            "volume 90",
            "volume 100",
            "volume 100",
        ]
    );
}

#[test]
fn test_channel_commands_gated_on_radio() {
    let mut f = fixture(None);

    // No mode active: dropped before reaching any run callback
    f.router.dispatch(Event::Ui(UiCommand::ChannelUp));
    assert!(!f.trace.contains("channel radio"));

    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));
    f.router.dispatch(Event::Ui(UiCommand::ChannelUp));
    assert!(f.trace.contains("channel radio"));

    // Bluetooth mode: channel change ignored again
    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));
    f.router.dispatch(Event::Ui(UiCommand::ChannelDown));
    assert!(!f.trace.contains("channel bluetooth"));
}

#[test]
fn test_set_button_toggles_display() {
    let mut f = fixture(None);

    f.router.dispatch(Event::Button(ButtonAction::Set));
    f.router.dispatch(Event::Button(ButtonAction::Set));

    assert_eq!(
        f.trace.entries(),
        vec!["display false", "display true"]
    );
}

#[test]
fn test_party_mode_flag_tracked_without_transition() {
    let mut f = fixture(None);
    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));

    f.router.dispatch(Event::Ui(UiCommand::PartyModeOn));
    assert!(f.router.party_mode());
    assert_eq!(f.router.current_mode(), Some(ModeId::Radio));

    f.router.dispatch(Event::Ui(UiCommand::PartyModeOff));
    assert!(!f.router.party_mode());
}

#[test]
fn test_auto_configuration_fires_once() {
    let mut f = fixture(Some(StartupOptions {
        mode: ModeId::Bluetooth,
        volume: 70,
        party_mode: true,
    }));

    f.router.dispatch(tone());

    assert_eq!(f.router.current_mode(), Some(ModeId::Bluetooth));
    assert_eq!(f.router.volume_level(), 70);
    assert!(f.router.party_mode());
    assert!(f.trace.contains("volume 70"));

    // A second detection is a complete no-op
    f.router.dispatch(tone());
    assert_eq!(f.loads.load(Ordering::SeqCst), 1);
    assert_eq!(f.router.current_mode(), Some(ModeId::Bluetooth));
}

#[test]
fn test_auto_configuration_defaults_on_load_failure() {
    let mut f = fixture(None);

    f.router.dispatch(tone());

    assert_eq!(f.router.current_mode(), Some(ModeId::Radio));
    assert_eq!(f.router.volume_level(), 50);
    assert!(f.trace.contains("volume 50"));
}

#[test]
fn test_enter_failure_leaves_silence_until_explicit_switch() {
    let mut f = fixture(None);
    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));
    f.bt_fail_enter.store(true, Ordering::SeqCst);

    // Radio exits, Bluetooth fails to start: degraded, no active mode
    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));
    assert_eq!(f.router.current_mode(), None);

    // An explicit switch request recovers
    f.router.dispatch(Event::Ui(UiCommand::SwitchOutput));
    assert_eq!(f.router.current_mode(), Some(ModeId::Radio));
}

#[test]
fn test_events_dispatch_in_publish_order_across_producers() {
    let mut f = fixture(None);
    let bus = EventBus::new(16);

    let buttons = bus.publisher(OverflowPolicy::Block {
        timeout: Duration::from_millis(100),
    });
    let ui = bus.publisher(OverflowPolicy::DropNewest);
    let detector = bus.publisher(OverflowPolicy::DropNewest);

    buttons.publish(Event::Button(ButtonAction::VolumeUp)).unwrap();
    ui.publish(Event::Ui(UiCommand::VolumeDown)).unwrap();
    detector.publish(tone()).unwrap();
    buttons.publish(Event::Button(ButtonAction::VolumeUp)).unwrap();
    drop((buttons, ui, detector));

    f.router.run(bus.into_receiver());

    // 50 -> 60 -> 50, auto-config resets to 50, -> 60
    let volumes: Vec<String> = f
        .trace
        .entries()
        .into_iter()
        .filter(|e| e.starts_with("volume"))
        .collect();
    assert_eq!(volumes, vec!["volume 60", "volume 50", "volume 50", "volume 60"]);
}
