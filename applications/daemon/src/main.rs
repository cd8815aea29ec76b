/// Smart Speaker - hosting daemon
///
/// Wires the control core to bench collaborators: an HTTP command
/// surface, a stdin console standing in for the input hardware, and
/// log-backed modes.
use anyhow::Context;
use clap::Parser;
use speaker_core::{EventBus, InputRouter, ModeId, ModeRegistry, OverflowPolicy, StateMachine};
use speaker_storage::FileOptionsStore;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod bench;
mod config;
mod modes;
mod status;

use config::DaemonConfig;

#[derive(Parser)]
#[command(name = "speakerd")]
#[command(about = "Smart speaker control daemon", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "speakerd=info,speaker_core=info,speaker_storage=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = DaemonConfig::load(cli.config.as_deref())?;
    let controller = config.control.controller();

    let bus = EventBus::new(controller.bus_capacity);
    let block = OverflowPolicy::Block {
        timeout: controller.publish_timeout,
    };

    // Producer policies: button presses must not vanish, the UI surface
    // and the detector may drop on a full bus
    let ui = bus.publisher(OverflowPolicy::DropNewest);
    let buttons = bus.publisher(block);
    let detector = bus.publisher(OverflowPolicy::DropNewest);
    let signals = bus.publisher(block);

    let peer_known = Arc::new(AtomicBool::new(false));

    let mut registry = ModeRegistry::new();
    registry
        .register(ModeId::Radio, Box::new(modes::RadioMode::new()))
        .register(
            ModeId::Bluetooth,
            Box::new(modes::BluetoothMode::new(peer_known.clone())),
        )
        .register(ModeId::Clock, Box::new(modes::ClockMode::new(signals.clone())))
        .register(ModeId::BtPairing, Box::new(modes::BtPairingMode));

    let store = FileOptionsStore::new(&config.storage.options_file);
    let mut router = InputRouter::new(
        &controller,
        StateMachine::new(registry),
        Box::new(store),
        Box::new(status::LogStatus::new()),
    );

    let receiver = bus.into_receiver();
    let _consumer = std::thread::Builder::new()
        .name("event-loop".into())
        .spawn(move || router.run(receiver))
        .context("failed to spawn event loop")?;

    let console = bench::BenchConsole {
        buttons,
        detector,
        signals,
        peer_known,
    };
    std::thread::Builder::new()
        .name("bench-console".into())
        .spawn(move || console.run())
        .context("failed to spawn bench console")?;

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "command surface listening");

    axum::serve(listener, api::router(ui)).await?;

    Ok(())
}
