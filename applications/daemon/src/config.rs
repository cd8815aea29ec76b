/// Daemon configuration
use anyhow::Context;
use serde::{Deserialize, Serialize};
use speaker_core::ControllerConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DaemonConfig {
    #[serde(default = "default_http")]
    pub http: HttpSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_control")]
    pub control: ControlSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_options_file")]
    pub options_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlSettings {
    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default = "default_volume_step")]
    pub volume_step: u8,

    #[serde(default = "default_bus_capacity")]
    pub bus_capacity: usize,

    #[serde(default = "default_publish_timeout_ms")]
    pub publish_timeout_ms: u64,
}

impl ControlSettings {
    /// Core controller configuration
    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            volume: self.volume,
            volume_step: self.volume_step,
            bus_capacity: self.bus_capacity,
            publish_timeout: Duration::from_millis(self.publish_timeout_ms),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let default_path = PathBuf::from("speakerd.toml");
        let config_path = path.unwrap_or(&default_path);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with SPEAKER_)
        settings = settings.add_source(
            config::Environment::with_prefix("SPEAKER")
                .separator("_")
                .try_parsing(true),
        );

        settings
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}

// Default values
fn default_http() -> HttpSettings {
    HttpSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        options_file: default_options_file(),
    }
}

fn default_control() -> ControlSettings {
    ControlSettings {
        volume: default_volume(),
        volume_step: default_volume_step(),
        bus_capacity: default_bus_capacity(),
        publish_timeout_ms: default_publish_timeout_ms(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_options_file() -> PathBuf {
    PathBuf::from("opts.txt")
}

fn default_volume() -> u8 {
    50
}

fn default_volume_step() -> u8 {
    10
}

fn default_bus_capacity() -> usize {
    32
}

fn default_publish_timeout_ms() -> u64 {
    100
}
