//! Smart Speaker - Startup Options Storage
//!
//! File-backed implementation of the core's persisted-options
//! collaborator. The options live in a single line of the form
//! `mode,volume,party_mode` (numeric codes, trailing newline required),
//! which keeps the file trivially editable from any host.

use speaker_core::{Error as CoreError, ModeId, OptionsStore, StartupOptions};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Options file contents did not parse
    #[error("malformed options file: {0}")]
    Malformed(String),
}

/// File-backed startup options store
pub struct FileOptionsStore {
    path: PathBuf,
}

impl FileOptionsStore {
    /// Create a store reading and writing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the options file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the options file
    pub fn load_options(&self) -> Result<StartupOptions> {
        debug!(path = %self.path.display(), "reading options file");
        let raw = fs::read_to_string(&self.path)?;
        let line = raw
            .strip_suffix('\n')
            .ok_or_else(|| StorageError::Malformed("missing trailing newline".into()))?;
        parse_line(line)
    }

    /// Write the options file
    pub fn save_options(&self, options: &StartupOptions) -> Result<()> {
        let line = format!(
            "{},{},{}\n",
            options.mode.code(),
            options.volume,
            u8::from(options.party_mode)
        );
        fs::write(&self.path, line)?;
        info!(path = %self.path.display(), "wrote options file");
        Ok(())
    }
}

impl OptionsStore for FileOptionsStore {
    fn load(&mut self) -> speaker_core::Result<StartupOptions> {
        self.load_options()
            .map_err(|err| CoreError::LoadFailed(err.to_string()))
    }

    fn save(&mut self, options: &StartupOptions) -> speaker_core::Result<()> {
        self.save_options(options)
            .map_err(|err| CoreError::SaveFailed(err.to_string()))
    }
}

fn parse_line(line: &str) -> Result<StartupOptions> {
    let mut fields = line.split(',');
    let mode = next_field(&mut fields, "mode")?;
    let volume = next_field(&mut fields, "volume")?;
    let party_mode = next_field(&mut fields, "party_mode")?;
    if fields.next().is_some() {
        return Err(StorageError::Malformed("too many fields".into()));
    }

    let mode = ModeId::from_code(mode)
        .ok_or_else(|| StorageError::Malformed(format!("unknown mode code {mode}")))?;
    Ok(StartupOptions {
        mode,
        volume,
        party_mode: party_mode != 0,
    })
}

fn next_field(fields: &mut std::str::Split<'_, char>, name: &str) -> Result<u8> {
    let field = fields
        .next()
        .ok_or_else(|| StorageError::Malformed(format!("missing {name}")))?;
    field
        .trim()
        .parse()
        .map_err(|_| StorageError::Malformed(format!("invalid {name}: {field}")))
}
