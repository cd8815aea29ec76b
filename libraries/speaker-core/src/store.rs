//! Persisted startup options collaborator

use crate::error::Result;
use crate::types::StartupOptions;

/// Load/save collaborator for persisted startup options
///
/// The on-disk encoding is the implementation's concern. The core loads
/// once during startup auto-configuration; saving is driven by hosting
/// code.
pub trait OptionsStore: Send {
    /// Load the persisted options
    fn load(&mut self) -> Result<StartupOptions>;

    /// Persist the options
    fn save(&mut self, options: &StartupOptions) -> Result<()>;
}
