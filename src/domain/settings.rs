//! Runtime settings assembled from the INI configuration.

use super::admin::AdminDefaults;
use super::display::DisplayMode;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub mode: DisplayMode,
    /// Fixed seed for receipts; entropy when absent.
    pub seed: Option<u64>,
    pub admin: AdminDefaults,
}
