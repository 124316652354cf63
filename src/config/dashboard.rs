//! Dashboard presentation settings

use serde::Deserialize;

/// Settings that shape every session's page
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Title shown in the navigation control
    #[serde(default = "default_title")]
    pub title: String,

    /// Show the diagnostics tile on platforms that support it
    #[serde(default = "default_diagnostics")]
    pub diagnostics: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            diagnostics: default_diagnostics(),
        }
    }
}

fn default_title() -> String {
    "Lightboard".to_string()
}

fn default_diagnostics() -> bool {
    true
}
