use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Category suggestion set shown when creating tasks. Free-form labels
    /// outside this set are still accepted.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            categories: default_categories(),
        }
    }
}

fn default_categories() -> Vec<String> {
    ["Work", "Personal", "Shopping", "Health", "Finance", "Other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
