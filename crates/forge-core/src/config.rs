//! Configuration for forge
//!
//! Stored in .forge/config.toml

use serde::{Deserialize, Serialize};
use std::path::Path;

/// forge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix for allocated issue identifiers (e.g., "ISSUE")
    pub id_prefix: String,

    /// Repository names seeded into a fresh registry
    pub seed_repositories: Vec<String>,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_prefix: "ISSUE".to_string(),
            seed_repositories: vec![
                "backend-api".to_string(),
                "frontend-web".to_string(),
                "mobile-app".to_string(),
                "my-app".to_string(),
            ],
            display: DisplayConfig::default(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colors in output
    pub colors: bool,

    /// Date format for display
    pub date_format: String,

    /// Maximum title length before truncation
    pub max_title_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            date_format: "%Y-%m-%d %H:%M".to_string(),
            max_title_length: 80,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate a default config file with comments
    pub fn default_with_comments() -> String {
        r#"# forge configuration

# Prefix for allocated issue identifiers
id_prefix = "ISSUE"

# Repository names seeded into a fresh registry
seed_repositories = ["backend-api", "frontend-web", "mobile-app", "my-app"]

[display]
# Use colors in output
colors = true

# Date format for display (strftime format)
date_format = "%Y-%m-%d %H:%M"

# Maximum title length before truncation
max_title_length = 80
"#
        .to_string()
    }
}
