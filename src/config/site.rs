//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Directory holding one sub-directory per content source
    pub content_dir: String,
    /// Source instance name (content sub-directory) for blog posts
    pub writing_source: String,
    /// Source instance name (content sub-directory) for garden notes
    pub garden_source: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "www/content".to_string(),
            writing_source: "writing".to_string(),
            garden_source: "garden".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config.with_defaults())
    }

    /// Replace empty options with their defaults
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.content_dir.trim().is_empty() {
            self.content_dir = defaults.content_dir;
        }
        if self.writing_source.trim().is_empty() {
            self.writing_source = defaults.writing_source;
        }
        if self.garden_source.trim().is_empty() {
            self.garden_source = defaults.garden_source;
        }
        self
    }

    /// Options exposed on the `CoreConfig` node
    pub fn core_options(&self) -> serde_json::Value {
        serde_json::json!({
            "writingSource": self.writing_source,
            "gardenSource": self.garden_source,
        })
    }
}
