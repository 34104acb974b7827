//! garden-core: content model for a writing + digital garden site
//!
//! Markdown files under the content directory become typed `MdxPost` and
//! `MdxGarden` nodes, resolved through a small declarative schema. Posts can
//! be sampled deterministically with a seed (`randomPosts`).

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod nodes;
pub mod random;
pub mod resolvers;
pub mod schema;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use content::loader::ContentLoader;
use nodes::MemoryStore;

/// A site on disk
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding one sub-directory per content source
    pub content_dir: PathBuf,
}

impl Site {
    /// Open a site, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Directory new garden notes are written to
    pub fn garden_dir(&self) -> PathBuf {
        self.content_dir.join(&self.config.garden_source)
    }

    /// Source every node of the site into a fresh store
    pub fn build_store(&self) -> anyhow::Result<MemoryStore> {
        let mut store = MemoryStore::new();
        nodes::source_nodes(&mut store, &self.config);

        let mdx_ids = ContentLoader::new(self).load_into(&mut store)?;
        for mdx_id in &mdx_ids {
            if let Err(e) = nodes::on_create_node(&mut store, &self.config, mdx_id) {
                tracing::warn!("Skipping {}: {}", mdx_id, e);
            }
        }

        tracing::info!("Loaded {} nodes from {:?}", store.len(), self.content_dir);
        Ok(store)
    }
}
