//! Content loader - turns the files under the content directory into
//! `File` and `Mdx` nodes

use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{plain_text, time_to_read, FrontMatter, MarkdownRenderer};
use crate::nodes::{create_node_id, Node, NodeStore, MDX_TYPE};
use crate::Site;

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Create nodes for every file of every content source.
    ///
    /// Each top-level directory of the content directory is one source
    /// instance. Returns the ids of the `Mdx` nodes created, in path order.
    pub fn load_into<S: NodeStore>(&self, store: &mut S) -> Result<Vec<String>> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let mut sources: Vec<_> = fs::read_dir(content_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        sources.sort();

        let mut mdx_ids = Vec::new();
        for source_dir in sources {
            let Some(source) = source_dir.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = source.to_string();
            tracing::debug!("Loading source {:?} from {:?}", source, source_dir);

            for entry in WalkDir::new(&source_dir)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !path.is_file() || is_hidden(path) {
                    continue;
                }

                let file_id = self.create_file_node(store, &source, &source_dir, path);
                if !is_markdown_file(path) {
                    continue;
                }

                match self.create_mdx_node(store, &file_id, path) {
                    Ok(mdx_id) => mdx_ids.push(mdx_id),
                    Err(e) => {
                        tracing::warn!("Failed to load {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(mdx_ids)
    }

    fn create_file_node<S: NodeStore>(
        &self,
        store: &mut S,
        source: &str,
        source_dir: &Path,
        path: &Path,
    ) -> String {
        let absolute = path.to_string_lossy().to_string();
        let relative = path.strip_prefix(source_dir).unwrap_or(path);
        let relative_dir = relative
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        let dir = path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let base = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let id = create_node_id(&absolute);
        store.create_node(Node::new(
            id.clone(),
            "File",
            "A file of a content source",
            None,
            json!({
                "sourceInstanceName": source,
                "absolutePath": absolute,
                "relativePath": relative.to_string_lossy(),
                "relativeDirectory": relative_dir,
                "dir": dir,
                "base": base,
                "name": name,
                "extension": extension,
            }),
        ));
        id
    }

    fn create_mdx_node<S: NodeStore>(
        &self,
        store: &mut S,
        file_id: &str,
        path: &Path,
    ) -> Result<String> {
        let raw = fs::read_to_string(path)?;
        let display = path.to_string_lossy();
        let (fm, body) = FrontMatter::parse(&raw, &display)?;

        let text = plain_text(body);
        let html = self.renderer.render(body);

        let id = create_node_id(&format!("{} >>> Mdx", file_id));
        store.create_node(Node::new(
            id.clone(),
            MDX_TYPE,
            "Parsed markdown",
            Some(file_id.to_string()),
            json!({
                "frontmatter": fm.data,
                "rawBody": raw,
                "body": body,
                "html": html,
                "plainText": text,
                "timeToRead": time_to_read(&text),
                "fileAbsolutePath": display,
            }),
        ));
        store.create_parent_child_link(file_id, &id)?;

        Ok(id)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx" || e == "markdown")
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::MemoryStore;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_creates_file_and_mdx_nodes() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("www/content");
        write(
            &content,
            "writing/2021-01-01--hello/index.mdx",
            "---\ntitle: Hello\ndate: 2021-01-01\ncategory: Rust\n---\n\nSome **bold** words.\n",
        );
        write(&content, "writing/2021-01-01--hello/cover.png", "png");
        write(&content, "garden/.DS_Store", "junk");

        let site = Site::new(tmp.path()).unwrap();
        let mut store = MemoryStore::new();
        let ids = ContentLoader::new(&site).load_into(&mut store).unwrap();
        assert_eq!(ids.len(), 1);

        let files = store.nodes_by_type("File");
        assert_eq!(files.len(), 2);

        let mdx = store.get_node(&ids[0]).unwrap();
        assert_eq!(mdx.get_str("frontmatter.title"), Some("Hello"));
        assert_eq!(mdx.get_str("plainText"), Some("Some bold words."));
        assert_eq!(mdx.get("timeToRead"), Some(&json!(1)));
        assert!(mdx.get_str("html").unwrap().contains("<strong>bold</strong>"));

        let file = store.get_node(mdx.parent.as_deref().unwrap()).unwrap();
        assert_eq!(file.get_str("sourceInstanceName"), Some("writing"));
        assert_eq!(file.get_str("name"), Some("index"));
        assert_eq!(file.children, vec![ids[0].clone()]);
    }

    #[test]
    fn test_broken_frontmatter_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("www/content");
        write(&content, "garden/bad.md", "---\ntitle: [oops\n---\nbody");
        write(&content, "garden/good.md", "---\ntitle: Good\n---\nbody");

        let site = Site::new(tmp.path()).unwrap();
        let mut store = MemoryStore::new();
        let ids = ContentLoader::new(&site).load_into(&mut store).unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(
            store.get_node(&ids[0]).unwrap().get_str("frontmatter.title"),
            Some("Good")
        );
    }

    #[test]
    fn test_missing_content_dir() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        let mut store = MemoryStore::new();
        let ids = ContentLoader::new(&site).load_into(&mut store).unwrap();
        assert!(ids.is_empty());
        assert!(store.is_empty());
    }
}
