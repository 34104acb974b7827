//! Node lifecycle: sourcing the config node and deriving typed content
//! nodes from parsed markdown

use serde_json::Value;

use super::{create_node_id, Node, NodeChange, NodeStore};
use crate::config::SiteConfig;
use crate::content::{non_empty, FrontMatter, GardenFrontMatter, PostFrontMatter};
use crate::error::{Error, Result};

/// Id of the node holding the site options
pub const CORE_CONFIG_ID: &str = "garden-core-config";

/// Type name of parsed markdown nodes
pub const MDX_TYPE: &str = "Mdx";

/// Create the `CoreConfig` node from the site options
pub fn source_nodes<S: NodeStore>(store: &mut S, config: &SiteConfig) -> NodeChange {
    let node = Node::new(
        CORE_CONFIG_ID,
        "CoreConfig",
        "Options for garden-core",
        None,
        config.core_options(),
    );
    store.create_node(node)
}

/// Derive an `MdxPost` or `MdxGarden` node from an `Mdx` node, depending on
/// which content source its file came from.
///
/// Returns the id of the created child, or `None` when the node is not
/// markdown or comes from a source this site does not handle.
pub fn on_create_node<S: NodeStore>(
    store: &mut S,
    config: &SiteConfig,
    mdx_id: &str,
) -> Result<Option<String>> {
    let node = store
        .get_node(mdx_id)
        .ok_or_else(|| Error::NodeNotFound(mdx_id.to_string()))?;
    if node.type_name() != MDX_TYPE {
        return Ok(None);
    }

    let file_id = node
        .parent
        .clone()
        .ok_or_else(|| Error::NodeNotFound(format!("parent of {}", mdx_id)))?;
    let file = store
        .get_node(&file_id)
        .ok_or_else(|| Error::NodeNotFound(file_id.clone()))?;
    let source = file
        .get_str("sourceInstanceName")
        .unwrap_or_default()
        .to_string();
    let path = file
        .get_str("relativePath")
        .unwrap_or(mdx_id)
        .to_string();

    let frontmatter = match node.get("frontmatter") {
        Some(Value::Object(data)) => FrontMatter { data: data.clone() },
        _ => FrontMatter::default(),
    };

    if source == config.writing_source {
        let mut post: PostFrontMatter = frontmatter.typed(&path)?;
        post.slug = non_empty(post.slug);
        create_post(store, mdx_id, post).map(Some)
    } else if source == config.garden_source {
        let mut note: GardenFrontMatter = frontmatter.typed(&path)?;
        note.slug = non_empty(note.slug);
        create_garden(store, mdx_id, note).map(Some)
    } else {
        tracing::trace!("Ignoring {} from source {:?}", path, source);
        Ok(None)
    }
}

fn create_post<S: NodeStore>(store: &mut S, mdx_id: &str, post: PostFrontMatter) -> Result<String> {
    let category = post.category.clone();
    store.create_node(Node::new(
        create_node_id(&format!("writing-category-{}", category)),
        "Category",
        "Category of each Post",
        None,
        serde_json::json!({ "name": category }),
    ));

    let post_id = create_node_id(&format!("{} >>> MdxPost", mdx_id));
    store.create_node(Node::new(
        post_id.clone(),
        "MdxPost",
        "Mdx implementation of the Post interface",
        Some(mdx_id.to_string()),
        serde_json::to_value(&post)?,
    ));
    store.create_parent_child_link(mdx_id, &post_id)?;

    Ok(post_id)
}

fn create_garden<S: NodeStore>(
    store: &mut S,
    mdx_id: &str,
    note: GardenFrontMatter,
) -> Result<String> {
    let garden_id = create_node_id(&format!("{} >>> MdxGarden", mdx_id));
    store.create_node(Node::new(
        garden_id.clone(),
        "MdxGarden",
        "Mdx implementation of the Garden interface",
        Some(mdx_id.to_string()),
        serde_json::to_value(&note)?,
    ));
    store.create_parent_child_link(mdx_id, &garden_id)?;

    Ok(garden_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::MemoryStore;
    use serde_json::json;

    fn add_markdown(
        store: &mut MemoryStore,
        source: &str,
        name: &str,
        frontmatter: Value,
    ) -> String {
        let file_id = create_node_id(&format!("file-{}-{}", source, name));
        store.create_node(Node::new(
            file_id.clone(),
            "File",
            "",
            None,
            json!({
                "sourceInstanceName": source,
                "relativePath": format!("{}/index.mdx", name),
            }),
        ));
        let mdx_id = create_node_id(&format!("mdx-{}-{}", source, name));
        store.create_node(Node::new(
            mdx_id.clone(),
            MDX_TYPE,
            "",
            Some(file_id.clone()),
            json!({ "frontmatter": frontmatter, "body": "Hello" }),
        ));
        store.create_parent_child_link(&file_id, &mdx_id).unwrap();
        mdx_id
    }

    #[test]
    fn test_source_nodes_creates_core_config() {
        let mut store = MemoryStore::new();
        let config = SiteConfig::default();
        assert_eq!(source_nodes(&mut store, &config), NodeChange::Created);
        assert_eq!(source_nodes(&mut store, &config), NodeChange::Unchanged);

        let node = store.get_node(CORE_CONFIG_ID).unwrap();
        assert_eq!(node.type_name(), "CoreConfig");
        assert_eq!(node.get_str("writingSource"), Some("writing"));
        assert_eq!(node.get_str("gardenSource"), Some("garden"));
    }

    #[test]
    fn test_writing_source_creates_post_and_category() {
        let mut store = MemoryStore::new();
        let config = SiteConfig::default();
        let mdx_id = add_markdown(
            &mut store,
            "writing",
            "hello",
            json!({"title": "Hello", "date": "2021-01-01", "category": "Rust", "slug": ""}),
        );

        let post_id = on_create_node(&mut store, &config, &mdx_id).unwrap().unwrap();
        let post = store.get_node(&post_id).unwrap();
        assert_eq!(post.type_name(), "MdxPost");
        assert_eq!(post.parent.as_deref(), Some(mdx_id.as_str()));
        assert_eq!(post.get_str("title"), Some("Hello"));
        assert_eq!(post.get("published"), Some(&json!(true)));
        assert_eq!(post.get_str("type"), Some("prose"));
        assert!(post.get("slug").is_none());

        let category_id = create_node_id("writing-category-Rust");
        let category = store.get_node(&category_id).unwrap();
        assert_eq!(category.type_name(), "Category");
        assert_eq!(category.get_str("name"), Some("Rust"));

        let mdx = store.get_node(&mdx_id).unwrap();
        assert_eq!(mdx.children, vec![post_id]);
    }

    #[test]
    fn test_garden_source_creates_garden_node() {
        let mut store = MemoryStore::new();
        let config = SiteConfig::default();
        let mdx_id = add_markdown(
            &mut store,
            "garden",
            "note",
            json!({
                "title": "Note",
                "date": "2022-02-02",
                "tags": ["cli"],
                "icon": "cli",
                "slug": "custom",
            }),
        );

        let id = on_create_node(&mut store, &config, &mdx_id).unwrap().unwrap();
        let note = store.get_node(&id).unwrap();
        assert_eq!(note.type_name(), "MdxGarden");
        assert_eq!(note.get_str("slug"), Some("custom"));
        assert_eq!(note.get("tags"), Some(&json!(["cli"])));
        assert!(store.nodes_by_type("Category").is_empty());
    }

    #[test]
    fn test_other_sources_and_types_are_ignored() {
        let mut store = MemoryStore::new();
        let config = SiteConfig::default();
        let mdx_id = add_markdown(&mut store, "pages", "about", json!({"title": "About"}));
        assert_eq!(on_create_node(&mut store, &config, &mdx_id).unwrap(), None);

        let category = Node::new("c", "Category", "", None, json!({"name": "x"}));
        store.create_node(category);
        assert_eq!(on_create_node(&mut store, &config, "c").unwrap(), None);
    }

    #[test]
    fn test_custom_source_names() {
        let mut store = MemoryStore::new();
        let config = SiteConfig {
            writing_source: "posts".to_string(),
            ..SiteConfig::default()
        };
        let mdx_id = add_markdown(
            &mut store,
            "posts",
            "p",
            json!({"title": "P", "date": "2021-01-01", "category": "Go"}),
        );
        assert!(on_create_node(&mut store, &config, &mdx_id).unwrap().is_some());
    }

    #[test]
    fn test_invalid_frontmatter_is_reported() {
        let mut store = MemoryStore::new();
        let config = SiteConfig::default();
        let mdx_id = add_markdown(&mut store, "writing", "bad", json!({"title": "No date"}));
        let err = on_create_node(&mut store, &config, &mdx_id).unwrap_err();
        assert!(matches!(err, Error::InvalidFrontMatter { .. }));
    }
}
