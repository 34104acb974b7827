//! Field extensions: named resolver capabilities that schema fields bind to
//! through directives

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt::Write;

use super::ResolveContext;
use crate::content::{parse_date, prune};
use crate::error::{Error, Result};
use crate::nodes::Node;

/// Arguments as received from a directive or a query
pub type Args = Map<String, Value>;

/// Resolver bound to a field through a directive.
///
/// Receives the node being resolved, the directive's own arguments and the
/// field arguments (with declared defaults applied).
pub type ResolverFn =
    Box<dyn Fn(&ResolveContext<'_>, &Node, &FieldCall<'_>) -> Result<Value> + Send + Sync>;

/// One field resolution: which field, with which arguments
pub struct FieldCall<'a> {
    pub field: &'a str,
    /// Name of the field's declared type (without list or non-null markers)
    pub return_type: &'a str,
    pub returns_list: bool,
    pub directive_args: &'a Args,
    pub field_args: &'a Args,
}

impl FieldCall<'_> {
    fn directive_str(&self, key: &str) -> Option<&str> {
        self.directive_args.get(key).and_then(Value::as_str)
    }
}

lazy_static! {
    static ref REPEATED_SLASHES: Regex = Regex::new(r"/{2,}").unwrap();
}

/// Registry mapping capability names to resolvers
pub struct ExtensionRegistry {
    extensions: IndexMap<String, ResolverFn>,
}

impl ExtensionRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            extensions: IndexMap::new(),
        }
    }

    /// Registry with every built-in extension
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("slugify", Box::new(resolve_slugify));
        registry.register("mdxpassthrough", Box::new(resolve_passthrough));
        registry.register("excerpt", Box::new(resolve_excerpt));
        registry.register("link", Box::new(resolve_link));
        registry.register("dateformat", Box::new(resolve_dateformat));
        registry.register("fileByRelativePath", Box::new(resolve_file_by_relative_path));
        registry
    }

    /// Register (or replace) an extension
    pub fn register(&mut self, name: &str, resolver: ResolverFn) {
        self.extensions.insert(name.to_string(), resolver);
    }

    pub fn get(&self, name: &str) -> Option<&ResolverFn> {
        self.extensions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// `/<prefix>/<slug>`, where the slug is the node's own `slug` or the
/// slugified title, and the prefix is read from `fieldName` or falls back to
/// the literal `fallback`
pub fn slugify_path(source: &Node, prefix: Option<&str>) -> String {
    let slug = source
        .get_str("slug")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| slug::slugify(source.get_str("title").unwrap_or_default()));
    let path = format!("/{}/{}", prefix.unwrap_or_default(), slug);
    REPEATED_SLASHES.replace_all(&path, "/").to_string()
}

fn resolve_slugify(
    _ctx: &ResolveContext<'_>,
    source: &Node,
    call: &FieldCall<'_>,
) -> Result<Value> {
    let computed = call
        .directive_str("fieldName")
        .and_then(|field| source.get_str(field))
        .filter(|s| !s.is_empty());
    let prefix = computed.or_else(|| call.directive_str("fallback"));
    Ok(Value::String(slugify_path(source, prefix)))
}

/// Resolve the same-named (or `fieldName`) field on the parent node
fn resolve_passthrough(
    ctx: &ResolveContext<'_>,
    source: &Node,
    call: &FieldCall<'_>,
) -> Result<Value> {
    let field = call.directive_str("fieldName").unwrap_or(call.field);
    let parent_id = source
        .parent
        .as_deref()
        .ok_or_else(|| Error::NodeNotFound(format!("parent of {}", source.id)))?;
    let parent = ctx
        .store
        .get_node(parent_id)
        .ok_or_else(|| Error::NodeNotFound(parent_id.to_string()))?;
    ctx.schema.resolve_field(ctx, parent, field, call.field_args)
}

/// Prune the text held in `from` to `pruneLength` characters
fn resolve_excerpt(
    _ctx: &ResolveContext<'_>,
    source: &Node,
    call: &FieldCall<'_>,
) -> Result<Value> {
    let from = call.directive_str("from").unwrap_or("plainText");
    let text = source.get_str(from).unwrap_or_default();
    let length = match call.field_args.get("pruneLength") {
        None => 140,
        Some(v) => v.as_u64().ok_or_else(|| {
            Error::InvalidArgument(format!(
                "pruneLength must be a non-negative integer, got {}",
                v
            ))
        })? as usize,
    };
    Ok(Value::String(prune(text, length)))
}

/// Foreign-key style link: the value of `from` on the source is matched
/// against `by` on nodes of the field's type
fn resolve_link(ctx: &ResolveContext<'_>, source: &Node, call: &FieldCall<'_>) -> Result<Value> {
    let by = call.directive_str("by").unwrap_or("id");
    let from = call.directive_str("from").unwrap_or(call.field);

    let key = match from {
        "id" => Value::String(source.id.clone()),
        _ => source.get(from).cloned().unwrap_or(Value::Null),
    };
    if key.is_null() {
        return Ok(if call.returns_list { Value::Array(Vec::new()) } else { Value::Null });
    }
    let wanted: Vec<&Value> = match &key {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut matches = Vec::new();
    for candidate in ctx.schema.nodes_of_type(ctx.store, call.return_type)? {
        let value = resolve_path(ctx, candidate, by)?;
        if wanted.iter().any(|w| **w == value) {
            matches.push(candidate.to_value());
            if !call.returns_list && !key.is_array() {
                break;
            }
        }
    }

    Ok(if call.returns_list || key.is_array() {
        Value::Array(matches)
    } else {
        matches.into_iter().next().unwrap_or(Value::Null)
    })
}

/// Resolve a dotted path through the schema, so linked fields can be
/// traversed (`category.name`)
fn resolve_path(ctx: &ResolveContext<'_>, node: &Node, path: &str) -> Result<Value> {
    let mut parts = path.split('.');
    let first = parts.next().unwrap_or("id");
    let mut value = if first == "id" {
        Value::String(node.id.clone())
    } else {
        ctx.schema.resolve_field(ctx, node, first, &Args::new())?
    };
    for part in parts {
        value = value.get(part).cloned().unwrap_or(Value::Null);
    }
    Ok(value)
}

/// Dates are passed through unchanged unless a `formatString` is given,
/// which is applied with chrono's strftime syntax
fn resolve_dateformat(
    _ctx: &ResolveContext<'_>,
    source: &Node,
    call: &FieldCall<'_>,
) -> Result<Value> {
    let raw = source.get(call.field).cloned().unwrap_or(Value::Null);
    let Some(format) = call.field_args.get("formatString").and_then(Value::as_str) else {
        return Ok(raw);
    };
    let Some(date) = raw.as_str().and_then(parse_date) else {
        return Ok(raw);
    };
    let mut formatted = String::new();
    write!(formatted, "{}", date.format(format)).map_err(|_| {
        Error::InvalidArgument(format!("invalid formatString {:?}", format))
    })?;
    Ok(Value::String(formatted))
}

/// Resolve a path relative to the directory of the file the node came from
fn resolve_file_by_relative_path(
    ctx: &ResolveContext<'_>,
    source: &Node,
    call: &FieldCall<'_>,
) -> Result<Value> {
    let Some(relative) = source.get_str(call.field).filter(|s| !s.is_empty()) else {
        return Ok(Value::Null);
    };

    let mut current = source;
    let file = loop {
        if current.type_name() == "File" {
            break Some(current);
        }
        match current.parent.as_deref().and_then(|id| ctx.store.get_node(id)) {
            Some(parent) => current = parent,
            None => break None,
        }
    };
    let Some(file) = file else {
        return Ok(Value::Null);
    };

    let dir = std::path::Path::new(file.get_str("dir").unwrap_or_default());
    let target = normalize(&dir.join(relative));
    let found = ctx
        .store
        .nodes_by_type("File")
        .into_iter()
        .find(|n| n.get_str("absolutePath").map(std::path::Path::new) == Some(target.as_path()));

    Ok(found.map(Node::to_value).unwrap_or(Value::Null))
}

/// Collapse `.` and `..` components without touching the filesystem
fn normalize(path: &std::path::Path) -> std::path::PathBuf {
    use std::path::Component;
    let mut out = std::path::PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify_path_prefers_explicit_slug() {
        let node = Node::new(
            "a",
            "MdxPost",
            "",
            None,
            json!({"title": "Hello World", "slug": "custom"}),
        );
        assert_eq!(slugify_path(&node, Some("Rust")), "/Rust/custom");
    }

    #[test]
    fn test_slugify_path_from_title() {
        let node = Node::new("a", "MdxGarden", "", None, json!({"title": "Hello, World!"}));
        assert_eq!(slugify_path(&node, Some("garden")), "/garden/hello-world");
        assert_eq!(slugify_path(&node, None), "/hello-world");
    }

    #[test]
    fn test_slugify_path_collapses_slashes() {
        let node = Node::new("a", "MdxPost", "", None, json!({"title": "x", "slug": "/nested/"}));
        assert_eq!(slugify_path(&node, Some("/blog/")), "/blog/nested/");
    }

    #[test]
    fn test_builtin_names() {
        let registry = ExtensionRegistry::with_builtins();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["slugify", "mdxpassthrough", "excerpt", "link", "dateformat", "fileByRelativePath"]
        );
        assert!(!registry.contains("nodeInterface"));
    }

    #[test]
    fn test_normalize() {
        let p = normalize(std::path::Path::new("/a/b/./../c/img.png"));
        assert_eq!(p, std::path::PathBuf::from("/a/c/img.png"));
    }
}
