//! Declarative type definitions and their SDL rendering

use serde_json::{Map, Value};
use std::fmt;

/// Reference to a type, e.g. `String!` or `[String!]!`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub list: bool,
    pub non_null: bool,
    pub item_non_null: bool,
}

impl TypeRef {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let (inner, non_null) = match s.strip_suffix('!') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        match inner.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            Some(item) => {
                let (name, item_non_null) = match item.strip_suffix('!') {
                    Some(rest) => (rest, true),
                    None => (item, false),
                };
                Self {
                    name: name.to_string(),
                    list: true,
                    non_null,
                    item_non_null,
                }
            }
            None => Self {
                name: inner.to_string(),
                list: false,
                non_null,
                item_non_null: false,
            },
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.list {
            write!(f, "[{}{}]", self.name, if self.item_non_null { "!" } else { "" })?;
        } else {
            f.write_str(&self.name)?;
        }
        if self.non_null {
            f.write_str("!")?;
        }
        Ok(())
    }
}

/// Argument of a field
#[derive(Debug, Clone, PartialEq)]
pub struct ArgDef {
    pub name: String,
    pub type_ref: TypeRef,
    pub default: Option<Value>,
    pub description: Option<String>,
}

/// Directive attached to a field, e.g. `@slugify(fieldName: "category")`
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub args: Map<String, Value>,
}

/// Field of an object or interface type
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub type_ref: TypeRef,
    pub args: Vec<ArgDef>,
    pub directives: Vec<Directive>,
}

impl FieldDef {
    pub fn new(name: &str, type_ref: &str) -> Self {
        Self {
            name: name.to_string(),
            type_ref: TypeRef::parse(type_ref),
            args: Vec::new(),
            directives: Vec::new(),
        }
    }

    /// Add an argument, with an optional default value
    pub fn arg(mut self, name: &str, type_ref: &str, default: Option<Value>) -> Self {
        self.args.push(ArgDef {
            name: name.to_string(),
            type_ref: TypeRef::parse(type_ref),
            default,
            description: None,
        });
        self
    }

    /// Add a documented argument without default
    pub fn described_arg(mut self, name: &str, type_ref: &str, description: &str) -> Self {
        self.args.push(ArgDef {
            name: name.to_string(),
            type_ref: TypeRef::parse(type_ref),
            default: None,
            description: Some(description.to_string()),
        });
        self
    }

    /// Attach a directive; `args` must be a JSON object or null
    pub fn directive(mut self, name: &str, args: Value) -> Self {
        let args = match args {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.directives.push(Directive {
            name: name.to_string(),
            args,
        });
        self
    }

    /// Field arguments with declared defaults filled in
    pub fn args_with_defaults(&self, given: &Map<String, Value>) -> Map<String, Value> {
        let mut merged = Map::new();
        for arg in &self.args {
            if let Some(default) = &arg.default {
                merged.insert(arg.name.clone(), default.clone());
            }
        }
        for (key, value) in given {
            if !value.is_null() {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self
                .args
                .iter()
                .map(|a| match &a.default {
                    Some(d) => format!("{}: {} = {}", a.name, a.type_ref, d),
                    None => format!("{}: {}", a.name, a.type_ref),
                })
                .collect();
            write!(f, "({})", args.join(", "))?;
        }
        write!(f, ": {}", self.type_ref)?;
        for directive in &self.directives {
            write!(f, " @{}", directive.name)?;
            if !directive.args.is_empty() {
                let args: Vec<String> = directive
                    .args
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                write!(f, "({})", args.join(", "))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Interface,
    Object,
}

/// An interface or object type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeKind,
    pub interfaces: Vec<String>,
    /// Interface whose implementors are all stored nodes
    pub node_interface: bool,
    pub fields: Vec<FieldDef>,
}

impl TypeDef {
    pub fn object(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Object,
            interfaces: Vec::new(),
            node_interface: false,
            fields: Vec::new(),
        }
    }

    pub fn interface(name: &str) -> Self {
        Self {
            kind: TypeKind::Interface,
            node_interface: true,
            ..Self::object(name)
        }
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TypeKind::Interface => write!(f, "interface {}", self.name)?,
            TypeKind::Object => write!(f, "type {}", self.name)?,
        }
        if !self.interfaces.is_empty() {
            write!(f, " implements {}", self.interfaces.join(" & "))?;
        }
        if self.is_interface() && self.node_interface {
            f.write_str(" @nodeInterface")?;
        }
        f.write_str(" {\n")?;
        for field in &self.fields {
            writeln!(f, "  {}", field)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_type_refs() {
        let t = TypeRef::parse("[String!]!");
        assert!(t.list && t.non_null && t.item_non_null);
        assert_eq!(t.name, "String");
        assert_eq!(t.to_string(), "[String!]!");

        let t = TypeRef::parse("Category!");
        assert!(!t.list && t.non_null);
        assert_eq!(t.to_string(), "Category!");

        assert_eq!(TypeRef::parse("[Post]").to_string(), "[Post]");
        assert_eq!(TypeRef::parse("Int").to_string(), "Int");
    }

    #[test]
    fn test_field_display() {
        let field = FieldDef::new("excerpt", "String!")
            .arg("pruneLength", "Int", Some(json!(140)))
            .directive("mdxpassthrough", json!({"fieldName": "excerpt"}));
        assert_eq!(
            field.to_string(),
            r#"excerpt(pruneLength: Int = 140): String! @mdxpassthrough(fieldName: "excerpt")"#
        );
    }

    #[test]
    fn test_args_with_defaults() {
        let field = FieldDef::new("excerpt", "String!").arg("pruneLength", "Int", Some(json!(140)));
        let merged = field.args_with_defaults(&Map::new());
        assert_eq!(merged["pruneLength"], 140);

        let mut given = Map::new();
        given.insert("pruneLength".into(), json!(20));
        assert_eq!(field.args_with_defaults(&given)["pruneLength"], 20);

        given.insert("pruneLength".into(), Value::Null);
        assert_eq!(field.args_with_defaults(&given)["pruneLength"], 140);
    }

    #[test]
    fn test_type_display() {
        let def = TypeDef::object("Category")
            .implements("Node")
            .field(FieldDef::new("name", "String"))
            .field(FieldDef::new("posts", "[Post]").directive(
                "link",
                json!({"by": "category.name", "from": "name"}),
            ));
        assert_eq!(
            def.to_string(),
            "type Category implements Node {\n  name: String\n  posts: [Post] @link(by: \"category.name\", from: \"name\")\n}"
        );

        let iface = TypeDef::interface("Garden").field(FieldDef::new("id", "ID!"));
        assert_eq!(iface.to_string(), "interface Garden @nodeInterface {\n  id: ID!\n}");
    }
}
