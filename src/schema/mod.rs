//! Content schema: declared types, SDL output and field resolution through
//! the extension registry

mod definitions;
mod extensions;
mod types;

pub use extensions::{slugify_path, Args, ExtensionRegistry, FieldCall, ResolverFn};
pub use types::{ArgDef, Directive, FieldDef, TypeDef, TypeKind, TypeRef};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::nodes::{Node, NodeStore};

/// What a resolver can see while resolving a field
pub struct ResolveContext<'a> {
    pub store: &'a dyn NodeStore,
    pub schema: &'a Schema,
}

impl<'a> ResolveContext<'a> {
    pub fn new(store: &'a dyn NodeStore, schema: &'a Schema) -> Self {
        Self { store, schema }
    }
}

/// The set of declared types plus the registry their directives bind to
pub struct Schema {
    types: IndexMap<String, TypeDef>,
    registry: ExtensionRegistry,
}

impl Schema {
    /// Empty schema over the given registry
    pub fn new(registry: ExtensionRegistry) -> Self {
        Self {
            types: IndexMap::new(),
            registry,
        }
    }

    /// The writing + garden schema with the built-in extensions
    pub fn core() -> Self {
        let mut schema = Self::new(ExtensionRegistry::with_builtins());
        for def in definitions::host_types()
            .into_iter()
            .chain(definitions::content_types())
            .chain(std::iter::once(definitions::query_type()))
        {
            schema.add_type(def);
        }
        schema
    }

    /// Add or replace a type
    pub fn add_type(&mut self, def: TypeDef) {
        self.types.insert(def.name.clone(), def);
    }

    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ExtensionRegistry {
        &mut self.registry
    }

    /// Check that every directive used by a field has a registered extension
    pub fn validate(&self) -> Result<()> {
        for def in self.types.values() {
            for field in &def.fields {
                for directive in &field.directives {
                    if !self.registry.contains(&directive.name) {
                        return Err(Error::UnknownExtension(directive.name.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Object types implementing `interface`
    pub fn implementors(&self, interface: &str) -> Vec<&str> {
        self.types
            .values()
            .filter(|t| t.interfaces.iter().any(|i| i == interface))
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Stored nodes of an object type, or of every implementor of an
    /// interface, in store order
    pub fn nodes_of_type<'s>(&self, store: &'s dyn NodeStore, name: &str) -> Result<Vec<&'s Node>> {
        let def = self
            .type_def(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;

        if def.is_interface() {
            let implementors = self.implementors(name);
            Ok(store
                .nodes()
                .into_iter()
                .filter(|n| implementors.contains(&n.type_name()))
                .collect())
        } else {
            Ok(store.nodes_by_type(name))
        }
    }

    /// Resolve one field of a node against the node's own type
    pub fn resolve_field(
        &self,
        ctx: &ResolveContext<'_>,
        node: &Node,
        field: &str,
        args: &Args,
    ) -> Result<Value> {
        let def = self
            .type_def(node.type_name())
            .ok_or_else(|| Error::UnknownType(node.type_name().to_string()))?;
        let Some(field_def) = def.get_field(field) else {
            // every node carries these, declared or not
            return match field {
                "id" | "parent" | "children" => Ok(intrinsic_field(node, field)),
                _ => Err(Error::UnknownField {
                    type_name: def.name.clone(),
                    field: field.to_string(),
                }),
            };
        };
        let field_args = field_def.args_with_defaults(args);

        if let Some(directive) = field_def.directives.first() {
            let resolver = self
                .registry
                .get(&directive.name)
                .ok_or_else(|| Error::UnknownExtension(directive.name.clone()))?;
            let call = FieldCall {
                field,
                return_type: &field_def.type_ref.name,
                returns_list: field_def.type_ref.list,
                directive_args: &directive.args,
                field_args: &field_args,
            };
            return resolver(ctx, node, &call);
        }

        Ok(match field {
            "id" | "parent" | "children" => intrinsic_field(node, field),
            _ => node.get(field).cloned().unwrap_or(Value::Null),
        })
    }

    /// Resolve a selection of fields into a JSON object
    pub fn resolve(&self, ctx: &ResolveContext<'_>, node: &Node, fields: &[&str]) -> Result<Value> {
        let mut out = Map::new();
        for field in fields {
            out.insert(
                field.to_string(),
                self.resolve_field(ctx, node, field, &Args::new())?,
            );
        }
        Ok(Value::Object(out))
    }

    /// Schema definition language for all declared types
    pub fn sdl(&self) -> String {
        self.types
            .values()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Fields held on the node record itself rather than in its data
fn intrinsic_field(node: &Node, field: &str) -> Value {
    match field {
        "id" => Value::String(node.id.clone()),
        "parent" => node.parent.clone().map(Value::String).unwrap_or(Value::Null),
        "children" => Value::from(node.children.clone()),
        _ => Value::Null,
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::core()
    }
}
