//! Type definitions of the writing and garden content model

use serde_json::json;

use super::types::{FieldDef, TypeDef};

/// Host types the content types derive from
pub fn host_types() -> Vec<TypeDef> {
    vec![
        TypeDef::object("File")
            .implements("Node")
            .field(FieldDef::new("id", "ID!"))
            .field(FieldDef::new("sourceInstanceName", "String!"))
            .field(FieldDef::new("absolutePath", "String!"))
            .field(FieldDef::new("relativePath", "String!"))
            .field(FieldDef::new("relativeDirectory", "String!"))
            .field(FieldDef::new("dir", "String!"))
            .field(FieldDef::new("base", "String!"))
            .field(FieldDef::new("name", "String!"))
            .field(FieldDef::new("extension", "String!")),
        TypeDef::object("Mdx")
            .implements("Node")
            .field(FieldDef::new("id", "ID!"))
            .field(FieldDef::new("frontmatter", "JSON"))
            .field(FieldDef::new("rawBody", "String!"))
            .field(FieldDef::new("body", "String!"))
            .field(FieldDef::new("html", "String"))
            .field(FieldDef::new("plainText", "String!"))
            .field(
                FieldDef::new("excerpt", "String!")
                    .arg("pruneLength", "Int", Some(json!(140)))
                    .directive("excerpt", json!({"from": "plainText"})),
            )
            .field(FieldDef::new("timeToRead", "Int"))
            .field(FieldDef::new("fileAbsolutePath", "String!")),
    ]
}

/// Fields shared by `Post` and its implementations
fn post_fields(def: TypeDef, excerpt_length: i64, passthrough: bool) -> TypeDef {
    def.field(FieldDef::new("id", "ID!"))
        .field(
            FieldDef::new("slug", "String!")
                .directive("slugify", json!({"fieldName": "category"})),
        )
        .field(mdx_field(excerpt_field(excerpt_length), passthrough))
        .field(mdx_field(FieldDef::new("body", "String!"), passthrough))
        .field(mdx_field(
            FieldDef::new("html", if passthrough { "String!" } else { "String" }),
            passthrough,
        ))
        .field(mdx_field(FieldDef::new("timeToRead", "Int"), passthrough))
        .field(FieldDef::new("image", "File").directive("fileByRelativePath", json!({})))
        .field(FieldDef::new("category", "Category!").directive("link", json!({"by": "name"})))
        .field(FieldDef::new("date", "Date!").directive("dateformat", json!({})))
        .field(FieldDef::new("description", "String"))
        .field(FieldDef::new("published", "Boolean!"))
        .field(FieldDef::new("subtitle", "String"))
        .field(FieldDef::new("title", "String!"))
        .field(FieldDef::new("type", "String!"))
}

/// Fields shared by `Garden` and its implementations
fn garden_fields(def: TypeDef, excerpt_length: i64, passthrough: bool) -> TypeDef {
    def.field(FieldDef::new("id", "ID!"))
        .field(
            FieldDef::new("slug", "String!").directive("slugify", json!({"fallback": "garden"})),
        )
        .field(mdx_field(excerpt_field(excerpt_length), passthrough))
        .field(mdx_field(FieldDef::new("body", "String!"), passthrough))
        .field(mdx_field(
            FieldDef::new("html", if passthrough { "String!" } else { "String" }),
            passthrough,
        ))
        .field(mdx_field(FieldDef::new("timeToRead", "Int"), passthrough))
        .field(FieldDef::new("date", "Date!").directive("dateformat", json!({})))
        .field(FieldDef::new("title", "String!"))
        .field(FieldDef::new("tags", "[String!]!"))
        .field(FieldDef::new("icon", "String!"))
}

fn excerpt_field(default_length: i64) -> FieldDef {
    FieldDef::new("excerpt", "String!").arg("pruneLength", "Int", Some(json!(default_length)))
}

fn mdx_field(field: FieldDef, passthrough: bool) -> FieldDef {
    if passthrough {
        let name = field.name.clone();
        field.directive("mdxpassthrough", json!({ "fieldName": name }))
    } else {
        field
    }
}

/// `Post`, `MdxPost`, `Category`, `Garden`, `MdxGarden` and `CoreConfig`
pub fn content_types() -> Vec<TypeDef> {
    vec![
        post_fields(TypeDef::interface("Post"), 160, false),
        post_fields(
            TypeDef::object("MdxPost").implements("Node").implements("Post"),
            140,
            true,
        ),
        TypeDef::object("Category")
            .implements("Node")
            .field(FieldDef::new("name", "String"))
            .field(
                FieldDef::new("posts", "[Post]")
                    .directive("link", json!({"by": "category.name", "from": "name"})),
            ),
        garden_fields(TypeDef::interface("Garden"), 160, false),
        garden_fields(
            TypeDef::object("MdxGarden").implements("Node").implements("Garden"),
            140,
            true,
        ),
        TypeDef::object("CoreConfig")
            .implements("Node")
            .field(FieldDef::new("writingSource", "String"))
            .field(FieldDef::new("gardenSource", "String")),
    ]
}

/// Root query type
pub fn query_type() -> TypeDef {
    TypeDef::object("Query").field(
        FieldDef::new("randomPosts", "[Post]")
            .described_arg("count", "Int", "Count of how many nodes should be returned")
            .described_arg(
                "seed",
                "String",
                "Input a seed (e.g. the current id of the node) to deterministically retrieve the same nodes on every run",
            ),
    )
}
