//! List site content

use anyhow::Result;

use crate::nodes::NodeStore;
use crate::resolvers;
use crate::schema::{Args, ResolveContext, Schema};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let store = site.build_store()?;
    let schema = Schema::core();
    let ctx = ResolveContext::new(&store, &schema);

    match content_type {
        "post" | "posts" => {
            let posts = resolvers::posts_by_date(&ctx)?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let slug = schema.resolve_field(&ctx, post, "slug", &Args::new())?;
                println!(
                    "  {} - {} [{}]",
                    post.get_str("date").unwrap_or_default(),
                    post.get_str("title").unwrap_or_default(),
                    slug.as_str().unwrap_or_default()
                );
            }
        }
        "garden" | "gardens" => {
            let mut notes = schema.nodes_of_type(&store, "Garden")?;
            notes.sort_by(|a, b| a.get_str("date").cmp(&b.get_str("date")));
            println!("Garden ({}):", notes.len());
            for note in notes {
                let tags = note
                    .get("tags")
                    .and_then(|t| t.as_array())
                    .map(|t| {
                        t.iter()
                            .filter_map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                println!(
                    "  {} - {} ({}) [{}]",
                    note.get_str("date").unwrap_or_default(),
                    note.get_str("title").unwrap_or_default(),
                    note.get_str("icon").unwrap_or_default(),
                    tags
                );
            }
        }
        "category" | "categories" => {
            let categories = store.nodes_by_type("Category");
            println!("Categories ({}):", categories.len());
            let mut rows = Vec::new();
            for category in categories {
                let posts = schema.resolve_field(&ctx, category, "posts", &Args::new())?;
                let count = posts.as_array().map(Vec::len).unwrap_or(0);
                rows.push((category.get_str("name").unwrap_or_default(), count));
            }
            rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
            for (name, count) in rows {
                println!("  {} ({})", name, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, garden, category",
                content_type
            );
        }
    }

    Ok(())
}
