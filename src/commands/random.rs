//! Sample random posts from the site

use anyhow::Result;
use serde_json::{json, Value};

use crate::random::Seed;
use crate::resolvers;
use crate::schema::{Args, ResolveContext, Schema};
use crate::Site;

/// Fields printed for each sampled post
const FIELDS: &[&str] = &["id", "title", "slug", "date"];

/// Sample posts and resolve the printed fields
pub fn sample(site: &Site, count: Option<i64>, seed: Option<Seed>) -> Result<Vec<Value>> {
    let store = site.build_store()?;
    let schema = Schema::core();
    let ctx = ResolveContext::new(&store, &schema);

    let mut args = Args::new();
    if let Some(count) = count {
        args.insert("count".to_string(), json!(count));
    }
    if let Some(seed) = seed {
        args.insert("seed".to_string(), serde_json::to_value(seed)?);
    }

    let posts = resolvers::random_posts(&ctx, &args)?;
    let mut out = Vec::with_capacity(posts.len());
    for post in posts {
        out.push(schema.resolve(&ctx, post, FIELDS)?);
    }
    Ok(out)
}

/// Print the sampled posts as JSON
pub fn run(site: &Site, count: Option<i64>, seed: Option<Seed>) -> Result<()> {
    let posts = sample(site, count, seed)?;
    println!("{}", serde_json::to_string_pretty(&posts)?);
    Ok(())
}
