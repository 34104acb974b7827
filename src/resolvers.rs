//! Root query resolvers

use serde_json::Value;
use std::cmp::Ordering;

use crate::content::parse_date;
use crate::error::{Error, Result};
use crate::nodes::Node;
use crate::random::SampleRequest;
use crate::schema::{Args, ResolveContext};

/// All nodes implementing `Post`, oldest first
pub fn posts_by_date<'s>(ctx: &ResolveContext<'s>) -> Result<Vec<&'s Node>> {
    let mut posts = ctx.schema.nodes_of_type(ctx.store, "Post")?;
    posts.sort_by(|a, b| compare_dates(a.get_str("date"), b.get_str("date")));
    Ok(posts)
}

/// Dates that parse sort chronologically; anything else sorts after them
/// by its raw text
fn compare_dates(a: Option<&str>, b: Option<&str>) -> Ordering {
    let parsed_a = a.and_then(parse_date);
    let parsed_b = b.and_then(parse_date);
    match (parsed_a, parsed_b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(&b),
    }
}

/// `randomPosts(count: Int = 2, seed: String): [Post]`
///
/// Arguments are validated before any node is read.
pub fn random_posts<'s>(ctx: &ResolveContext<'s>, args: &Args) -> Result<Vec<&'s Node>> {
    let request = SampleRequest::from_args(args)?;
    let posts = posts_by_date(ctx)?;
    tracing::debug!(
        "Sampling {} of {} posts (seed: {:?})",
        request.count,
        posts.len(),
        request.seed
    );
    Ok(request.apply(&posts))
}

/// Run a root query field by name, returning full node values
pub fn run_query(ctx: &ResolveContext<'_>, field: &str, args: &Args) -> Result<Value> {
    match field {
        "randomPosts" => Ok(Value::Array(
            random_posts(ctx, args)?
                .into_iter()
                .map(Node::to_value)
                .collect(),
        )),
        _ => Err(Error::UnknownField {
            type_name: "Query".to_string(),
            field: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{MemoryStore, NodeStore};
    use crate::schema::Schema;
    use serde_json::json;

    fn store_with_posts(dates: &[(&str, &str)]) -> MemoryStore {
        let mut store = MemoryStore::new();
        for (id, date) in dates {
            store.create_node(Node::new(
                *id,
                "MdxPost",
                "",
                None,
                json!({"title": id, "date": date, "category": "Rust"}),
            ));
        }
        store.create_node(Node::new(
            "g",
            "MdxGarden",
            "",
            None,
            json!({"title": "note", "date": "2000-01-01"}),
        ));
        store
    }

    fn ids(nodes: &[&Node]) -> Vec<String> {
        nodes.iter().map(|n| n.id.clone()).collect()
    }

    fn args(value: Value) -> Args {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_posts_sorted_by_date_ascending() {
        let store = store_with_posts(&[
            ("c", "2021-03-01"),
            ("a", "2019-01-01"),
            ("x", "someday"),
            ("b", "2020-06-15 10:00:00"),
        ]);
        let schema = Schema::core();
        let ctx = ResolveContext::new(&store, &schema);
        assert_eq!(ids(&posts_by_date(&ctx).unwrap()), vec!["a", "b", "c", "x"]);
    }

    #[test]
    fn test_random_posts_samples_sorted_posts() {
        // inserted out of order; sorted they are A..E
        let store = store_with_posts(&[
            ("D", "2021-04-01"),
            ("A", "2021-01-01"),
            ("E", "2021-05-01"),
            ("C", "2021-03-01"),
            ("B", "2021-02-01"),
        ]);
        let schema = Schema::core();
        let ctx = ResolveContext::new(&store, &schema);

        let out = random_posts(&ctx, &args(json!({"count": 3, "seed": "test"}))).unwrap();
        assert_eq!(ids(&out), vec!["C", "A", "E"]);

        let out = random_posts(&ctx, &args(json!({"count": 10, "seed": "test"}))).unwrap();
        assert_eq!(ids(&out), vec!["C", "A", "E", "B", "D"]);
    }

    #[test]
    fn test_random_posts_default_count() {
        let store = store_with_posts(&[
            ("A", "2021-01-01"),
            ("B", "2021-02-01"),
            ("C", "2021-03-01"),
        ]);
        let schema = Schema::core();
        let ctx = ResolveContext::new(&store, &schema);
        assert_eq!(random_posts(&ctx, &Args::new()).unwrap().len(), 2);
    }

    #[test]
    fn test_random_posts_never_returns_garden_notes() {
        let store = store_with_posts(&[("A", "2021-01-01")]);
        let schema = Schema::core();
        let ctx = ResolveContext::new(&store, &schema);
        let out = random_posts(&ctx, &args(json!({"count": 5, "seed": "x"}))).unwrap();
        assert_eq!(ids(&out), vec!["A"]);
    }

    #[test]
    fn test_random_posts_rejects_bad_arguments() {
        let store = store_with_posts(&[("A", "2021-01-01")]);
        let schema = Schema::core();
        let ctx = ResolveContext::new(&store, &schema);
        let err = random_posts(&ctx, &args(json!({"count": -2}))).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_run_query() {
        let store = store_with_posts(&[("A", "2021-01-01"), ("B", "2021-02-01")]);
        let schema = Schema::core();
        let ctx = ResolveContext::new(&store, &schema);

        let value = run_query(&ctx, "randomPosts", &args(json!({"seed": "s"}))).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["internal"]["type"], "MdxPost");

        assert!(matches!(
            run_query(&ctx, "allPosts", &Args::new()),
            Err(Error::UnknownField { .. })
        ));
    }
}
