//! Content module - front-matter, markdown and loading files into nodes

mod frontmatter;
pub mod loader;
mod markdown;

pub use frontmatter::{
    parse_date, FrontMatter, GardenFrontMatter, PostFrontMatter, PostType,
};
pub(crate) use frontmatter::non_empty;
pub use markdown::{plain_text, prune, time_to_read, MarkdownRenderer};
