//! CLI commands

pub mod list;
pub mod new_garden;
pub mod random;
pub mod schema;
