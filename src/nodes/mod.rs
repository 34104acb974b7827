//! Content graph: nodes, their storage and the lifecycle that fills it

pub mod lifecycle;
mod node;
mod store;

pub use lifecycle::{on_create_node, source_nodes, CORE_CONFIG_ID, MDX_TYPE};
pub use node::{create_content_digest, create_node_id, Internal, Node};
pub use store::{MemoryStore, NodeChange, NodeStore};
