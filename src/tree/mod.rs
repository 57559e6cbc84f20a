//! Document tree node types and id generation

pub mod id;
pub mod node;

pub use id::IdGenerator;
pub use node::{DocumentBody, Node, NodeBody, NodeRecord, NodeView};
