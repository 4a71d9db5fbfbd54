//! Domain layer: tokenizer, node tree, builder and queries
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod node;
pub mod query;
pub mod tokenizer;

pub use arena::{PreOrderIterator, ProjectTree};
pub use builder::{BuildStats, ParseOptions, TreeBuilder};
pub use error::DomainError;
pub use node::{Node, NodeData, NodeId};
pub use query::{NodeRef, NAME_TYPE};
pub use tokenizer::tokenize;
