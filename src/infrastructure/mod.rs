//! Infrastructure layer: I/O implementations
//!
//! This layer implements I/O boundary traits and loads documents from storage.

pub mod error;
pub mod loader;
pub mod traits;

pub use error::{InfraError, InfraResult, IoResultExt};
pub use loader::DocumentLoader;
pub use traits::{FileSystem, RealFileSystem};
