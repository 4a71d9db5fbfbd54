//! Application layer: documents and the views built on top of them
//!
//! This layer orchestrates domain logic and never touches the filesystem.

pub mod document;
pub mod error;
pub mod media;
pub mod summary;

pub use document::Document;
pub use error::{ApplicationError, ApplicationResult};
pub use media::{resolve_media_path, source_file, MediaReference};
pub use summary::{ItemSummary, ProjectSummary, Tempo, TrackSummary};
