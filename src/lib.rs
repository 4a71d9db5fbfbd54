//! Parser and query API for REAPER `.rpp` project files.
//!
//! ```ignore
//! use rpptree::application::Document;
//! use rpptree::domain::ParseOptions;
//!
//! let doc = Document::parse(text, &ParseOptions::default())?;
//! let kick = doc.find_by_type_and_name("ITEM", "Kick");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::Document;
pub use domain::{NodeRef, ParseOptions, ProjectTree, TreeBuilder};
