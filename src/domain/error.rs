//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors describe documents that produce no usable tree.
///
/// Malformed structure inside a document is recovered by the builder and
/// never reaches this type.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("no opening block found in {lines} line(s)")]
    NoRootBlock { lines: usize },
}
