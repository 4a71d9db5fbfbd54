//! Reads project files from storage and parses them into documents.

use std::io;
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::application::Document;
use crate::domain::ParseOptions;
use crate::infrastructure::error::IoResultExt;
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult};

/// Loads `.rpp` documents through a [`FileSystem`].
pub struct DocumentLoader {
    fs: Arc<dyn FileSystem>,
    options: ParseOptions,
}

impl DocumentLoader {
    pub fn new(fs: Arc<dyn FileSystem>, options: ParseOptions) -> Self {
        Self { fs, options }
    }

    /// Read and parse one project file.
    ///
    /// The document's provenance is the canonical path, so relative media
    /// references resolve against the real project directory.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> InfraResult<Document> {
        if !self.fs.is_file(path) {
            let kind = if self.fs.exists(path) {
                io::ErrorKind::InvalidInput
            } else {
                io::ErrorKind::NotFound
            };
            return Err(InfraError::io(
                format!("not a project file: {}", path.display()),
                io::Error::from(kind),
            ));
        }

        let canonical = self
            .fs
            .canonicalize(path)
            .with_path_context("resolve path", path)?;
        let text = self
            .fs
            .read_to_string(&canonical)
            .with_path_context("read project", &canonical)?;
        debug!(bytes = text.len(), path = %canonical.display(), "project read");

        Ok(Document::with_provenance(&text, &canonical, &self.options)?)
    }

    /// Load several files in parallel; each result is independent.
    pub fn load_all<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<InfraResult<Document>> {
        paths.par_iter().map(|p| self.load(p.as_ref())).collect()
    }
}
