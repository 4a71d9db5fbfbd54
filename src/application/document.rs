//! Parsed project document with provenance.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{BuildStats, DomainError, NodeRef, ParseOptions, ProjectTree, TreeBuilder};

/// A parsed `.rpp` document.
///
/// Built once from complete text and immutable afterwards. The source path
/// and its directory are kept for resolving relative file references found
/// in node values.
#[derive(Debug, Clone)]
pub struct Document {
    tree: ProjectTree,
    stats: BuildStats,
    path: Option<PathBuf>,
    directory: Option<PathBuf>,
}

impl Document {
    /// Parse text that has no file of origin.
    pub fn parse(text: &str, options: &ParseOptions) -> ApplicationResult<Self> {
        Self::build(text, None, options)
    }

    /// Parse text read from `path`.
    pub fn with_provenance(
        text: &str,
        path: &Path,
        options: &ParseOptions,
    ) -> ApplicationResult<Self> {
        Self::build(text, Some(path), options)
    }

    #[instrument(level = "debug", skip(text, options))]
    fn build(text: &str, path: Option<&Path>, options: &ParseOptions) -> ApplicationResult<Self> {
        let (tree, stats) = TreeBuilder::new(options.clone()).build_str(text);
        if tree.root().is_none() {
            return Err(DomainError::NoRootBlock { lines: stats.lines }.into());
        }
        debug!(nodes = tree.len(), depth = tree.depth(), "document parsed");

        let path = path.map(Path::to_path_buf);
        let directory = path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf);

        Ok(Self {
            tree,
            stats,
            path,
            directory,
        })
    }

    /// The node the builder's cursor rested on at end of input.
    ///
    /// This is the outermost block whenever block markers balance.
    pub fn root(&self) -> NodeRef<'_> {
        self.tree
            .root_ref()
            .expect("Document is only constructed with a root")
    }

    pub fn tree(&self) -> &ProjectTree {
        &self.tree
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Path the document was read from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory containing the document.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn first_child_of_type(&self, node_type: &str) -> Option<NodeRef<'_>> {
        self.root().first_child_of_type(node_type)
    }

    pub fn last_child_of_type(&self, node_type: &str) -> Option<NodeRef<'_>> {
        self.root().last_child_of_type(node_type)
    }

    pub fn all_children_of_type(&self, node_type: &str, recursive: bool) -> Vec<NodeRef<'_>> {
        self.root().all_children_of_type(node_type, recursive)
    }

    pub fn children_of_type_and_name(
        &self,
        node_type: &str,
        name: &str,
        recursive: bool,
    ) -> Vec<NodeRef<'_>> {
        self.root()
            .children_of_type_and_name(node_type, name, recursive)
    }

    pub fn find_by_type_and_name(&self, node_type: &str, name: &str) -> Option<NodeRef<'_>> {
        self.root().find_by_type_and_name(node_type, name)
    }
}
