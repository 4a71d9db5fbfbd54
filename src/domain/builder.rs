//! Line-driven construction of a [`ProjectTree`] from `.rpp` text.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::domain::arena::ProjectTree;
use crate::domain::node::{NodeData, NodeId};

const OPEN_MARKER: char = '<';
const CLOSE_MARKER: char = '>';

/// Options that change how lines are fed to the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Drop whitespace-only lines instead of adding empty nodes for them
    pub skip_blank_lines: bool,
}

/// Counters collected during a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Lines seen, including skipped ones
    pub lines: usize,
    /// Lines that opened a block
    pub opened: usize,
    /// Lines that closed a block
    pub closed: usize,
    /// Closing lines with no open block left to close
    pub ignored_closes: usize,
    /// Content lines seen before any block was opened
    pub discarded: usize,
    /// Open blocks left at end of input (0 when brackets balance)
    pub final_depth: usize,
}

impl BuildStats {
    /// Every opened block was closed and no close was left over.
    pub fn is_balanced(&self) -> bool {
        self.final_depth == 0 && self.ignored_closes == 0
    }
}

/// Builds a project tree from lines using a single "current block" cursor.
///
/// - A line containing `<` opens a block: its node is appended to the
///   current block and becomes the new current block. This wins over `>`
///   on the same line.
/// - A line containing `>` closes the current block. At the root this is a
///   no-op.
/// - Any other line becomes a child of the current block, or is discarded
///   before the first block opens.
///
/// Unbalanced input is never rejected. When input ends inside a block the
/// innermost open block is reported as the root, matching the cursor.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    options: ParseOptions,
}

impl TreeBuilder {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Split `text` into lines and build.
    ///
    /// A trailing newline does not start an extra line and a `\r` before
    /// `\n` is dropped.
    pub fn build_str(&self, text: &str) -> (ProjectTree, BuildStats) {
        self.build(text.lines())
    }

    #[instrument(level = "debug", skip(self, lines))]
    pub fn build<'l, I>(&self, lines: I) -> (ProjectTree, BuildStats)
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut tree = ProjectTree::new();
        let mut stats = BuildStats::default();
        let mut current: Option<NodeId> = None;
        // Blocks opened and not yet closed; independent of the cursor, which
        // never moves above the root.
        let mut open_blocks = 0usize;

        for line in lines {
            stats.lines += 1;

            if line.contains(OPEN_MARKER) {
                let idx = tree.insert_node(NodeData::from_line(line), current);
                trace!(line = stats.lines, open_blocks, "open block");
                current = Some(idx);
                open_blocks += 1;
                stats.opened += 1;
            } else if line.contains(CLOSE_MARKER) {
                stats.closed += 1;
                if open_blocks == 0 {
                    trace!(line = stats.lines, "close without open block ignored");
                    stats.ignored_closes += 1;
                } else {
                    open_blocks -= 1;
                }
                if let Some(parent) = current
                    .and_then(|idx| tree.get_node(idx))
                    .and_then(|n| n.parent)
                {
                    current = Some(parent);
                }
            } else if self.options.skip_blank_lines && line.trim().is_empty() {
                continue;
            } else if current.is_some() {
                tree.insert_node(NodeData::from_line(line), current);
            } else {
                trace!(line = stats.lines, "content before first block discarded");
                stats.discarded += 1;
            }
        }

        stats.final_depth = open_blocks;

        if let Some(idx) = current {
            tree.set_root(idx);
        }

        if !stats.is_balanced() {
            warn!(
                opened = stats.opened,
                closed = stats.closed,
                final_depth = stats.final_depth,
                "unbalanced block markers"
            );
        }
        if stats.discarded > 0 {
            warn!(discarded = stats.discarded, "lines before first block ignored");
        }
        debug!(nodes = tree.len(), lines = stats.lines, "tree built");

        (tree, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<REAPER_PROJECT\n  CURSOR 42.0\n  <TRACK\n    NAME \"Drums\"\n    <ITEM\n      NAME \"Kick\"\n    >\n  >\n>\n";

    fn build(text: &str) -> (ProjectTree, BuildStats) {
        TreeBuilder::default().build_str(text)
    }

    #[test]
    fn given_balanced_document_when_build_then_cursor_returns_to_root() {
        let (tree, stats) = build(SAMPLE);
        let root = tree.root_ref().unwrap();
        assert_eq!(root.node_type(), "REAPER_PROJECT");
        assert!(root.parent().is_none());
        assert_eq!(stats.opened, 3);
        assert_eq!(stats.closed, 3);
        assert_eq!(stats.final_depth, 0);
        assert!(stats.is_balanced());
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn given_trailing_newline_when_build_then_no_empty_child() {
        let (tree, _) = build(SAMPLE);
        let root = tree.root_ref().unwrap();
        let types: Vec<_> = root.children().map(|c| c.node_type()).collect();
        assert_eq!(types, vec!["CURSOR", "TRACK"]);
    }

    #[test]
    fn given_crlf_line_endings_when_build_then_same_tree() {
        let crlf = SAMPLE.replace('\n', "\r\n");
        let (tree, stats) = build(&crlf);
        let root = tree.root_ref().unwrap();
        assert_eq!(root.first_child_of_type("CURSOR").unwrap().values(), ["42.0"]);
        assert_eq!(stats, build(SAMPLE).1);
    }

    #[test]
    fn given_extra_closes_when_build_then_ignored_at_root() {
        let (tree, stats) = build("<A\n  B 1\n>\n>\n>\n  C 2\n");
        let root = tree.root_ref().unwrap();
        assert_eq!(root.node_type(), "A");
        assert_eq!(stats.ignored_closes, 2);
        assert!(!stats.is_balanced());
        // Content after the root closed still lands in the root
        let types: Vec<_> = root.children().map(|c| c.node_type()).collect();
        assert_eq!(types, vec!["B", "C"]);
    }

    #[test]
    fn given_close_before_any_block_when_build_then_ignored() {
        let (tree, stats) = build(">\n<A\n  B\n>");
        let root = tree.root_ref().unwrap();
        assert_eq!(root.node_type(), "A");
        assert_eq!(stats.ignored_closes, 1);
        assert_eq!(stats.final_depth, 0);
        let types: Vec<_> = root.children().map(|c| c.node_type()).collect();
        assert_eq!(types, vec!["B"]);
    }

    #[test]
    fn given_missing_closes_when_build_then_innermost_block_is_returned() {
        let (tree, stats) = build("<A\n  <B\n    <C\n    D\n");
        let root = tree.root_ref().unwrap();
        assert_eq!(root.node_type(), "C");
        assert_eq!(root.parent().unwrap().node_type(), "B");
        assert_eq!(stats.final_depth, 3);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_content_before_first_block_when_build_then_discarded() {
        let (tree, stats) = build("stray line\n42\n<A\n  B\n>");
        assert_eq!(stats.discarded, 2);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root_ref().unwrap().node_type(), "A");
    }

    #[test]
    fn given_open_and_close_on_one_line_when_build_then_treated_as_open() {
        let (tree, stats) = build("<A\n  <B x>\n  C\n>\n>");
        let root = tree.root_ref().unwrap();
        let b = root.first_child_of_type("B").unwrap();
        assert_eq!(b.values(), ["x"]);
        // C was appended inside B, since B stayed open
        assert_eq!(b.first_child_of_type("C").map(|c| c.node_type()), Some("C"));
        assert!(stats.is_balanced());
    }

    #[test]
    fn given_blank_lines_when_build_then_option_controls_empty_nodes() {
        let text = "<A\n\n  B\n   \n>";
        let (kept, _) = build(text);
        assert_eq!(kept.root_ref().unwrap().children().count(), 3);

        let builder = TreeBuilder::new(ParseOptions {
            skip_blank_lines: true,
        });
        let (skipped, stats) = builder.build_str(text);
        assert_eq!(skipped.root_ref().unwrap().children().count(), 1);
        assert_eq!(stats.lines, 5);
    }

    #[test]
    fn given_numeric_block_header_when_build_then_untyped_container() {
        let (tree, _) = build("<A\n  <1 2\n    B\n  >\n>");
        let root = tree.root_ref().unwrap();
        let untyped = root.first_child_of_type("").unwrap();
        assert_eq!(untyped.values(), ["1", "2"]);
        assert_eq!(untyped.children().count(), 1);
    }

    #[test]
    fn given_no_input_when_build_then_empty_tree() {
        let (tree, stats) = build("");
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(stats, BuildStats::default());
    }
}
