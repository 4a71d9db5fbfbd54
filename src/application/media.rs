//! Media file references held by project items.
//!
//! Only locates files. Reading or decoding them is left to the caller.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::application::Document;
use crate::domain::NodeRef;
use crate::util::path::native_media_path;

pub const ITEM_TYPE: &str = "ITEM";
pub const TRACK_TYPE: &str = "TRACK";
pub const SOURCE_TYPE: &str = "SOURCE";
pub const FILE_TYPE: &str = "FILE";

/// A media file referenced by an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    /// Name of the enclosing track
    pub track: Option<String>,
    /// Name of the item
    pub item: Option<String>,
    /// File value as written in the project
    pub file: String,
    /// File path joined onto the project directory when relative
    pub resolved: PathBuf,
}

/// File value of an item's source.
///
/// Wrapping sources (e.g. `SECTION` around `WAVE`) are followed through
/// their first nested `SOURCE` until one carries a `FILE`.
pub fn source_file<'a>(item: &NodeRef<'a>) -> Option<&'a str> {
    if item.node_type() != ITEM_TYPE {
        return None;
    }
    let mut source = item.first_child_of_type(SOURCE_TYPE)?;
    loop {
        if let Some(file) = source.first_child_of_type(FILE_TYPE) {
            return Some(file.value()).filter(|f| !f.is_empty());
        }
        source = source.first_child_of_type(SOURCE_TYPE)?;
    }
}

/// Absolute `file` values are kept, relative ones are joined to `directory`.
pub fn resolve_media_path(directory: Option<&Path>, file: &str) -> PathBuf {
    let path = native_media_path(file);
    match directory {
        Some(dir) if !path.is_absolute() && !file.starts_with('/') => dir.join(path),
        _ => path,
    }
}

fn enclosing_track<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.node_type() == TRACK_TYPE {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

impl Document {
    /// Resolved media path of one item.
    pub fn media_path(&self, item: &NodeRef<'_>) -> Option<PathBuf> {
        source_file(item).map(|file| resolve_media_path(self.directory(), file))
    }

    /// Every item with a media source, in document order.
    pub fn media_references(&self) -> Vec<MediaReference> {
        self.all_children_of_type(ITEM_TYPE, true)
            .into_iter()
            .filter_map(|item| {
                let file = source_file(&item)?;
                let resolved = self.media_path(&item)?;
                trace!(file, resolved = %resolved.display(), "media reference");
                Some(MediaReference {
                    track: enclosing_track(&item)
                        .and_then(|t| t.name())
                        .map(str::to_string),
                    item: item.name().map(str::to_string),
                    file: file.to_string(),
                    resolved,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParseOptions;

    const PROJECT: &str = r#"<REAPER_PROJECT 0.1
  <TRACK
    NAME "Drums"
    <ITEM
      NAME "Kick"
      <SOURCE WAVE
        FILE "Audio/kick.wav"
      >
    >
    <ITEM
      NAME "Loop"
      <SOURCE SECTION
        LENGTH 2
        <SOURCE WAVE
          FILE "/samples/loop.wav"
        >
      >
    >
    <ITEM
      NAME "Empty"
      <SOURCE EMPTY
      >
    >
  >
>
"#;

    fn doc() -> Document {
        Document::with_provenance(PROJECT, Path::new("/home/me/song/song.rpp"), &ParseOptions::default())
            .unwrap()
    }

    #[test]
    fn given_items_when_media_references_then_resolved_in_document_order() {
        let refs = doc().media_references();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].track.as_deref(), Some("Drums"));
        assert_eq!(refs[0].item.as_deref(), Some("Kick"));
        assert_eq!(refs[0].file, "Audio/kick.wav");
        assert_eq!(refs[0].resolved, PathBuf::from("/home/me/song/Audio/kick.wav"));
        assert_eq!(refs[1].file, "/samples/loop.wav");
        assert_eq!(refs[1].resolved, PathBuf::from("/samples/loop.wav"));
    }

    #[test]
    fn given_non_item_or_empty_source_when_source_file_then_none() {
        let doc = doc();
        let track = doc.first_child_of_type("TRACK").unwrap();
        assert!(source_file(&track).is_none());
        let empty = doc.find_by_type_and_name("ITEM", "Empty").unwrap();
        assert!(source_file(&empty).is_none());
        assert!(doc.media_path(&empty).is_none());
    }

    #[test]
    fn given_no_directory_when_resolve_then_path_unchanged() {
        assert_eq!(resolve_media_path(None, "a/b.wav"), PathBuf::from("a/b.wav"));
        assert_eq!(
            resolve_media_path(Some(Path::new("/p")), "a/b.wav"),
            PathBuf::from("/p/a/b.wav")
        );
    }

    #[cfg(unix)]
    #[test]
    fn given_windows_separators_when_resolve_then_native_path() {
        assert_eq!(
            resolve_media_path(Some(Path::new("/p")), r"Audio\kick.wav"),
            PathBuf::from("/p/Audio/kick.wav")
        );
    }
}
