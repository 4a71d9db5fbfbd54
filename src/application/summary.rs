//! Project overview built from well-known node types.

use crate::application::media::{source_file, ITEM_TYPE, TRACK_TYPE};
use crate::application::Document;
use crate::domain::NodeRef;

/// Project tempo and time signature (`TEMPO bpm num denom`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    pub bpm: f64,
    pub numerator: Option<u32>,
    pub denominator: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
    pub name: Option<String>,
    pub position: Option<f64>,
    pub length: Option<f64>,
    pub looped: bool,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackSummary {
    pub name: Option<String>,
    pub items: Vec<ItemSummary>,
}

/// Top-level facts about a project. Numbers that fail to parse are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub cursor: Option<f64>,
    pub tempo: Option<Tempo>,
    pub tracks: Vec<TrackSummary>,
}

fn number<T: std::str::FromStr>(node: Option<NodeRef<'_>>, position: usize) -> Option<T> {
    node?.values().get(position)?.parse().ok()
}

impl ItemSummary {
    fn from_node(item: &NodeRef<'_>) -> Self {
        Self {
            name: item.name().map(str::to_string),
            position: number(item.first_child_of_type("POSITION"), 0),
            length: number(item.first_child_of_type("LENGTH"), 0),
            looped: item
                .first_child_of_type("LOOP")
                .is_some_and(|l| l.value() == "1"),
            source: source_file(item).map(str::to_string),
        }
    }
}

impl ProjectSummary {
    pub fn from_document(doc: &Document) -> Self {
        let tempo_node = doc.first_child_of_type("TEMPO");
        let tempo = number::<f64>(tempo_node, 0).map(|bpm| Tempo {
            bpm,
            numerator: number(tempo_node, 1),
            denominator: number(tempo_node, 2),
        });

        let tracks = doc
            .all_children_of_type(TRACK_TYPE, false)
            .iter()
            .map(|track| TrackSummary {
                name: track.name().map(str::to_string),
                items: track
                    .all_children_of_type(ITEM_TYPE, false)
                    .iter()
                    .map(ItemSummary::from_node)
                    .collect(),
            })
            .collect();

        Self {
            cursor: number(doc.first_child_of_type("CURSOR"), 0),
            tempo,
            tracks,
        }
    }

    pub fn item_count(&self) -> usize {
        self.tracks.iter().map(|t| t.items.len()).sum()
    }
}
