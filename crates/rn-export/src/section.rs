//! Grouping of lane entities into sections.

use std::collections::BTreeMap;

use rn_core::{CenterLine, LaneEdge, LaneModel, SectionId};

/// All entities sharing one section id, in canonical order.
///
/// Borrows from the model; a `Section` never outlives the export call that
/// built it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub id:           SectionId,
    /// Sorted by `(kind, index)`.
    pub lane_edges:   Vec<&'a LaneEdge>,
    /// Sorted by `index`; `kind` does not participate.
    pub center_lines: Vec<&'a CenterLine>,
}

impl<'a> Section<'a> {
    fn new(id: SectionId) -> Self {
        Self { id, lane_edges: Vec::new(), center_lines: Vec::new() }
    }
}

/// Sections keyed by id.  `BTreeMap` iteration gives the ascending id order
/// the document is written in.
pub type Sections<'a> = BTreeMap<SectionId, Section<'a>>;

/// Group `edges` and `center_lines` by section and sort each group.
///
/// Every input item lands in exactly one section.  A section referenced by
/// only one of the two collections is still present, with the other list
/// empty.  Both sorts are stable, so entities with equal keys keep their
/// input order.
pub fn aggregate<'a>(edges: &'a [LaneEdge], center_lines: &'a [CenterLine]) -> Sections<'a> {
    let mut sections: Sections<'a> = BTreeMap::new();

    for edge in edges {
        sections
            .entry(edge.section_id)
            .or_insert_with(|| Section::new(edge.section_id))
            .lane_edges
            .push(edge);
    }
    for line in center_lines {
        sections
            .entry(line.section_id)
            .or_insert_with(|| Section::new(line.section_id))
            .center_lines
            .push(line);
    }

    for section in sections.values_mut() {
        section.lane_edges.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        section.center_lines.sort_by_key(|line| line.index);
    }

    sections
}

/// [`aggregate`] over both collections of a [`LaneModel`].
pub fn aggregate_model<M: LaneModel + ?Sized>(model: &M) -> Sections<'_> {
    aggregate(model.lane_edges(), model.center_lines())
}
