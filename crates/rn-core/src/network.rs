//! The model adapter: the [`LaneModel`] seam and its in-memory implementation.
//!
//! The exporter never looks at how a network was produced.  Anything that can
//! hand out the two flat collections (lane edges and center-lines) can be
//! exported; neither collection needs to be ordered or grouped.

use crate::{CenterLine, LaneEdge, SectionId};

// ── LaneModel ─────────────────────────────────────────────────────────────────

/// Read-only view of a lane network as two unordered collections.
pub trait LaneModel {
    fn lane_edges(&self) -> &[LaneEdge];
    fn center_lines(&self) -> &[CenterLine];
}

// ── LaneNetwork ───────────────────────────────────────────────────────────────

/// A lane network held entirely in memory.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneNetwork {
    pub lane_edges:   Vec<LaneEdge>,
    pub center_lines: Vec<CenterLine>,
}

impl LaneNetwork {
    pub fn new(lane_edges: Vec<LaneEdge>, center_lines: Vec<CenterLine>) -> Self {
        Self { lane_edges, center_lines }
    }

    /// A network with no edges and no center-lines.  Exports as a document
    /// with no sections.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lane_edges.is_empty() && self.center_lines.is_empty()
    }

    /// Every section id referenced by either collection, sorted and
    /// de-duplicated.
    pub fn section_ids(&self) -> Vec<SectionId> {
        let mut ids: Vec<SectionId> = self
            .lane_edges
            .iter()
            .map(|e| e.section_id)
            .chain(self.center_lines.iter().map(|c| c.section_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

impl LaneModel for LaneNetwork {
    fn lane_edges(&self) -> &[LaneEdge] {
        &self.lane_edges
    }

    fn center_lines(&self) -> &[CenterLine] {
        &self.center_lines
    }
}

// ── LaneNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`LaneNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rn_core::{LaneEdge, LaneNetworkBuilder, Point, SectionId};
///
/// let mut b = LaneNetworkBuilder::new();
/// b.add_lane_edge(LaneEdge::new(
///     SectionId(1),
///     "solid",
///     0,
///     [Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
/// ));
/// let net = b.build();
/// assert_eq!(net.lane_edges.len(), 1);
/// assert!(net.center_lines.is_empty());
/// ```
pub struct LaneNetworkBuilder {
    lane_edges:   Vec<LaneEdge>,
    center_lines: Vec<CenterLine>,
}

impl LaneNetworkBuilder {
    pub fn new() -> Self {
        Self { lane_edges: Vec::new(), center_lines: Vec::new() }
    }

    /// Pre-allocate for the expected number of edges and center-lines.
    pub fn with_capacity(edges: usize, center_lines: usize) -> Self {
        Self {
            lane_edges:   Vec::with_capacity(edges),
            center_lines: Vec::with_capacity(center_lines),
        }
    }

    pub fn add_lane_edge(&mut self, edge: LaneEdge) -> &mut Self {
        self.lane_edges.push(edge);
        self
    }

    pub fn add_center_line(&mut self, line: CenterLine) -> &mut Self {
        self.center_lines.push(line);
        self
    }

    pub fn edge_count(&self) -> usize { self.lane_edges.len() }
    pub fn center_line_count(&self) -> usize { self.center_lines.len() }

    /// Consume the builder.  Input order is preserved; grouping and sorting
    /// happen at export time.
    pub fn build(self) -> LaneNetwork {
        LaneNetwork {
            lane_edges:   self.lane_edges,
            center_lines: self.center_lines,
        }
    }
}

impl Default for LaneNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
