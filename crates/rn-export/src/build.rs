//! Turn aggregated sections into the document tree.
//!
//! # Schema
//!
//! ```text
//! road-network name
//! ├── <!-- generated notice -->
//! └── section section-id                     (ascending id)
//!     ├── lane-edges
//!     │   └── lane-edge type index           (sorted by type, index)
//!     │       └── polyline
//!     │           └── point index x y
//!     └── center-lines
//!         └── center-line type index         (sorted by index)
//!             ├── lane-attributes <16 flags>
//!             └── polyline
//!                 └── point index x y
//! ```

use rn_core::{LaneAttributes, Point, SectionId};

use crate::{Document, Element, ExportError, ExportResult, Section, Sections};

/// Comment placed first under the root element.
pub const GENERATED_NOTICE: &str = "This file was generated by rn-export.  Do not edit.";

/// Build the document for `sections`, in ascending section-id order.
///
/// # Errors
///
/// [`ExportError::Coordinate`] if a point has a NaN, infinite, or
/// out-of-range coordinate.
pub fn build_document(sections: &Sections<'_>, network_name: &str) -> ExportResult<Document> {
    let mut root = Element::new("road-network").with_attr("name", network_name);
    root.push_comment(GENERATED_NOTICE);

    for section in sections.values() {
        root.push(section_element(section)?);
    }

    Ok(Document::new(root))
}

/// Round half away from zero, or `None` when `value` has no `i64` rounding.
///
/// `10.5 → 11`, `-10.5 → -11`, `10.4 → 10`.
pub fn round_coordinate(value: f64) -> Option<i64> {
    // 2^63: the first value past i64::MAX, exactly representable in f64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let rounded = value.round();
    if rounded.is_finite() && rounded >= -LIMIT && rounded < LIMIT {
        Some(rounded as i64)
    } else {
        None
    }
}

// ── Elements ──────────────────────────────────────────────────────────────────

fn section_element(section: &Section<'_>) -> ExportResult<Element> {
    let mut edges = Element::new("lane-edges");
    for edge in &section.lane_edges {
        let owner = Owner { section: section.id, entity: "lane-edge", kind: &edge.kind, index: edge.index };
        edges.push(
            Element::new("lane-edge")
                .with_attr("type", edge.kind.as_str())
                .with_attr("index", edge.index.to_string())
                .with_child(polyline_element(&edge.polyline, &owner)?),
        );
    }

    let mut lines = Element::new("center-lines");
    for line in &section.center_lines {
        let owner = Owner { section: section.id, entity: "center-line", kind: &line.kind, index: line.index };
        lines.push(
            Element::new("center-line")
                .with_attr("type", line.kind.as_str())
                .with_attr("index", line.index.to_string())
                .with_child(attributes_element(&line.attributes))
                .with_child(polyline_element(&line.polyline, &owner)?),
        );
    }

    Ok(Element::new("section")
        .with_attr("section-id", section.id.0.to_string())
        .with_child(edges)
        .with_child(lines))
}

fn attributes_element(attrs: &LaneAttributes) -> Element {
    attrs
        .flags()
        .into_iter()
        .fold(Element::new("lane-attributes"), |e, (key, value)| {
            e.with_attr(key, if value { "true" } else { "false" })
        })
}

/// Identity of the entity a polyline belongs to, for error reporting.
struct Owner<'a> {
    section: SectionId,
    entity:  &'static str,
    kind:    &'a str,
    index:   i32,
}

fn polyline_element(points: &[Point], owner: &Owner<'_>) -> ExportResult<Element> {
    let mut polyline = Element::new("polyline");
    for (position, &point) in points.iter().enumerate() {
        let (Some(x), Some(y)) = (round_coordinate(point.x), round_coordinate(point.y)) else {
            return Err(ExportError::Coordinate {
                section:  owner.section,
                entity:   owner.entity,
                kind:     owner.kind.to_owned(),
                index:    owner.index,
                position,
                point,
            });
        };
        polyline.push(
            Element::new("point")
                .with_attr("x", x.to_string())
                .with_attr("y", y.to_string())
                .with_attr("index", position.to_string()),
        );
    }
    Ok(polyline)
}
