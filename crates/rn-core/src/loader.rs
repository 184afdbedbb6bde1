//! CSV lane-network loader.
//!
//! # CSV format
//!
//! Two files, one row per entity.  The `polyline` cell holds the points
//! separated by `;`, each point as two whitespace-separated numbers.
//!
//! `lane_edges.csv`:
//!
//! ```csv
//! section_id,type,index,polyline
//! 1,solid,0,0 0;10 0
//! 1,dashed,0,0 3.5;10 3.5
//! ```
//!
//! `center_lines.csv` adds one column per lane flag, named with the document
//! keys of [`LaneAttributes::KEYS`]:
//!
//! ```csv
//! section_id,type,index,polyline,can-go-straight,can-turn-left,…
//! 1,lane,0,0 1.75;10 1.75,true,false,…
//! ```
//!
//! Flag cells accept `true`/`false`, `1`/`0` and `yes`/`no` in any case.  A
//! flag column absent from the header leaves that flag `false`.
//!
//! An empty `section_id` is not an error: the row is loaded with
//! [`SectionId::INVALID`] and exported in that section.  Any other value must
//! be a decimal `u32` below `u32::MAX`; anything else is a
//! [`ModelError::Parse`], so two distinct ids never share a section.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use crate::{
    CenterLine, LaneAttributes, LaneEdge, LaneNetwork, ModelError, ModelResult, Point, Polyline,
    SectionId,
};

// ── CSV record ────────────────────────────────────────────────────────────────

/// Columns shared by both files.  Extra columns (the flags) are ignored here.
#[derive(Deserialize)]
struct EntityRecord {
    section_id: String,
    #[serde(rename = "type")]
    kind:       String,
    index:      i32,
    polyline:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a network from `lane_edges.csv` and `center_lines.csv` in `dir`.
///
/// A missing file is an empty collection, so a directory holding only
/// center-lines is a valid network.
pub fn load_network_dir(dir: &Path) -> ModelResult<LaneNetwork> {
    let edges_path = dir.join("lane_edges.csv");
    let lines_path = dir.join("center_lines.csv");

    let lane_edges = if edges_path.exists() {
        load_lane_edges_csv(&edges_path)?
    } else {
        tracing::debug!(path = %edges_path.display(), "no lane-edge file, using none");
        Vec::new()
    };
    let center_lines = if lines_path.exists() {
        load_center_lines_csv(&lines_path)?
    } else {
        tracing::debug!(path = %lines_path.display(), "no center-line file, using none");
        Vec::new()
    };

    tracing::info!(
        dir = %dir.display(),
        lane_edges = lane_edges.len(),
        center_lines = center_lines.len(),
        "loaded lane network"
    );
    Ok(LaneNetwork::new(lane_edges, center_lines))
}

pub fn load_lane_edges_csv(path: &Path) -> ModelResult<Vec<LaneEdge>> {
    let file = std::fs::File::open(path)?;
    load_lane_edges_reader(file)
}

/// Like [`load_lane_edges_csv`] but accepts any `Read` source.
pub fn load_lane_edges_reader<R: Read>(reader: R) -> ModelResult<Vec<LaneEdge>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut edges = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let row = parse_entity(&record, &headers)?;
        edges.push(LaneEdge {
            section_id: row.section_id,
            kind:       row.kind,
            index:      row.index,
            polyline:   row.polyline,
        });
    }
    Ok(edges)
}

pub fn load_center_lines_csv(path: &Path) -> ModelResult<Vec<CenterLine>> {
    let file = std::fs::File::open(path)?;
    load_center_lines_reader(file)
}

/// Like [`load_center_lines_csv`] but accepts any `Read` source.
pub fn load_center_lines_reader<R: Read>(reader: R) -> ModelResult<Vec<CenterLine>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    // Column position of each flag, resolved once from the header.
    let flag_columns: Vec<(&'static str, usize)> = LaneAttributes::KEYS
        .iter()
        .filter_map(|&key| headers.iter().position(|h| h == key).map(|col| (key, col)))
        .collect();
    if flag_columns.len() < LaneAttributes::KEYS.len() {
        tracing::debug!(
            present = flag_columns.len(),
            "center-line header lacks some flag columns; missing flags default to false"
        );
    }

    let mut lines = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let row = parse_entity(&record, &headers)?;

        let mut attributes = LaneAttributes::default();
        for &(key, col) in &flag_columns {
            let cell = record.get(col).unwrap_or("");
            if let Some(flag) = attributes.flag_mut(key) {
                *flag = parse_flag(cell).ok_or_else(|| {
                    ModelError::Parse(format!(
                        "line {}: invalid {key} value {cell:?}: expected true/false, 1/0 or yes/no",
                        line_of(&record),
                    ))
                })?;
            }
        }

        lines.push(CenterLine {
            section_id: row.section_id,
            kind:       row.kind,
            index:      row.index,
            polyline:   row.polyline,
            attributes,
        });
    }
    Ok(lines)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct ParsedEntity {
    section_id: SectionId,
    kind:       String,
    index:      i32,
    polyline:   Polyline,
}

fn parse_entity(record: &StringRecord, headers: &StringRecord) -> ModelResult<ParsedEntity> {
    let line = line_of(record);
    let row: EntityRecord = record
        .deserialize(Some(headers))
        .map_err(|e| ModelError::Parse(format!("line {line}: {e}")))?;

    let section_id = parse_section_id(&row.section_id)
        .map_err(|msg| ModelError::Parse(format!("line {line}: {msg}")))?;
    if !section_id.is_valid() {
        tracing::warn!(line, kind = %row.kind, index = row.index, "missing section id, using INVALID section");
    }

    let polyline = parse_polyline(&row.polyline)
        .map_err(|msg| ModelError::Parse(format!("line {line}: {msg}")))?;

    Ok(ParsedEntity {
        section_id,
        kind: row.kind,
        index: row.index,
        polyline,
    })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

pub(crate) fn parse_section_id(s: &str) -> Result<SectionId, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(SectionId::INVALID);
    }
    match s.parse::<u32>() {
        Ok(id) if id != SectionId::INVALID.0 => Ok(SectionId(id)),
        Ok(_) => Err(format!("section id {s} is reserved for rows without a section")),
        Err(_) => Err(format!("invalid section id {s:?}: expected a non-negative integer")),
    }
}

pub(crate) fn parse_polyline(s: &str) -> Result<Polyline, String> {
    s.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let mut coords = p.split_whitespace().map(str::parse::<f64>);
            match (coords.next(), coords.next(), coords.next()) {
                (Some(Ok(x)), Some(Ok(y)), None) => Ok(Point::new(x, y)),
                _ => Err(format!("invalid point {p:?}: expected two numbers \"x y\"")),
            }
        })
        .collect()
}

pub(crate) fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
