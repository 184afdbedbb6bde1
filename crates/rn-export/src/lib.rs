//! `rn-export` — canonical XML export of a lane network.
//!
//! The pipeline is a pure, single-threaded transformation:
//!
//! ```text
//! LaneModel ──aggregate──▶ Sections ──build_document──▶ Document ──write_to──▶ bytes
//! ```
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`section`]  | `Section`, `Sections`, `aggregate`, `aggregate_model`     |
//! | [`document`] | `Document`, `Element`, `Node`, the pretty-printer         |
//! | [`build`]    | `build_document`, coordinate rounding                     |
//! | [`writer`]   | `export_network`, `write_network` (atomic file writes)    |
//! | [`config`]   | `ExportConfig`                                            |
//! | [`error`]    | `ExportError`, `ExportResult`                             |
//!
//! # Output contract
//!
//! - Sections appear in ascending `SectionId` order.
//! - Lane edges are sorted by `(type, index)`; center-lines by `index` only.
//! - Coordinates are rounded half away from zero to integers.
//! - Attributes are written in ascending key order.
//! - Exporting the same model twice yields byte-identical files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rn_export::export_network;
//!
//! export_network(&network, "downtown", Path::new("downtown.xml"))?;
//! ```

pub mod build;
pub mod config;
pub mod document;
pub mod error;
pub mod section;
pub mod writer;

#[cfg(test)]
mod tests;

pub use build::{build_document, round_coordinate, GENERATED_NOTICE};
pub use config::ExportConfig;
pub use document::{Document, Element, Node};
pub use error::{ExportError, ExportResult};
pub use section::{aggregate, aggregate_model, Section, Sections};
pub use writer::{export_network, export_network_with, write_network};
