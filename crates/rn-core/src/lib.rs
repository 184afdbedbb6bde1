//! `rn-core` — the lane-network model consumed by the rn exporter.
//!
//! This crate has no `rn-*` dependencies.  It owns the plain data types, the
//! [`LaneModel`] seam the exporter reads through, and a CSV loader for
//! networks that are not assembled in Rust.
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `SectionId`                                             |
//! | [`geo`]       | `Point`                                                 |
//! | [`lane`]      | `LaneEdge`, `CenterLine`, `LaneAttributes`              |
//! | [`network`]   | `LaneModel` trait, `LaneNetwork`, `LaneNetworkBuilder`  |
//! | [`loader`]    | `load_network_dir`, per-file CSV loaders                |
//! | [`error`]     | `ModelError`, `ModelResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public model types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod lane;
pub mod loader;
pub mod network;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ModelError, ModelResult};
pub use geo::{Point, Polyline};
pub use ids::SectionId;
pub use lane::{CenterLine, LaneAttributes, LaneEdge};
pub use loader::{
    load_center_lines_csv, load_center_lines_reader, load_lane_edges_csv,
    load_lane_edges_reader, load_network_dir,
};
pub use network::{LaneModel, LaneNetwork, LaneNetworkBuilder};
