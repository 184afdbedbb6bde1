//! Error types for rn-export.

use std::path::PathBuf;

use rn_core::{Point, SectionId};
use thiserror::Error;

/// Errors that can occur while exporting a lane network.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not move finished document into place at {}: {source}", .path.display())]
    Persist {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("point {position} {point} of {entity} type={kind:?} index={index} in {section} cannot be rounded to an integer")]
    Coordinate {
        section:  SectionId,
        entity:   &'static str,
        kind:     String,
        index:    i32,
        position: usize,
        point:    Point,
    },
}

/// Alias for `Result<T, ExportError>`.
pub type ExportResult<T> = Result<T, ExportError>;
