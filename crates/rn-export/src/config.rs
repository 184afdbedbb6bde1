//! Export configuration.

/// Formatting options for the written document.
///
/// The defaults reproduce the established output byte-for-byte; change them
/// only when every consumer of the files agrees.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportConfig {
    /// Spaces per nesting level.  Default: 1.
    pub indent_width: usize,

    /// Emit an `<?xml version="1.0" encoding="UTF-8"?>` line before the
    /// root element.  Default: `false`.
    pub xml_declaration: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            indent_width:    1,
            xml_declaration: false,
        }
    }
}
