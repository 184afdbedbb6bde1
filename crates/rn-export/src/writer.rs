//! Export entry points.
//!
//! [`export_network`] is the one-call path from a model to a file on disk.
//! The document is written to a temporary file next to the destination and
//! renamed over it only once every byte has been written, so a failed export
//! never leaves a truncated document behind and never clobbers the previous
//! one.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use rn_core::LaneModel;
use tempfile::{Builder, NamedTempFile};

use crate::{aggregate_model, build_document, ExportConfig, ExportError, ExportResult};

/// Export `model` to `path` with the default [`ExportConfig`].
pub fn export_network<M: LaneModel + ?Sized>(
    model: &M,
    network_name: &str,
    path: &Path,
) -> ExportResult<()> {
    export_network_with(model, network_name, path, &ExportConfig::default())
}

/// Export `model` to `path` using `config`.
///
/// # Errors
///
/// - [`ExportError::Io`] if the temporary file cannot be created or written
///   (e.g. the destination directory does not exist or is read-only).
/// - [`ExportError::Persist`] if the finished file cannot be renamed into
///   place.
/// - [`ExportError::Coordinate`] if a point cannot be rounded.
pub fn export_network_with<M: LaneModel + ?Sized>(
    model: &M,
    network_name: &str,
    path: &Path,
    config: &ExportConfig,
) -> ExportResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = create_temp(dir, path)?;
    tracing::debug!(tmp = %tmp.path().display(), "writing document to temporary file");

    let bytes = {
        let mut out = BufWriter::new(tmp.as_file_mut());
        let bytes = write_network(model, network_name, &mut out, config)?;
        out.flush()?;
        bytes
    };
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| ExportError::Persist {
        path:   path.to_path_buf(),
        source: e.error,
    })?;

    tracing::info!(path = %path.display(), network = network_name, bytes, "exported lane network");
    Ok(())
}

/// Aggregate, build and serialize `model` into `writer`.
///
/// Returns the number of bytes written.  The writer is not flushed.
pub fn write_network<M: LaneModel + ?Sized, W: Write>(
    model: &M,
    network_name: &str,
    writer: W,
    config: &ExportConfig,
) -> ExportResult<u64> {
    let sections = aggregate_model(model);
    tracing::debug!(
        sections = sections.len(),
        lane_edges = model.lane_edges().len(),
        center_lines = model.center_lines().len(),
        "aggregated lane network"
    );

    let document = build_document(&sections, network_name)?;

    let mut counter = CountingWriter { inner: writer, count: 0 };
    document.write_to(&mut counter, config)?;
    Ok(counter.count)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Temporary file in `dir` whose mode matches what `path` will end up with:
/// the mode of the file being replaced, or for a new file the mode
/// `File::create` would give it (0o666 less the umask).
fn create_temp(dir: &Path, path: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Passed to open(2), so the umask applies.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;

    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    Ok(tmp)
}

struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
