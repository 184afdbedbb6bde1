//! xsmall — smallest end-to-end run of the rn exporter.
//!
//! ```text
//! cargo run -p xsmall                      # built-in synthetic network
//! cargo run -p xsmall -- path/to/csv-dir   # lane_edges.csv + center_lines.csv
//! ```
//!
//! Writes `output/xsmall/road_network.xml`.  Set `RUST_LOG=debug` to see the
//! exporter's own logging.

mod network;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use rn_core::{load_network_dir, LaneModel};
use rn_export::{export_network_with, ExportConfig};

use network::build_network;

const NETWORK_NAME: &str = "xsmall";
const OUTPUT_DIR:   &str = "output/xsmall";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== xsmall — rn lane-network export ===");

    // 1. Network: from a CSV directory if one was given, else synthetic.
    let network = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(dir) => load_network_dir(&dir)
            .with_context(|| format!("loading lane network from {}", dir.display()))?,
        None => build_network(),
    };
    println!(
        "Lane network: {} lane edges, {} center-lines, {} sections",
        network.lane_edges().len(),
        network.center_lines().len(),
        network.section_ids().len(),
    );

    // 2. Export.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let path = Path::new(OUTPUT_DIR).join("road_network.xml");

    let config = ExportConfig::default();
    let t0 = Instant::now();
    export_network_with(&network, NETWORK_NAME, &path, &config)
        .with_context(|| format!("exporting to {}", path.display()))?;
    let elapsed = t0.elapsed();

    println!(
        "Wrote {} in {:.3} ms (indent {} space(s) per level)",
        path.display(),
        elapsed.as_secs_f64() * 1_000.0,
        config.indent_width,
    );

    Ok(())
}
