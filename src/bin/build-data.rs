//! Merge the JSON content sources into the browser data bundle.
//!
//! Usage: build-data [DATA_DIR] [OUTPUT]

use anyhow::Context;
use std::path::PathBuf;

use insurance_insight::content::bundle::{read_sources, write_script};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| "data".to_string()));
    let output = PathBuf::from(args.next().unwrap_or_else(|| "scripts/data.js".to_string()));

    let bundle = read_sources(&data_dir)
        .with_context(|| format!("failed to read content from {}", data_dir.display()))?;
    write_script(&bundle, &output)
        .with_context(|| format!("failed to write bundle to {}", output.display()))?;

    let count = |key: &str| {
        bundle
            .get(key)
            .and_then(|v| v.as_array())
            .map_or(0, |items| items.len())
    };
    println!("Data bundle written to {}", output.display());
    println!("{} Posts | {} Categories", count("posts"), count("categories"));
    Ok(())
}
