//! Write a reproducible 500-row sample of `metadata.csv` to
//! `metadata_sample.csv`, for machines where the full dataset is unavailable.

use anyhow::{Context, Result};

use cord_explorer::config::ExplorerConfig;
use cord_explorer::data::loader::read_csv;
use cord_explorer::data::sample::{sample_table, write_csv};

fn main() -> Result<()> {
    env_logger::init();

    let config = ExplorerConfig::from_env();
    let input = &config.primary_path;
    let output = &config.sample_path;

    let full = read_csv(input, None)
        .with_context(|| format!("reading full dataset {}", input.display()))?;
    log::info!("Read {} rows from {}", full.len(), input.display());

    let sample = sample_table(&full, config.fallback_rows, config.seed)
        .with_context(|| format!("sampling {}", input.display()))?;

    write_csv(output, &sample).with_context(|| format!("writing sample {}", output.display()))?;

    println!("Sample CSV created: {}", output.display());
    Ok(())
}
