use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const PRIMARY_CSV: &str = "metadata.csv";
pub const SAMPLE_CSV: &str = "metadata_sample.csv";

/// Seed shared by the loader's down-sampling and the sampler binary.
pub const SAMPLE_SEED: u64 = 42;
/// Row count of the fallback sample.
pub const SAMPLE_ROWS: usize = 500;

pub const PREVIEW_ROWS: usize = 20;
pub const TOP_N: usize = 10;
pub const HISTOGRAM_BINS: usize = 30;
pub const WORD_CLOUD_WIDTH: f32 = 800.0;
pub const WORD_CLOUD_HEIGHT: f32 = 400.0;

const ENV_PRIMARY: &str = "CORD_EXPLORER_PRIMARY";
const ENV_SAMPLE: &str = "CORD_EXPLORER_SAMPLE";
const ENV_MEMORY_BUDGET_MB: &str = "CORD_EXPLORER_MEMORY_BUDGET_MB";

// ---------------------------------------------------------------------------
// ExplorerConfig
// ---------------------------------------------------------------------------

/// Everything the loader and the panels need to know about their inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Full dataset, read first.
    pub primary_path: PathBuf,
    /// Substitute used when `primary_path` does not exist.
    pub sample_path: PathBuf,
    pub seed: u64,
    /// Rows kept when a full load runs out of memory.
    pub fallback_rows: usize,
    /// Upper bound on field text held in memory during a full load.
    /// Exceeding it is handled exactly like an allocation failure.
    pub memory_budget: Option<usize>,
    pub preview_rows: usize,
    pub top_n: usize,
    pub histogram_bins: usize,
    pub word_cloud_size: [f32; 2],
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            primary_path: PathBuf::from(PRIMARY_CSV),
            sample_path: PathBuf::from(SAMPLE_CSV),
            seed: SAMPLE_SEED,
            fallback_rows: SAMPLE_ROWS,
            memory_budget: None,
            preview_rows: PREVIEW_ROWS,
            top_n: TOP_N,
            histogram_bins: HISTOGRAM_BINS,
            word_cloud_size: [WORD_CLOUD_WIDTH, WORD_CLOUD_HEIGHT],
        }
    }
}

impl ExplorerConfig {
    /// Defaults, overridden by `CORD_EXPLORER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_PRIMARY).filter(|v| !v.trim().is_empty()) {
            config.primary_path = PathBuf::from(path.trim());
        }
        if let Some(path) = lookup(ENV_SAMPLE).filter(|v| !v.trim().is_empty()) {
            config.sample_path = PathBuf::from(path.trim());
        }
        if let Some(raw) = lookup(ENV_MEMORY_BUDGET_MB) {
            match raw.trim().parse::<usize>() {
                Ok(mb) => config.memory_budget = Some(mb.saturating_mul(1024 * 1024)),
                Err(_) => log::warn!("Ignoring {ENV_MEMORY_BUDGET_MB}={raw:?}: not a whole number"),
            }
        }

        config
    }

    /// Same configuration reading a different primary file.
    pub fn with_primary(&self, path: PathBuf) -> Self {
        Self {
            primary_path: path,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_fixed_paths() {
        let config = ExplorerConfig::from_lookup(|_| None);
        assert_eq!(config, ExplorerConfig::default());
        assert_eq!(config.primary_path, PathBuf::from("metadata.csv"));
        assert_eq!(config.sample_path, PathBuf::from("metadata_sample.csv"));
        assert_eq!(config.seed, 42);
        assert_eq!(config.fallback_rows, 500);
    }

    #[test]
    fn env_overrides_paths_and_budget() {
        let config = ExplorerConfig::from_lookup(lookup_from(&[
            ("CORD_EXPLORER_PRIMARY", "/data/full.csv"),
            ("CORD_EXPLORER_SAMPLE", "/data/small.csv"),
            ("CORD_EXPLORER_MEMORY_BUDGET_MB", "2"),
        ]));
        assert_eq!(config.primary_path, PathBuf::from("/data/full.csv"));
        assert_eq!(config.sample_path, PathBuf::from("/data/small.csv"));
        assert_eq!(config.memory_budget, Some(2 * 1024 * 1024));
    }

    #[test]
    fn invalid_budget_is_ignored() {
        let config =
            ExplorerConfig::from_lookup(lookup_from(&[("CORD_EXPLORER_MEMORY_BUDGET_MB", "lots")]));
        assert_eq!(config.memory_budget, None);
    }
}
