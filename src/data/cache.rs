use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use super::loader::{load_data, LoadError, LoadOutcome};
use crate::config::ExplorerConfig;

/// Memo key: which file was asked for and how many rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub primary: PathBuf,
    pub sample_size: Option<usize>,
}

// ---------------------------------------------------------------------------
// LoadCache – explicit memoization of load_data
// ---------------------------------------------------------------------------

/// Memoizes [`load_data`] for the lifetime of the owning process.
///
/// Entries are never evicted; dropping the cache (process exit) is the only
/// invalidation. Failed loads are not stored, so the next request retries.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<CacheKey, Arc<LoadOutcome>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outcome for this request, loading it on first use.
    pub fn get_or_load(
        &mut self,
        config: &ExplorerConfig,
        sample_size: Option<usize>,
    ) -> Result<Arc<LoadOutcome>, LoadError> {
        let key = CacheKey {
            primary: config.primary_path.clone(),
            sample_size,
        };
        if let Some(hit) = self.entries.get(&key) {
            log::debug!("Load cache hit for {:?}", key);
            return Ok(Arc::clone(hit));
        }

        let outcome = Arc::new(load_data(config, sample_size)?);
        self.entries.insert(key, Arc::clone(&outcome));
        Ok(outcome)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "title,abstract,publish_time,authors,journal,source_x\nA,,2020,,,\nB,,2021,,,\n";

    #[test]
    fn second_request_does_not_reread_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        std::fs::write(&path, BODY).unwrap();
        let config = ExplorerConfig {
            primary_path: path.clone(),
            ..Default::default()
        };

        let mut cache = LoadCache::new();
        let first = cache.get_or_load(&config, None).unwrap();

        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&config, None).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn sample_size_is_part_of_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        std::fs::write(&path, BODY).unwrap();
        let config = ExplorerConfig {
            primary_path: path,
            ..Default::default()
        };

        let mut cache = LoadCache::new();
        let full = cache.get_or_load(&config, None).unwrap();
        let one = cache.get_or_load(&config, Some(1)).unwrap();
        assert_eq!(full.table.len(), 2);
        assert_eq!(one.table.len(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExplorerConfig {
            primary_path: dir.path().join("metadata.csv"),
            sample_path: dir.path().join("metadata_sample.csv"),
            ..Default::default()
        };

        let mut cache = LoadCache::new();
        assert!(cache.get_or_load(&config, None).is_err());
        assert!(cache.is_empty());

        std::fs::write(&config.sample_path, BODY).unwrap();
        let outcome = cache.get_or_load(&config, None).unwrap();
        assert_eq!(outcome.table.len(), 2);
        assert_eq!(outcome.warnings.len(), 1);
    }
}
