use std::sync::Arc;

use anyhow::Context;

use cord_explorer::config::ExplorerConfig;
use cord_explorer::data::cache::LoadCache;
use cord_explorer::data::clean::clean;
use cord_explorer::data::filter::{
    default_selection, filtered_indices, slider_bounds, YearRange, FALLBACK_BOUNDS,
};
use cord_explorer::data::loader::{LoadOutcome, LoadWarning};
use cord_explorer::data::model::PaperDataset;
use cord_explorer::stats::Panels;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Paths and panel parameters of the current source.
    pub config: ExplorerConfig,

    /// Loads already performed this session.
    cache: LoadCache,

    /// Raw load result (None until a load succeeds).
    pub outcome: Option<Arc<LoadOutcome>>,

    /// Cleaned dataset with derived columns.
    pub dataset: Option<PaperDataset>,

    /// Slider limits.
    pub bounds: YearRange,

    /// Currently selected year range.
    pub selection: YearRange,

    /// Range shown by the sliders while a handle is being dragged.
    pub draft: Option<YearRange>,

    /// Indices of papers inside `selection` (cached).
    pub visible_indices: Vec<usize>,

    /// Panel data for `visible_indices` (cached).
    pub panels: Option<Panels>,

    /// Error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            config,
            cache: LoadCache::new(),
            outcome: None,
            dataset: None,
            bounds: FALLBACK_BOUNDS,
            selection: default_selection(FALLBACK_BOUNDS),
            draft: None,
            visible_indices: Vec::new(),
            panels: None,
            status_message: None,
        }
    }

    /// Load (or fetch from the cache) the table described by `config`.
    ///
    /// On failure the error is kept in `status_message` and any previously
    /// loaded dataset stays on screen.
    pub fn load(&mut self, config: ExplorerConfig) {
        let result = self
            .cache
            .get_or_load(&config, None)
            .with_context(|| format!("loading {}", config.primary_path.display()));
        match result {
            Ok(outcome) => {
                self.config = config;
                self.set_outcome(outcome);
            }
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a load result: clean it, reset the year control, recompute panels.
    pub fn set_outcome(&mut self, outcome: Arc<LoadOutcome>) {
        let dataset = clean(&outcome.table);
        log::info!(
            "{} of {} rows kept after cleaning ({})",
            dataset.len(),
            outcome.table.len(),
            outcome.source.display()
        );

        self.bounds = slider_bounds(&dataset);
        self.selection = default_selection(self.bounds);
        self.draft = None;
        self.dataset = Some(dataset);
        self.outcome = Some(outcome);
        self.status_message = None;
        self.refilter();
    }

    /// Change the year selection; recomputes only when it actually changed.
    pub fn set_year_range(&mut self, range: YearRange) {
        self.draft = None;
        let range = range.clamp_to(self.bounds);
        if range != self.selection {
            self.selection = range;
            self.refilter();
        }
    }

    /// Track a slider drag without recomputing anything.
    pub fn drag_year_range(&mut self, range: YearRange) {
        self.draft = Some(range.clamp_to(self.bounds));
    }

    /// Apply the range left by a finished drag.
    pub fn commit_draft(&mut self) {
        if let Some(range) = self.draft.take() {
            self.set_year_range(range);
        }
    }

    /// The range the sliders should display.
    pub fn shown_range(&self) -> YearRange {
        self.draft.unwrap_or(self.selection)
    }

    /// Recompute `visible_indices` and every panel after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, self.selection);
            self.panels = Some(Panels::compute(ds, &self.visible_indices, &self.config));
            log::debug!(
                "Year range {}..={}: {} of {} papers visible",
                self.selection.lo,
                self.selection.hi,
                self.visible_indices.len(),
                ds.len()
            );
        }
    }

    /// Warnings raised while loading the current table.
    pub fn warnings(&self) -> &[LoadWarning] {
        self.outcome
            .as_ref()
            .map(|o| o.warnings.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut body = String::from("title,abstract,publish_time,authors,journal,source_x\n");
        for row in rows {
            body.push_str(row);
            body.push('\n');
        }
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn load_sets_bounds_selection_and_panels() {
        let dir = tempfile::tempdir().unwrap();
        let primary = write_csv(
            dir.path(),
            "metadata.csv",
            &[
                "A,one two,2019-05-01,,J1,PMC",
                "B,,2020-05-01,,J1,PMC",
                "C,x,2021-05-01,,J2,WHO",
                "D,x,2022-05-01,,J2,WHO",
                "E,x,,,J3,WHO",
            ],
        );
        let config = ExplorerConfig {
            primary_path: primary,
            ..Default::default()
        };

        let mut state = AppState::new(config.clone());
        state.load(config);

        assert!(state.status_message.is_none());
        assert!(state.warnings().is_empty());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 4);
        assert_eq!(state.bounds, YearRange::new(2019, 2022));
        assert_eq!(state.selection, YearRange::new(2020, 2021));
        assert_eq!(state.visible_indices, vec![1, 2]);

        state.set_year_range(YearRange::new(2019, 2030));
        assert_eq!(state.selection, YearRange::new(2019, 2022));
        let panels = state.panels.as_ref().unwrap();
        assert_eq!(panels.preview.len(), 4);
    }

    #[test]
    fn failed_load_sets_status_message() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExplorerConfig {
            primary_path: dir.path().join("metadata.csv"),
            sample_path: dir.path().join("metadata_sample.csv"),
            ..Default::default()
        };
        let mut state = AppState::new(config.clone());
        state.load(config);

        assert!(state.dataset.is_none());
        assert!(state.panels.is_none());
        let message = state.status_message.as_deref().unwrap();
        assert!(message.starts_with("Error: loading "), "{message}");
        assert!(message.contains("metadata_sample.csv"), "{message}");
    }

    #[test]
    fn failed_reopen_keeps_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let primary = write_csv(dir.path(), "metadata.csv", &["A,x,2020-01-01,,J,PMC"]);
        let broken = dir.path().join("broken.csv");
        std::fs::write(&broken, "title,abstract\nx,y\n").unwrap();
        let config = ExplorerConfig {
            primary_path: primary,
            ..Default::default()
        };
        let mut state = AppState::new(config.clone());
        state.load(config.clone());
        assert!(state.panels.is_some());

        state.load(config.with_primary(broken.clone()));

        let message = state.status_message.as_deref().unwrap();
        assert!(message.contains("broken.csv"), "{message}");
        assert!(message.contains("publish_time"), "{message}");
        assert_eq!(state.dataset.as_ref().unwrap().len(), 1);
        assert!(state.panels.is_some());
        assert_ne!(state.config.primary_path, broken);
    }

    #[test]
    fn dragging_defers_recompute_until_release() {
        let dir = tempfile::tempdir().unwrap();
        let primary = write_csv(
            dir.path(),
            "metadata.csv",
            &["A,x,2019-01-01,,J,PMC", "B,x,2020-01-01,,J,PMC", "C,x,2022-01-01,,J,PMC"],
        );
        let config = ExplorerConfig {
            primary_path: primary,
            ..Default::default()
        };
        let mut state = AppState::new(config.clone());
        state.load(config);
        assert_eq!(state.visible_indices, vec![1]);
        let before = state.panels.clone();

        state.drag_year_range(YearRange::new(2019, 2022));
        state.drag_year_range(YearRange::new(2019, 2030));
        assert_eq!(state.shown_range(), YearRange::new(2019, 2022));
        assert_eq!(state.selection, YearRange::new(2020, 2021));
        assert_eq!(state.visible_indices, vec![1]);
        assert_eq!(state.panels, before);

        state.commit_draft();
        assert!(state.draft.is_none());
        assert_eq!(state.selection, YearRange::new(2019, 2022));
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.panels.as_ref().unwrap().preview.len(), 3);
    }

    #[test]
    fn empty_range_still_produces_panels() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_csv(dir.path(), "metadata_sample.csv", &["A,,2019,,J,PMC", "B,,2022,,J,PMC"]);
        let config = ExplorerConfig {
            primary_path: dir.path().join("metadata.csv"),
            sample_path: sample,
            ..Default::default()
        };
        let mut state = AppState::new(config.clone());
        state.load(config);

        assert_eq!(state.warnings().len(), 1);
        state.set_year_range(YearRange::new(2020, 2021));
        assert!(state.visible_indices.is_empty());
        assert!(state.panels.as_ref().unwrap().is_empty());
    }
}
