//! Per-panel summaries computed from the currently visible papers.
//!
//! Every panel reads the same filtered rows and nothing else; recomputing
//! one never touches another.

pub mod counts;
pub mod histogram;
pub mod wordcloud;

use crate::config::ExplorerConfig;
use crate::data::model::{Paper, PaperDataset};

use self::counts::{top_values, year_counts};
use self::histogram::Histogram;
use self::wordcloud::{WordCloud, WordCloudOptions};

/// One line of the data preview table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub title: String,
    pub journal: Option<String>,
    pub year: i32,
    pub source_x: Option<String>,
    pub abstract_word_count: Option<usize>,
}

impl From<&Paper> for PreviewRow {
    fn from(p: &Paper) -> Self {
        Self {
            title: p.title.clone(),
            journal: p.journal.clone(),
            year: p.year,
            source_x: p.source_x.clone(),
            abstract_word_count: p.abstract_word_count,
        }
    }
}

/// Data behind the five charts and the preview table.
#[derive(Debug, Clone, PartialEq)]
pub struct Panels {
    pub year_counts: Vec<(i32, usize)>,
    pub top_journals: Vec<(String, usize)>,
    pub word_cloud: WordCloud,
    pub top_sources: Vec<(String, usize)>,
    pub abstract_lengths: Histogram,
    pub preview: Vec<PreviewRow>,
}

impl Panels {
    /// Compute every panel over `dataset.papers[i]` for `i` in `visible`.
    pub fn compute(dataset: &PaperDataset, visible: &[usize], config: &ExplorerConfig) -> Self {
        let papers: Vec<&Paper> = visible.iter().filter_map(|&i| dataset.papers.get(i)).collect();

        let titles = papers
            .iter()
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let [width, height] = config.word_cloud_size;

        let lengths: Vec<f64> = papers
            .iter()
            .filter_map(|p| p.abstract_word_count)
            .map(|n| n as f64)
            .collect();

        Self {
            year_counts: year_counts(papers.iter().copied()),
            top_journals: top_values(papers.iter().map(|p| p.journal.as_deref()), config.top_n),
            word_cloud: WordCloud::generate(&titles, &WordCloudOptions::with_size(width, height)),
            top_sources: top_values(papers.iter().map(|p| p.source_x.as_deref()), config.top_n),
            abstract_lengths: Histogram::new(&lengths, config.histogram_bins),
            preview: papers
                .iter()
                .take(config.preview_rows)
                .map(|&p| PreviewRow::from(p))
                .collect(),
        }
    }

    /// Whether the selection contained no papers at all.
    pub fn is_empty(&self) -> bool {
        self.year_counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn paper(title: &str, year: i32, journal: Option<&str>, words: Option<usize>) -> Paper {
        Paper {
            title: title.to_string(),
            abstract_text: words.map(|n| "w ".repeat(n)),
            publish_time: NaiveDate::from_ymd_opt(year, 3, 1).unwrap(),
            authors: None,
            journal: journal.map(str::to_string),
            source_x: Some("PMC".to_string()),
            year,
            abstract_word_count: words,
        }
    }

    #[test]
    fn empty_selection_computes_every_panel() {
        let ds = PaperDataset::from_papers(vec![paper("Viral spike", 2020, None, Some(10))]);
        let panels = Panels::compute(&ds, &[], &ExplorerConfig::default());
        assert!(panels.is_empty());
        assert!(panels.top_journals.is_empty());
        assert!(panels.top_sources.is_empty());
        assert!(panels.word_cloud.is_empty());
        assert!(panels.abstract_lengths.is_empty());
        assert!(panels.preview.is_empty());
    }

    #[test]
    fn preview_is_capped_and_in_row_order() {
        let papers: Vec<Paper> = (0..30)
            .map(|i| paper(&format!("Title {i}"), 2020, Some("Lancet"), None))
            .collect();
        let ds = PaperDataset::from_papers(papers);
        let visible: Vec<usize> = (5..30).collect();
        let panels = Panels::compute(&ds, &visible, &ExplorerConfig::default());

        assert_eq!(panels.preview.len(), 20);
        assert_eq!(panels.preview[0].title, "Title 5");
        assert_eq!(panels.preview[19].title, "Title 24");
        assert_eq!(panels.top_journals, vec![("Lancet".to_string(), 25)]);
    }

    #[test]
    fn histogram_skips_absent_word_counts() {
        let ds = PaperDataset::from_papers(vec![
            paper("a study", 2020, None, Some(100)),
            paper("b study", 2020, None, None),
            paper("c study", 2021, None, Some(250)),
        ]);
        let panels = Panels::compute(&ds, &[0, 1, 2], &ExplorerConfig::default());
        assert_eq!(panels.abstract_lengths.total, 2);
        assert_eq!(panels.abstract_lengths.bins.len(), 30);
        assert_eq!(panels.year_counts, vec![(2020, 2), (2021, 1)]);
    }
}
