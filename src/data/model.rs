use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source columns read from (and written to) the metadata CSV, in file order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "title",
    "abstract",
    "publish_time",
    "authors",
    "journal",
    "source_x",
];

/// Date format used when a cleaned record is written back out as text.
pub const PUBLISH_TIME_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// RawPaper – one CSV row restricted to the required columns
// ---------------------------------------------------------------------------

/// A metadata row exactly as read from disk. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPaper {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub publish_time: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub source_x: Option<String>,
}

impl RawPaper {
    /// Bytes of field text held by this row.
    pub fn text_bytes(&self) -> usize {
        [
            &self.title,
            &self.abstract_text,
            &self.publish_time,
            &self.authors,
            &self.journal,
            &self.source_x,
        ]
        .iter()
        .map(|field| field.as_ref().map_or(0, String::len))
        .sum()
    }
}

// ---------------------------------------------------------------------------
// PaperTable – the loaded, uncleaned table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperTable {
    pub rows: Vec<RawPaper>,
}

impl PaperTable {
    pub fn new(rows: Vec<RawPaper>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Paper – a cleaned record with derived columns
// ---------------------------------------------------------------------------

/// A record that survived cleaning: title and publish time are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    pub title: String,
    pub abstract_text: Option<String>,
    pub publish_time: NaiveDate,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub source_x: Option<String>,
    /// Calendar year of `publish_time`.
    pub year: i32,
    /// Whitespace-separated token count of the abstract, if there is one.
    pub abstract_word_count: Option<usize>,
}

impl Paper {
    /// Render back into the source column layout.
    pub fn to_raw(&self) -> RawPaper {
        RawPaper {
            title: Some(self.title.clone()),
            abstract_text: self.abstract_text.clone(),
            publish_time: Some(self.publish_time.format(PUBLISH_TIME_FORMAT).to_string()),
            authors: self.authors.clone(),
            journal: self.journal.clone(),
            source_x: self.source_x.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// PaperDataset – the cleaned table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperDataset {
    pub papers: Vec<Paper>,
    /// Smallest and largest `year` present, `None` when there are no rows.
    pub year_bounds: Option<(i32, i32)>,
}

impl PaperDataset {
    pub fn from_papers(papers: Vec<Paper>) -> Self {
        let year_bounds = papers.iter().fold(None, |acc, p| match acc {
            None => Some((p.year, p.year)),
            Some((lo, hi)) => Some((lo.min(p.year), hi.max(p.year))),
        });
        Self {
            papers,
            year_bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// The dataset as raw rows, e.g. for writing it back to CSV.
    pub fn to_table(&self) -> PaperTable {
        PaperTable::new(self.papers.iter().map(Paper::to_raw).collect())
    }
}
