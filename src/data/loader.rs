use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{PaperTable, RawPaper, REQUIRED_COLUMNS};
use super::sample::{sample_indices, sample_table};
use crate::config::ExplorerConfig;

// ---------------------------------------------------------------------------
// Errors and warnings
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("ran out of memory reading {} after {rows} rows", .path.display())]
    OutOfMemory { path: PathBuf, rows: usize },

    #[error("cannot sample {requested} rows from a table of {available}")]
    SampleTooLarge { requested: usize, available: usize },
}

/// A recovered problem the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The primary file did not exist and the sample file was read instead.
    PrimaryMissing { primary: PathBuf, substitute: PathBuf },
    /// The full load ran out of memory and a seeded sample was kept.
    MemoryFallback { rows: usize },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::PrimaryMissing {
                primary,
                substitute,
            } => write!(
                f,
                "{} not found. Using {} instead.",
                primary.display(),
                substitute.display()
            ),
            LoadWarning::MemoryFallback { rows } => write!(
                f,
                "MemoryError: falling back to a smaller sample ({rows} rows)."
            ),
        }
    }
}

/// A loaded table together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: PaperTable,
    /// The file that was actually read.
    pub source: PathBuf,
    pub warnings: Vec<LoadWarning>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the metadata table.
///
/// * A missing primary file is replaced by the sample file (with a warning).
/// * `sample_size` returns a seeded uniform sample instead of the full table;
///   asking for more rows than the file holds is an error.
/// * Running out of memory (or over `memory_budget`) falls back to a seeded
///   sample of `fallback_rows` rows (with a warning).
///
/// Any other failure is returned as-is.
pub fn load_data(config: &ExplorerConfig, sample_size: Option<usize>) -> Result<LoadOutcome, LoadError> {
    let mut warnings = Vec::new();

    let mut path = config.primary_path.clone();
    if !path.exists() {
        let warning = LoadWarning::PrimaryMissing {
            primary: config.primary_path.clone(),
            substitute: config.sample_path.clone(),
        };
        log::warn!("{warning}");
        warnings.push(warning);
        path = config.sample_path.clone();
    }

    let loaded = read_csv(&path, config.memory_budget).and_then(|table| match sample_size {
        Some(n) => sample_table(&table, n, config.seed),
        None => Ok(table),
    });

    let table = match loaded {
        Ok(table) => table,
        Err(LoadError::OutOfMemory { rows, .. }) => {
            log::warn!(
                "Out of memory after {rows} rows of {}; loading a {}-row sample",
                path.display(),
                config.fallback_rows
            );
            let warning = LoadWarning::MemoryFallback {
                rows: config.fallback_rows,
            };
            warnings.push(warning);
            read_csv_sampled(&path, config.fallback_rows, config.seed)?
        }
        Err(e) => return Err(e),
    };

    log::info!("Loaded {} rows from {}", table.len(), path.display());

    Ok(LoadOutcome {
        table,
        source: path,
        warnings,
    })
}

// ---------------------------------------------------------------------------
// CSV readers
// ---------------------------------------------------------------------------

/// Read every row of `path`.
///
/// Row storage grows through fallible reservation, so allocation failure
/// surfaces as [`LoadError::OutOfMemory`] instead of aborting. The same
/// error is returned once the rows' field text exceeds `memory_budget`.
pub fn read_csv(path: &Path, memory_budget: Option<usize>) -> Result<PaperTable, LoadError> {
    let mut reader = open_reader(path)?;

    let mut rows: Vec<RawPaper> = Vec::new();
    let mut text_bytes = 0usize;

    for result in reader.deserialize::<RawPaper>() {
        let row = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        text_bytes = text_bytes.saturating_add(row.text_bytes());
        let over_budget = memory_budget.is_some_and(|budget| text_bytes > budget);
        if over_budget || rows.try_reserve(1).is_err() {
            return Err(LoadError::OutOfMemory {
                path: path.to_path_buf(),
                rows: rows.len(),
            });
        }
        rows.push(row);
    }

    Ok(PaperTable::new(rows))
}

/// Read only a seeded sample of `n` rows without holding the full table.
///
/// The file is streamed twice: once to count rows, once to keep the drawn
/// ones. The result equals `sample_table(&read_csv(path)?, n, seed)`.
pub fn read_csv_sampled(path: &Path, n: usize, seed: u64) -> Result<PaperTable, LoadError> {
    let mut counter = open_reader(path)?;
    let mut total = 0usize;
    let mut record = csv::StringRecord::new();
    loop {
        let more = counter.read_record(&mut record).map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if !more {
            break;
        }
        total += 1;
    }

    let drawn = sample_indices(total, n, seed)?;
    let slot_of: HashMap<usize, usize> = drawn
        .iter()
        .enumerate()
        .map(|(slot, &row)| (row, slot))
        .collect();

    let mut slots: Vec<Option<RawPaper>> = vec![None; drawn.len()];
    let mut reader = open_reader(path)?;
    for (row_no, result) in reader.deserialize::<RawPaper>().enumerate() {
        let Some(&slot) = slot_of.get(&row_no) else {
            continue;
        };
        let row = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        slots[slot] = Some(row);
    }

    Ok(PaperTable::new(slots.into_iter().flatten().collect()))
}

/// Open a CSV reader and check the header carries every required column.
fn open_reader(path: &Path) -> Result<csv::Reader<File>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers().map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|col| !headers.iter().any(|h| h == *col))
    {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column,
        });
    }

    Ok(reader)
}
