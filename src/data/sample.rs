use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::loader::LoadError;
use super::model::{PaperTable, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Seeded sampling
// ---------------------------------------------------------------------------

/// Draw `n` distinct row indices out of `total`, uniformly, in draw order.
///
/// The same `(total, n, seed)` always yields the same indices. Asking for
/// more rows than exist is an error.
pub fn sample_indices(total: usize, n: usize, seed: u64) -> Result<Vec<usize>, LoadError> {
    if n > total {
        return Err(LoadError::SampleTooLarge {
            requested: n,
            available: total,
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(rand::seq::index::sample(&mut rng, total, n).into_vec())
}

/// Seeded uniform sample of `n` rows.
pub fn sample_table(table: &PaperTable, n: usize, seed: u64) -> Result<PaperTable, LoadError> {
    let rows = sample_indices(table.len(), n, seed)?
        .into_iter()
        .map(|i| table.rows[i].clone())
        .collect();
    Ok(PaperTable::new(rows))
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Write rows as CSV with the required column header (written even when
/// there are no rows). Absent values become empty cells.
pub fn write_csv(path: &Path, table: &PaperTable) -> Result<(), LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(REQUIRED_COLUMNS).map_err(csv_err)?;
    for row in &table.rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawPaper;

    fn table(n: usize) -> PaperTable {
        PaperTable::new(
            (0..n)
                .map(|i| RawPaper {
                    title: Some(format!("t{i}")),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn same_seed_same_draw() {
        assert_eq!(
            sample_indices(10_000, 500, 42).unwrap(),
            sample_indices(10_000, 500, 42).unwrap()
        );
        assert_ne!(
            sample_indices(10_000, 500, 42).unwrap(),
            sample_indices(10_000, 500, 7).unwrap()
        );
    }

    #[test]
    fn draw_is_distinct_and_in_range() {
        let mut idx = sample_indices(1_000, 500, 42).unwrap();
        assert_eq!(idx.len(), 500);
        assert!(idx.iter().all(|&i| i < 1_000));
        idx.sort_unstable();
        idx.dedup();
        assert_eq!(idx.len(), 500);
    }

    #[test]
    fn oversized_request_is_an_error() {
        let err = sample_table(&table(7), 500, 42).unwrap_err();
        assert!(matches!(
            err,
            LoadError::SampleTooLarge {
                requested: 500,
                available: 7
            }
        ));
        assert_eq!(
            err.to_string(),
            "cannot sample 500 rows from a table of 7"
        );
    }

    #[test]
    fn whole_table_sample_is_a_permutation() {
        let sampled = sample_table(&table(7), 7, 42).unwrap();
        let mut titles: Vec<_> = sampled.rows.iter().filter_map(|r| r.title.clone()).collect();
        titles.sort();
        let mut expected: Vec<_> = (0..7).map(|i| format!("t{i}")).collect();
        expected.sort();
        assert_eq!(titles, expected);
    }

    #[test]
    fn empty_table_samples_to_empty_only_for_zero_rows() {
        assert!(sample_table(&PaperTable::default(), 0, 42).unwrap().is_empty());
        assert!(sample_table(&PaperTable::default(), 500, 42).is_err());
    }
}
