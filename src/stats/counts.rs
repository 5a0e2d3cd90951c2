use std::collections::{BTreeMap, HashMap};

use crate::data::model::Paper;

/// Papers per year, ascending by year.
pub fn year_counts<'a>(papers: impl IntoIterator<Item = &'a Paper>) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for p in papers {
        *counts.entry(p.year).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// The `n` most frequent present values, highest count first.
///
/// Absent values are not counted. Equal counts are ordered by value so the
/// ranking is stable across recomputations.
pub fn top_values<'a>(values: impl IntoIterator<Item = Option<&'a str>>, n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values.into_iter().flatten() {
        *counts.entry(v).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(n)
        .map(|(v, c)| (v.to_string(), c))
        .collect()
}
