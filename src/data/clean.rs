use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::model::{Paper, PaperDataset, PaperTable, RawPaper};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// ---------------------------------------------------------------------------
// Field-level parsing
// ---------------------------------------------------------------------------

/// Parse a publish-time cell. Anything unrecognised yields `None`.
///
/// Accepts RFC 3339, `YYYY-MM-DD` (optionally with a time), `YYYY/MM/DD`,
/// `MM/DD/YYYY`, `YYYY-MM` (first of the month) and a bare `YYYY` (1 Jan).
pub fn parse_publish_time(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // Partial dates chrono will not parse on its own.
    let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('-') {
        Some((year, month)) if digits(year, 4) && (digits(month, 2) || digits(month, 1)) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        None if digits(s, 4) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        _ => None,
    }
}

/// Number of whitespace-separated tokens.
pub fn abstract_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ---------------------------------------------------------------------------
// Row / table cleaning
// ---------------------------------------------------------------------------

/// Clean a single row; `None` when title or a parseable publish time is missing.
pub fn clean_paper(raw: &RawPaper) -> Option<Paper> {
    let title = raw.title.clone()?;
    let publish_time = raw.publish_time.as_deref().and_then(parse_publish_time)?;

    Some(Paper {
        title,
        abstract_word_count: raw.abstract_text.as_deref().map(abstract_word_count),
        abstract_text: raw.abstract_text.clone(),
        year: publish_time.year(),
        publish_time,
        authors: raw.authors.clone(),
        journal: raw.journal.clone(),
        source_x: raw.source_x.clone(),
    })
}

/// Parse dates, derive `year` and `abstract_word_count`, and drop rows
/// lacking a title or publish time. Row order is preserved.
pub fn clean(table: &PaperTable) -> PaperDataset {
    let papers: Vec<Paper> = table.rows.iter().filter_map(clean_paper).collect();
    let dropped = table.len() - papers.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} rows missing a title or publish time");
    }
    PaperDataset::from_papers(papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: Option<&str>, abstract_text: Option<&str>, publish_time: Option<&str>) -> RawPaper {
        RawPaper {
            title: title.map(str::to_string),
            abstract_text: abstract_text.map(str::to_string),
            publish_time: publish_time.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn parses_common_publish_time_shapes() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert_eq!(parse_publish_time("2020-03-15"), d(2020, 3, 15));
        assert_eq!(parse_publish_time(" 2020-03-15 "), d(2020, 3, 15));
        assert_eq!(parse_publish_time("2020-03-15 08:30:00"), d(2020, 3, 15));
        assert_eq!(parse_publish_time("2020-03-15T08:30:00Z"), d(2020, 3, 15));
        assert_eq!(parse_publish_time("2020/03/15"), d(2020, 3, 15));
        assert_eq!(parse_publish_time("03/15/2020"), d(2020, 3, 15));
        assert_eq!(parse_publish_time("2020-03"), d(2020, 3, 1));
        assert_eq!(parse_publish_time("2019"), d(2019, 1, 1));
    }

    #[test]
    fn unparseable_publish_time_is_absent() {
        assert_eq!(parse_publish_time(""), None);
        assert_eq!(parse_publish_time("soon"), None);
        assert_eq!(parse_publish_time("2020-13-01"), None);
        assert_eq!(parse_publish_time("2020-13"), None);
        assert_eq!(parse_publish_time("20"), None);
    }

    #[test]
    fn word_count_of_present_abstract() {
        let p = clean_paper(&raw(Some("T"), Some("a b c"), Some("2020"))).unwrap();
        assert_eq!(p.abstract_word_count, Some(3));

        let p = clean_paper(&raw(Some("T"), Some("  spaced \t out\nwords "), Some("2020"))).unwrap();
        assert_eq!(p.abstract_word_count, Some(3));
    }

    #[test]
    fn absent_abstract_has_absent_word_count() {
        let p = clean_paper(&raw(Some("T"), None, Some("2020"))).unwrap();
        assert_eq!(p.abstract_word_count, None);
    }

    #[test]
    fn rows_missing_essentials_are_dropped() {
        let table = PaperTable::new(vec![
            raw(Some("kept"), None, Some("2021-05-01")),
            raw(None, None, Some("2021-05-01")),
            raw(Some("no date"), None, None),
            raw(Some("bad date"), None, Some("not a date")),
        ]);
        let ds = clean(&table);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.papers[0].title, "kept");
        assert_eq!(ds.papers[0].year, 2021);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let table = PaperTable::new(vec![
            raw(Some("one"), Some("x y"), Some("2020-02-03 10:00:00")),
            raw(Some("two"), None, Some("2019")),
            raw(None, Some("dropped"), Some("2020")),
            raw(Some("three"), Some(""), Some("2022-12")),
        ]);
        let once = clean(&table);
        let twice = clean(&once.to_table());
        assert_eq!(once, twice);
    }
}
