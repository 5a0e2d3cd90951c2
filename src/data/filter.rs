use super::model::PaperDataset;

/// Slider bounds used when no row has a valid year.
pub const FALLBACK_BOUNDS: YearRange = YearRange { lo: 2019, hi: 2022 };

/// Initial selection, clamped into the slider bounds.
pub const DEFAULT_SELECTION: YearRange = YearRange { lo: 2020, hi: 2021 };

// ---------------------------------------------------------------------------
// YearRange – a closed interval of years
// ---------------------------------------------------------------------------

/// Closed year interval `[lo, hi]`; construction keeps `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub lo: i32,
    pub hi: i32,
}

impl YearRange {
    /// Build a range from two endpoints given in either order.
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.lo <= year && year <= self.hi
    }

    /// Clamp both endpoints into `bounds`.
    pub fn clamp_to(&self, bounds: YearRange) -> Self {
        Self::new(
            self.lo.clamp(bounds.lo, bounds.hi),
            self.hi.clamp(bounds.lo, bounds.hi),
        )
    }
}

// ---------------------------------------------------------------------------
// Slider bounds and filtering
// ---------------------------------------------------------------------------

/// The dataset's min/max year, or [`FALLBACK_BOUNDS`] when it has none.
pub fn slider_bounds(dataset: &PaperDataset) -> YearRange {
    dataset
        .year_bounds
        .map(|(lo, hi)| YearRange::new(lo, hi))
        .unwrap_or(FALLBACK_BOUNDS)
}

/// The selection shown before the user touches the control.
pub fn default_selection(bounds: YearRange) -> YearRange {
    DEFAULT_SELECTION.clamp_to(bounds)
}

/// Indices of papers whose year lies in `range` (inclusive), in row order.
pub fn filtered_indices(dataset: &PaperDataset, range: YearRange) -> Vec<usize> {
    dataset
        .papers
        .iter()
        .enumerate()
        .filter(|(_, p)| range.contains(p.year))
        .map(|(i, _)| i)
        .collect()
}
