use std::f64::consts::PI;

/// Evaluation points of the density overlay.
const DENSITY_POINTS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram with a count-scaled density curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    /// `[x, y]` points of the Gaussian KDE, scaled to the bar heights.
    /// Empty when there are fewer than two distinct values.
    pub density: Vec<[f64; 2]>,
    pub total: usize,
}

impl Histogram {
    /// Bin `values` into `n_bins` equal-width bins spanning `[min, max]`.
    ///
    /// The last bin is closed on the right. A constant sample gets a unit
    /// range centred on the value.
    pub fn new(values: &[f64], n_bins: usize) -> Self {
        let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if values.is_empty() || n_bins == 0 {
            return Self::default();
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if hi - lo < f64::EPSILON {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / n_bins as f64;

        let mut bins: Vec<Bin> = (0..n_bins)
            .map(|i| Bin {
                start: lo + i as f64 * width,
                end: if i + 1 == n_bins { hi } else { lo + (i + 1) as f64 * width },
                count: 0,
            })
            .collect();
        for &v in &values {
            let idx = (((v - lo) / width) as usize).min(n_bins - 1);
            bins[idx].count += 1;
        }

        let density = kde_curve(&values, width);

        Self {
            bins,
            density,
            total: values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

// ---------------------------------------------------------------------------
// Kernel density estimate
// ---------------------------------------------------------------------------

/// Scott's rule bandwidth: `std * n^(-1/5)` with the sample (n-1) std.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = var.sqrt();
    if std <= 0.0 || !std.is_finite() {
        return None;
    }
    Some(std * (n as f64).powf(-0.2))
}

/// Gaussian KDE over `[min, max]` of the data, scaled by `n * bin_width` so it
/// overlays a count histogram.
pub fn kde_curve(values: &[f64], bin_width: f64) -> Vec<[f64; 2]> {
    let Some(bw) = scott_bandwidth(values) else {
        return Vec::new();
    };
    let n = values.len() as f64;
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (hi - lo) / (DENSITY_POINTS - 1) as f64;
    let norm = 1.0 / (n * bw * (2.0 * PI).sqrt());

    (0..DENSITY_POINTS)
        .map(|i| {
            let x = lo + i as f64 * step;
            let density: f64 = values
                .iter()
                .map(|&v| (-0.5 * ((x - v) / bw).powi(2)).exp())
                .sum::<f64>()
                * norm;
            [x, density * n * bin_width]
        })
        .collect()
}
