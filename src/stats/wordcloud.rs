use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use eframe::egui::Color32;

use crate::color::Ramp;

/// Common English words left out of the cloud.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do",
    "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few", "for",
    "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in",
    "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k", "me", "more", "most",
    "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shall", "shan't", "she", "should", "shouldn't", "since", "so", "some", "such", "than",
    "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "there's",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "via", "was", "wasn't", "we", "were", "weren't", "what", "when", "where", "which", "while",
    "who", "whom", "why", "with", "won't", "would", "wouldn't", "you", "your", "yours",
    "yourself", "yourselves",
];

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

// ---------------------------------------------------------------------------
// Word frequencies
// ---------------------------------------------------------------------------

/// Split text into candidate words.
///
/// A word starts with an alphanumeric character or `_` and continues through
/// alphanumerics, `_` and apostrophes. A trailing `'s` is removed; tokens
/// shorter than two characters, pure numbers and stopwords are dropped.
/// Case is preserved; stopwords match case-insensitively.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let in_word = c.is_alphanumeric() || c == '_' || (c == '\'' && start.is_some());
        match (start, in_word) {
            (None, true) => start = Some(i),
            (Some(s), false) => {
                words.push(&text[s..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push(&text[s..]);
    }

    words
        .into_iter()
        .map(|w| {
            let w = w.trim_end_matches('\'');
            if w.len() > 2 && (w.ends_with("'s") || w.ends_with("'S")) {
                &w[..w.len() - 2]
            } else {
                w
            }
        })
        .filter(|w| w.chars().count() >= 2)
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .filter(|w| !stopwords().contains(w.to_lowercase().as_str()))
        .collect()
}

/// Case-insensitive word counts, most frequent first.
///
/// Each word is shown in its most common spelling; ties go to the
/// lexicographically smaller one.
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut spellings: HashMap<String, HashMap<&str, usize>> = HashMap::new();
    for word in tokenize(text) {
        *spellings
            .entry(word.to_lowercase())
            .or_default()
            .entry(word)
            .or_default() += 1;
    }

    let mut freqs: Vec<(String, usize)> = spellings
        .into_values()
        .map(|forms| {
            let total = forms.values().sum();
            let display = forms
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(w, _)| w.to_string())
                .unwrap_or_default();
            (display, total)
        })
        .collect();
    freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    freqs
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudOptions {
    pub width: f32,
    pub height: f32,
    pub max_words: usize,
    pub max_font_size: f32,
    pub min_font_size: f32,
    /// 0 keeps sizes by rank only, 1 scales them linearly with frequency.
    pub relative_scaling: f32,
    pub background: Color32,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            max_words: 200,
            max_font_size: 120.0,
            min_font_size: 8.0,
            relative_scaling: 0.5,
            background: Color32::WHITE,
        }
    }
}

impl WordCloudOptions {
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            max_font_size: height * 0.3,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub font_size: f32,
    /// Centre of the word in canvas pixels (origin top-left).
    pub center: [f32; 2],
    /// Estimated extent of the rendered text.
    pub size: [f32; 2],
    pub color: Color32,
}

/// A fixed-size canvas of placed words.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloud {
    pub width: f32,
    pub height: f32,
    pub background: Color32,
    pub words: Vec<PlacedWord>,
}

/// Rough advance width of one glyph relative to the font size.
const GLYPH_ASPECT: f32 = 0.58;
const LINE_HEIGHT: f32 = 1.1;
const CELL: f32 = 4.0;
const SPIRAL_STEP: f32 = 0.1;
const SHRINK: f32 = 0.85;

impl WordCloud {
    /// Build a cloud from free text.
    pub fn generate(text: &str, options: &WordCloudOptions) -> Self {
        Self::from_frequencies(&word_frequencies(text), options)
    }

    /// Lay out words (most frequent first) on the canvas.
    ///
    /// Sizes follow the previous word's size scaled by relative frequency;
    /// a word that does not fit is shrunk until `min_font_size`, after which
    /// layout stops. Colours run along the viridis ramp in placement order.
    pub fn from_frequencies(freqs: &[(String, usize)], options: &WordCloudOptions) -> Self {
        let mut cloud = WordCloud {
            width: options.width,
            height: options.height,
            background: options.background,
            words: Vec::new(),
        };
        let freqs = &freqs[..freqs.len().min(options.max_words)];
        if freqs.is_empty() || options.width <= 0.0 || options.height <= 0.0 {
            return cloud;
        }

        let mut grid = Occupancy::new(options.width, options.height);
        let rs = options.relative_scaling.clamp(0.0, 1.0);
        let mut last_size = options.max_font_size;
        let mut last_freq = freqs[0].1 as f32;

        for (word, count) in freqs {
            let ratio = *count as f32 / last_freq.max(1.0);
            let mut font_size = (rs * ratio + (1.0 - rs)) * last_size;
            font_size = font_size.min(options.max_font_size);

            let placed = loop {
                if font_size < options.min_font_size {
                    break None;
                }
                let size = estimate_extent(word, font_size);
                if let Some(center) = grid.find_spot(size) {
                    break Some((center, size));
                }
                font_size *= SHRINK;
            };
            let Some((center, size)) = placed else {
                break;
            };

            grid.occupy(center, size);
            cloud.words.push(PlacedWord {
                text: word.clone(),
                count: *count,
                font_size,
                center,
                size,
                color: Color32::BLACK,
            });
            last_size = font_size;
            last_freq = *count as f32;
        }

        let n = cloud.words.len();
        for (i, w) in cloud.words.iter_mut().enumerate() {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
            w.color = Ramp::VIRIDIS.sample(t);
        }

        log::debug!("Word cloud placed {n} of {} words", freqs.len());
        cloud
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn estimate_extent(word: &str, font_size: f32) -> [f32; 2] {
    let chars = word.chars().count() as f32;
    [chars * font_size * GLYPH_ASPECT + 2.0, font_size * LINE_HEIGHT]
}

// ---------------------------------------------------------------------------
// Occupancy grid with a summed-area table for O(1) rectangle queries
// ---------------------------------------------------------------------------

struct Occupancy {
    cols: usize,
    rows: usize,
    width: f32,
    height: f32,
    filled: Vec<bool>,
    /// `(rows + 1) x (cols + 1)` prefix sums of `filled`.
    sums: Vec<u32>,
}

impl Occupancy {
    fn new(width: f32, height: f32) -> Self {
        let cols = (width / CELL).ceil().max(1.0) as usize;
        let rows = (height / CELL).ceil().max(1.0) as usize;
        Self {
            cols,
            rows,
            width,
            height,
            filled: vec![false; cols * rows],
            sums: vec![0; (cols + 1) * (rows + 1)],
        }
    }

    /// Cell span `[c0, c1) x [r0, r1)` of a rectangle, or `None` if it leaves the canvas.
    fn cells(&self, center: [f32; 2], size: [f32; 2]) -> Option<(usize, usize, usize, usize)> {
        let x0 = center[0] - size[0] / 2.0;
        let y0 = center[1] - size[1] / 2.0;
        let x1 = x0 + size[0];
        let y1 = y0 + size[1];
        if x0 < 0.0 || y0 < 0.0 || x1 > self.width || y1 > self.height {
            return None;
        }
        let c0 = (x0 / CELL).floor() as usize;
        let r0 = (y0 / CELL).floor() as usize;
        let c1 = ((x1 / CELL).ceil() as usize).min(self.cols);
        let r1 = ((y1 / CELL).ceil() as usize).min(self.rows);
        Some((c0, c1, r0, r1))
    }

    fn is_free(&self, (c0, c1, r0, r1): (usize, usize, usize, usize)) -> bool {
        let w = self.cols + 1;
        let s = |r: usize, c: usize| self.sums[r * w + c] as i64;
        s(r1, c1) - s(r0, c1) - s(r1, c0) + s(r0, c0) == 0
    }

    /// Walk an elliptical spiral out from the canvas centre.
    fn find_spot(&self, size: [f32; 2]) -> Option<[f32; 2]> {
        if size[0] > self.width || size[1] > self.height {
            return None;
        }
        let cx = self.width / 2.0;
        let cy = self.height / 2.0;
        let aspect = self.width / self.height;
        let max_radius = self.width.max(self.height);

        let mut t = 0.0f32;
        loop {
            let r = 2.0 * t;
            if r > max_radius {
                return None;
            }
            let center = [cx + r * t.cos() * aspect.max(1.0), cy + r * t.sin() / aspect.min(1.0)];
            if let Some(span) = self.cells(center, size) {
                if self.is_free(span) {
                    return Some(center);
                }
            }
            t += SPIRAL_STEP;
        }
    }

    fn occupy(&mut self, center: [f32; 2], size: [f32; 2]) {
        let Some((c0, c1, r0, r1)) = self.cells(center, size) else {
            return;
        };
        for r in r0..r1 {
            for c in c0..c1 {
                self.filled[r * self.cols + c] = true;
            }
        }
        self.rebuild_sums();
    }

    fn rebuild_sums(&mut self) {
        let w = self.cols + 1;
        for r in 0..self.rows {
            let mut row_sum = 0u32;
            for c in 0..self.cols {
                row_sum += self.filled[r * self.cols + c] as u32;
                self.sums[(r + 1) * w + (c + 1)] = self.sums[r * w + (c + 1)] + row_sum;
            }
        }
    }
}
