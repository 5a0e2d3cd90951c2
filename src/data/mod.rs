//! Data layer: record types, loading, cleaning, sampling and filtering.
//!
//! Architecture:
//! ```text
//!  metadata.csv ──(missing)──► metadata_sample.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  read CSV → PaperTable (down-sampled on memory pressure)
//!   └──────────┘        ▲
//!        │              │ memoized per (path, sample size)
//!        │         ┌──────────┐
//!        │         │  cache    │
//!        ▼         └──────────┘
//!   ┌──────────┐
//!   │  clean    │  parse dates, derive year / word count, drop incomplete rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  year range → indices of visible papers
//!   └──────────┘
//! ```

pub mod cache;
pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
