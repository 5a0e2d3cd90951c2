//! Data, statistics and colour layers shared by the explorer UI and the
//! `generate_sample` binary.

pub mod color;
pub mod config;
pub mod data;
pub mod stats;
