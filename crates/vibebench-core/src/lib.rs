//! Vibebench Core Library
//!
//! Merging, averaging, pricing and leaderboard rendering for multi-model
//! coding benchmark results.

pub mod average;
pub mod document;
pub mod error;
pub mod leaderboard;
pub mod logging;
pub mod merge;
pub mod pricing;
pub mod render;
pub mod stats;
