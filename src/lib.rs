//! Core of the Iris explorer: load the bundled table, filter it by species
//! and by a numeric range, summarize the result and describe a chart over it.
//!
//! Everything here is synchronous and pure apart from the one-time dataset
//! cache in [`data::loader::load`]. The egui binary in this package is one
//! consumer; nothing in the core depends on it.

pub mod chart;
pub mod color;
pub mod data;
pub mod error;

pub use chart::{build_chart, BinCount, ChartBuilder, ChartRequest, ChartSpec};
pub use data::filter::{filter, slider_bounds, CategorySelection, FilterCriteria, FilteredView, ValueRange};
pub use data::model::{Dataset, Feature, Record, Species};
pub use data::summary::{describe, summarize, FeatureStats, Summary};
pub use error::{ExplorerError, Result};
