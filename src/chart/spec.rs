use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::Rgb;
use crate::data::model::{Feature, Species};
use crate::error::{ExplorerError, Result};

// ---------------------------------------------------------------------------
// Request side
// ---------------------------------------------------------------------------

/// Histogram bin count, guaranteed to lie in `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BinCount(usize);

impl BinCount {
    pub const MIN: usize = 5;
    pub const MAX: usize = 50;
    pub const DEFAULT: usize = 20;

    pub fn new(count: usize) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&count) {
            return Err(ExplorerError::InvalidBinCount {
                count,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(BinCount(count))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BinCount {
    fn default() -> Self {
        BinCount(Self::DEFAULT)
    }
}

impl TryFrom<usize> for BinCount {
    type Error = ExplorerError;

    fn try_from(count: usize) -> Result<Self> {
        BinCount::new(count)
    }
}

/// Chart kind plus its axis or bin selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRequest {
    /// `x` and `y` may be the same feature.
    Scatter { x: Feature, y: Feature },
    Histogram { feature: Feature, bins: BinCount },
}

// ---------------------------------------------------------------------------
// Output side
// ---------------------------------------------------------------------------

/// Declarative chart description, independent of any renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Scatter(ScatterSpec),
    Histogram(HistogramSpec),
}

impl ChartSpec {
    /// Points for a scatter, non-empty stacked bar segments for a histogram.
    pub fn mark_count(&self) -> usize {
        match self {
            ChartSpec::Scatter(s) => s.marks.len(),
            ChartSpec::Histogram(h) => h.bins.iter().map(|b| b.counts.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mark_count() == 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendEntry {
    pub species: Species,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub x: Feature,
    pub y: Feature,
    pub marks: Vec<ScatterMark>,
    pub legend: Vec<LegendEntry>,
}

/// One point per record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterMark {
    pub x: f64,
    pub y: f64,
    pub species: Species,
    pub color: Rgb,
    pub tooltip: Tooltip,
}

/// Hover payload: every feature value and the species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub values: Vec<(Feature, f64)>,
    pub species: Species,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub feature: Feature,
    pub bin_count: BinCount,
    pub bin_width: f64,
    /// Empty when the view is empty, otherwise exactly `bin_count` bins.
    pub bins: Vec<HistogramBin>,
    pub legend: Vec<LegendEntry>,
}

/// `[start, end)`; the last bin also holds values equal to its `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    /// Per-species counts for stacking. Species with no records are absent.
    pub counts: BTreeMap<Species, usize>,
}

impl HistogramBin {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn count(&self, species: Species) -> usize {
        self.counts.get(&species).copied().unwrap_or(0)
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_count_accepts_only_five_to_fifty() {
        assert!(BinCount::new(4).is_err());
        assert!(BinCount::new(51).is_err());
        assert_eq!(BinCount::new(5).unwrap().get(), 5);
        assert_eq!(BinCount::new(50).unwrap().get(), 50);
        assert_eq!(BinCount::default().get(), 20);
        assert!(matches!(
            BinCount::try_from(0),
            Err(ExplorerError::InvalidBinCount { count: 0, min: 5, max: 50 })
        ));
    }

    #[test]
    fn bin_helpers() {
        let bin = HistogramBin {
            start: 1.0,
            end: 2.0,
            counts: BTreeMap::from([(Species::Setosa, 3), (Species::Virginica, 2)]),
        };
        assert_eq!(bin.total(), 5);
        assert_eq!(bin.count(Species::Versicolor), 0);
        assert_eq!(bin.center(), 1.5);
    }
}
