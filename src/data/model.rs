use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

// ---------------------------------------------------------------------------
// Feature – one of the four numeric measurement columns
// ---------------------------------------------------------------------------

/// A numeric measurement column, in dataset column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "sepal length (cm)")]
    SepalLength,
    #[serde(rename = "sepal width (cm)")]
    SepalWidth,
    #[serde(rename = "petal length (cm)")]
    PetalLength,
    #[serde(rename = "petal width (cm)")]
    PetalWidth,
}

impl Feature {
    /// All features in column order (used to populate option lists).
    pub const ALL: [Feature; 4] = [
        Feature::SepalLength,
        Feature::SepalWidth,
        Feature::PetalLength,
        Feature::PetalWidth,
    ];

    /// Display name, matching the dataset's published column names.
    pub fn name(self) -> &'static str {
        match self {
            Feature::SepalLength => "sepal length (cm)",
            Feature::SepalWidth => "sepal width (cm)",
            Feature::PetalLength => "petal length (cm)",
            Feature::PetalWidth => "petal width (cm)",
        }
    }

    /// Position of the feature inside [`Record::features`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ExplorerError::UnknownFeature(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Species – the categorical label
// ---------------------------------------------------------------------------

/// Category name derived from the integer target label.
/// Ordering follows the label, so sets iterate setosa → virginica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    /// Fixed label → name lookup.
    pub fn from_label(label: u8) -> Option<Species> {
        Species::ALL.get(label as usize).copied()
    }

    pub fn label(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|sp| sp.name() == s)
            .ok_or_else(|| ExplorerError::UnknownSpecies(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// Column names of the full schema: four features, `target`, `species`.
pub const COLUMN_NAMES: [&str; 6] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
    "target",
    "species",
];

/// A single flower measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Feature values, indexed by [`Feature::index`].
    pub features: [f64; 4],
    /// Integer target label.
    pub label: u8,
    /// Always `Species::from_label(label)`.
    pub species: Species,
}

impl Record {
    /// Build a record, deriving the species from the label.
    /// Returns `None` for a label outside the fixed table.
    pub fn new(features: [f64; 4], label: u8) -> Option<Self> {
        let species = Species::from_label(label)?;
        Some(Record {
            features,
            label,
            species,
        })
    }

    pub fn value(&self, feature: Feature) -> f64 {
        self.features[feature.index()]
    }
}

// ---------------------------------------------------------------------------
// Dataset – the immutable loaded table
// ---------------------------------------------------------------------------

/// The full table. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// All rows in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(min, max)` of a feature over every row; `None` when empty.
    pub fn feature_extent(&self, feature: Feature) -> Option<(f64, f64)> {
        extent(self.records.iter().map(|r| r.value(feature)))
    }
}

/// Min and max of a sequence of finite values.
pub(crate) fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
