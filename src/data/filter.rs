use std::collections::BTreeSet;

use super::model::{extent, Dataset, Feature, Record, Species};
use crate::error::{ExplorerError, Result};

// ---------------------------------------------------------------------------
// Category selection
// ---------------------------------------------------------------------------

/// Which species pass the category step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    /// Every record passes.
    All,
    /// Only the listed species pass. An empty set passes nothing.
    Only(BTreeSet<Species>),
}

impl CategorySelection {
    /// Entry the multiselect control offers next to the species names.
    pub const ALL_CHOICE: &'static str = "All";

    /// Build a selection from the raw multiselect values.
    ///
    /// `"All"` anywhere in the list wins over explicit names; an empty
    /// list yields an empty `Only` selection.
    pub fn from_choices<S: AsRef<str>>(choices: &[S]) -> Result<Self> {
        if choices.iter().any(|c| c.as_ref() == Self::ALL_CHOICE) {
            return Ok(CategorySelection::All);
        }
        let species = choices
            .iter()
            .map(|c| c.as_ref().parse::<Species>())
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(CategorySelection::Only(species))
    }

    /// Selection that lets no record through.
    pub fn none() -> Self {
        CategorySelection::Only(BTreeSet::new())
    }

    pub fn contains(&self, species: Species) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Only(set) => set.contains(&species),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric range
// ---------------------------------------------------------------------------

/// Closed interval `[low, high]` on one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    low: f64,
    high: f64,
}

impl ValueRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(ExplorerError::InvalidRange { low, high });
        }
        Ok(ValueRange { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Current filter settings, owned by one session.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub categories: CategorySelection,
    pub feature: Feature,
    pub range: ValueRange,
}

impl FilterCriteria {
    /// Category step AND range step.
    pub fn matches(&self, record: &Record) -> bool {
        self.categories.contains(record.species) && self.range.contains(record.value(self.feature))
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Rows of a dataset that passed some criteria, kept in original order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// View containing every row.
    pub fn full(dataset: &'a Dataset) -> Self {
        FilteredView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Indices into [`Dataset::records`], ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the selected records in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Apply further criteria to this view.
    pub fn refine(&self, criteria: &FilterCriteria) -> FilteredView<'a> {
        let records = self.dataset.records();
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| criteria.matches(&records[i]))
            .collect();
        FilteredView {
            dataset: self.dataset,
            indices,
        }
    }

    /// `(min, max)` of a feature over the view; `None` when empty.
    pub fn feature_extent(&self, feature: Feature) -> Option<(f64, f64)> {
        extent(self.records().map(|r| r.value(feature)))
    }
}

impl PartialEq for FilteredView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.indices == other.indices
    }
}

/// Single stable pass over the dataset applying both steps.
pub fn filter<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView::full(dataset).refine(criteria)
}

/// Bounds for the range control, taken from the rows the category step
/// keeps. Rounded outward to one decimal so no data value falls outside.
pub fn slider_bounds(
    dataset: &Dataset,
    categories: &CategorySelection,
    feature: Feature,
) -> Option<ValueRange> {
    let (min, max) = extent(
        dataset
            .records()
            .iter()
            .filter(|r| categories.contains(r.species))
            .map(|r| r.value(feature)),
    )?;
    Some(ValueRange {
        low: snap_to_tenth(min, f64::floor).min(min),
        high: snap_to_tenth(max, f64::ceil).max(max),
    })
}

/// Values already on a one-decimal grid are kept as-is; anything else is
/// moved to the grid with `round`.
fn snap_to_tenth(value: f64, round: fn(f64) -> f64) -> f64 {
    let nearest = (value * 10.0).round() / 10.0;
    if (nearest - value).abs() < 1e-9 {
        value
    } else {
        round(value * 10.0) / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            Record::new([5.1, 3.5, 1.4, 0.2], 0).unwrap(),
            Record::new([7.0, 3.2, 4.7, 1.4], 1).unwrap(),
            Record::new([6.3, 3.3, 6.0, 2.5], 2).unwrap(),
            Record::new([4.9, 3.0, 1.4, 0.2], 0).unwrap(),
            Record::new([6.4, 3.2, 4.5, 1.5], 1).unwrap(),
        ])
    }

    fn criteria(categories: CategorySelection, feature: Feature, low: f64, high: f64) -> FilterCriteria {
        FilterCriteria {
            categories,
            feature,
            range: ValueRange::new(low, high).unwrap(),
        }
    }

    #[test]
    fn all_with_full_range_keeps_everything() {
        let ds = sample();
        let view = filter(&ds, &criteria(CategorySelection::All, Feature::SepalLength, 4.9, 7.0));
        assert_eq!(view.indices(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = sample();
        let view = filter(&ds, &criteria(CategorySelection::All, Feature::SepalLength, 4.9, 6.4));
        assert_eq!(view.indices(), &[0, 2, 3, 4]);
    }

    #[test]
    fn equal_bounds_keep_exact_matches_only() {
        let ds = sample();
        let view = filter(&ds, &criteria(CategorySelection::All, Feature::PetalLength, 1.4, 1.4));
        assert_eq!(view.indices(), &[0, 3]);

        let view = filter(&ds, &criteria(CategorySelection::All, Feature::PetalLength, 2.0, 2.0));
        assert!(view.is_empty());
    }

    #[test]
    fn category_and_range_compose() {
        let ds = sample();
        let only_versicolor = CategorySelection::from_choices(&["versicolor"]).unwrap();
        let view = filter(&ds, &criteria(only_versicolor, Feature::SepalWidth, 3.2, 3.5));
        assert_eq!(view.indices(), &[1, 4]);
        assert!(view.records().all(|r| r.species == Species::Versicolor));
    }

    #[test]
    fn empty_selection_yields_no_rows() {
        let ds = sample();
        let view = filter(&ds, &criteria(CategorySelection::none(), Feature::SepalLength, 0.0, 10.0));
        assert!(view.is_empty());
        assert_eq!(view.feature_extent(Feature::SepalLength), None);
    }

    #[test]
    fn all_choice_overrides_explicit_names() {
        let sel = CategorySelection::from_choices(&["setosa", "All"]).unwrap();
        assert_eq!(sel, CategorySelection::All);
        let empty: [&str; 0] = [];
        assert_eq!(CategorySelection::from_choices(&empty).unwrap(), CategorySelection::none());
    }

    #[test]
    fn unknown_species_choice_is_rejected() {
        assert!(matches!(
            CategorySelection::from_choices(&["daisy"]),
            Err(ExplorerError::UnknownSpecies(_))
        ));
    }

    #[test]
    fn inverted_or_nan_range_is_rejected() {
        assert!(ValueRange::new(2.0, 1.0).is_err());
        assert!(ValueRange::new(f64::NAN, 1.0).is_err());
        assert!(ValueRange::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn refine_is_idempotent() {
        let ds = sample();
        let c = criteria(CategorySelection::All, Feature::PetalWidth, 0.2, 1.5);
        let once = filter(&ds, &c);
        assert_eq!(once.refine(&c), once);
    }

    #[test]
    fn slider_bounds_follow_category_subset() {
        let ds = sample();
        let setosa = CategorySelection::from_choices(&["setosa"]).unwrap();
        let bounds = slider_bounds(&ds, &setosa, Feature::SepalLength).unwrap();
        assert_eq!((bounds.low(), bounds.high()), (4.9, 5.1));

        let all = slider_bounds(&ds, &CategorySelection::All, Feature::SepalLength).unwrap();
        assert_eq!((all.low(), all.high()), (4.9, 7.0));

        assert!(slider_bounds(&ds, &CategorySelection::none(), Feature::SepalLength).is_none());
    }

    #[test]
    fn slider_bounds_round_outward() {
        let ds = Dataset::from_records(vec![
            Record::new([4.25, 3.0, 1.0, 0.1], 0).unwrap(),
            Record::new([5.81, 3.0, 1.0, 0.1], 0).unwrap(),
        ]);
        let bounds = slider_bounds(&ds, &CategorySelection::All, Feature::SepalLength).unwrap();
        assert!(bounds.low() <= 4.25 && bounds.low() >= 4.2 - 1e-9);
        assert!(bounds.high() >= 5.81 && bounds.high() <= 5.9 + 1e-9);
    }
}
