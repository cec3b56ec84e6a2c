use std::collections::BTreeSet;

use serde::Serialize;

use super::filter::FilteredView;
use super::model::{Feature, COLUMN_NAMES};

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// The three metrics shown above the data preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub row_count: usize,
    /// Schema width; does not depend on filtering.
    pub column_count: usize,
    /// Distinct species present in the view, 0..=3.
    pub species_count: usize,
}

pub fn summarize(view: &FilteredView<'_>) -> Summary {
    let species: BTreeSet<_> = view.records().map(|r| r.species).collect();
    Summary {
        row_count: view.len(),
        column_count: COLUMN_NAMES.len(),
        species_count: species.len(),
    }
}

// ---------------------------------------------------------------------------
// Per-feature descriptive statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureStats {
    pub feature: Feature,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1); needs at least two rows.
    pub std_dev: Option<f64>,
}

/// Count, min, max, mean and standard deviation of every feature.
pub fn describe(view: &FilteredView<'_>) -> Vec<FeatureStats> {
    Feature::ALL
        .into_iter()
        .map(|feature| feature_stats(view, feature))
        .collect()
}

fn feature_stats(view: &FilteredView<'_>, feature: Feature) -> FeatureStats {
    let values: Vec<f64> = view.records().map(|r| r.value(feature)).collect();
    let count = values.len();
    let extent = view.feature_extent(feature);

    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std_dev = mean.filter(|_| count > 1).map(|m| {
        let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    FeatureStats {
        feature,
        count,
        min: extent.map(|(lo, _)| lo),
        max: extent.map(|(_, hi)| hi),
        mean,
        std_dev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, CategorySelection, FilterCriteria, ValueRange};
    use crate::data::model::{Dataset, Record};

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            Record::new([5.0, 3.0, 1.0, 0.2], 0).unwrap(),
            Record::new([7.0, 3.0, 5.0, 1.4], 1).unwrap(),
            Record::new([6.0, 3.0, 6.0, 2.0], 1).unwrap(),
        ])
    }

    #[test]
    fn summary_of_full_view() {
        let ds = sample();
        let summary = summarize(&FilteredView::full(&ds));
        assert_eq!(
            summary,
            Summary {
                row_count: 3,
                column_count: 6,
                species_count: 2
            }
        );
    }

    #[test]
    fn summary_of_empty_view() {
        let ds = sample();
        let criteria = FilterCriteria {
            categories: CategorySelection::none(),
            feature: Feature::SepalLength,
            range: ValueRange::new(0.0, 10.0).unwrap(),
        };
        let summary = summarize(&filter(&ds, &criteria));
        assert_eq!(summary.row_count, 0);
        assert_eq!(summary.column_count, 6);
        assert_eq!(summary.species_count, 0);
    }

    #[test]
    fn describe_computes_sample_statistics() {
        let ds = sample();
        let stats = describe(&FilteredView::full(&ds));
        assert_eq!(stats.len(), 4);

        let sepal = &stats[0];
        assert_eq!(sepal.feature, Feature::SepalLength);
        assert_eq!(sepal.count, 3);
        assert_eq!(sepal.min, Some(5.0));
        assert_eq!(sepal.max, Some(7.0));
        assert_eq!(sepal.mean, Some(6.0));
        assert!((sepal.std_dev.unwrap() - 1.0).abs() < 1e-12);

        let width = &stats[1];
        assert_eq!(width.std_dev, Some(0.0));
    }

    #[test]
    fn describe_empty_view_has_no_values() {
        let ds = Dataset::from_records(Vec::new());
        let stats = describe(&FilteredView::full(&ds));
        assert!(stats.iter().all(|s| s.count == 0 && s.mean.is_none() && s.min.is_none()));
    }
}
