use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use super::model::{Dataset, Record};
use crate::error::{ExplorerError, Result};

/// The Iris table, embedded at compile time.
const BUNDLED_CSV: &str = include_str!("../../data/iris.csv");

/// Row count of the bundled table.
pub const EXPECTED_ROWS: usize = 150;

static DATASET: OnceLock<Arc<Dataset>> = OnceLock::new();

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Return the bundled dataset, parsing it on first use.
///
/// Every call within a process returns the same shared instance. A failure
/// here means the binary was built with broken data and is not recoverable.
pub fn load() -> Result<Arc<Dataset>> {
    if let Some(ds) = DATASET.get() {
        return Ok(Arc::clone(ds));
    }
    let parsed = Arc::new(load_bundled()?);
    log::info!("Loaded {} records from bundled data", parsed.len());
    Ok(Arc::clone(DATASET.get_or_init(|| parsed)))
}

/// Parse a dataset from CSV text without caching.
///
/// Expected layout (header required):
///
/// ```text
/// sepal_length,sepal_width,petal_length,petal_width,target
/// 5.1,3.5,1.4,0.2,0
/// ```
pub fn parse(text: &str) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        records.push(row.into_record(row_no)?);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV row
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    sepal_length: f64,
    sepal_width: f64,
    petal_length: f64,
    petal_width: f64,
    target: u8,
}

impl CsvRow {
    fn into_record(self, row_no: usize) -> Result<Record> {
        let features = [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ];
        if features.iter().any(|v| !v.is_finite()) {
            return Err(ExplorerError::MalformedDataset(format!(
                "row {row_no}: non-finite feature value"
            )));
        }
        Record::new(features, self.target).ok_or_else(|| {
            ExplorerError::MalformedDataset(format!(
                "row {row_no}: unknown target label {}",
                self.target
            ))
        })
    }
}

fn load_bundled() -> Result<Dataset> {
    let dataset = parse(BUNDLED_CSV)?;
    if dataset.len() != EXPECTED_ROWS {
        return Err(ExplorerError::MalformedDataset(format!(
            "expected {EXPECTED_ROWS} rows, found {}",
            dataset.len()
        )));
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Feature, Species};

    #[test]
    fn bundled_data_has_fifty_of_each_species() -> anyhow::Result<()> {
        let ds = load()?;
        assert_eq!(ds.len(), EXPECTED_ROWS);
        for species in Species::ALL {
            let n = ds.records().iter().filter(|r| r.species == species).count();
            assert_eq!(n, 50, "{species}");
        }
        Ok(())
    }

    #[test]
    fn bundled_extents_match_published_values() -> anyhow::Result<()> {
        let ds = load()?;
        assert_eq!(ds.feature_extent(Feature::SepalLength), Some((4.3, 7.9)));
        assert_eq!(ds.feature_extent(Feature::SepalWidth), Some((2.0, 4.4)));
        assert_eq!(ds.feature_extent(Feature::PetalLength), Some((1.0, 6.9)));
        assert_eq!(ds.feature_extent(Feature::PetalWidth), Some((0.1, 2.5)));
        Ok(())
    }

    #[test]
    fn load_returns_the_cached_instance() -> anyhow::Result<()> {
        let first = load()?;
        let second = load()?;
        assert!(Arc::ptr_eq(&first, &second));
        Ok(())
    }

    #[test]
    fn parse_keeps_row_order() -> anyhow::Result<()> {
        let ds = parse(
            "sepal_length,sepal_width,petal_length,petal_width,target\n\
             6.3,3.3,6.0,2.5,2\n\
             5.1,3.5,1.4,0.2,0\n",
        )?;
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].species, Species::Virginica);
        assert_eq!(ds.records()[1].species, Species::Setosa);
        Ok(())
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = parse(
            "sepal_length,sepal_width,petal_length,petal_width,target\n\
             5.1,3.5,1.4,0.2,5\n",
        )
        .unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedDataset(_)));
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let err = parse(
            "sepal_length,sepal_width,petal_length,petal_width,target\n\
             5.1,wide,1.4,0.2,0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ExplorerError::Csv(_)));
    }

    #[test]
    fn missing_column_is_rejected() {
        let err = parse("sepal_length,sepal_width,target\n5.1,3.5,0\n").unwrap_err();
        assert!(matches!(err, ExplorerError::Csv(_)));
    }
}
