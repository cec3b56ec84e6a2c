use std::io::Write;

use super::filter::FilteredView;
use super::model::COLUMN_NAMES;
use crate::error::Result;

/// Write the rows of a view as CSV with the full six-column schema.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(COLUMN_NAMES)?;

    for record in view.records() {
        let mut row: Vec<String> = record.features.iter().map(|v| v.to_string()).collect();
        row.push(record.label.to_string());
        row.push(record.species.to_string());
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(())
}
