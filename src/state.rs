use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use iris_explorer::chart::{BinCount, ChartBuilder, ChartRequest, ChartSpec, ScatterSpec};
use iris_explorer::data::export::write_csv;
use iris_explorer::data::filter::{
    filter, slider_bounds, CategorySelection, FilterCriteria, FilteredView, ValueRange,
};
use iris_explorer::data::model::{Dataset, Feature, Species};
use iris_explorer::data::summary::{describe, summarize, FeatureStats, Summary};

// ---------------------------------------------------------------------------
// Control defaults
// ---------------------------------------------------------------------------

/// Initial control values.
pub struct Defaults;

impl Defaults {
    pub const FILTER_FEATURE: Feature = Feature::SepalLength;
    pub const SCATTER_X: Feature = Feature::SepalLength;
    pub const SCATTER_Y: Feature = Feature::SepalWidth;
    pub const HISTOGRAM_FEATURE: Feature = Feature::SepalLength;
    pub const BIN_COUNT: usize = BinCount::DEFAULT;
}

/// Which chart the visualization section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VizKind {
    Scatter,
    Histogram,
}

impl VizKind {
    pub fn label(self) -> &'static str {
        match self {
            VizKind::Scatter => "Scatter Plot",
            VizKind::Histogram => "Histogram",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state of one session, independent of rendering.
///
/// Control values live here; everything below "derived outputs" is rebuilt
/// by [`AppState::recompute`] whenever a control changes.
pub struct AppState {
    /// Shared read-only table.
    pub dataset: Arc<Dataset>,
    builder: ChartBuilder,

    /// Multiselect entries, in the order they were picked ("All" or species names).
    pub species_choices: Vec<String>,
    /// Feature the range filter applies to.
    pub filter_feature: Feature,
    /// Bounds offered by the range sliders (None when no species is selected).
    pub range_bounds: Option<ValueRange>,
    pub range_low: f64,
    pub range_high: f64,

    pub viz: VizKind,
    pub scatter_x: Feature,
    pub scatter_y: Feature,
    pub histogram_feature: Feature,
    /// Raw bin slider value.
    pub bin_count: usize,

    // ---- derived outputs ----
    pub visible_indices: Vec<usize>,
    pub summary: Summary,
    pub stats: Vec<FeatureStats>,
    pub chart: ChartSpec,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let mut state = AppState {
            dataset,
            builder: ChartBuilder::default(),
            species_choices: vec![CategorySelection::ALL_CHOICE.to_string()],
            filter_feature: Defaults::FILTER_FEATURE,
            range_bounds: None,
            range_low: 0.0,
            range_high: 0.0,
            viz: VizKind::Scatter,
            scatter_x: Defaults::SCATTER_X,
            scatter_y: Defaults::SCATTER_Y,
            histogram_feature: Defaults::HISTOGRAM_FEATURE,
            bin_count: Defaults::BIN_COUNT,
            visible_indices: Vec::new(),
            summary: Summary {
                row_count: 0,
                column_count: 0,
                species_count: 0,
            },
            stats: Vec::new(),
            chart: ChartSpec::Scatter(ScatterSpec {
                x: Defaults::SCATTER_X,
                y: Defaults::SCATTER_Y,
                marks: Vec::new(),
                legend: Vec::new(),
            }),
            status_message: None,
        };
        state.reset_range();
        state.recompute();
        state
    }

    pub fn chart_builder(&self) -> &ChartBuilder {
        &self.builder
    }

    /// Entries offered by the species multiselect.
    pub fn choice_options() -> Vec<&'static str> {
        std::iter::once(CategorySelection::ALL_CHOICE)
            .chain(Species::ALL.iter().map(|s| s.name()))
            .collect()
    }

    pub fn is_chosen(&self, choice: &str) -> bool {
        self.species_choices.iter().any(|c| c == choice)
    }

    /// Toggle one multiselect entry. The range resets to the new bounds.
    pub fn toggle_choice(&mut self, choice: &str) {
        if let Some(pos) = self.species_choices.iter().position(|c| c == choice) {
            self.species_choices.remove(pos);
        } else {
            self.species_choices.push(choice.to_string());
        }
        self.reset_range();
        self.recompute();
    }

    pub fn set_filter_feature(&mut self, feature: Feature) {
        if self.filter_feature != feature {
            self.filter_feature = feature;
            self.reset_range();
            self.recompute();
        }
    }

    /// Category selection parsed from the multiselect; invalid entries
    /// select nothing.
    fn categories(&self) -> CategorySelection {
        CategorySelection::from_choices(&self.species_choices).unwrap_or_else(|e| {
            log::warn!("Ignoring species selection: {e}");
            CategorySelection::none()
        })
    }

    /// Move the range sliders to the full bounds of the category subset.
    pub fn reset_range(&mut self) {
        self.range_bounds = slider_bounds(&self.dataset, &self.categories(), self.filter_feature);
        let (low, high) = self
            .range_bounds
            .map(|b| (b.low(), b.high()))
            .unwrap_or((0.0, 0.0));
        self.range_low = low;
        self.range_high = high;
    }

    pub fn criteria(&self) -> Result<FilterCriteria> {
        let range = ValueRange::new(self.range_low, self.range_high)
            .context("range sliders out of order")?;
        Ok(FilterCriteria {
            categories: self.categories(),
            feature: self.filter_feature,
            range,
        })
    }

    /// The chart request for the current controls. An out-of-range bin
    /// slider value falls back to the default.
    pub fn chart_request(&self) -> ChartRequest {
        match self.viz {
            VizKind::Scatter => ChartRequest::Scatter {
                x: self.scatter_x,
                y: self.scatter_y,
            },
            VizKind::Histogram => {
                let bins = BinCount::new(self.bin_count).unwrap_or_else(|e| {
                    log::warn!("{e}; using {}", BinCount::DEFAULT);
                    BinCount::default()
                });
                ChartRequest::Histogram {
                    feature: self.histogram_feature,
                    bins,
                }
            }
        }
    }

    /// Current filtered view of the dataset.
    pub fn view(&self) -> Result<FilteredView<'_>> {
        Ok(filter(&self.dataset, &self.criteria()?))
    }

    /// Run filter → summary → chart for the current controls.
    pub fn recompute(&mut self) {
        if self.range_low > self.range_high {
            log::warn!(
                "Range low {} above high {}; swapping",
                self.range_low,
                self.range_high
            );
            std::mem::swap(&mut self.range_low, &mut self.range_high);
        }

        let request = self.chart_request();
        let outputs = self.view().map(|view| {
            (
                summarize(&view),
                describe(&view),
                self.builder.build(&view, &request),
                view.indices().to_vec(),
            )
        });
        let (summary, stats, chart, visible_indices) = match outputs {
            Ok(outputs) => outputs,
            Err(e) => {
                log::error!("Filter failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                return;
            }
        };

        log::debug!(
            "Recomputed: {} rows, {} species, {} marks",
            summary.row_count,
            summary.species_count,
            chart.mark_count()
        );

        self.visible_indices = visible_indices;
        self.summary = summary;
        self.stats = stats;
        self.chart = chart;
        self.status_message = None;
    }

    // -- exports --

    /// Write the current filtered rows to `path` as CSV.
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let view = self.view()?;
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_csv(&view, file).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} rows to {}", view.len(), path.display());
        Ok(())
    }

    /// Write the current chart spec to `path` as JSON.
    pub fn export_chart_json(&self, path: &Path) -> Result<()> {
        let json = self.chart.to_json().context("serializing chart")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported chart spec to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(iris_explorer::data::loader::load().expect("bundled data"))
    }

    #[test]
    fn starts_with_everything_visible() {
        let s = state();
        assert_eq!(s.summary.row_count, 150);
        assert_eq!(s.summary.species_count, 3);
        assert_eq!((s.range_low, s.range_high), (4.3, 7.9));
        assert_eq!(s.chart.mark_count(), 150);
    }

    #[test]
    fn choice_options_list_all_then_species() {
        assert_eq!(
            AppState::choice_options(),
            vec!["All", "setosa", "versicolor", "virginica"]
        );
    }

    #[test]
    fn construction_fills_every_derived_output() {
        let s = state();
        assert_eq!(s.visible_indices, (0..150).collect::<Vec<_>>());
        assert_eq!(s.summary.column_count, 6);
        assert_eq!(s.stats.len(), 4);
        assert!(s.stats.iter().all(|st| st.count == 150));
        let ChartSpec::Scatter(spec) = &s.chart else {
            panic!("expected scatter");
        };
        assert_eq!(spec.legend.len(), 3);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn deselecting_all_empties_the_view() {
        let mut s = state();
        s.toggle_choice(CategorySelection::ALL_CHOICE);
        assert!(s.species_choices.is_empty());
        assert!(s.range_bounds.is_none());
        assert_eq!(s.summary.row_count, 0);
        assert!(s.chart.is_empty());
    }

    #[test]
    fn range_follows_species_selection() {
        let mut s = state();
        s.toggle_choice(CategorySelection::ALL_CHOICE);
        s.toggle_choice("setosa");
        s.set_filter_feature(Feature::PetalLength);
        assert_eq!((s.range_low, s.range_high), (1.0, 1.9));
        assert_eq!(s.summary.row_count, 50);
        assert_eq!(s.summary.species_count, 1);
    }

    #[test]
    fn inverted_sliders_are_swapped() {
        let mut s = state();
        s.range_low = 7.0;
        s.range_high = 5.0;
        s.recompute();
        assert_eq!((s.range_low, s.range_high), (5.0, 7.0));
        assert!(s.status_message.is_none());
    }

    #[test]
    fn histogram_uses_bin_slider() {
        let mut s = state();
        s.viz = VizKind::Histogram;
        s.bin_count = 7;
        s.recompute();
        let ChartSpec::Histogram(spec) = &s.chart else {
            panic!("expected histogram");
        };
        assert_eq!(spec.bins.len(), 7);

        s.bin_count = 200;
        assert!(matches!(
            s.chart_request(),
            ChartRequest::Histogram { bins, .. } if bins.get() == BinCount::DEFAULT
        ));
    }

    #[test]
    fn exports_write_files() -> anyhow::Result<()> {
        let s = state();
        let dir = tempfile::tempdir()?;

        let csv_path = dir.path().join("rows.csv");
        s.export_csv(&csv_path)?;
        let text = std::fs::read_to_string(&csv_path)?;
        assert_eq!(text.lines().count(), 151);

        let json_path = dir.path().join("chart.json");
        s.export_chart_json(&json_path)?;
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json_path)?)?;
        assert_eq!(json["kind"], "scatter");
        Ok(())
    }
}
