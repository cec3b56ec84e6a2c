//! Chart layer: turns a filtered view into a [`ChartSpec`].
//!
//! The output is plain data. The egui shell renders it with `egui_plot`,
//! and [`ChartSpec::to_json`] exports it for any other consumer.

pub mod spec;

use std::collections::BTreeMap;

use crate::color::SpeciesColors;
use crate::data::filter::FilteredView;
use crate::data::model::{Feature, Species};

pub use spec::{
    BinCount, ChartRequest, ChartSpec, HistogramBin, HistogramSpec, LegendEntry, ScatterMark,
    ScatterSpec, Tooltip,
};

/// Half-width used when every value in the view is identical.
const DEGENERATE_HALF_SPAN: f64 = 0.5;

/// Builds chart specs with a fixed species colouring.
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    colors: SpeciesColors,
}

impl ChartBuilder {
    pub fn new(colors: SpeciesColors) -> Self {
        ChartBuilder { colors }
    }

    pub fn colors(&self) -> &SpeciesColors {
        &self.colors
    }

    /// Build the chart for `request` over `view`. An empty view yields an
    /// empty chart, never an error.
    pub fn build(&self, view: &FilteredView<'_>, request: &ChartRequest) -> ChartSpec {
        match *request {
            ChartRequest::Scatter { x, y } => ChartSpec::Scatter(self.scatter(view, x, y)),
            ChartRequest::Histogram { feature, bins } => {
                ChartSpec::Histogram(self.histogram(view, feature, bins))
            }
        }
    }

    fn legend(&self) -> Vec<LegendEntry> {
        self.colors
            .legend_entries()
            .into_iter()
            .map(|(species, color)| LegendEntry { species, color })
            .collect()
    }

    fn scatter(&self, view: &FilteredView<'_>, x: Feature, y: Feature) -> ScatterSpec {
        let marks = view
            .records()
            .map(|r| ScatterMark {
                x: r.value(x),
                y: r.value(y),
                species: r.species,
                color: self.colors.color_for(r.species),
                tooltip: Tooltip {
                    values: Feature::ALL.iter().map(|&f| (f, r.value(f))).collect(),
                    species: r.species,
                },
            })
            .collect();

        ScatterSpec {
            x,
            y,
            marks,
            legend: self.legend(),
        }
    }

    fn histogram(&self, view: &FilteredView<'_>, feature: Feature, bins: BinCount) -> HistogramSpec {
        let n_bins = bins.get();
        let Some((min, max)) = view.feature_extent(feature) else {
            return HistogramSpec {
                feature,
                bin_count: bins,
                bin_width: 0.0,
                bins: Vec::new(),
                legend: self.legend(),
            };
        };

        let (lo, hi) = if max > min {
            (min, max)
        } else {
            (min - DEGENERATE_HALF_SPAN, max + DEGENERATE_HALF_SPAN)
        };
        let width = (hi - lo) / n_bins as f64;

        let mut counts: Vec<BTreeMap<Species, usize>> = vec![BTreeMap::new(); n_bins];
        for record in view.records() {
            let idx = bin_index(record.value(feature), lo, width, n_bins);
            *counts[idx].entry(record.species).or_default() += 1;
        }

        let bins_out = counts
            .into_iter()
            .enumerate()
            .map(|(i, counts)| HistogramBin {
                start: lo + i as f64 * width,
                end: if i + 1 == n_bins { hi } else { lo + (i + 1) as f64 * width },
                counts,
            })
            .collect();

        HistogramSpec {
            feature,
            bin_count: bins,
            bin_width: width,
            bins: bins_out,
            legend: self.legend(),
        }
    }
}

/// Bin for `value`; the maximum lands in the last bin.
fn bin_index(value: f64, lo: f64, width: f64, n_bins: usize) -> usize {
    let idx = ((value - lo) / width).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(n_bins - 1)
    }
}

/// Build a chart with the default species colours.
pub fn build_chart(view: &FilteredView<'_>, request: &ChartRequest) -> ChartSpec {
    ChartBuilder::default().build(view, request)
}
