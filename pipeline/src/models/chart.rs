use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Row of the two-panel layout a trace belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Price,
    Volume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Trace {
    /// Moving-average line over the price panel.
    Line {
        name: String,
        x: Vec<NaiveDate>,
        y: Vec<Option<f64>>,
    },
    /// High/low/open/close range indicator.
    Candlestick {
        name: String,
        x: Vec<NaiveDate>,
        open: Vec<Option<f64>>,
        high: Vec<Option<f64>>,
        low: Vec<Option<f64>>,
        close: Vec<Option<f64>>,
    },
    Bar {
        name: String,
        x: Vec<NaiveDate>,
        y: Vec<Option<f64>>,
    },
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Line { name, .. } | Trace::Candlestick { name, .. } | Trace::Bar { name, .. } => name,
        }
    }

    pub fn panel(&self) -> Panel {
        match self {
            Trace::Line { .. } | Trace::Candlestick { .. } => Panel::Price,
            Trace::Bar { .. } => Panel::Volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    /// Relative heights of the price and volume rows.
    pub row_heights: [f64; 2],
    pub vertical_spacing: f64,
    pub shared_x_axis: bool,
    /// Horizontal legend just above the plotting area, right-aligned.
    pub legend_above_plot: bool,
    pub range_slider: bool,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            row_heights: [0.7, 0.3],
            vertical_spacing: 0.05,
            shared_x_axis: true,
            legend_above_plot: true,
            range_slider: false,
        }
    }
}

/// Presentation-only description of the dashboard chart. Traces are listed
/// in draw order: later traces paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub y_axis_label: String,
    pub volume_axis_label: String,
    pub traces: Vec<Trace>,
    pub preview_columns: Vec<String>,
    pub layout: PanelLayout,
}

impl ChartSpec {
    pub fn traces_in(&self, panel: Panel) -> impl Iterator<Item = &Trace> {
        self.traces.iter().filter(move |t| t.panel() == panel)
    }

    pub fn line_count(&self) -> usize {
        self.traces
            .iter()
            .filter(|t| matches!(t, Trace::Line { .. }))
            .count()
    }
}
