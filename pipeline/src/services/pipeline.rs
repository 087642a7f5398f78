use serde::{Deserialize, Serialize};

use crate::errors::{PipelineError, PipelineResult};
use crate::models::{ChartSpec, DashboardSelection, PreviewTable, PriceSeries, RateSeries};
use crate::services::chart_builder::build_chart;
use crate::services::transformer::{SeriesTransformer, TransformOutput, TransformRequest};

/// Everything the render sink needs for one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub ticker: String,
    pub chart: ChartSpec,
    pub preview: Option<PreviewTable>,
    pub converted: bool,
}

/// Runs transform and chart assembly for one selection.
///
/// An absent or empty price series stops the pass with
/// [`PipelineError::DataUnavailable`] before anything is computed. A missing
/// rate series silently falls back to the base currency.
pub fn build_dashboard(
    transformer: &SeriesTransformer,
    selection: &DashboardSelection,
    prices: Option<&PriceSeries>,
    rates: Option<&RateSeries>,
) -> PipelineResult<Dashboard> {
    let output = transform_selection(transformer, selection, prices, rates)?;
    let chart = build_chart(&output);
    let preview = selection
        .show_preview_table
        .then(|| output.table.preview(&output.preview_columns));

    tracing::info!(
        ticker = %selection.ticker,
        period = %selection.period,
        rows = output.table.len(),
        converted = output.converted,
        traces = chart.traces.len(),
        "Dashboard assembled"
    );

    Ok(Dashboard {
        ticker: selection.ticker.clone(),
        chart,
        preview,
        converted: output.converted,
    })
}

/// Transform step alone, with the same unavailable-data guard.
pub fn transform_selection(
    transformer: &SeriesTransformer,
    selection: &DashboardSelection,
    prices: Option<&PriceSeries>,
    rates: Option<&RateSeries>,
) -> PipelineResult<TransformOutput> {
    let prices = prices
        .filter(|p| !p.is_empty())
        .ok_or_else(|| PipelineError::DataUnavailable {
            ticker: selection.ticker.clone(),
        })?;

    let request = TransformRequest {
        ticker: &selection.ticker,
        period: selection.period,
        sma_windows: &selection.sma_windows,
        convert_currency: selection.convert_currency,
    };
    Ok(transformer.transform(prices, rates, &request))
}
