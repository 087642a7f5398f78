use crate::models::{ChartSpec, PanelLayout, Trace};
use crate::services::transformer::TransformOutput;

pub const PRICE_TRACE_NAME: &str = "Price";
pub const VOLUME_TRACE_NAME: &str = "Volume";

/// Builds the two-panel chart. SMA lines come first so the candlestick is
/// drawn on top of them; the volume bars share the date axis below.
pub fn build_chart(output: &TransformOutput) -> ChartSpec {
    let table = &output.table;
    let x = table.dates().to_vec();
    let values = |name: &str| table.column(name).map(<[_]>::to_vec).unwrap_or_else(|| vec![None; x.len()]);

    let mut traces: Vec<Trace> = output
        .sma_columns
        .iter()
        .map(|name| Trace::Line {
            name: name.clone(),
            x: x.clone(),
            y: values(name),
        })
        .collect();

    traces.push(Trace::Candlestick {
        name: PRICE_TRACE_NAME.to_string(),
        x: x.clone(),
        open: values(&output.active.open),
        high: values(&output.active.high),
        low: values(&output.active.low),
        close: values(&output.active.close),
    });

    traces.push(Trace::Bar {
        name: VOLUME_TRACE_NAME.to_string(),
        x: x.clone(),
        y: values("Volume"),
    });

    ChartSpec {
        title: output.title.clone(),
        y_axis_label: output.y_axis_label.clone(),
        volume_axis_label: VOLUME_TRACE_NAME.to_string(),
        traces,
        preview_columns: output.preview_columns.clone(),
        layout: PanelLayout::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Panel, Period, PriceRow, PriceSeries, RateRow, RateSeries};
    use crate::services::transformer::{SeriesTransformer, TransformRequest};
    use chrono::NaiveDate;

    fn output(windows: &[usize]) -> TransformOutput {
        let rows = (1..=6)
            .map(|day| PriceRow {
                date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 11.0,
                volume: 100.0 * day as f64,
            })
            .collect();
        let request = TransformRequest {
            ticker: "GOOGL",
            period: Period::SixMonths,
            sma_windows: windows,
            convert_currency: false,
        };
        SeriesTransformer::default().transform(&PriceSeries::new("GOOGL", rows), None, &request)
    }

    #[test]
    fn test_sma_lines_are_drawn_before_price() {
        let chart = build_chart(&output(&[5, 2]));
        let names: Vec<&str> = chart.traces.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["SMA_5", "SMA_2", "Price", "Volume"]);
        assert_eq!(chart.traces_in(Panel::Price).count(), 3);
        assert_eq!(chart.traces_in(Panel::Volume).count(), 1);
    }

    #[test]
    fn test_converted_candlestick_reads_converted_columns() {
        let rows = (1..=4)
            .map(|day| PriceRow {
                date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 11.0,
                volume: 100.0,
            })
            .collect();
        // No quote on the first session, so the first converted row stays undefined.
        let rates = RateSeries::new(
            "JPY=X",
            vec![RateRow {
                date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
                rate: 150.0,
            }],
        );
        let request = TransformRequest {
            ticker: "GOOGL",
            period: Period::SixMonths,
            sma_windows: &[2],
            convert_currency: true,
        };
        let output = SeriesTransformer::default().transform(&PriceSeries::new("GOOGL", rows), Some(&rates), &request);
        let chart = build_chart(&output);

        let column = |name: &str| output.table.column(name).unwrap().to_vec();
        match chart.traces.iter().find(|t| matches!(t, Trace::Candlestick { .. })).unwrap() {
            Trace::Candlestick { open, high, low, close, .. } => {
                assert_eq!(*open, column("Open_jpy"));
                assert_eq!(*high, column("High_jpy"));
                assert_eq!(*low, column("Low_jpy"));
                assert_eq!(*close, column("Close_jpy"));
                assert_eq!(open[0], None);
                assert_eq!(close[1..], [Some(1650.0), Some(1650.0), Some(1650.0)]);
            }
            other => panic!("expected candlestick, got {other:?}"),
        }
        match &chart.traces[0] {
            Trace::Line { y, .. } => assert_eq!(y[..3], [None, None, Some(1650.0)]),
            other => panic!("expected SMA line, got {other:?}"),
        }
    }

    #[test]
    fn test_no_windows_means_no_lines() {
        let chart = build_chart(&output(&[]));
        assert_eq!(chart.line_count(), 0);
        assert_eq!(chart.traces.len(), 2);
    }

    #[test]
    fn test_layout_defaults() {
        let chart = build_chart(&output(&[]));
        assert_eq!(chart.layout.row_heights, [0.7, 0.3]);
        assert!(chart.layout.shared_x_axis);
        assert!(!chart.layout.range_slider);
        assert_eq!(chart.y_axis_label, "Price (USD)");
    }

    #[test]
    fn test_volume_bars_follow_dates() {
        let chart = build_chart(&output(&[]));
        match chart.traces.last().unwrap() {
            Trace::Bar { x, y, .. } => {
                assert_eq!(x.len(), 6);
                assert_eq!(y[5], Some(600.0));
            }
            other => panic!("expected volume bars, got {other:?}"),
        }
    }
}
