//! # yendex - stock price dashboard pipeline
//!
//! Turns a daily OHLCV series and an optional exchange-rate series into a
//! chart-ready table:
//! - explicit normalization of provider frames into a fixed schema
//! - left join of the exchange rate with forward fill
//! - currency-converted OHLC columns
//! - simple moving averages over the active close
//! - a two-panel chart description and a rounded preview table
//!
//! ## Quick Start
//!
//! ```rust
//! use yendex::prelude::*;
//! use chrono::NaiveDate;
//!
//! let rows = (1..=10)
//!     .map(|day| PriceRow {
//!         date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
//!         open: 100.0,
//!         high: 101.0,
//!         low: 99.0,
//!         close: 100.0 + day as f64,
//!         volume: 1_000.0,
//!     })
//!     .collect();
//! let prices = PriceSeries::new("GOOGL", rows);
//!
//! let selection = DashboardSelection::default();
//! let dashboard = build_dashboard(&SeriesTransformer::default(), &selection, Some(&prices), None).unwrap();
//! assert_eq!(dashboard.chart.line_count(), 2);
//! ```

pub mod errors;
pub mod models;
pub mod services;
pub mod utils;

pub mod prelude {
    //! Commonly used types and functions.
    //! ```rust
    //! use yendex::prelude::*;
    //! ```

    pub use crate::errors::{NormalizeError, PipelineError, PipelineResult, SelectionError};
    pub use crate::models::{
        AlignedTable, ChartSpec, ColumnKey, DashboardSelection, Field, Panel, Period, PreviewTable, PriceRow,
        PriceSeries, RateRow, RateSeries, RawFrame, SelectionRules, Trace,
    };
    pub use crate::services::{build_dashboard, CurrencyPair, Dashboard, SeriesTransformer};
}

pub use utils::{init_logger, Logger, Timer};
