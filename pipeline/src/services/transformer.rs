use serde::{Deserialize, Serialize};

use crate::models::{AlignedTable, Period, PriceSeries, RateSeries, FOREX_RATE};
use crate::utils::{forward_fill, left_join_rates, multiply, rolling_mean, Logger, Timer};

const OHLC: [&str; 4] = ["Open", "High", "Low", "Close"];

/// Currency of the price series and the one it can be converted into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self {
            base: "USD".to_string(),
            quote: "JPY".to_string(),
        }
    }
}

impl CurrencyPair {
    /// Name of the converted counterpart of `column`, e.g. `Close_jpy`.
    pub fn converted_name(&self, column: &str) -> String {
        format!("{}_{}", column, self.quote.to_ascii_lowercase())
    }
}

/// Names of the OHLC columns the chart draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveColumns {
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

impl ActiveColumns {
    fn from_names(names: [String; 4]) -> Self {
        let [open, high, low, close] = names;
        Self { open, high, low, close }
    }
}

/// Inputs beyond the series themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformRequest<'a> {
    pub ticker: &'a str,
    pub period: Period,
    pub sma_windows: &'a [usize],
    pub convert_currency: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformOutput {
    pub table: AlignedTable,
    pub active: ActiveColumns,
    pub preview_columns: Vec<String>,
    /// SMA column names in request order.
    pub sma_columns: Vec<String>,
    pub title: String,
    pub y_axis_label: String,
    /// Whether the converted branch was taken.
    pub converted: bool,
}

/// Aligns the exchange rate onto the price series, derives converted prices
/// and appends one SMA column per requested window. Pure: the same inputs
/// always produce the same output.
#[derive(Debug)]
pub struct SeriesTransformer {
    currency: CurrencyPair,
    logger: Logger,
}

impl SeriesTransformer {
    pub fn new(currency: CurrencyPair) -> Self {
        Self {
            currency,
            logger: Logger::new("TRANSFORM"),
        }
    }

    pub fn currency(&self) -> &CurrencyPair {
        &self.currency
    }

    /// Callers must not pass an empty price series; an unavailable series is
    /// reported before this point.
    pub fn transform(
        &self,
        prices: &PriceSeries,
        rates: Option<&RateSeries>,
        request: &TransformRequest<'_>,
    ) -> TransformOutput {
        let timer = Timer::start("transform");
        let mut table = AlignedTable::from_prices(prices);

        let (active, mut preview_columns, title, y_axis_label, converted) =
            match rates.filter(|_| request.convert_currency) {
                Some(rates) => {
                    self.convert(&mut table, rates);
                    let names = OHLC.map(|c| self.currency.converted_name(c));
                    let mut preview = names.to_vec();
                    preview.push(FOREX_RATE.to_string());
                    (
                        ActiveColumns::from_names(names),
                        preview,
                        format!(
                            "{}  Stock Chart in {} ({})",
                            request.ticker.to_uppercase(),
                            self.currency.quote,
                            request.period
                        ),
                        format!("Price ({})", self.currency.quote),
                        true,
                    )
                }
                None => {
                    if request.convert_currency {
                        self.logger
                            .warn(&format!("{}: no exchange rate series, showing {}", request.ticker, self.currency.base));
                    }
                    let mut preview: Vec<String> = OHLC.iter().map(|c| c.to_string()).collect();
                    preview.push("Volume".to_string());
                    (
                        ActiveColumns::from_names(OHLC.map(String::from)),
                        preview,
                        format!("{}  Stock Chart ({})", request.ticker.to_uppercase(), request.period),
                        format!("Price ({})", self.currency.base),
                        false,
                    )
                }
            };

        let close: Vec<Option<f64>> = table.column(&active.close).map(<[_]>::to_vec).unwrap_or_default();
        let mut sma_columns = Vec::with_capacity(request.sma_windows.len());
        for &window in request.sma_windows {
            let name = format!("SMA_{window}");
            table.push_column(name.clone(), rolling_mean(&close, window));
            preview_columns.push(name.clone());
            sma_columns.push(name);
        }

        self.logger.debug(&format!(
            "{} {}: {} rows, converted={}, sma={:?}",
            request.ticker,
            request.period,
            table.len(),
            converted,
            request.sma_windows
        ));
        timer.log_elapsed();

        TransformOutput {
            table,
            active,
            preview_columns,
            sma_columns,
            title,
            y_axis_label,
            converted,
        }
    }

    fn convert(&self, table: &mut AlignedTable, rates: &RateSeries) {
        let joined = left_join_rates(table.dates(), rates.rows());
        let forex = forward_fill(&joined);

        let converted: Vec<(String, Vec<Option<f64>>)> = OHLC
            .iter()
            .map(|&col| {
                let values = table.column(col).map(|v| multiply(v, &forex)).unwrap_or_default();
                (self.currency.converted_name(col), values)
            })
            .collect();

        table.push_column(FOREX_RATE, forex);
        for (name, values) in converted {
            table.push_column(name, values);
        }
    }
}

impl Default for SeriesTransformer {
    fn default() -> Self {
        Self::new(CurrencyPair::default())
    }
}
