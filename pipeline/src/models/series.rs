use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::frame::{Field, RawFrame};
use crate::errors::NormalizeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Daily OHLCV rows, ascending by date with unique dates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    rows: Vec<PriceRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRow {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Daily closing exchange rate, ascending by date with unique dates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RateSeries {
    pub symbol: String,
    rows: Vec<RateRow>,
}

impl PriceSeries {
    /// Builds a series from rows in any order. Later rows win on duplicate dates.
    pub fn new(symbol: impl Into<String>, rows: Vec<PriceRow>) -> Self {
        Self {
            symbol: symbol.into(),
            rows: sort_and_dedup(rows, |r| r.date),
        }
    }

    /// Flattens a provider frame into the OHLCV schema. Rows missing any of
    /// the five fields are dropped.
    pub fn from_frame(frame: &RawFrame) -> Result<Self, NormalizeError> {
        check_lengths(frame)?;
        let open = required(frame, Field::Open)?;
        let high = required(frame, Field::High)?;
        let low = required(frame, Field::Low)?;
        let close = required(frame, Field::Close)?;
        let volume = required(frame, Field::Volume)?;

        let rows: Vec<PriceRow> = frame
            .dates
            .iter()
            .enumerate()
            .filter_map(|(i, &date)| {
                Some(PriceRow {
                    date,
                    open: open[i]?,
                    high: high[i]?,
                    low: low[i]?,
                    close: close[i]?,
                    volume: volume[i]?,
                })
            })
            .collect();

        let dropped = frame.dates.len() - rows.len();
        if dropped > 0 {
            tracing::debug!(symbol = %frame.symbol, dropped, "Dropped incomplete price rows");
        }

        Ok(Self::new(frame.symbol.clone(), rows))
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RateSeries {
    pub fn new(symbol: impl Into<String>, rows: Vec<RateRow>) -> Self {
        Self {
            symbol: symbol.into(),
            rows: sort_and_dedup(rows, |r| r.date),
        }
    }

    /// Keeps only the closing rate. A plain `Rate` column is accepted when no
    /// `Close` column exists.
    pub fn from_frame(frame: &RawFrame) -> Result<Self, NormalizeError> {
        check_lengths(frame)?;
        let close = frame
            .column(Field::Close)
            .or_else(|| frame.column(Field::Rate))
            .map(|c| &c.values)
            .ok_or(NormalizeError::MissingField(Field::Close))?;

        let rows = frame
            .dates
            .iter()
            .zip(close)
            .filter_map(|(&date, rate)| rate.map(|rate| RateRow { date, rate }))
            .collect();

        Ok(Self::new(frame.symbol.clone(), rows))
    }

    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn check_lengths(frame: &RawFrame) -> Result<(), NormalizeError> {
    let expected = frame.dates.len();
    match frame.columns.iter().find(|c| c.values.len() != expected) {
        Some(col) => Err(NormalizeError::LengthMismatch {
            column: col.key.to_string(),
            expected,
            actual: col.values.len(),
        }),
        None => Ok(()),
    }
}

fn required(frame: &RawFrame, field: Field) -> Result<&[Option<f64>], NormalizeError> {
    frame
        .column(field)
        .map(|c| c.values.as_slice())
        .ok_or(NormalizeError::MissingField(field))
}

fn sort_and_dedup<T>(mut rows: Vec<T>, date: impl Fn(&T) -> NaiveDate) -> Vec<T> {
    // Stable sort keeps provider order within a date, so the last one is the freshest.
    rows.sort_by_key(|r| date(r));
    let mut out: Vec<T> = Vec::with_capacity(rows.len());
    for row in rows {
        match out.last_mut() {
            Some(last) if date(&*last) == date(&row) => *last = row,
            _ => out.push(row),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::ColumnKey;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn compound(field: &str) -> ColumnKey {
        ColumnKey::Compound {
            field: field.to_string(),
            symbol: "GOOGL".to_string(),
        }
    }

    fn price_frame(dates: Vec<NaiveDate>, closes: Vec<Option<f64>>) -> RawFrame {
        let n = dates.len();
        RawFrame::new("GOOGL", dates)
            .with_column(compound("Open"), vec![Some(1.0); n])
            .with_column(compound("High"), vec![Some(2.0); n])
            .with_column(compound("Low"), vec![Some(0.5); n])
            .with_column(compound("Close"), closes)
            .with_column(compound("Adj Close"), vec![Some(9.9); n])
            .with_column(compound("Volume"), vec![Some(1000.0); n])
    }

    #[test]
    fn test_from_frame_flattens_compound_columns() {
        let frame = price_frame(vec![d(4), d(5)], vec![Some(10.0), Some(11.0)]);
        let series = PriceSeries::from_frame(&frame).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.rows()[1].close, 11.0);
        assert_eq!(series.rows()[0].volume, 1000.0);
    }

    #[test]
    fn test_from_frame_sorts_and_keeps_last_duplicate() {
        let frame = price_frame(vec![d(6), d(4), d(6)], vec![Some(1.0), Some(2.0), Some(3.0)]);
        let series = PriceSeries::from_frame(&frame).unwrap();
        assert_eq!(series.dates(), vec![d(4), d(6)]);
        assert_eq!(series.rows()[1].close, 3.0);
    }

    #[test]
    fn test_from_frame_drops_incomplete_rows() {
        let frame = price_frame(vec![d(4), d(5), d(6)], vec![Some(1.0), None, Some(3.0)]);
        let series = PriceSeries::from_frame(&frame).unwrap();
        assert_eq!(series.dates(), vec![d(4), d(6)]);
    }

    #[test]
    fn test_from_frame_missing_field() {
        let frame = RawFrame::new("GOOGL", vec![d(4)]).with_column(compound("Close"), vec![Some(1.0)]);
        assert_eq!(
            PriceSeries::from_frame(&frame).unwrap_err(),
            NormalizeError::MissingField(Field::Open)
        );
    }

    #[test]
    fn test_from_frame_length_mismatch() {
        let frame = price_frame(vec![d(4), d(5)], vec![Some(1.0)]);
        assert!(matches!(
            PriceSeries::from_frame(&frame),
            Err(NormalizeError::LengthMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_rate_series_keeps_close_only() {
        let frame = RawFrame::new("JPY=X", vec![d(4), d(5), d(6)])
            .with_column(ColumnKey::Plain("Open".to_string()), vec![Some(1.0); 3])
            .with_column(ColumnKey::Plain("Close".to_string()), vec![Some(150.0), None, Some(151.0)]);
        let rates = RateSeries::from_frame(&frame).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates.rows()[1], RateRow { date: d(6), rate: 151.0 });
    }
}
