use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series::{PriceRow, PriceSeries};

pub const FOREX_RATE: &str = "forex_rate";

/// Named column of optional values; `None` marks an undefined cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Working table keyed by the price series' dates. Columns keep insertion
/// order and every column has exactly one value per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl AlignedTable {
    /// Copies the price series into Open/High/Low/Close/Volume columns.
    pub fn from_prices(prices: &PriceSeries) -> Self {
        let rows = prices.rows();
        let col = |name: &str, f: fn(&PriceRow) -> f64| Column {
            name: name.to_string(),
            values: rows.iter().map(|r| Some(f(r))).collect(),
        };

        Self {
            dates: prices.dates(),
            columns: vec![
                col("Open", |r| r.open),
                col("High", |r| r.high),
                col("Low", |r| r.low),
                col("Close", |r| r.close),
                col("Volume", |r| r.volume),
            ],
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Appends a column. Names are not required to be unique; lookups return
    /// the first match.
    ///
    /// # Panics
    /// If `values` does not have one entry per date.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        let name = name.into();
        assert_eq!(
            values.len(),
            self.dates.len(),
            "column {name} must have one value per date"
        );
        self.columns.push(Column { name, values });
    }

    /// Restricts the table to `names` (in that order) with values rounded to
    /// two decimals. Unknown names produce all-blank columns.
    pub fn preview(&self, names: &[String]) -> PreviewTable {
        let selected: Vec<Option<&[Option<f64>]>> = names.iter().map(|n| self.column(n)).collect();
        let rows = self
            .dates
            .iter()
            .enumerate()
            .map(|(i, &date)| PreviewRow {
                date,
                values: selected
                    .iter()
                    .map(|col| col.and_then(|values| values[i]).map(round2))
                    .collect(),
            })
            .collect();

        PreviewTable {
            columns: names.to_vec(),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// Tabular preview shown under the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<PreviewRow>,
}

impl PreviewTable {
    /// CSV with a leading `Date` column; undefined cells are left blank.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push("Date");
        header.extend(self.columns.iter().map(String::as_str));
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(row.values.len() + 1);
            record.push(row.date.format("%Y-%m-%d").to_string());
            record.extend(
                row.values
                    .iter()
                    .map(|v| v.map(|v| format!("{v:.2}")).unwrap_or_default()),
            );
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
