use chrono::NaiveDate;
use std::fmt;

/// Fixed schema the rest of the pipeline works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
    Rate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::Volume => "Volume",
            Field::Rate => "Rate",
        }
    }

    /// Maps a flattened provider column name onto the schema. Columns the
    /// dashboard never reads (e.g. "Adj Close") yield `None`.
    pub fn from_name(name: &str) -> Option<Field> {
        match name.trim().to_ascii_lowercase().as_str() {
            "open" => Some(Field::Open),
            "high" => Some(Field::High),
            "low" => Some(Field::Low),
            "close" => Some(Field::Close),
            "volume" => Some(Field::Volume),
            "rate" => Some(Field::Rate),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column identity as delivered by a provider. Multi-symbol downloads label
/// columns with `(field, symbol)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKey {
    Plain(String),
    Compound { field: String, symbol: String },
}

impl ColumnKey {
    /// Plain field name with any symbol qualifier dropped.
    pub fn flatten(&self) -> &str {
        match self {
            ColumnKey::Plain(name) => name,
            ColumnKey::Compound { field, .. } => field,
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Plain(name) => f.write_str(name),
            ColumnKey::Compound { field, symbol } => write!(f, "({field}, {symbol})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub key: ColumnKey,
    pub values: Vec<Option<f64>>,
}

/// Untyped, provider-shaped table: one date per row, arbitrary columns,
/// order and uniqueness of dates not guaranteed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawFrame {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<RawColumn>,
}

impl RawFrame {
    pub fn new(symbol: impl Into<String>, dates: Vec<NaiveDate>) -> Self {
        Self {
            symbol: symbol.into(),
            dates,
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, key: ColumnKey, values: Vec<Option<f64>>) -> Self {
        self.columns.push(RawColumn { key, values });
        self
    }

    /// First column whose flattened name maps to `field`.
    pub fn column(&self, field: Field) -> Option<&RawColumn> {
        self.columns
            .iter()
            .find(|c| Field::from_name(c.key.flatten()) == Some(field))
    }
}
