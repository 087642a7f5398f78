use serde::{Deserialize, Serialize};

use super::period::Period;
use crate::errors::SelectionError;

/// What the user asked to see. Immutable once built; the pipeline entry
/// point takes it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSelection {
    pub ticker: String,
    pub period: Period,
    /// Applied in the given order; repeats are kept.
    pub sma_windows: Vec<usize>,
    pub convert_currency: bool,
    pub show_preview_table: bool,
}

impl Default for DashboardSelection {
    fn default() -> Self {
        Self {
            ticker: "GOOGL".to_string(),
            period: Period::OneYear,
            sma_windows: vec![5, 25],
            convert_currency: true,
            show_preview_table: false,
        }
    }
}

/// Choices the input surface offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRules {
    pub tickers: Vec<String>,
    pub sma_choices: Vec<usize>,
}

impl SelectionRules {
    /// Upper-cases the ticker and checks it and every window against the
    /// offered choices.
    pub fn validate(&self, mut selection: DashboardSelection) -> Result<DashboardSelection, SelectionError> {
        selection.ticker = selection.ticker.trim().to_ascii_uppercase();
        if !self.tickers.iter().any(|t| *t == selection.ticker) {
            return Err(SelectionError::UnknownTicker(selection.ticker));
        }

        if let Some(&window) = selection
            .sma_windows
            .iter()
            .find(|w| !self.sma_choices.contains(*w))
        {
            return Err(SelectionError::WindowNotAllowed {
                window,
                allowed: self.sma_choices.clone(),
            });
        }

        Ok(selection)
    }
}

/// Parses raw window strings from the input surface. Blank entries are
/// skipped so an explicit empty selection can be expressed.
pub fn parse_windows<S: AsRef<str>>(raw: &[S]) -> Result<Vec<usize>, SelectionError> {
    raw.iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(w) if w > 0 => Ok(w),
            _ => Err(SelectionError::InvalidWindow(s.to_string())),
        })
        .collect()
}

/// Nasdaq-100 constituents offered by the ticker picker.
pub fn nasdaq100_tickers() -> Vec<String> {
    [
        "AAPL", "MSFT", "AMZN", "NVDA", "GOOGL", "GOOG", "META", "TSLA", "AVGO", "ASML", "ADBE", "AMD",
        "COST", "PEP", "CSCO", "TMUS", "NFLX", "INTC", "CMCSA", "QCOM", "INTU", "AMGN", "TXN", "HON",
        "SBUX", "ISRG", "BKNG", "GILD", "ADI", "LRCX", "REGN", "VRTX", "MDLZ", "ADP", "PYPL", "MU",
        "AMAT", "CSX", "MELI", "CHTR", "MAR", "PANW", "KDP", "AEP", "SNPS", "ABNB", "FTNT", "KLAC",
        "MRVL", "ORLY", "DXCM", "MNST", "CDNS", "ADSK", "PCAR", "PAYX", "EXC", "BIIB", "ROST", "KHC",
        "CPRT", "ON", "CTAS", "LULU", "WBD", "IDXX", "WDAY", "FAST", "CRWD", "GFS", "CEG", "GEHC",
        "TEAM", "DDOG", "VRSK", "BKR", "ANSS", "MRNA", "ALGN", "ILMN", "ZS", "SIRI", "TTD", "ENPH",
        "PDD", "CTSH", "EA", "ZM", "JD", "XEL", "DLTR", "AZN", "WBA", "LCID", "SGEN", "ATVI", "BIDU",
        "SWKS", "SPLK", "OKTA", "DOCU", "EBAY", "VOD",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> SelectionRules {
        SelectionRules {
            tickers: nasdaq100_tickers(),
            sma_choices: vec![5, 25, 50, 75],
        }
    }

    #[test]
    fn test_default_selection() {
        let selection = DashboardSelection::default();
        assert_eq!(selection.ticker, "GOOGL");
        assert_eq!(selection.period, Period::OneYear);
        assert_eq!(selection.sma_windows, vec![5, 25]);
        assert!(selection.convert_currency);
        assert!(!selection.show_preview_table);
    }

    #[test]
    fn test_validate_normalizes_ticker_case() {
        let selection = DashboardSelection {
            ticker: " aapl ".to_string(),
            ..Default::default()
        };
        assert_eq!(rules().validate(selection).unwrap().ticker, "AAPL");
    }

    #[test]
    fn test_validate_rejects_unknown_ticker_and_window() {
        let bad_ticker = DashboardSelection {
            ticker: "NOPE".to_string(),
            ..Default::default()
        };
        assert_eq!(
            rules().validate(bad_ticker).unwrap_err(),
            SelectionError::UnknownTicker("NOPE".to_string())
        );

        let bad_window = DashboardSelection {
            sma_windows: vec![5, 7],
            ..Default::default()
        };
        assert!(matches!(
            rules().validate(bad_window),
            Err(SelectionError::WindowNotAllowed { window: 7, .. })
        ));
    }

    #[test]
    fn test_validate_keeps_repeated_windows() {
        let selection = DashboardSelection {
            sma_windows: vec![25, 5, 25],
            ..Default::default()
        };
        assert_eq!(rules().validate(selection).unwrap().sma_windows, vec![25, 5, 25]);
    }

    #[test]
    fn test_parse_windows() {
        assert_eq!(parse_windows(&["5", "25"]).unwrap(), vec![5, 25]);
        assert_eq!(parse_windows(&[""]).unwrap(), Vec::<usize>::new());
        assert!(parse_windows(&["0"]).is_err());
        assert!(parse_windows(&["abc"]).is_err());
    }
}
