//! Column arithmetic used by the transformer. Every function is total:
//! undefined inputs yield undefined outputs instead of errors.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::RateRow;

/// Trailing arithmetic mean over `window` values ending at each index.
///
/// The first `window - 1` entries are undefined, as is any entry whose window
/// contains an undefined value. A zero window yields an all-undefined column.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let sum = slice.iter().try_fold(0.0, |acc, v| v.map(|v| acc + v))?;
            Some(sum / window as f64)
        })
        .collect()
}

/// Replaces each undefined entry with the nearest preceding defined one.
/// Leading undefined entries stay undefined.
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}

/// Looks up the rate for every date in `dates`. Dates without an exact match
/// are undefined; rate-only dates are ignored.
pub fn left_join_rates(dates: &[NaiveDate], rates: &[RateRow]) -> Vec<Option<f64>> {
    let by_date: HashMap<NaiveDate, f64> = rates.iter().map(|r| (r.date, r.rate)).collect();
    dates.iter().map(|d| by_date.get(d).copied()).collect()
}

/// Element-wise product; undefined if either side is.
pub fn multiply(values: &[Option<f64>], factors: &[Option<f64>]) -> Vec<Option<f64>> {
    values
        .iter()
        .zip(factors)
        .map(|(v, f)| Some((*v)? * (*f)?))
        .collect()
}
