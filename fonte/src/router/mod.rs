//! Per-capability routing operations.
//!
//! Every operation follows the same shape: validate caller input, pick the
//! connector for the ticker's segment, serve from the cache when the
//! filtered window is non-empty, otherwise fetch with retry, append to the
//! cache, and answer from the merged series. Line items are the one
//! exception on the read side; see [`line_items`].

mod insider_trades;
mod line_items;
mod market_cap;
mod metrics;
mod news;
mod prices;

use chrono::NaiveDate;

use fonte_core::FonteError;

/// Reject a window whose start lies after its end.
pub(crate) fn validate_window(
    start: Option<NaiveDate>,
    end: NaiveDate,
) -> Result<(), FonteError> {
    if let Some(start) = start
        && start > end
    {
        return Err(FonteError::InvalidArg(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_validation() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert!(validate_window(Some(d(2024, 1, 1)), d(2024, 6, 30)).is_ok());
        assert!(validate_window(None, d(2024, 6, 30)).is_ok());
        assert!(validate_window(Some(d(2024, 1, 1)), d(2024, 1, 1)).is_ok());
        assert!(validate_window(Some(d(2024, 7, 1)), d(2024, 6, 30)).is_err());
    }
}
