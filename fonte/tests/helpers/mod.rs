// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

pub use mock_connector::MockConnector;

use chrono::NaiveDate;
use fonte::PricePoint;

/// Construct a date without unwrap noise in tests.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// A flat daily bar for fixtures.
pub fn bar(y: i32, m: u32, day: u32, close: f64) -> PricePoint {
    PricePoint {
        date: d(y, m, day),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000,
    }
}
