//! Backward pagination driver for date-cursored upstreams.

use std::future::Future;

use chrono::{Days, NaiveDate};

use fonte_types::FonteError;

/// Hard cap on pages per backfill. A well-behaved upstream terminates long
/// before this; hitting it means the cursor never converged.
pub const MAX_PAGES: usize = 64;

/// Drive a paged upstream backward in time from `end` until `start` is
/// covered.
///
/// `fetch_page(cursor)` fetches one page of records dated on or before
/// `cursor`, newest first, at most `page_limit` records. Pagination stops
/// when a page comes back empty, when no `start` bound was given (one page
/// is the contract), when a short page signals the upstream ran out, or when
/// the page already reaches `start`. Otherwise the cursor moves to the day
/// before the oldest date seen; a cursor that fails to strictly decrease is
/// reported as [`FonteError::PaginationInconsistency`] rather than looped on.
pub async fn paginate_backward<T, F, Fut, D>(
    provider: &'static str,
    end: NaiveDate,
    start: Option<NaiveDate>,
    page_limit: usize,
    date_of: D,
    mut fetch_page: F,
) -> Result<Vec<T>, FonteError>
where
    F: FnMut(NaiveDate) -> Fut,
    Fut: Future<Output = Result<Vec<T>, FonteError>>,
    D: Fn(&T) -> NaiveDate,
{
    let mut out = Vec::new();
    let mut cursor = end;

    for _ in 0..MAX_PAGES {
        let page = fetch_page(cursor).await?;
        let Some(min_date) = page.iter().map(&date_of).min() else {
            return Ok(out);
        };
        let page_len = page.len();
        out.extend(page);

        let Some(start) = start else {
            return Ok(out);
        };
        if page_len < page_limit || min_date <= start {
            return Ok(out);
        }

        let next = min_date
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| FonteError::PaginationInconsistency {
                provider,
                detail: format!("cursor underflow below {min_date}"),
            })?;
        if next >= cursor {
            return Err(FonteError::PaginationInconsistency {
                provider,
                detail: format!("cursor failed to decrease: {cursor} -> {next}"),
            });
        }
        cursor = next;
    }

    Err(FonteError::PaginationInconsistency {
        provider,
        detail: format!("no convergence after {MAX_PAGES} pages"),
    })
}
