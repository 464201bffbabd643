//! The `?year=Y&month=M` query string shared by the expense pages and endpoints.

use serde::Deserialize;

use crate::calendar::{YearMonth, parse_month, parse_year};

/// The raw year and month from a query string.
///
/// The values are kept as text so that month names and other non-canonical
/// forms can be recognized and redirected.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MonthQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}

impl MonthQuery {
    /// The requested month, falling back to `fallback` for any part that is
    /// missing or invalid.
    pub fn year_month_or(&self, fallback: YearMonth) -> YearMonth {
        let year = self
            .year
            .as_deref()
            .and_then(|year| parse_year(year).ok())
            .unwrap_or(fallback.year);
        let month = self
            .month
            .as_deref()
            .and_then(|month| parse_month(month).ok())
            .unwrap_or(fallback.month);

        YearMonth::new(year, month)
    }
}

/// Whether a request can be served as is or must be sent to the canonical URL.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum QueryDecision {
    Redirect(String),
    Normalized(YearMonth),
}

/// Check that `query` names a month in canonical form, i.e. `year=2025&month=3`.
///
/// Missing or invalid values are replaced with `today`, and non-canonical
/// months such as `month=March` or `month=03` are rewritten, and in either
/// case the caller should redirect to the returned URL.
pub(crate) fn normalize_query(query: &MonthQuery, today: YearMonth, route: &str) -> QueryDecision {
    let year_month = query.year_month_or(today);
    let canonical_year = year_month.year.to_string();
    let canonical_month = u8::from(year_month.month).to_string();

    let is_canonical = query.year.as_deref() == Some(canonical_year.as_str())
        && query.month.as_deref() == Some(canonical_month.as_str());

    if is_canonical {
        QueryDecision::Normalized(year_month)
    } else {
        if query.year.is_some() || query.month.is_some() {
            tracing::debug!("Redirecting non-canonical month query {query:?} to {year_month}");
        }

        QueryDecision::Redirect(month_url(route, year_month))
    }
}

/// The query string for `year_month`, e.g. "year=2025&month=3".
pub fn month_query_string(year_month: YearMonth) -> String {
    format!(
        "year={}&month={}",
        year_month.year,
        u8::from(year_month.month)
    )
}

/// `route` with the query string for `year_month` appended.
pub fn month_url(route: &str, year_month: YearMonth) -> String {
    format!("{route}?{}", month_query_string(year_month))
}
