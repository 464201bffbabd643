//! Defines the endpoints for deleting default and specific expenses.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    calendar::current_year_month,
    endpoints,
    expense::{
        DefaultExpenseId, SpecificExpenseId,
        ledger::ExpenseLedger,
        month_query::{MonthQuery, month_url},
    },
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub ledger: Arc<Mutex<ExpenseLedger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for deleting a default expense, redirects to the month in
/// the query string so the totals are recomputed.
pub async fn delete_default_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<DefaultExpenseId>,
    Query(query): Query<MonthQuery>,
) -> Response {
    delete_expense(&state, &query, |ledger, connection| {
        ledger.remove_default(connection, expense_id)
    })
    .unwrap_or_else(|error| {
        tracing::error!("Could not delete default expense {expense_id}: {error}");
        error.into_alert_response()
    })
}

/// A route handler for deleting a specific expense, redirects to the month in
/// the query string so the totals are recomputed.
pub async fn delete_specific_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<SpecificExpenseId>,
    Query(query): Query<MonthQuery>,
) -> Response {
    delete_expense(&state, &query, |ledger, connection| {
        ledger.remove_specific(connection, expense_id)
    })
    .unwrap_or_else(|error| {
        tracing::error!("Could not delete specific expense {expense_id}: {error}");
        error.into_alert_response()
    })
}

fn delete_expense(
    state: &DeleteExpenseState,
    query: &MonthQuery,
    remove: impl FnOnce(&mut ExpenseLedger, &Connection) -> Result<(), Error>,
) -> Result<Response, Error> {
    let today = current_year_month(&state.local_timezone)?;

    let mut ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    remove(&mut *ledger, &*connection)?;

    let redirect_url = month_url(endpoints::MONTH_VIEW, query.year_month_or(today));

    Ok((HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response())
}
