//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_default_expense_endpoint,
        delete_specific_expense_endpoint, get_month_page, get_new_expense_page,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::MONTH_VIEW, get(get_month_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::EXPENSES_API, post(create_expense_endpoint))
        .route(
            endpoints::DELETE_DEFAULT_EXPENSE,
            delete(delete_default_expense_endpoint),
        )
        .route(
            endpoints::DELETE_SPECIFIC_EXPENSE,
            delete(delete_specific_expense_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the month page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::MONTH_VIEW)
}
