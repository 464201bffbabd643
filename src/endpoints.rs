//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expenses/default/{expense_id}', use [format_endpoint].

/// The root route which redirects to the month page.
pub const ROOT: &str = "/";
/// The page showing the expenses and totals for one month.
pub const MONTH_VIEW: &str = "/expenses";
/// The page for adding a default or specific expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create an expense.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to delete a default expense.
pub const DELETE_DEFAULT_EXPENSE: &str = "/api/expenses/default/{expense_id}";
/// The route to delete a specific expense.
pub const DELETE_SPECIFIC_EXPENSE: &str = "/api/expenses/specific/{expense_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/expenses/default/{expense_id}',
/// '{expense_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
