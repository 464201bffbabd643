//! The page and endpoint for adding a default or specific expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    calendar::{ALL_MONTHS, YearMonth, current_year_month, month_name, parse_month, parse_year},
    endpoints,
    expense::{
        Amount, ExpenseKind, ExpenseName, NewDefaultExpense, NewSpecificExpense,
        ledger::ExpenseLedger,
        month_query::{MonthQuery, month_url},
    },
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        currency_input_styles,
    },
    navigation::NavBar,
};

/// The state needed for the new expense page and for creating expenses.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub ledger: Arc<Mutex<ExpenseLedger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating an expense.
///
/// Every field is kept as the text the user entered so the form can be shown
/// again, unchanged, next to a validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseForm {
    pub kind: ExpenseKind,
    pub name: String,
    /// The amount in dollars, e.g. "12.50".
    pub amount: String,
    /// Required for specific expenses. For default expenses, the year of the
    /// month page to return to.
    #[serde(default)]
    pub year: Option<String>,
    /// Required for specific expenses. For default expenses, the month page
    /// to return to.
    #[serde(default)]
    pub month: Option<String>,
}

/// A validated expense of either kind.
#[derive(Debug, PartialEq)]
pub enum NewExpense {
    Default(NewDefaultExpense),
    Specific(NewSpecificExpense),
}

impl ExpenseForm {
    fn blank(year_month: YearMonth) -> Self {
        Self {
            kind: ExpenseKind::Default,
            name: String::new(),
            amount: String::new(),
            year: Some(year_month.year.to_string()),
            month: Some(u8::from(year_month.month).to_string()),
        }
    }

    /// Check the form and build the expense it describes.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found in the name, the amount and,
    /// for specific expenses, the year and month.
    pub fn validate(&self) -> Result<NewExpense, Error> {
        let name = ExpenseName::new(&self.name)?;
        let amount = Amount::parse_positive(&self.amount)?;

        match self.kind {
            ExpenseKind::Default => Ok(NewExpense::Default(NewDefaultExpense { name, amount })),
            ExpenseKind::Specific => {
                let year = non_empty(&self.year).ok_or(Error::MissingExpenseMonth)?;
                let month = non_empty(&self.month).ok_or(Error::MissingExpenseMonth)?;

                Ok(NewExpense::Specific(NewSpecificExpense {
                    name,
                    amount,
                    year: parse_year(year)?,
                    month: parse_month(month)?,
                }))
            }
        }
    }

    /// The month page to show after the expense is saved, when the form does
    /// not pin one down.
    fn return_month_or(&self, fallback: YearMonth) -> YearMonth {
        MonthQuery {
            year: self.year.clone(),
            month: self.month.clone(),
        }
        .year_month_or(fallback)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

/// Render the page for adding an expense, with the year and month from the
/// query string (or the current month) filled in.
pub async fn get_new_expense_page(
    State(state): State<CreateExpenseState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let today = current_year_month(&state.local_timezone)
        .inspect_err(|error| tracing::error!("could not get the current month: {error}"))?;
    let year_month = query.year_month_or(today);

    Ok(new_expense_view(&ExpenseForm::blank(year_month)).into_response())
}

/// Handle the new expense form, redirecting to the month page of the new
/// expense on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let new_expense = match form.validate() {
        Ok(new_expense) => new_expense,
        Err(error) => {
            return new_expense_form_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    let today = match current_year_month(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => {
            tracing::error!("could not get the current month: {error}");
            return error.into_alert_response();
        }
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let result = match new_expense {
        NewExpense::Default(expense) => ledger
            .add_default(&*connection, expense)
            .map(|_| form.return_month_or(today)),
        NewExpense::Specific(expense) => ledger
            .add_specific(&*connection, expense)
            .map(|expense| YearMonth::new(expense.year, expense.month)),
    };

    match result {
        Ok(year_month) => (
            HxRedirect(month_url(endpoints::MONTH_VIEW, year_month)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not create expense from {form:?}: {error}");
            error.into_alert_response()
        }
    }
}

fn new_expense_view(form: &ExpenseForm) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();
    let form = new_expense_form_view(form, "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-xl font-bold" { "Add Expense" }
            (form)
        }
    };

    base("Add Expense", &[currency_input_styles()], &content)
}

fn new_expense_form_view(form: &ExpenseForm, error_message: &str) -> Markup {
    let is_default = form.kind == ExpenseKind::Default;
    let selected_month = form
        .month
        .as_deref()
        .and_then(|month| parse_month(month).ok());

    html! {
        form
            hx-post=(endpoints::EXPENSES_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Expense type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex items-center gap-3"
                    {
                        input
                            name="kind"
                            id="expense-kind-default"
                            type="radio"
                            value="default"
                            checked[is_default]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="expense-kind-default" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Every month"
                        }
                    }

                    div class="flex items-center gap-3"
                    {
                        input
                            name="kind"
                            id="expense-kind-specific"
                            type="radio"
                            value="specific"
                            checked[!is_default]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for="expense-kind-specific" class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "One month only"
                        }
                    }
                }
            }

            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Rent"
                    value=(form.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        value=(form.amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div class="grid grid-cols-2 gap-3"
            {
                div
                {
                    label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                    input
                        id="year"
                        type="number"
                        name="year"
                        min="1"
                        max="9999"
                        value=[form.year.as_deref()]
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                    select id="month" name="month" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for month in ALL_MONTHS {
                            option
                                value=(u8::from(month))
                                selected[selected_month == Some(month)]
                            {
                                (month_name(month))
                            }
                        }
                    }
                }
            }

            div class="text-sm text-slate-500 dark:text-slate-400"
            {
                "Expenses for every month are added to all months. "
                "Year and month place a one month expense, and choose which month to show afterwards."
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}


#[cfg(test)]
mod new_expense_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        endpoints,
        expense::{
            create::{CreateExpenseState, get_new_expense_page},
            ledger::ExpenseLedger,
            month_query::MonthQuery,
        },
        test_utils::{
            assert_checked_radio, assert_content_type, assert_form_input,
            assert_form_input_with_value, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_selected_option, assert_valid_html, must_get_form,
            parse_html_document,
        },
    };

    fn get_state() -> CreateExpenseState {
        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(Connection::open_in_memory().unwrap())),
            ledger: Arc::new(Mutex::new(ExpenseLedger::default())),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn render_page() {
        let query = MonthQuery {
            year: Some("2025".to_owned()),
            month: Some("3".to_owned()),
        };

        let response = get_new_expense_page(State(get_state()), Query(query))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
        assert_form_input(&form, "kind", "radio");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input_with_value(&form, "year", "number", "2025");
        assert_form_submit_button_with_text(&form, "Add Expense");

        assert_selected_option(&form, "month", "3");
        assert_checked_radio(&form, "kind", "default");
    }
}

#[cfg(test)]
mod create_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::Month;

    use crate::{
        expense::{
            Amount, ExpenseKind,
            create::{CreateExpenseState, ExpenseForm, create_expense_endpoint},
            ledger::ExpenseLedger,
            store::{ExpenseStore, create_expense_tables},
        },
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, must_get_form,
            parse_html_fragment,
        },
    };

    fn get_state() -> CreateExpenseState {
        let connection = Connection::open_in_memory().unwrap();
        create_expense_tables(&connection).unwrap();

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
            ledger: Arc::new(Mutex::new(ExpenseLedger::default())),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn form(kind: ExpenseKind, name: &str, amount: &str, year: &str, month: &str) -> ExpenseForm {
        ExpenseForm {
            kind,
            name: name.to_owned(),
            amount: amount.to_owned(),
            year: Some(year.to_owned()),
            month: Some(month.to_owned()),
        }
    }

    #[tokio::test]
    async fn creates_default_expense_and_redirects_to_form_month() {
        let state = get_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form(ExpenseKind::Default, "Rent", "1000", "2025", "4")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/expenses?year=2025&month=4");
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.defaults().len(), 1);
        assert_eq!(ledger.defaults()[0].amount, Amount::from_cents(100_000));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(connection.list_defaults().unwrap(), ledger.defaults());
    }

    #[tokio::test]
    async fn creates_specific_expense_and_redirects_to_its_month() {
        let state = get_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form(ExpenseKind::Specific, "Gift", "200", "2025", "Mar")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/expenses?year=2025&month=3");
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.specifics().len(), 1);
        assert_eq!(ledger.specifics()[0].month, Month::March);
        assert_eq!(
            ledger.month_view(2025, Month::March).total,
            Amount::from_cents(20_000)
        );
    }

    #[tokio::test]
    async fn zero_amount_is_rejected_without_saving() {
        let state = get_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form(ExpenseKind::Default, "Rent", "0", "2025", "3")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Amount must be greater than zero");
        assert!(state.ledger.lock().unwrap().defaults().is_empty());
        let connection = state.db_connection.lock().unwrap();
        assert!(connection.list_defaults().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let state = get_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form(ExpenseKind::Specific, "   ", "10", "2025", "3")),
        )
        .await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Expense name cannot be empty");
        assert!(state.ledger.lock().unwrap().specifics().is_empty());
    }

    #[tokio::test]
    async fn store_failure_leaves_ledger_unchanged() {
        let connection = Connection::open_in_memory().unwrap();
        // No tables, so every insert fails.
        let state = CreateExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
            ledger: Arc::new(Mutex::new(ExpenseLedger::default())),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form(ExpenseKind::Default, "Rent", "1000", "2025", "3")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(*state.ledger.lock().unwrap(), ExpenseLedger::default());
    }
}
