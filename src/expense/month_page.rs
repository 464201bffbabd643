//! The month page: the expenses that apply to one month, its totals and an overview of the year.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    calendar::{ALL_MONTHS, YearMonth, current_year_month, month_name},
    endpoints::{self, format_endpoint},
    expense::{
        Amount, ExpenseKind,
        aggregation::{MonthExpense, MonthView, YearSummary},
        ledger::ExpenseLedger,
        month_query::{MonthQuery, QueryDecision, month_query_string, month_url, normalize_query},
        year_chart::{year_chart, year_chart_container, year_chart_scripts},
    },
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
};

/// The max number of graphemes of an expense name to show in the table before
/// truncating it.
const MAX_NAME_GRAPHEMES: usize = 32;

/// The state needed for the month page.
#[derive(Debug, Clone)]
pub struct MonthPageState {
    pub ledger: Arc<Mutex<ExpenseLedger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for MonthPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the expenses and totals for the month in the query string.
///
/// Requests without a canonical `year` and `month` are redirected to one
/// that has them, defaulting to the current month.
pub async fn get_month_page(
    State(state): State<MonthPageState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let today = current_year_month(&state.local_timezone)
        .inspect_err(|error| tracing::error!("could not get the current month: {error}"))?;

    let year_month = match normalize_query(&query, today, endpoints::MONTH_VIEW) {
        QueryDecision::Normalized(year_month) => year_month,
        QueryDecision::Redirect(redirect_url) => {
            return Ok(Redirect::to(&redirect_url).into_response());
        }
    };

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let view = ledger.month_view(year_month.year, year_month.month);
    let summary = ledger.year_summary(year_month.year);

    Ok(month_page_view(&view, &summary, today).into_response())
}

/// An expense row in the month table.
struct ExpenseTableRow {
    name: String,
    /// The full name when `name` has been truncated.
    full_name: Option<String>,
    kind: ExpenseKind,
    amount: Amount,
    delete_url: String,
}

impl ExpenseTableRow {
    fn new(expense: &MonthExpense<'_>) -> Self {
        let (year, month) = expense.year_month();
        let delete_endpoint = match expense {
            MonthExpense::Default { expense, .. } => {
                format_endpoint(endpoints::DELETE_DEFAULT_EXPENSE, expense.id.as_i64())
            }
            MonthExpense::Specific(expense) => {
                format_endpoint(endpoints::DELETE_SPECIFIC_EXPENSE, expense.id.as_i64())
            }
        };
        let (name, full_name) = truncate_name(expense.name().as_ref());

        Self {
            name,
            full_name: full_name.map(str::to_owned),
            kind: expense.kind(),
            amount: expense.amount(),
            delete_url: format!(
                "{delete_endpoint}?{}",
                month_query_string(YearMonth::new(year, month))
            ),
        }
    }
}

fn truncate_name(name: &str) -> (String, Option<&str>) {
    let name_length = name.graphemes(true).count();

    if name_length <= MAX_NAME_GRAPHEMES {
        (name.to_owned(), None)
    } else {
        let truncated: String = name
            .graphemes(true)
            .take(MAX_NAME_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(name))
    }
}

fn month_page_view(view: &MonthView<'_>, summary: &YearSummary, today: YearMonth) -> Markup {
    let year_month = YearMonth::new(view.year, view.month);
    let nav_bar = NavBar::new(endpoints::MONTH_VIEW).into_html();
    let new_expense_url = month_url(endpoints::NEW_EXPENSE_VIEW, year_month);
    let rows: Vec<ExpenseTableRow> = view.expenses.iter().map(ExpenseTableRow::new).collect();
    let chart = year_chart(summary);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { (year_month) }

                    a href=(new_expense_url) class=(LINK_STYLE) { "Add Expense" }
                }

                (month_navigation(year_month, today))

                (summary_cards(view, summary.grand_total))

                (expense_table(&rows, &new_expense_url))

                (year_overview_table(summary, year_month))

                (year_chart_container())
            }
        }
    );

    base(&year_month.to_string(), &year_chart_scripts(&chart), &content)
}

fn month_navigation(year_month: YearMonth, today: YearMonth) -> Markup {
    let previous_url = year_month
        .previous()
        .map(|previous| month_url(endpoints::MONTH_VIEW, previous));
    let next_url = year_month
        .next()
        .map(|next| month_url(endpoints::MONTH_VIEW, next));
    let today_url = (year_month != today).then(|| month_url(endpoints::MONTH_VIEW, today));

    html!(
        nav class="flex flex-wrap items-center justify-between gap-4" aria-label="Month"
        {
            div class="flex gap-4"
            {
                @if let Some(url) = previous_url {
                    a href=(url) class=(LINK_STYLE) rel="prev" { "Previous month" }
                }

                @if let Some(url) = today_url {
                    a href=(url) class=(LINK_STYLE) { "This month" }
                }

                @if let Some(url) = next_url {
                    a href=(url) class=(LINK_STYLE) rel="next" { "Next month" }
                }
            }

            form
                method="get"
                action=(endpoints::MONTH_VIEW)
                class="flex items-center gap-2"
            {
                label for="month" class="sr-only" { "Month" }
                select id="month" name="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for month in ALL_MONTHS {
                        option
                            value=(u8::from(month))
                            selected[month == year_month.month]
                        {
                            (month_name(month))
                        }
                    }
                }

                label for="year" class="sr-only" { "Year" }
                input
                    id="year"
                    type="number"
                    name="year"
                    value=(year_month.year)
                    min="1"
                    max="9999"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                button type="submit" class=(LINK_STYLE) { "Go" }
            }
        }
    )
}

fn summary_cards(view: &MonthView<'_>, grand_total: Amount) -> Markup {
    let card = |id: &str, label: &str, amount: Amount| {
        html!(
            div class=(CARD_STYLE) data-summary=(id)
            {
                h2 class="text-sm text-slate-500 dark:text-slate-400" { (label) }
                p class="text-2xl font-semibold tabular-nums" { (format_currency(amount)) }
            }
        )
    };

    html!(
        section class="grid grid-cols-2 lg:grid-cols-4 gap-4"
        {
            (card("defaults-total", "Defaults", view.defaults_total))
            (card("specifics-total", "Specific total", view.specifics_total))
            (card("month-total", "Monthly total", view.total))
            (card("grand-total", &format!("Projected total for {}", view.year), grand_total))
        }
    )
}

fn expense_table(rows: &[ExpenseTableRow], new_expense_url: &str) -> Markup {
    let table_row = |row: &ExpenseTableRow| {
        let confirm_message = format!(
            "Are you sure you want to delete the {} expense '{}'? This cannot be undone.",
            row.kind.label().to_lowercase(),
            row.full_name.as_deref().unwrap_or(&row.name)
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th
                    scope="row"
                    class="px-6 py-4 font-medium text-slate-900 whitespace-nowrap dark:text-white"
                    title=[row.full_name.as_deref()]
                {
                    (row.name)
                }

                td class=(TABLE_CELL_STYLE) { (row.kind.label()) }

                td class="px-6 py-4 text-right tabular-nums" { (format_currency(row.amount)) }

                td class=(TABLE_CELL_STYLE)
                {
                    button
                        hx-delete=(row.delete_url)
                        hx-confirm=(confirm_message)
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        )
    };

    html!(
        section class="w-full overflow-x-auto"
        {
            table id="month-expenses" class="w-full text-sm text-left text-slate-500 dark:text-slate-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (table_row(row))
                    }

                    @if rows.is_empty() {
                        tr
                        {
                            td
                                colspan="4"
                                class="px-6 py-4 text-center text-slate-500 dark:text-slate-400"
                            {
                                "No expenses for this month. Add an expense "
                                a href=(new_expense_url) class=(LINK_STYLE) { "here" }
                                "."
                            }
                        }
                    }
                }
            }
        }
    )
}

fn year_overview_table(summary: &YearSummary, selected: YearMonth) -> Markup {
    html!(
        section class="w-full overflow-x-auto"
        {
            h2 class="text-lg font-semibold mb-2" { "Year overview " (summary.year) }

            table id="year-overview" class="w-full text-sm text-left text-slate-500 dark:text-slate-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                        th scope="col" class="px-6 py-3 text-right" { "Defaults" }
                        th scope="col" class="px-6 py-3 text-right" { "Specific" }
                        th scope="col" class="px-6 py-3 text-right" { "Total" }
                    }
                }

                tbody
                {
                    @for totals in &summary.months {
                        @let is_selected = totals.month == selected.month;
                        tr
                            class=(TABLE_ROW_STYLE)
                            aria-current=[is_selected.then_some("date")]
                        {
                            th scope="row" class=(TABLE_CELL_STYLE)
                            {
                                a
                                    href=(month_url(endpoints::MONTH_VIEW, YearMonth::new(summary.year, totals.month)))
                                    class=(LINK_STYLE)
                                {
                                    (month_name(totals.month))
                                }
                            }
                            td class="px-6 py-3 text-right tabular-nums" { (format_currency(totals.defaults_total)) }
                            td class="px-6 py-3 text-right tabular-nums" { (format_currency(totals.specifics_total)) }
                            td class="px-6 py-3 text-right tabular-nums" { (format_currency(totals.total)) }
                        }
                    }
                }

                tfoot
                {
                    tr class="font-semibold text-slate-900 dark:text-white"
                    {
                        th scope="row" class=(TABLE_CELL_STYLE) colspan="3" { "Grand total" }
                        td class="px-6 py-3 text-right tabular-nums" data-grand-total
                        {
                            (format_currency(summary.grand_total))
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::{StatusCode, header::LOCATION},
    };
    use rusqlite::Connection;
    use scraper::{ElementRef, Html, Selector};
    use time::Month;

    use crate::{
        calendar::current_year_month,
        expense::{
            Amount, ExpenseName, NewDefaultExpense, NewSpecificExpense,
            ledger::ExpenseLedger,
            month_page::{MonthPageState, get_month_page, truncate_name},
            month_query::MonthQuery,
            store::create_expense_tables,
        },
        html::format_currency,
        test_utils::{
            assert_content_type, assert_valid_html, get_summary_value, parse_html_document,
        },
    };

    fn get_state_with_rent_and_gift() -> MonthPageState {
        let connection = Connection::open_in_memory().unwrap();
        create_expense_tables(&connection).unwrap();
        let mut ledger = ExpenseLedger::default();
        ledger
            .add_default(
                &connection,
                NewDefaultExpense {
                    name: ExpenseName::new("Rent").unwrap(),
                    amount: Amount::from_cents(100_000),
                },
            )
            .unwrap();
        ledger
            .add_specific(
                &connection,
                NewSpecificExpense {
                    name: ExpenseName::new("Gift").unwrap(),
                    amount: Amount::from_cents(20_000),
                    year: 2025,
                    month: Month::March,
                },
            )
            .unwrap();

        MonthPageState {
            ledger: Arc::new(Mutex::new(ledger)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn query(year: &str, month: &str) -> Query<MonthQuery> {
        Query(MonthQuery {
            year: Some(year.to_owned()),
            month: Some(month.to_owned()),
        })
    }

    #[tokio::test]
    async fn shows_defaults_then_specifics_for_month() {
        let state = get_state_with_rent_and_gift();

        let response = get_month_page(State(state), query("2025", "3"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let rows = must_get_expense_rows(&html);
        assert_eq!(rows.len(), 2, "want 2 expense rows, got {}", rows.len());
        assert_row(&rows[0], "Rent", "Default", Amount::from_cents(100_000));
        assert_row(&rows[1], "Gift", "Specific", Amount::from_cents(20_000));
        assert_summary(&html, "month-total", Amount::from_cents(120_000));
        assert_summary(&html, "defaults-total", Amount::from_cents(100_000));
        assert_summary(&html, "specifics-total", Amount::from_cents(20_000));
        assert_summary(&html, "grand-total", Amount::from_cents(1_220_000));
    }

    #[tokio::test]
    async fn other_month_excludes_specific_expense() {
        let state = get_state_with_rent_and_gift();

        let response = get_month_page(State(state), query("2025", "4"))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let rows = must_get_expense_rows(&html);
        assert_eq!(rows.len(), 1, "want 1 expense row, got {}", rows.len());
        assert_row(&rows[0], "Rent", "Default", Amount::from_cents(100_000));
        assert_summary(&html, "month-total", Amount::from_cents(100_000));
    }

    #[tokio::test]
    async fn delete_buttons_target_the_right_id_namespace() {
        let state = get_state_with_rent_and_gift();

        let response = get_month_page(State(state), query("2025", "3"))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let selector = Selector::parse("#month-expenses button[hx-delete]").unwrap();
        let urls: Vec<&str> = html
            .select(&selector)
            .filter_map(|button| button.value().attr("hx-delete"))
            .collect();
        assert_eq!(
            urls,
            [
                "/api/expenses/default/1?year=2025&month=3",
                "/api/expenses/specific/1?year=2025&month=3"
            ]
        );
        let confirm = html
            .select(&selector)
            .next()
            .and_then(|button| button.value().attr("hx-confirm"))
            .expect("delete button should ask for confirmation");
        assert!(confirm.contains("'Rent'"), "got confirm message {confirm:?}");
    }

    #[tokio::test]
    async fn year_overview_sums_to_grand_total() {
        let state = get_state_with_rent_and_gift();

        let response = get_month_page(State(state), query("2025", "3"))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let row_selector = Selector::parse("#year-overview tbody tr").unwrap();
        assert_eq!(html.select(&row_selector).count(), 12);
        let grand_total = html
            .select(&Selector::parse("#year-overview [data-grand-total]").unwrap())
            .next()
            .expect("grand total cell missing")
            .text()
            .collect::<String>();
        assert_eq!(grand_total.trim(), "$12,200.00");
    }

    #[tokio::test]
    async fn empty_month_shows_add_expense_link() {
        let state = MonthPageState {
            ledger: Arc::new(Mutex::new(ExpenseLedger::default())),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_month_page(State(state), query("2025", "3"))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let cell = html
            .select(&Selector::parse("#month-expenses td[colspan='4'] a").unwrap())
            .next()
            .expect("no link to add an expense in the empty table");
        assert_eq!(
            cell.value().attr("href"),
            Some("/expenses/new?year=2025&month=3")
        );
        assert_summary(&html, "month-total", Amount::ZERO);
    }

    #[tokio::test]
    async fn redirects_month_name_to_canonical_url() {
        let state = get_state_with_rent_and_gift();

        let response = get_month_page(State(state), query("2025", "March"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/expenses?year=2025&month=3"
        );
    }

    #[tokio::test]
    async fn redirects_missing_query_to_current_month() {
        let state = get_state_with_rent_and_gift();
        let today = current_year_month("Etc/UTC").unwrap();

        let response = get_month_page(State(state), Query(MonthQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let want = format!(
            "/expenses?year={}&month={}",
            today.year,
            u8::from(today.month)
        );
        assert_eq!(response.headers().get(LOCATION).unwrap(), want.as_str());
    }

    #[tokio::test]
    async fn fails_on_invalid_timezone() {
        let mut state = get_state_with_rent_and_gift();
        state.local_timezone = "Not/AZone".to_owned();

        let result = get_month_page(State(state), query("2025", "3")).await;

        assert!(result.is_err());
    }

    #[test]
    fn truncates_long_names_by_grapheme() {
        let long_name = "🏠".repeat(40);

        let (name, full_name) = truncate_name(&long_name);

        assert_eq!(name, format!("{}...", "🏠".repeat(29)));
        assert_eq!(full_name, Some(long_name.as_str()));
        assert_eq!(truncate_name("Rent"), ("Rent".to_owned(), None));
    }

    #[track_caller]
    fn must_get_expense_rows(html: &Html) -> Vec<ElementRef<'_>> {
        let selector = Selector::parse("#month-expenses tbody tr").unwrap();
        html.select(&selector)
            .filter(|row| row.select(&Selector::parse("td[colspan]").unwrap()).next().is_none())
            .collect()
    }

    #[track_caller]
    fn assert_row(row: &ElementRef<'_>, want_name: &str, want_kind: &str, want_amount: Amount) {
        let cell_text = |selector: &str| {
            row.select(&Selector::parse(selector).unwrap())
                .map(|cell| cell.text().collect::<String>().trim().to_owned())
                .collect::<Vec<_>>()
        };
        let name = cell_text("th");
        let cells = cell_text("td");

        assert_eq!(name, [want_name]);
        assert_eq!(cells[0], want_kind);
        assert_eq!(cells[1], format_currency(want_amount));
    }

    #[track_caller]
    fn assert_summary(html: &Html, key: &str, want: Amount) {
        assert_eq!(
            get_summary_value(html, key),
            format_currency(want),
            "summary card {key}"
        );
    }
}
