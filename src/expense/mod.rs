//! Default (every month) and specific (one month) expenses: the domain types,
//! the aggregation of expenses into monthly and yearly totals, storage, and the
//! pages and endpoints for managing them.

mod aggregation;
pub(crate) mod create;
mod delete;
mod domain;
mod ledger;
mod month_page;
mod month_query;
pub(crate) mod store;
mod year_chart;

pub use create::{create_expense_endpoint, get_new_expense_page};
pub use delete::{delete_default_expense_endpoint, delete_specific_expense_endpoint};
pub use domain::{
    Amount, DefaultExpense, DefaultExpenseId, ExpenseKind, ExpenseName, NewDefaultExpense,
    NewSpecificExpense, SpecificExpense, SpecificExpenseId,
};
pub use ledger::ExpenseLedger;
pub use month_page::get_month_page;
pub use store::create_expense_tables;
