//! Combines default and specific expenses into month views, year summaries and grand totals.
//!
//! Everything here is a pure function of its inputs. Totals are exact sums of
//! integer cents.

use time::Month;

use crate::{
    calendar::ALL_MONTHS,
    expense::{Amount, DefaultExpense, ExpenseKind, ExpenseName, SpecificExpense},
};

/// An expense as it appears in a particular month.
///
/// Default expenses carry the year and month they are shown under, since they
/// have no date of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthExpense<'a> {
    Default {
        expense: &'a DefaultExpense,
        year: i32,
        month: Month,
    },
    Specific(&'a SpecificExpense),
}

impl MonthExpense<'_> {
    pub fn name(&self) -> &ExpenseName {
        match self {
            MonthExpense::Default { expense, .. } => &expense.name,
            MonthExpense::Specific(expense) => &expense.name,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            MonthExpense::Default { expense, .. } => expense.amount,
            MonthExpense::Specific(expense) => expense.amount,
        }
    }

    pub fn kind(&self) -> ExpenseKind {
        match self {
            MonthExpense::Default { .. } => ExpenseKind::Default,
            MonthExpense::Specific(_) => ExpenseKind::Specific,
        }
    }

    /// The year and month the expense is shown under.
    pub fn year_month(&self) -> (i32, Month) {
        match self {
            MonthExpense::Default { year, month, .. } => (*year, *month),
            MonthExpense::Specific(expense) => (expense.year, expense.month),
        }
    }
}

/// The expenses that apply to one month and their totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView<'a> {
    pub year: i32,
    pub month: Month,
    /// Every default expense, then the specific expenses for this month, each
    /// group in insertion order.
    pub expenses: Vec<MonthExpense<'a>>,
    pub defaults_total: Amount,
    pub specifics_total: Amount,
    /// `defaults_total + specifics_total`.
    pub total: Amount,
}

/// Compute the expenses and totals for `month` of `year`.
pub fn compute_month_view<'a>(
    defaults: &'a [DefaultExpense],
    specifics: &'a [SpecificExpense],
    year: i32,
    month: Month,
) -> MonthView<'a> {
    let in_month: Vec<&SpecificExpense> = specifics
        .iter()
        .filter(|expense| expense.year == year && expense.month == month)
        .collect();

    let defaults_total = sum_defaults(defaults);
    let specifics_total = in_month.iter().map(|expense| expense.amount).sum();

    let expenses = defaults
        .iter()
        .map(|expense| MonthExpense::Default {
            expense,
            year,
            month,
        })
        .chain(in_month.into_iter().map(MonthExpense::Specific))
        .collect();

    MonthView {
        year,
        month,
        expenses,
        defaults_total,
        specifics_total,
        total: defaults_total + specifics_total,
    }
}

/// The projected spending for `year`: twelve months of every default expense
/// plus each specific expense dated in `year`.
pub fn compute_grand_total(
    defaults: &[DefaultExpense],
    specifics: &[SpecificExpense],
    year: i32,
) -> Amount {
    let specifics_total: Amount = specifics
        .iter()
        .filter(|expense| expense.year == year)
        .map(|expense| expense.amount)
        .sum();

    sum_defaults(defaults).times(12) + specifics_total
}

/// The totals for one month of a [YearSummary].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthTotals {
    pub month: Month,
    pub defaults_total: Amount,
    pub specifics_total: Amount,
    pub total: Amount,
}

/// Month by month totals for a whole year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSummary {
    pub year: i32,
    /// One entry per month, January first.
    pub months: Vec<MonthTotals>,
    /// From [compute_grand_total]. Matches the sum of the twelve month totals.
    pub grand_total: Amount,
}

/// Compute the totals of every month in `year`.
pub fn compute_year_summary(
    defaults: &[DefaultExpense],
    specifics: &[SpecificExpense],
    year: i32,
) -> YearSummary {
    let months: Vec<MonthTotals> = ALL_MONTHS
        .into_iter()
        .map(|month| {
            let view = compute_month_view(defaults, specifics, year, month);

            MonthTotals {
                month,
                defaults_total: view.defaults_total,
                specifics_total: view.specifics_total,
                total: view.total,
            }
        })
        .collect();

    YearSummary {
        year,
        months,
        grand_total: compute_grand_total(defaults, specifics, year),
    }
}

fn sum_defaults(defaults: &[DefaultExpense]) -> Amount {
    defaults.iter().map(|expense| expense.amount).sum()
}
