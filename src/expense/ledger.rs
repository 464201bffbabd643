//! The in-memory expense collections that the pages are rendered from.

use time::Month;

use crate::{
    Error,
    expense::{
        DefaultExpense, DefaultExpenseId, NewDefaultExpense, NewSpecificExpense, SpecificExpense,
        SpecificExpenseId,
        aggregation::{MonthView, YearSummary, compute_month_view, compute_year_summary},
        store::ExpenseStore,
    },
};

/// All default and specific expenses, kept in step with the expense store.
///
/// The ledger only changes after the store confirms a write, so a failed
/// write leaves it exactly as it was.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseLedger {
    defaults: Vec<DefaultExpense>,
    specifics: Vec<SpecificExpense>,
}

impl ExpenseLedger {
    /// Read every expense from `store`.
    pub fn load(store: &impl ExpenseStore) -> Result<Self, Error> {
        let defaults = store.list_defaults()?;
        let specifics = store.list_specifics()?;

        tracing::debug!(
            "Loaded {} default and {} specific expenses",
            defaults.len(),
            specifics.len()
        );

        Ok(Self {
            defaults,
            specifics,
        })
    }

    pub fn defaults(&self) -> &[DefaultExpense] {
        &self.defaults
    }

    pub fn specifics(&self) -> &[SpecificExpense] {
        &self.specifics
    }

    pub fn add_default(
        &mut self,
        store: &impl ExpenseStore,
        expense: NewDefaultExpense,
    ) -> Result<DefaultExpense, Error> {
        let expense = store.insert_default(expense)?;
        self.defaults.push(expense.clone());

        Ok(expense)
    }

    pub fn add_specific(
        &mut self,
        store: &impl ExpenseStore,
        expense: NewSpecificExpense,
    ) -> Result<SpecificExpense, Error> {
        let expense = store.insert_specific(expense)?;
        self.specifics.push(expense.clone());

        Ok(expense)
    }

    /// Delete the default expense `id`. Removing an id that does not exist
    /// does nothing.
    pub fn remove_default(
        &mut self,
        store: &impl ExpenseStore,
        id: DefaultExpenseId,
    ) -> Result<(), Error> {
        let rows_affected = store.delete_default(id)?;

        if rows_affected == 0 {
            tracing::warn!("Tried to remove default expense {id}, but it does not exist");
        }

        self.defaults.retain(|expense| expense.id != id);

        Ok(())
    }

    /// Delete the specific expense `id`. Removing an id that does not exist
    /// does nothing.
    pub fn remove_specific(
        &mut self,
        store: &impl ExpenseStore,
        id: SpecificExpenseId,
    ) -> Result<(), Error> {
        let rows_affected = store.delete_specific(id)?;

        if rows_affected == 0 {
            tracing::warn!("Tried to remove specific expense {id}, but it does not exist");
        }

        self.specifics.retain(|expense| expense.id != id);

        Ok(())
    }

    pub fn month_view(&self, year: i32, month: Month) -> MonthView<'_> {
        compute_month_view(&self.defaults, &self.specifics, year, month)
    }

    pub fn year_summary(&self, year: i32) -> YearSummary {
        compute_year_summary(&self.defaults, &self.specifics, year)
    }
}
