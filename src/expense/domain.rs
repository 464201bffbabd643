//! Core expense types: validated names and amounts, ids, and the two expense records.

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};
use time::Month;

use crate::Error;

/// A validated, non-empty expense name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExpenseName(String);

impl ExpenseName {
    /// Create an expense name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyExpenseName] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyExpenseName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create an expense name without validation.
    ///
    /// The caller should ensure that the string is not empty, e.g. because it
    /// was read back from the database.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for ExpenseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The largest amount in whole currency units that a single expense may have.
const MAX_AMOUNT_UNITS: f64 = 1_000_000_000_000.0;

/// An amount of money stored as a whole number of cents.
///
/// Integer cents make every sum exact, so totals never drift the way summed
/// floats do.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Zero cents.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The number of cents in the amount.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Parse a strictly positive amount from decimal text such as "12.5",
    /// rounding to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `text` is not a finite number in a
    /// sensible range, and [Error::NonPositiveAmount] if it rounds to zero
    /// cents or less.
    pub fn parse_positive(text: &str) -> Result<Self, Error> {
        let text = text.trim();
        let invalid = || Error::InvalidAmount(text.to_owned());

        let units: f64 = text.parse().map_err(|_| invalid())?;

        if !units.is_finite() || units.abs() > MAX_AMOUNT_UNITS {
            return Err(invalid());
        }

        let cents = (units * 100.0).round() as i64;

        if cents <= 0 {
            return Err(Error::NonPositiveAmount);
        }

        Ok(Self(cents))
    }

    /// The amount repeated `count` times, saturating at the largest or
    /// smallest amount.
    pub const fn times(self, count: i64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// The amount in whole currency units, for charting.
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Addition saturates at the largest or smallest amount instead of
/// overflowing.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

/// Database identifier for a default expense.
///
/// Default and specific expenses are numbered independently, so the two id
/// types are kept apart to stop one being used in place of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultExpenseId(i64);

impl DefaultExpenseId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl Display for DefaultExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a specific expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecificExpenseId(i64);

impl SpecificExpenseId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl Display for SpecificExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense that recurs, unchanged, in every month of every year (e.g. 'Rent').
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultExpense {
    pub id: DefaultExpenseId,
    pub name: ExpenseName,
    pub amount: Amount,
}

/// A one-off expense that applies to exactly one month of one year (e.g. 'Gift').
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificExpense {
    pub id: SpecificExpenseId,
    pub name: ExpenseName,
    pub amount: Amount,
    pub year: i32,
    pub month: Month,
}

/// A validated default expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDefaultExpense {
    pub name: ExpenseName,
    pub amount: Amount,
}

/// A validated specific expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpecificExpense {
    pub name: ExpenseName,
    pub amount: Amount,
    pub year: i32,
    pub month: Month,
}

/// Whether an expense recurs monthly or belongs to a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Default,
    Specific,
}

impl ExpenseKind {
    /// The label shown to users in tables and forms.
    pub fn label(self) -> &'static str {
        match self {
            ExpenseKind::Default => "Default",
            ExpenseKind::Specific => "Specific",
        }
    }
}

#[cfg(test)]
mod expense_name_tests {
    use crate::{Error, expense::ExpenseName};

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(ExpenseName::new(""), Err(Error::EmptyExpenseName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        assert_eq!(ExpenseName::new("\n\t \r"), Err(Error::EmptyExpenseName));
    }

    #[test]
    fn new_trims_whitespace() {
        let name = ExpenseName::new("  Rent ").unwrap();

        assert_eq!(name.as_ref(), "Rent");
    }
}
