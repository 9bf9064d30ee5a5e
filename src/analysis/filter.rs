use crate::core::category::Category;
use crate::core::expense::Expense;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// From one calendar month before `today` through `today`.
    ///
    /// Month-end days clamp, so March 31 goes back to the last day of
    /// February.
    pub fn last_month(today: NaiveDate) -> Self {
        let start = today.checked_sub_months(Months::new(1)).unwrap_or(today);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which categories pass the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

/// Display-side expense filter. Never affects balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub category: CategoryFilter,
    pub date_range: Option<DateRange>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = CategoryFilter::Only(category);
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.matches(expense.category())
            && self
                .date_range
                .map_or(true, |range| range.contains(expense.date()))
    }

    /// Matching expenses, in their original order.
    pub fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses.iter().filter(|e| self.matches(e)).collect()
    }
}
