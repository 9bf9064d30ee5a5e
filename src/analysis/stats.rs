use crate::core::category::Category;
use crate::core::expense::Expense;
use crate::core::participant::ParticipantName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The single largest expense seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighestExpense {
    pub amount: f64,
    pub description: String,
}

/// Spending summary over a set of expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseStats {
    /// Sum of all amounts.
    pub total: f64,
    /// Per-category totals.
    pub by_category: BTreeMap<Category, f64>,
    /// Largest positive expense; the first one wins a tie.
    pub highest: Option<HighestExpense>,
    /// `total` spread evenly over the roster, 0 for an empty roster.
    pub average_per_participant: f64,
}

impl ExpenseStats {
    pub fn compute<'a, I>(roster: &[ParticipantName], expenses: I) -> Self
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut stats = Self::default();
        let mut highest_amount = 0.0;

        for expense in expenses {
            let amount = expense.amount();
            stats.total += amount;
            *stats
                .by_category
                .entry(expense.category().clone())
                .or_insert(0.0) += amount;

            if amount > highest_amount {
                highest_amount = amount;
                stats.highest = Some(HighestExpense {
                    amount,
                    description: expense.description().to_string(),
                });
            }
        }

        if !roster.is_empty() {
            stats.average_per_participant = stats.total / roster.len() as f64;
        }
        stats
    }

    /// Share of `total` spent in a category, as a fraction.
    pub fn category_share(&self, category: &Category) -> f64 {
        if self.total == 0.0 {
            return 0.0;
        }
        self.by_category.get(category).copied().unwrap_or(0.0) / self.total
    }
}

impl std::fmt::Display for ExpenseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Expense Statistics ===")?;
        writeln!(f, "Total:             {:.2}", self.total)?;
        writeln!(f, "Per participant:   {:.2}", self.average_per_participant)?;
        if let Some(highest) = &self.highest {
            writeln!(
                f,
                "Highest:           {:.2} ({})",
                highest.amount, highest.description
            )?;
        }

        writeln!(f, "\nBy Category:")?;
        for (category, amount) in &self.by_category {
            writeln!(
                f,
                "  {:<16} {:>10.2}  {:>5.1}%",
                category,
                amount,
                self.category_share(category) * 100.0
            )?;
        }
        Ok(())
    }
}
