//! Random expense groups for benchmarks and load testing.

use crate::core::category::{Category, CategoryList, DEFAULT_CATEGORIES};
use crate::core::expense::{Expense, ExpenseSet};
use crate::core::participant::{ParticipantName, Roster};
use crate::group::expense_group::ExpenseGroup;
use chrono::{Duration, Utc};
use rand::Rng;

/// Configuration for generating a random group.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of participants on the roster.
    pub participant_count: usize,
    /// Number of expenses to record.
    pub expense_count: usize,
    /// Minimum expense amount.
    pub min_amount: f64,
    /// Maximum expense amount.
    pub max_amount: f64,
    /// Probability that an expense names an explicit split set instead of
    /// splitting across everyone.
    pub partial_split_ratio: f64,
    /// Expense dates are spread over this many days back from today.
    pub days_back: i64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            participant_count: 5,
            expense_count: 20,
            min_amount: 1.0,
            max_amount: 500.0,
            partial_split_ratio: 0.5,
            days_back: 30,
        }
    }
}

/// Generate a random group. Amounts are whole cents.
pub fn generate_random_group(config: &GroupConfig) -> ExpenseGroup {
    let mut rng = rand::thread_rng();

    let names: Vec<ParticipantName> = (0..config.participant_count)
        .map(|i| ParticipantName::new(format!("P-{:03}", i)))
        .collect();
    let roster = Roster::from_names(names.iter().cloned()).unwrap_or_default();

    let mut expenses = ExpenseSet::new();
    if !names.is_empty() {
        let today = Utc::now().date_naive();
        for i in 0..config.expense_count {
            let payer = names[rng.gen_range(0..names.len())].clone();

            let amount = if config.max_amount > config.min_amount {
                rng.gen_range(config.min_amount..config.max_amount)
            } else {
                config.min_amount
            };
            let amount = (amount * 100.0).round() / 100.0;

            let split_with = if rng.gen_bool(config.partial_split_ratio.clamp(0.0, 1.0)) {
                names
                    .iter()
                    .filter(|_| rng.gen_bool(0.5))
                    .cloned()
                    .collect()
            } else {
                Vec::new()
            };

            let category = DEFAULT_CATEGORIES[rng.gen_range(0..DEFAULT_CATEGORIES.len())];
            let days_ago = rng.gen_range(0..=config.days_back.max(0));

            expenses.add(
                Expense::new(payer, amount, split_with)
                    .with_description(format!("Expense #{}", i + 1))
                    .with_category(Category::new(category))
                    .with_date(today - Duration::days(days_ago)),
            );
        }
    }

    ExpenseGroup::from_parts(roster, expenses, CategoryList::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_random_group_generation() {
        let config = GroupConfig {
            participant_count: 4,
            expense_count: 12,
            ..Default::default()
        };

        let group = generate_random_group(&config);
        assert_eq!(group.participants().len(), 4);
        assert_eq!(group.expenses().len(), 12);
        for expense in group.expenses().expenses() {
            assert!(expense.amount() >= config.min_amount);
            assert!(expense.amount() <= config.max_amount);
        }
    }

    #[test]
    fn test_random_group_balances_to_zero() {
        let config = GroupConfig {
            participant_count: 20,
            expense_count: 100,
            ..Default::default()
        };

        let group = generate_random_group(&config);
        let balances = group.balances();
        assert_abs_diff_eq!(balances.total_balance(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_no_participants_no_expenses() {
        let config = GroupConfig {
            participant_count: 0,
            ..Default::default()
        };
        let group = generate_random_group(&config);
        assert!(group.expenses().is_empty());
    }
}
