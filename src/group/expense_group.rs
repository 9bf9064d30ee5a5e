use crate::analysis::filter::ExpenseFilter;
use crate::analysis::stats::ExpenseStats;
use crate::core::balance::BalanceTable;
use crate::core::category::{Category, CategoryError, CategoryList};
use crate::core::expense::{Expense, ExpenseSet};
use crate::core::participant::{ParticipantName, Roster, RosterError};
use crate::settlement::aggregator::BalanceAggregator;
use crate::settlement::optimizer::{SettlementOptimizer, SettlementPlan};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from editing a group.
#[derive(Debug, Error)]
pub enum GroupError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error("expense description must not be empty")]
    MissingDescription,
    #[error("expense amount must be positive and finite, got {0}")]
    InvalidAmount(f64),
    #[error("expense payer must not be empty")]
    MissingPayer,
    #[error("no expense with id {0}")]
    UnknownExpense(Uuid),
}

/// Balances and settlements computed from one snapshot of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub balances: BalanceTable,
    pub settlements: SettlementPlan,
}

/// A roster, its expenses and the categories they are filed under.
///
/// Edits go through `&mut self`; every read of balances or settlements
/// recomputes from the current state, so results always reflect the last
/// completed edit.
///
/// # Examples
///
/// ```
/// use share_ledger::prelude::*;
///
/// let mut group = ExpenseGroup::new();
/// group.add_participant("Alice").unwrap();
/// group.add_participant("Bob").unwrap();
/// group
///     .add_expense(Expense::new("Alice".into(), 50.0, vec![]).with_description("Pizza"))
///     .unwrap();
///
/// let summary = group.summary();
/// assert_eq!(summary.balances.net(&"Bob".into()), -25.0);
/// assert_eq!(summary.settlements.instructions().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseGroup {
    #[serde(default, alias = "roommates")]
    participants: Roster,
    #[serde(default)]
    expenses: ExpenseSet,
    #[serde(default)]
    categories: CategoryList,
}

impl ExpenseGroup {
    /// An empty group with the default categories.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        participants: Roster,
        expenses: ExpenseSet,
        categories: CategoryList,
    ) -> Self {
        Self {
            participants,
            expenses,
            categories,
        }
    }

    pub fn add_participant(&mut self, name: impl Into<ParticipantName>) -> Result<(), GroupError> {
        self.participants.add(name.into())?;
        Ok(())
    }

    /// Remove a participant. Their expenses stay but stop counting towards
    /// anyone's balance.
    pub fn remove_participant(&mut self, name: &ParticipantName) -> bool {
        let removed = self.participants.remove(name);
        if removed {
            debug!("removed participant {}", name);
        }
        removed
    }

    /// Record an expense and return its id.
    pub fn add_expense(&mut self, expense: Expense) -> Result<Uuid, GroupError> {
        if expense.description().trim().is_empty() {
            return Err(GroupError::MissingDescription);
        }
        if !expense.amount().is_finite() || expense.amount() <= 0.0 {
            return Err(GroupError::InvalidAmount(expense.amount()));
        }
        if expense.paid_by().is_blank() {
            return Err(GroupError::MissingPayer);
        }
        let id = expense.id();
        self.expenses.add(expense);
        Ok(id)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<Expense, GroupError> {
        self.expenses
            .remove(id)
            .ok_or(GroupError::UnknownExpense(id))
    }

    pub fn add_category(&mut self, name: impl Into<Category>) -> Result<(), GroupError> {
        self.categories.add(name.into())?;
        Ok(())
    }

    pub fn participants(&self) -> &Roster {
        &self.participants
    }

    pub fn expenses(&self) -> &ExpenseSet {
        &self.expenses
    }

    pub fn categories(&self) -> &CategoryList {
        &self.categories
    }

    pub fn balances(&self) -> BalanceTable {
        BalanceAggregator::compute_balances(
            self.participants.as_slice(),
            self.expenses.expenses(),
        )
    }

    pub fn settlements(&self) -> SettlementPlan {
        self.summary().settlements
    }

    /// Run the aggregator, then the optimizer, on the current state.
    pub fn summary(&self) -> GroupSummary {
        let balances = self.balances();
        let settlements =
            SettlementOptimizer::compute_settlements(self.participants.as_slice(), &balances);
        GroupSummary {
            balances,
            settlements,
        }
    }

    pub fn stats(&self) -> ExpenseStats {
        ExpenseStats::compute(self.participants.as_slice(), self.expenses.expenses())
    }

    /// Statistics over only the expenses the filter lets through.
    pub fn filtered_stats(&self, filter: &ExpenseFilter) -> ExpenseStats {
        ExpenseStats::compute(self.participants.as_slice(), self.filtered(filter))
    }

    pub fn filtered(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        filter.apply(self.expenses.expenses())
    }
}
