use crate::core::balance::BalanceTable;
use crate::core::expense::Expense;
use crate::core::participant::ParticipantName;
use log::{debug, trace};

/// Folds expenses into per-participant balances.
///
/// Stateless: every call recomputes the table from scratch, so it is safe
/// to call repeatedly and from any number of threads.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Compute `paid`, `owes` and `balance` for every roster participant.
    ///
    /// # Algorithm
    ///
    /// 1. Start every roster participant at `(0, 0, 0)`, in roster order.
    /// 2. For each expense, in order: the split set is the expense's own, or
    ///    the whole roster when it is empty. The payer's `paid` grows by the
    ///    amount; each split-set member's `owes` grows by
    ///    `amount / |split set|`.
    /// 3. `balance = paid - owes`.
    ///
    /// Names missing from the roster contribute nothing. The divisor still
    /// counts them, as it counts repeated names.
    ///
    /// An empty roster with an empty split set has no one to share with;
    /// the split half of that expense is skipped.
    pub fn compute_balances(roster: &[ParticipantName], expenses: &[Expense]) -> BalanceTable {
        let mut table = BalanceTable::with_participants(roster);

        for expense in expenses {
            let amount = expense.amount();
            let split_set = if expense.splits_with_everyone() {
                roster
            } else {
                expense.split_with()
            };

            match table.get_mut(expense.paid_by()) {
                Some(payer) => payer.paid += amount,
                None => trace!(
                    "payer {} of expense {} is not on the roster",
                    expense.paid_by(),
                    expense.id()
                ),
            }

            if split_set.is_empty() {
                debug!(
                    "expense {} has no one to split with; share skipped",
                    expense.id()
                );
                continue;
            }

            let share = amount / split_set.len() as f64;
            for name in split_set {
                if let Some(member) = table.get_mut(name) {
                    member.owes += share;
                }
            }
        }

        for balance in table.entries_mut() {
            balance.balance = balance.paid - balance.owes;
        }
        table
    }
}
