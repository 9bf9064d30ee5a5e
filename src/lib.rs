//! # share-ledger
//!
//! Shared expense balances and greedy settlement planning.
//!
//! Given a roster of participants and the expenses they paid for, this crate
//! computes who is owed and who owes, then proposes a short list of payments
//! that brings everyone back to zero.
//!
//! ## Architecture
//!
//! - **core**: participants, expenses, categories and balance tables
//! - **settlement**: the balance aggregator and the settlement optimizer
//! - **group**: roster, expense and category management around the engine
//! - **analysis**: display-side filtering and spending statistics
//! - **simulation**: random groups for benchmarks

pub mod analysis;
pub mod core;
pub mod group;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::{Balance, BalanceTable};
    pub use crate::core::category::Category;
    pub use crate::core::expense::{Expense, ExpenseSet};
    pub use crate::core::participant::{ParticipantName, Roster};
    pub use crate::group::expense_group::{ExpenseGroup, GroupSummary};
    pub use crate::settlement::aggregator::BalanceAggregator;
    pub use crate::settlement::optimizer::{
        SettlementInstruction, SettlementItem, SettlementMarker, SettlementOptimizer,
        SettlementPlan,
    };
}
