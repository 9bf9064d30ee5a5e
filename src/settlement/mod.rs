//! The balance and settlement engine.
//!
//! [`aggregator::BalanceAggregator`] turns a roster and expenses into a
//! balance table; [`optimizer::SettlementOptimizer`] turns that table into
//! a settlement plan. Both are pure and rerun in full after every change.

pub mod aggregator;
pub mod optimizer;
pub mod rounding;
