//! Foundational types: participants, expenses, categories and balances.

pub mod balance;
pub mod category;
pub mod expense;
pub mod participant;
