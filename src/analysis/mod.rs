//! Display-side helpers: expense filtering and spending statistics.

pub mod filter;
pub mod stats;
