//! Group state around the engine: roster, expense and category edits.

pub mod expense_group;
