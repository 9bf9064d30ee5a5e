//! Synthetic data generation.

pub mod random_group;
