//! regrade-core — answer evaluation and score reconciliation.
//!
//! This crate defines the quiz document model, the per-type answer
//! evaluator, the amendment resolver, and the reconciliation engine that
//! the rest of the regrade system builds on.

pub mod error;
pub mod evaluator;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod resolver;
pub mod store;
