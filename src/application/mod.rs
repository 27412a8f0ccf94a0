//! Application layer: evaluating candidate payments against limits.
//!
//! `evaluator` holds the single-limit rule (window, aggregate, thresholds);
//! `limit_set` checks a candidate against several named limits at once.

pub mod evaluator;
pub mod limit_set;
