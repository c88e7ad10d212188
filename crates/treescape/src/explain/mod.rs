//! Prediction explanations for linear models.
//!
//! [`explain`] splits a linear regression prediction into one
//! `coefficient × value` row per feature, with one-hot column groups
//! collapsed into a single row naming the active category. The resulting
//! [`Explanation`] prints as a table and draws onto a [`Canvas`](crate::plot::Canvas).

mod format;
mod linear;

pub use format::thousands;
pub use linear::{explain, ActiveCategory, Contribution, ExplainError, Explanation, GroupContribution};
