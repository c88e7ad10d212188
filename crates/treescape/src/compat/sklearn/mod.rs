//! scikit-learn JSON export support.
//!
//! This module provides parsing of fitted scikit-learn estimators dumped to
//! JSON and conversion to native treescape types.

mod convert;
mod io;
mod json;

pub use convert::ConversionError;
pub use io::{load_linear_model, load_plot_document, read_json, LoadError};
pub use json::*;
