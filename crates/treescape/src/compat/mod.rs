//! Compatibility layers for loading models from other libraries.
//!
//! # scikit-learn
//!
//! Load a `DecisionTreeRegressor` export together with its training points:
//!
//! ```no_run
//! use treescape::compat::sklearn::load_plot_document;
//!
//! let (doc, tree) = load_plot_document("plot.json")?;
//! let points = doc.points()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod sklearn;
