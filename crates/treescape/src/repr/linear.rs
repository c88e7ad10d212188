//! Linear regression model data structure.

use ndarray::{Array1, ArrayView1};

/// Fitted linear regression: one named coefficient per feature plus an intercept.
///
/// ```text
/// prediction = intercept + Σ coefficients[i] * x[i]
/// ```
///
/// # Example
///
/// ```
/// use treescape::repr::LinearModel;
/// use ndarray::array;
///
/// let model = LinearModel::new(
///     vec!["bedrooms".into(), "sqft_living".into()],
///     array![-20_000.0, 300.0],
///     50_000.0,
/// ).unwrap();
///
/// assert_eq!(model.n_features(), 2);
/// assert_eq!(model.predict(array![3.0, 1_000.0].view()), 290_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    feature_names: Vec<String>,
    coefficients: Array1<f64>,
    intercept: f64,
}

/// Shape error when assembling a [`LinearModel`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{n_names} feature names for {n_coefficients} coefficients")]
pub struct LinearShapeError {
    pub n_names: usize,
    pub n_coefficients: usize,
}

impl LinearModel {
    /// Create a model. The number of names must match the number of coefficients.
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Array1<f64>,
        intercept: f64,
    ) -> Result<Self, LinearShapeError> {
        if feature_names.len() != coefficients.len() {
            return Err(LinearShapeError {
                n_names: feature_names.len(),
                n_coefficients: coefficients.len(),
            });
        }
        Ok(Self {
            feature_names,
            coefficients,
            intercept,
        })
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Index of the feature with the given name.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|n| n == name)
    }

    /// Predict for a single sample. `sample.len()` must equal `n_features()`.
    pub fn predict(&self, sample: ArrayView1<'_, f64>) -> f64 {
        debug_assert_eq!(sample.len(), self.n_features());
        self.intercept + self.coefficients.dot(&sample)
    }
}
