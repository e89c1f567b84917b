//! Preprocessing transformers: feature standardization and category
//! encoding.
//!
//! Both transformers are fitted once per training run and reused,
//! never refitted, when scoring new prediction requests.
//!
//! # Example
//!
//! ```
//! use postura::preprocessing::StandardScaler;
//! use postura::primitives::Matrix;
//! use postura::traits::Transformer;
//!
//! let data = Matrix::from_vec(4, 2, vec![
//!     1.0, 100.0,
//!     2.0, 200.0,
//!     3.0, 300.0,
//!     4.0, 400.0,
//! ]).expect("valid matrix dimensions");
//!
//! let mut scaler = StandardScaler::new();
//! let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
//! assert!(scaled.get(0, 0).abs() < 2.0);
//! ```

use crate::error::{PosturaError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Near-zero variance cutoff: below this the column is passed through
/// centered with scale factor 1.
const MIN_STD: f32 = 1e-10;

/// Standardizes features by removing mean and scaling to unit variance.
///
/// The standard score of a sample x is: z = (x - mean) / std.
/// Columns whose training-partition standard deviation is (near) zero are
/// only centered, never divided.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each feature (computed during fit).
    mean: Option<Vec<f32>>,
    /// Standard deviation of each feature (computed during fit).
    std: Option<Vec<f32>>,
}

impl StandardScaler {
    /// Creates a new unfitted `StandardScaler`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    /// Returns the mean of each feature.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn mean(&self) -> &[f32] {
        self.mean
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns the standard deviation of each feature.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn std(&self) -> &[f32] {
        self.std
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }
}

impl Transformer for StandardScaler {
    /// Computes the mean and standard deviation of each feature.
    fn fit(&mut self, x: &Matrix<f32>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err("Cannot fit with zero samples".into());
        }

        // Population statistics (divide by n, not n-1)
        let mut mean = Vec::with_capacity(n_features);
        let mut std = Vec::with_capacity(n_features);
        for j in 0..n_features {
            let column = x.column(j);
            mean.push(column.mean());
            std.push(column.variance().sqrt());
        }

        self.mean = Some(mean);
        self.std = Some(std);

        Ok(())
    }

    /// Standardizes the data using fitted mean and std.
    fn transform(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        let mean = self.mean.as_ref().ok_or(PosturaError::NotFitted)?;
        let std = self.std.as_ref().ok_or(PosturaError::NotFitted)?;

        let (n_samples, n_features) = x.shape();
        if n_features != mean.len() {
            return Err(PosturaError::dimension_mismatch(
                "features",
                mean.len(),
                n_features,
            ));
        }

        let mut result = vec![0.0; n_samples * n_features];
        for i in 0..n_samples {
            for j in 0..n_features {
                let mut val = x.get(i, j) - mean[j];
                if std[j] > MIN_STD {
                    val /= std[j];
                }
                result[i * n_features + j] = val;
            }
        }

        Matrix::from_vec(n_samples, n_features, result).map_err(Into::into)
    }
}

/// Maps the distinct string values of one categorical column to the
/// consecutive codes `0..k-1` and back.
///
/// Codes are assigned in sorted lexicographic order over the distinct
/// value set, so the assignment depends only on which values occur, not
/// on row order.
///
/// # Example
///
/// ```
/// use postura::preprocessing::CategoryEncoder;
///
/// let mut enc = CategoryEncoder::new();
/// enc.fit(&["Low", "High", "Medium", "Low"]).unwrap();
/// assert_eq!(enc.classes(), &["High", "Low", "Medium"]);
/// assert_eq!(enc.encode("Medium"), Some(2));
/// assert_eq!(enc.decode(1).unwrap(), "Low");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryEncoder {
    /// Distinct values in code order (computed during fit).
    classes: Option<Vec<String>>,
}

impl CategoryEncoder {
    /// Creates a new unfitted `CategoryEncoder`.
    #[must_use]
    pub fn new() -> Self {
        Self { classes: None }
    }

    /// Learns the code assignment from the values of one column.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` is empty.
    pub fn fit<S: AsRef<str>>(&mut self, values: &[S]) -> Result<()> {
        if values.is_empty() {
            return Err("Cannot fit encoder on an empty column".into());
        }

        // BTreeSet gives both dedup and the sorted assignment order.
        let distinct: BTreeSet<String> =
            values.iter().map(|v| v.as_ref().to_string()).collect();
        self.classes = Some(distinct.into_iter().collect());
        Ok(())
    }

    /// Returns the known values in code order.
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        self.classes
            .as_ref()
            .expect("Encoder not fitted. Call fit() first.")
    }

    /// Returns true if the encoder has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.classes.is_some()
    }

    /// Number of distinct values learned at fit time.
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.classes().len()
    }

    /// Returns the code for `value`, or `None` if it was never seen.
    #[must_use]
    pub fn encode(&self, value: &str) -> Option<usize> {
        let classes = self.classes.as_ref()?;
        classes.binary_search_by(|c| c.as_str().cmp(value)).ok()
    }

    /// Returns the code for `value`, substituting code 0 (the first known
    /// value) when `value` was never seen during fitting.
    ///
    /// The substitution is logged, not treated as an error; `column` only
    /// names the column in that log line.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder is not fitted.
    pub fn encode_or_default(&self, column: &str, value: &str) -> Result<usize> {
        let classes = self.classes.as_ref().ok_or(PosturaError::NotFitted)?;
        match classes.binary_search_by(|c| c.as_str().cmp(value)) {
            Ok(code) => Ok(code),
            Err(_) => {
                log::warn!(
                    "unseen value '{value}' for column '{column}', substituting '{}'",
                    classes[0]
                );
                Ok(0)
            }
        }
    }

    /// Encodes a whole column of known values.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder is not fitted or any value was
    /// never seen during fitting.
    pub fn transform<S: AsRef<str>>(&self, values: &[S]) -> Result<Vec<usize>> {
        values
            .iter()
            .map(|v| {
                let v = v.as_ref();
                self.encode(v)
                    .ok_or_else(|| PosturaError::from(format!("unknown category '{v}'")))
            })
            .collect()
    }

    /// Decodes a code back to its original string value.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder is not fitted or the code is out
    /// of range.
    pub fn decode(&self, code: usize) -> Result<&str> {
        let classes = self.classes.as_ref().ok_or(PosturaError::NotFitted)?;
        classes
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| {
                PosturaError::from(format!(
                    "code {code} out of range (n_classes={})",
                    classes.len()
                ))
            })
    }
}
