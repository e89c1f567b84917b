//! Decision tree and random forest classifiers.
//!
//! CART trees with Gini impurity splitting; the forest trains each tree
//! on a seeded bootstrap sample and predicts by majority vote.

mod helpers;

use crate::error::Result;
use crate::primitives::Matrix;
use helpers::{bootstrap_indices, build_tree, take_rows, winning_class};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of a fitted classification tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Terminal node carrying the predicted class.
    Leaf {
        /// Predicted class index
        class: usize,
        /// Training samples that reached this leaf
        n_samples: usize,
    },
    /// Binary split on one feature.
    Split {
        /// Feature column index
        feature: usize,
        /// Values <= threshold go left
        threshold: f32,
        /// Left subtree
        left: Box<TreeNode>,
        /// Right subtree
        right: Box<TreeNode>,
    },
}

/// Decision tree classifier using the CART algorithm.
///
/// # Example
///
/// ```
/// use postura::primitives::Matrix;
/// use postura::tree::DecisionTreeClassifier;
///
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 10.0, 11.0]).unwrap();
/// let y = vec![0, 0, 1, 1];
///
/// let mut tree = DecisionTreeClassifier::new();
/// tree.fit(&x, &y).unwrap();
/// assert_eq!(tree.predict(&x), y);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    /// Number of features the model was trained on (for validation)
    n_features: Option<usize>,
}

impl DecisionTreeClassifier {
    /// Creates a new decision tree classifier with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: None,
            n_features: None,
        }
    }

    /// Sets the maximum depth of the tree (root has depth 0).
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Fits the decision tree to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` and `y` disagree on sample count or are
    /// empty.
    pub fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows != y.len() {
            return Err("Number of samples in X and y must match".into());
        }
        if n_rows == 0 {
            return Err("Cannot fit with zero samples".into());
        }

        self.n_features = Some(n_cols);
        self.tree = Some(build_tree(x, y, 0, self.max_depth));
        Ok(())
    }

    /// Predicts class labels for samples.
    ///
    /// # Panics
    ///
    /// Panics if called before `fit()` or if the feature count doesn't
    /// match the training data.
    #[must_use]
    pub fn predict(&self, x: &Matrix<f32>) -> Vec<usize> {
        let (n_samples, n_features) = x.shape();

        if let Some(expected) = self.n_features {
            assert_eq!(
                n_features, expected,
                "Feature count mismatch: model was trained with {expected} features but input has {n_features}"
            );
        }

        let mut predictions = Vec::with_capacity(n_samples);
        for row in 0..n_samples {
            let sample: Vec<f32> = (0..n_features).map(|col| x.get(row, col)).collect();
            predictions.push(self.predict_one(&sample));
        }
        predictions
    }

    /// Predicts the class label for a single sample.
    fn predict_one(&self, sample: &[f32]) -> usize {
        let mut node = self.tree.as_ref().expect("Model not fitted yet");
        loop {
            match node {
                TreeNode::Leaf { class, .. } => return *class,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if sample[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Computes the accuracy score on test data.
    #[must_use]
    pub fn score(&self, x: &Matrix<f32>, y: &[usize]) -> f32 {
        crate::metrics::accuracy(&self.predict(x), y)
    }
}

/// Random forest classifier: an ensemble of CART trees on bootstrap
/// samples, voting by majority with ties broken toward the lowest class
/// index.
///
/// With a `random_state` set, the bootstrap draw of tree `i` is seeded
/// with `random_state + i`, so a fitted forest is reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTreeClassifier>,
    n_estimators: usize,
    max_depth: Option<usize>,
    random_state: Option<u64>,
}

impl RandomForestClassifier {
    /// Creates a new random forest with `n_estimators` trees.
    #[must_use]
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            random_state: None,
        }
    }

    /// Sets the maximum depth for each tree.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the random state for reproducible bootstrap sampling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Number of trees in the fitted forest.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Fits the forest to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_estimators` is zero or any tree fails to
    /// fit.
    pub fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        if self.n_estimators == 0 {
            return Err("n_estimators must be at least 1".into());
        }

        let n_samples = x.shape().0;
        if n_samples == 0 {
            return Err("Cannot fit with zero samples".into());
        }
        self.trees = Vec::with_capacity(self.n_estimators);

        for i in 0..self.n_estimators {
            let seed = self.random_state.map(|s| s + i as u64);
            let indices = bootstrap_indices(n_samples, seed);
            let (bootstrap_x, bootstrap_y) = take_rows(x, y, &indices);

            let mut tree = match self.max_depth {
                Some(depth) => DecisionTreeClassifier::new().with_max_depth(depth),
                None => DecisionTreeClassifier::new(),
            };
            tree.fit(&bootstrap_x, &bootstrap_y)?;
            self.trees.push(tree);
        }

        Ok(())
    }

    /// Predicts class labels by majority vote over the trees.
    ///
    /// # Panics
    ///
    /// Panics if called before `fit()`.
    #[must_use]
    pub fn predict(&self, x: &Matrix<f32>) -> Vec<usize> {
        assert!(!self.trees.is_empty(), "Model not fitted yet");

        let n_samples = x.shape().0;
        let mut votes: Vec<BTreeMap<usize, usize>> = vec![BTreeMap::new(); n_samples];

        for tree in &self.trees {
            for (sample, class) in tree.predict(x).into_iter().enumerate() {
                *votes[sample].entry(class).or_insert(0) += 1;
            }
        }

        votes.iter().map(winning_class).collect()
    }

    /// Computes the accuracy score on test data.
    #[must_use]
    pub fn score(&self, x: &Matrix<f32>, y: &[usize]) -> f32 {
        crate::metrics::accuracy(&self.predict(x), y)
    }
}

impl Default for RandomForestClassifier {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two well-separated clusters in one feature.
    fn separable_data() -> (Matrix<f32>, Vec<usize>) {
        let x = Matrix::from_vec(
            8,
            2,
            vec![
                1.0, 5.0, 1.2, 5.5, 0.8, 4.8, 1.1, 5.2, // class 0
                9.0, 1.0, 9.5, 0.8, 8.8, 1.2, 9.2, 1.1, // class 1
            ],
        )
        .expect("valid test matrix");
        let y = vec![0, 0, 0, 0, 1, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn test_tree_fits_separable_data() {
        let (x, y) = separable_data();
        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&x, &y).expect("fit should succeed");
        assert_eq!(tree.predict(&x), y);
        assert_eq!(tree.score(&x, &y), 1.0);
    }

    #[test]
    fn test_tree_max_depth_zero_is_majority_leaf() {
        let (x, _) = separable_data();
        let y = vec![0, 0, 0, 1, 1, 0, 0, 0];
        let mut tree = DecisionTreeClassifier::new().with_max_depth(0);
        tree.fit(&x, &y).expect("fit should succeed");
        assert!(tree.predict(&x).iter().all(|&p| p == 0));
    }

    #[test]
    fn test_tree_fit_empty_fails() {
        let x = Matrix::<f32>::from_vec(0, 2, vec![]).expect("empty matrix");
        let mut tree = DecisionTreeClassifier::new();
        assert!(tree.fit(&x, &[]).is_err());
    }

    #[test]
    fn test_tree_fit_length_mismatch_fails() {
        let (x, _) = separable_data();
        let mut tree = DecisionTreeClassifier::new();
        assert!(tree.fit(&x, &[0, 1]).is_err());
    }

    #[test]
    fn test_tree_single_class() {
        let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).expect("valid");
        let y = vec![2, 2, 2];
        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&x, &y).expect("fit should succeed");
        assert_eq!(tree.predict(&x), y);
    }

    #[test]
    fn test_forest_fits_separable_data() {
        let (x, y) = separable_data();
        let mut forest = RandomForestClassifier::new(10).with_random_state(42);
        forest.fit(&x, &y).expect("fit should succeed");
        assert_eq!(forest.n_trees(), 10);
        assert_eq!(forest.predict(&x), y);
    }

    #[test]
    fn test_forest_reproducible_with_seed() {
        let (x, y) = separable_data();

        let mut a = RandomForestClassifier::new(5).with_random_state(42);
        a.fit(&x, &y).expect("fit a");
        let mut b = RandomForestClassifier::new(5).with_random_state(42);
        b.fit(&x, &y).expect("fit b");

        assert_eq!(a.predict(&x), b.predict(&x));
        assert_eq!(a.score(&x, &y), b.score(&x, &y));
    }

    #[test]
    fn test_forest_zero_estimators_fails() {
        let (x, y) = separable_data();
        let mut forest = RandomForestClassifier::new(0);
        assert!(forest.fit(&x, &y).is_err());
    }

    #[test]
    fn test_forest_with_max_depth() {
        let (x, y) = separable_data();
        let mut forest = RandomForestClassifier::new(5)
            .with_max_depth(3)
            .with_random_state(42);
        forest.fit(&x, &y).expect("fit should succeed");
        let score = forest.score(&x, &y);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_forest_three_classes() {
        let x = Matrix::from_vec(
            9,
            1,
            vec![1.0, 1.1, 0.9, 5.0, 5.1, 4.9, 9.0, 9.1, 8.9],
        )
        .expect("valid");
        let y = vec![0, 0, 0, 1, 1, 1, 2, 2, 2];

        let mut forest = RandomForestClassifier::new(20).with_random_state(7);
        forest.fit(&x, &y).expect("fit should succeed");
        assert_eq!(forest.predict(&x), y);
    }

    #[test]
    fn test_default_forest_has_hundred_trees() {
        let forest = RandomForestClassifier::default();
        assert_eq!(forest.n_estimators, 100);
    }
}
