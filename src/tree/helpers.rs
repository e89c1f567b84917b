//! Internal helpers for tree building and ensemble sampling.

use super::TreeNode;
use crate::primitives::Matrix;
use std::collections::BTreeMap;

/// Gini impurity of a label set: 1 - Σ(p_i²).
pub(super) fn gini_impurity(labels: &[usize]) -> f32 {
    if labels.is_empty() {
        return 0.0;
    }

    let mut counts = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0usize) += 1;
    }

    let n = labels.len() as f32;
    let mut gini = 1.0;
    for count in counts.values() {
        let p = *count as f32 / n;
        gini -= p * p;
    }
    gini
}

/// Sample-weighted Gini impurity of a two-way split.
pub(super) fn weighted_gini(left: &[usize], right: &[usize]) -> f32 {
    let n_left = left.len() as f32;
    let n_right = right.len() as f32;
    let n_total = n_left + n_right;

    if n_total == 0.0 {
        return 0.0;
    }

    (n_left / n_total) * gini_impurity(left) + (n_right / n_total) * gini_impurity(right)
}

/// Most frequent class; ties go to the lowest class index.
pub(super) fn majority_class(labels: &[usize]) -> usize {
    let mut counts = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0usize) += 1;
    }

    let mut best_class = 0;
    let mut best_count = 0;
    // Ascending key order, strict comparison: lowest class wins ties.
    for (class, count) in counts {
        if count > best_count {
            best_count = count;
            best_class = class;
        }
    }
    best_class
}

/// Winning class of a vote tally; ties go to the lowest class index.
pub(super) fn winning_class(votes: &BTreeMap<usize, usize>) -> usize {
    let mut best_class = 0;
    let mut best_count = 0;
    for (&class, &count) in votes {
        if count > best_count {
            best_count = count;
            best_class = class;
        }
    }
    best_class
}

/// Candidate thresholds for one feature: midpoints between consecutive
/// distinct sorted values.
fn candidate_thresholds(values: &[f32]) -> Vec<f32> {
    let mut sorted: Vec<f32> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("feature values are finite"));
    sorted.dedup_by(|a, b| (*a - *b).abs() < 1e-10);

    sorted
        .windows(2)
        .map(|pair| (pair[0] + pair[1]) / 2.0)
        .collect()
}

/// Best (feature, threshold) split by Gini gain, or `None` when no split
/// improves on the current impurity.
pub(super) fn find_best_split(x: &Matrix<f32>, y: &[usize]) -> Option<(usize, f32)> {
    let (n_samples, n_features) = x.shape();
    if n_samples < 2 {
        return None;
    }

    let current_impurity = gini_impurity(y);
    let mut best_gain = 0.0;
    let mut best = None;

    for feature in 0..n_features {
        let values: Vec<f32> = (0..n_samples).map(|row| x.get(row, feature)).collect();

        for threshold in candidate_thresholds(&values) {
            let mut left = Vec::new();
            let mut right = Vec::new();
            for (row, &value) in values.iter().enumerate() {
                if value <= threshold {
                    left.push(y[row]);
                } else {
                    right.push(y[row]);
                }
            }
            if left.is_empty() || right.is_empty() {
                continue;
            }

            let gain = current_impurity - weighted_gini(&left, &right);
            if gain > best_gain {
                best_gain = gain;
                best = Some((feature, threshold));
            }
        }
    }

    best
}

/// Row indices on each side of a threshold.
pub(super) fn partition_rows(
    x: &Matrix<f32>,
    feature: usize,
    threshold: f32,
) -> (Vec<usize>, Vec<usize>) {
    let n_samples = x.shape().0;
    let mut left = Vec::new();
    let mut right = Vec::new();
    for row in 0..n_samples {
        if x.get(row, feature) <= threshold {
            left.push(row);
        } else {
            right.push(row);
        }
    }
    (left, right)
}

/// Copies the named rows out of `x`/`y`.
pub(super) fn take_rows(x: &Matrix<f32>, y: &[usize], indices: &[usize]) -> (Matrix<f32>, Vec<usize>) {
    let n_cols = x.shape().1;
    let mut data = Vec::with_capacity(indices.len() * n_cols);
    let mut labels = Vec::with_capacity(indices.len());

    for &idx in indices {
        for col in 0..n_cols {
            data.push(x.get(idx, col));
        }
        labels.push(y[idx]);
    }

    let matrix = Matrix::from_vec(indices.len(), n_cols, data)
        .expect("row extraction preserves column count");
    (matrix, labels)
}

/// Build a CART tree recursively.
pub(super) fn build_tree(
    x: &Matrix<f32>,
    y: &[usize],
    depth: usize,
    max_depth: Option<usize>,
) -> TreeNode {
    let n_samples = y.len();

    // Pure node
    if y.iter().all(|&label| label == y[0]) {
        return TreeNode::Leaf {
            class: y[0],
            n_samples,
        };
    }

    // Depth limit
    if max_depth.is_some_and(|max| depth >= max) {
        return TreeNode::Leaf {
            class: majority_class(y),
            n_samples,
        };
    }

    let Some((feature, threshold)) = find_best_split(x, y) else {
        return TreeNode::Leaf {
            class: majority_class(y),
            n_samples,
        };
    };

    let (left_idx, right_idx) = partition_rows(x, feature, threshold);
    if left_idx.is_empty() || right_idx.is_empty() {
        return TreeNode::Leaf {
            class: majority_class(y),
            n_samples,
        };
    }

    let (left_x, left_y) = take_rows(x, y, &left_idx);
    let (right_x, right_y) = take_rows(x, y, &right_idx);

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(build_tree(&left_x, &left_y, depth + 1, max_depth)),
        right: Box::new(build_tree(&right_x, &right_y, depth + 1, max_depth)),
    }
}

/// Draw `n_samples` row indices with replacement for one bootstrap sample.
pub(super) fn bootstrap_indices(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    use rand::distributions::{Distribution, Uniform};
    use rand::SeedableRng;

    let dist = Uniform::from(0..n_samples);
    let mut indices = Vec::with_capacity(n_samples);

    if let Some(seed) = random_state {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        for _ in 0..n_samples {
            indices.push(dist.sample(&mut rng));
        }
    } else {
        let mut rng = rand::thread_rng();
        for _ in 0..n_samples {
            indices.push(dist.sample(&mut rng));
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gini_pure() {
        assert_eq!(gini_impurity(&[1, 1, 1]), 0.0);
    }

    #[test]
    fn test_gini_even_binary() {
        let gini = gini_impurity(&[0, 0, 1, 1]);
        assert!((gini - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_gini_empty() {
        assert_eq!(gini_impurity(&[]), 0.0);
    }

    #[test]
    fn test_weighted_gini_prefers_clean_split() {
        let dirty = weighted_gini(&[0, 1], &[0, 1]);
        let clean = weighted_gini(&[0, 0], &[1, 1]);
        assert!(clean < dirty);
    }

    #[test]
    fn test_majority_class_simple() {
        assert_eq!(majority_class(&[2, 1, 2, 2, 0]), 2);
    }

    #[test]
    fn test_majority_class_tie_takes_lowest() {
        assert_eq!(majority_class(&[3, 1, 1, 3]), 1);
    }

    #[test]
    fn test_winning_class_tie_takes_lowest() {
        let mut votes = BTreeMap::new();
        votes.insert(2, 5);
        votes.insert(0, 5);
        votes.insert(1, 3);
        assert_eq!(winning_class(&votes), 0);
    }

    #[test]
    fn test_candidate_thresholds_midpoints() {
        let thresholds = candidate_thresholds(&[3.0, 1.0, 2.0, 2.0]);
        assert_eq!(thresholds, vec![1.5, 2.5]);
    }

    #[test]
    fn test_find_best_split_separable() {
        let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 10.0, 11.0]).expect("valid");
        let y = vec![0, 0, 1, 1];
        let (feature, threshold) = find_best_split(&x, &y).expect("split must exist");
        assert_eq!(feature, 0);
        assert!(threshold > 2.0 && threshold < 10.0);
    }

    #[test]
    fn test_find_best_split_constant_feature() {
        let x = Matrix::from_vec(4, 1, vec![5.0; 4]).expect("valid");
        let y = vec![0, 1, 0, 1];
        assert!(find_best_split(&x, &y).is_none());
    }

    #[test]
    fn test_bootstrap_seeded_is_reproducible() {
        let a = bootstrap_indices(50, Some(7));
        let b = bootstrap_indices(50, Some(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert!(a.iter().all(|&i| i < 50));
    }

    #[test]
    fn test_bootstrap_different_seeds_differ() {
        assert_ne!(bootstrap_indices(50, Some(1)), bootstrap_indices(50, Some(2)));
    }
}
