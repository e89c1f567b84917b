//! Train/test splitting.
//!
//! One reproducible split per training run: shuffle the row indices with
//! a seeded RNG, then cut at the requested proportion.

use crate::error::{PosturaError, Result};
use crate::primitives::Matrix;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Validates inputs for `train_test_split`.
fn validate_split_inputs(
    x: &Matrix<f32>,
    y: &[usize],
    test_size: f32,
) -> Result<(usize, usize)> {
    if test_size <= 0.0 || test_size >= 1.0 {
        return Err(PosturaError::from(format!(
            "test_size must be between 0 and 1, got {test_size}"
        )));
    }

    let (n_samples, _) = x.shape();
    if n_samples != y.len() {
        return Err(PosturaError::dimension_mismatch(
            "samples",
            n_samples,
            y.len(),
        ));
    }

    let n_test = (n_samples as f32 * test_size).round() as usize;
    let n_train = n_samples - n_test;

    if n_test == 0 || n_train == 0 {
        return Err(PosturaError::training(format!(
            "split would leave an empty partition (n_train={n_train}, n_test={n_test})"
        )));
    }

    Ok((n_train, n_test))
}

/// Shuffles row indices with an optional random seed.
fn shuffle_indices(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();

    if let Some(seed) = random_state {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    } else {
        let mut rng = rand::thread_rng();
        indices.shuffle(&mut rng);
    }

    indices
}

/// Extracts the rows of `x`/`y` named by `indices`.
fn extract_samples(x: &Matrix<f32>, y: &[usize], indices: &[usize]) -> (Matrix<f32>, Vec<usize>) {
    let n_features = x.shape().1;
    let mut x_data = Vec::with_capacity(indices.len() * n_features);
    let mut y_data = Vec::with_capacity(indices.len());

    for &idx in indices {
        for j in 0..n_features {
            x_data.push(x.get(idx, j));
        }
        y_data.push(y[idx]);
    }

    let x_subset = Matrix::from_vec(indices.len(), n_features, x_data)
        .expect("index extraction preserves row width");
    (x_subset, y_data)
}

/// Splits features and labels into random train and test subsets.
///
/// With `random_state` set, repeated calls on the same data produce the
/// same partition.
///
/// # Arguments
///
/// * `x` - Feature matrix
/// * `y` - Class labels, one per row of `x`
/// * `test_size` - Proportion of rows for the test partition (0.0 to 1.0)
/// * `random_state` - Optional seed for reproducible shuffling
///
/// # Returns
///
/// Tuple of (`x_train`, `x_test`, `y_train`, `y_test`).
///
/// # Errors
///
/// Returns an error on an out-of-range `test_size`, a row-count mismatch
/// between `x` and `y`, or a split that would leave a partition empty.
///
/// # Example
///
/// ```
/// use postura::model_selection::train_test_split;
/// use postura::primitives::Matrix;
///
/// let x = Matrix::from_vec(10, 2, (0..20).map(|i| i as f32).collect()).unwrap();
/// let y = vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
///
/// let (x_train, x_test, y_train, y_test) =
///     train_test_split(&x, &y, 0.2, Some(42)).unwrap();
/// assert_eq!(x_train.shape().0, 8);
/// assert_eq!(x_test.shape().0, 2);
/// assert_eq!(y_train.len() + y_test.len(), 10);
/// ```
#[allow(clippy::type_complexity)]
pub fn train_test_split(
    x: &Matrix<f32>,
    y: &[usize],
    test_size: f32,
    random_state: Option<u64>,
) -> Result<(Matrix<f32>, Matrix<f32>, Vec<usize>, Vec<usize>)> {
    let (n_train, _) = validate_split_inputs(x, y, test_size)?;
    let n_samples = x.shape().0;

    let indices = shuffle_indices(n_samples, random_state);
    let train_indices = &indices[..n_train];
    let test_indices = &indices[n_train..];

    let (x_train, y_train) = extract_samples(x, y, train_indices);
    let (x_test, y_test) = extract_samples(x, y, test_indices);

    Ok((x_train, x_test, y_train, y_test))
}
