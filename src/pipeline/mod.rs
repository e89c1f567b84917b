//! The risk classification pipeline.
//!
//! [`RiskPipeline`] owns everything a session needs: the fitted category
//! encoders, the feature scaler, the trained forest and the feature
//! column order. Construct one per dataset, call [`RiskPipeline::fit`]
//! once, then answer any number of prediction requests. Nothing is
//! shared between pipeline values and nothing is persisted.
//!
//! # Example
//!
//! ```
//! use postura::data::Dataset;
//! use postura::pipeline::{PredictionRequest, RiskPipeline};
//!
//! let csv = "\
//! Age,Weight,Flexibility Level,Injury,Medical Condition,Pose,Risk Level
//! 25,60,High,None,None,Tree Pose,Low
//! 61,85,Low,Knee,Hypertension,Headstand,High
//! 34,72,Medium,None,None,Cobra Pose,Low
//! 58,90,Low,Back,Arthritis,Wheel Pose,High
//! 22,55,High,None,None,Tree Pose,Low
//! 65,78,Low,Knee,Hypertension,Headstand,High
//! 30,68,Medium,None,None,Cobra Pose,Low
//! 55,88,Low,Back,Arthritis,Wheel Pose,High
//! 27,62,High,None,None,Tree Pose,Low
//! 60,80,Low,Knee,Hypertension,Headstand,High
//! ";
//! let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
//!
//! let mut pipeline = RiskPipeline::new().with_n_trees(10);
//! let report = pipeline.fit(&dataset).unwrap();
//! assert!((0.0..=1.0).contains(&report.accuracy));
//!
//! let request = PredictionRequest::new()
//!     .with_field("Age", "28")
//!     .with_field("Weight", "63")
//!     .with_field("Flexibility Level", "High")
//!     .with_field("Injury", "None")
//!     .with_field("Medical Condition", "None")
//!     .with_field("Pose", "Tree Pose");
//! let label = pipeline.predict(&request).unwrap();
//! assert!(label == "Low" || label == "High");
//! ```

use crate::data::{ColumnKind, Dataset};
use crate::error::{PosturaError, Result};
use crate::metrics::accuracy;
use crate::model_selection::train_test_split;
use crate::preprocessing::{CategoryEncoder, StandardScaler};
use crate::primitives::Matrix;
use crate::schema;
use crate::traits::Transformer;
use crate::tree::RandomForestClassifier;
use std::collections::BTreeMap;

/// One user-supplied record awaiting classification.
///
/// Field values arrive as raw strings (form input); type coercion
/// happens inside [`RiskPipeline::predict`].
#[derive(Debug, Clone, Default)]
pub struct PredictionRequest {
    fields: BTreeMap<String, String>,
}

impl PredictionRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, replacing any previous one.
    pub fn set_field(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Builder-style [`set_field`](Self::set_field).
    #[must_use]
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(column, value);
        self
    }

    /// Returns the raw value of a field, if set.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Summary of one training run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Held-out accuracy in [0, 1]
    pub accuracy: f32,
    /// Rows in the training partition
    pub n_train: usize,
    /// Rows in the test partition
    pub n_test: usize,
    /// Feature columns in model input order
    pub feature_columns: Vec<String>,
}

/// Everything produced by a successful fit, read-only afterwards.
#[derive(Debug, Clone)]
struct FittedState {
    encoders: BTreeMap<String, CategoryEncoder>,
    label_encoder: CategoryEncoder,
    scaler: StandardScaler,
    model: RandomForestClassifier,
    feature_columns: Vec<String>,
    accuracy: f32,
}

/// Load → encode → train → predict, as one session-scoped value.
///
/// Defaults match the reference setup: 100 trees, 20% held out, seed 42.
#[derive(Debug, Clone)]
pub struct RiskPipeline {
    n_trees: usize,
    max_depth: Option<usize>,
    test_size: f32,
    random_state: u64,
    fitted: Option<FittedState>,
}

impl Default for RiskPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskPipeline {
    /// Creates an untrained pipeline with default hyperparameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            test_size: 0.2,
            random_state: 42,
            fitted: None,
        }
    }

    /// Sets the number of trees in the forest.
    #[must_use]
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    /// Sets the maximum depth for each tree.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the held-out proportion for the test partition.
    #[must_use]
    pub fn with_test_size(mut self, test_size: f32) -> Self {
        self.test_size = test_size;
        self
    }

    /// Sets the seed driving both the split shuffle and the per-tree
    /// bootstrap sampling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    /// Returns true after a successful [`fit`](Self::fit).
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Held-out accuracy of the fitted model.
    ///
    /// # Errors
    ///
    /// Returns [`PosturaError::NotFitted`] before a successful fit.
    pub fn accuracy(&self) -> Result<f32> {
        Ok(self.state()?.accuracy)
    }

    /// Feature columns in model input order.
    ///
    /// # Errors
    ///
    /// Returns [`PosturaError::NotFitted`] before a successful fit.
    pub fn feature_columns(&self) -> Result<&[String]> {
        Ok(&self.state()?.feature_columns)
    }

    /// The label values the model can predict, in code order.
    ///
    /// # Errors
    ///
    /// Returns [`PosturaError::NotFitted`] before a successful fit.
    pub fn label_classes(&self) -> Result<&[String]> {
        Ok(self.state()?.label_encoder.classes())
    }

    fn state(&self) -> Result<&FittedState> {
        self.fitted.as_ref().ok_or(PosturaError::NotFitted)
    }

    /// Encodes the dataset, splits it, standardizes it, fits the forest
    /// and evaluates held-out accuracy.
    ///
    /// Refitting on a new dataset replaces all fitted state.
    ///
    /// # Errors
    ///
    /// Returns [`PosturaError::Training`] when the dataset has no label
    /// column, no feature columns, or too few rows to split.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<TrainReport> {
        let (x, y, encoders, label_encoder, feature_columns) = encode_dataset(dataset)?;

        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x, &y, self.test_size, Some(self.random_state))?;
        log::debug!(
            "split {} rows into {} train / {} test",
            x.shape().0,
            x_train.shape().0,
            x_test.shape().0
        );

        let mut scaler = StandardScaler::new();
        let x_train = scaler.fit_transform(&x_train)?;
        let x_test = scaler.transform(&x_test)?;

        let mut model = match self.max_depth {
            Some(depth) => RandomForestClassifier::new(self.n_trees).with_max_depth(depth),
            None => RandomForestClassifier::new(self.n_trees),
        }
        .with_random_state(self.random_state);
        model.fit(&x_train, &y_train)?;

        let acc = accuracy(&model.predict(&x_test), &y_test);
        log::debug!("held-out accuracy {acc:.4}");

        let report = TrainReport {
            accuracy: acc,
            n_train: y_train.len(),
            n_test: y_test.len(),
            feature_columns: feature_columns.clone(),
        };

        self.fitted = Some(FittedState {
            encoders,
            label_encoder,
            scaler,
            model,
            feature_columns,
            accuracy: acc,
        });

        Ok(report)
    }

    /// Classifies one request and decodes the result back to its label
    /// string.
    ///
    /// Categorical fields with values never seen during fitting are
    /// substituted with the first known category (logged, not an error).
    ///
    /// # Errors
    ///
    /// Returns [`PosturaError::NotFitted`] before a fit, and
    /// [`PosturaError::InvalidInput`] when a field is missing or a
    /// numeric field doesn't parse as a number.
    pub fn predict(&self, request: &PredictionRequest) -> Result<String> {
        let state = self.state()?;

        let mut row = Vec::with_capacity(state.feature_columns.len());
        for column in &state.feature_columns {
            let raw = request
                .get(column)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| PosturaError::invalid_input(column, "missing value"))?;

            let value = match state.encoders.get(column) {
                Some(encoder) => encoder.encode_or_default(column, raw)? as f32,
                None => raw.parse::<f32>().map_err(|_| {
                    PosturaError::invalid_input(
                        column,
                        format!("expected a number, got '{raw}'"),
                    )
                })?,
            };
            row.push(value);
        }

        let x = Matrix::from_vec(1, row.len(), row)
            .expect("row length matches feature column count");
        let x = state.scaler.transform(&x)?;
        let code = state.model.predict(&x)[0];
        Ok(state.label_encoder.decode(code)?.to_string())
    }
}

/// Builds the numeric feature table and coded labels from a raw dataset.
///
/// Columns in the known categorical set, plus any extra column whose
/// cells are not all numeric, are integer-coded; the rest are parsed as
/// numbers. The label column is coded separately and excluded from the
/// features.
type EncodedDataset = (
    Matrix<f32>,
    Vec<usize>,
    BTreeMap<String, CategoryEncoder>,
    CategoryEncoder,
    Vec<String>,
);

fn encode_dataset(dataset: &Dataset) -> Result<EncodedDataset> {
    let n_rows = dataset.n_rows();
    if n_rows == 0 {
        return Err(PosturaError::training("no valid data after preprocessing"));
    }

    let label_idx = dataset
        .column_index(schema::LABEL_COLUMN)
        .ok_or_else(|| {
            PosturaError::training(format!(
                "label column '{}' not found",
                schema::LABEL_COLUMN
            ))
        })?;

    let mut label_encoder = CategoryEncoder::new();
    let label_values = dataset.column_values(schema::LABEL_COLUMN)?;
    label_encoder.fit(&label_values)?;
    let y = label_encoder.transform(&label_values)?;

    let mut encoders = BTreeMap::new();
    let mut feature_columns = Vec::new();
    let mut columns: Vec<Vec<f32>> = Vec::new();

    for (idx, name) in dataset.column_names().into_iter().enumerate() {
        if idx == label_idx {
            continue;
        }
        let values = dataset.column_values(name)?;

        let categorical =
            schema::is_categorical(name) || dataset.kind(idx) == ColumnKind::Categorical;
        if categorical {
            let mut encoder = CategoryEncoder::new();
            encoder.fit(&values)?;
            let codes = encoder.transform(&values)?;
            columns.push(codes.into_iter().map(|c| c as f32).collect());
            encoders.insert(name.to_string(), encoder);
        } else {
            let parsed: Vec<f32> = values
                .iter()
                .map(|v| {
                    v.parse::<f32>().map_err(|_| {
                        PosturaError::invalid_input(name, format!("expected a number, got '{v}'"))
                    })
                })
                .collect::<Result<_>>()?;
            columns.push(parsed);
        }
        feature_columns.push(name.to_string());
    }

    if feature_columns.is_empty() {
        return Err(PosturaError::training("no feature columns"));
    }

    let n_cols = feature_columns.len();
    let mut data = Vec::with_capacity(n_rows * n_cols);
    for row in 0..n_rows {
        for col in &columns {
            data.push(col[row]);
        }
    }
    let x = Matrix::from_vec(n_rows, n_cols, data)
        .map_err(|e| PosturaError::from(e.to_string()))?;

    Ok((x, y, encoders, label_encoder, feature_columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAIN_CSV: &str = "\
Age,Weight,Flexibility Level,Injury,Medical Condition,Pose,Risk Level
25,60,High,None,None,Tree Pose,Low
61,85,Low,Knee,Hypertension,Headstand,High
34,72,Medium,None,None,Cobra Pose,Medium
58,90,Low,Back,Arthritis,Wheel Pose,High
22,55,High,None,None,Tree Pose,Low
65,78,Low,Knee,Hypertension,Headstand,High
30,68,Medium,None,Asthma,Cobra Pose,Medium
55,88,Low,Back,Arthritis,Wheel Pose,High
27,62,High,None,None,Tree Pose,Low
60,80,Low,Knee,Hypertension,Headstand,High
31,70,Medium,None,Asthma,Cobra Pose,Medium
24,58,High,None,None,Tree Pose,Low
";

    fn fitted_pipeline() -> RiskPipeline {
        let dataset = Dataset::from_reader(TRAIN_CSV.as_bytes()).expect("load");
        let mut pipeline = RiskPipeline::new().with_n_trees(15);
        pipeline.fit(&dataset).expect("fit should succeed");
        pipeline
    }

    fn full_request() -> PredictionRequest {
        PredictionRequest::new()
            .with_field("Age", "26")
            .with_field("Weight", "61")
            .with_field("Flexibility Level", "High")
            .with_field("Injury", "None")
            .with_field("Medical Condition", "None")
            .with_field("Pose", "Tree Pose")
    }

    #[test]
    fn test_fit_reports_sane_summary() {
        let dataset = Dataset::from_reader(TRAIN_CSV.as_bytes()).expect("load");
        let mut pipeline = RiskPipeline::new().with_n_trees(15);
        let report = pipeline.fit(&dataset).expect("fit should succeed");

        assert!((0.0..=1.0).contains(&report.accuracy));
        assert_eq!(report.n_train + report.n_test, 12);
        assert_eq!(
            report.feature_columns,
            vec![
                "Age",
                "Weight",
                "Flexibility Level",
                "Injury",
                "Medical Condition",
                "Pose"
            ]
        );
        assert!(pipeline.is_fitted());
    }

    #[test]
    fn test_fit_reproducible_with_same_seed() {
        let dataset = Dataset::from_reader(TRAIN_CSV.as_bytes()).expect("load");

        let mut a = RiskPipeline::new().with_n_trees(15).with_random_state(42);
        let mut b = RiskPipeline::new().with_n_trees(15).with_random_state(42);
        let report_a = a.fit(&dataset).expect("fit a");
        let report_b = b.fit(&dataset).expect("fit b");

        assert_eq!(report_a.accuracy, report_b.accuracy);
    }

    #[test]
    fn test_predict_returns_known_label_string() {
        let pipeline = fitted_pipeline();
        let label = pipeline.predict(&full_request()).expect("predict");
        let known = pipeline.label_classes().expect("fitted");
        assert!(
            known.iter().any(|c| c == &label),
            "'{label}' should be one of {known:?}"
        );
    }

    #[test]
    fn test_predict_unseen_category_substitutes_and_succeeds() {
        let pipeline = fitted_pipeline();
        let request = full_request().with_field("Pose", "Crow Pose");
        let label = pipeline.predict(&request).expect("fallback, not an error");
        assert!(pipeline
            .label_classes()
            .expect("fitted")
            .iter()
            .any(|c| c == &label));
    }

    #[test]
    fn test_predict_non_numeric_age_is_invalid_input() {
        let pipeline = fitted_pipeline();
        let request = full_request().with_field("Age", "twenty-five");
        let err = pipeline.predict(&request).expect_err("must reject");
        assert!(matches!(err, PosturaError::InvalidInput { ref field, .. } if field == "Age"));
    }

    #[test]
    fn test_predict_missing_field_is_invalid_input() {
        let pipeline = fitted_pipeline();
        let mut request = full_request();
        request.fields.remove("Weight");
        let err = pipeline.predict(&request).expect_err("must reject");
        assert!(matches!(err, PosturaError::InvalidInput { ref field, .. } if field == "Weight"));
    }

    #[test]
    fn test_predict_before_fit_is_not_fitted() {
        let pipeline = RiskPipeline::new();
        let err = pipeline.predict(&full_request()).expect_err("unfitted");
        assert!(matches!(err, PosturaError::NotFitted));
    }

    #[test]
    fn test_fit_empty_dataset_is_training_error() {
        let csv = "Age,Risk Level\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("load");
        let mut pipeline = RiskPipeline::new();
        let err = pipeline.fit(&dataset).expect_err("no rows");
        assert!(matches!(err, PosturaError::Training { .. }));
    }

    #[test]
    fn test_fit_without_label_column_is_training_error() {
        let csv = "Age,Pose\n25,Tree Pose\n30,Headstand\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("load");
        let mut pipeline = RiskPipeline::new();
        let err = pipeline.fit(&dataset).expect_err("no label");
        assert!(matches!(err, PosturaError::Training { .. }));
    }

    #[test]
    fn test_fit_label_only_is_training_error() {
        let csv = "Risk Level\nLow\nHigh\nLow\nHigh\nLow\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("load");
        let mut pipeline = RiskPipeline::new();
        let err = pipeline.fit(&dataset).expect_err("no features");
        assert!(matches!(err, PosturaError::Training { .. }));
    }

    #[test]
    fn test_extra_columns_carried_through() {
        let csv = "\
Age,Years Practicing,Studio,Risk Level
25,3,Downtown,Low
60,1,Eastside,High
30,5,Downtown,Low
62,2,Eastside,High
28,4,Downtown,Low
59,1,Eastside,High
";
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("load");
        let mut pipeline = RiskPipeline::new().with_n_trees(10);
        let report = pipeline.fit(&dataset).expect("fit with extra columns");

        // Numeric extra column stays numeric, text extra column is encoded
        assert_eq!(
            report.feature_columns,
            vec!["Age", "Years Practicing", "Studio"]
        );
        let request = PredictionRequest::new()
            .with_field("Age", "26")
            .with_field("Years Practicing", "3")
            .with_field("Studio", "Downtown");
        pipeline.predict(&request).expect("predict");
    }

    #[test]
    fn test_accuracy_accessor_matches_report() {
        let dataset = Dataset::from_reader(TRAIN_CSV.as_bytes()).expect("load");
        let mut pipeline = RiskPipeline::new().with_n_trees(15);
        let report = pipeline.fit(&dataset).expect("fit");
        assert_eq!(pipeline.accuracy().expect("fitted"), report.accuracy);
    }

    #[test]
    fn test_accessors_before_fit_fail() {
        let pipeline = RiskPipeline::new();
        assert!(pipeline.accuracy().is_err());
        assert!(pipeline.feature_columns().is_err());
        assert!(pipeline.label_classes().is_err());
    }
}
