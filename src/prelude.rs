//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use postura::prelude::*;
//! ```

pub use crate::data::{ColumnKind, Dataset};
pub use crate::error::{PosturaError, Result};
pub use crate::pipeline::{PredictionRequest, RiskPipeline, TrainReport};
pub use crate::preprocessing::{CategoryEncoder, StandardScaler};
pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::Transformer;
pub use crate::tree::{DecisionTreeClassifier, RandomForestClassifier};
