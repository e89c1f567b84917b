//! Postura: yoga practice risk classification in pure Rust.
//!
//! Postura loads a tabular dataset of yoga practitioners, trains a
//! random-forest classifier predicting a categorical `Risk Level` from
//! demographic and practice attributes, and answers single-record
//! prediction requests with the decoded label. A static table maps each
//! pose to its precautions for display alongside the prediction.
//!
//! # Quick Start
//!
//! ```
//! use postura::prelude::*;
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
//!
//! // Load, then fit once per session
//! let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
//! let mut pipeline = RiskPipeline::new().with_n_trees(10);
//! let report = pipeline.fit(&dataset).unwrap();
//! assert!((0.0..=1.0).contains(&report.accuracy));
//!
//! // Answer a form submission
//! let request = PredictionRequest::new()
//!     .with_field("Age", "28")
//!     .with_field("Weight", "63")
//!     .with_field("Flexibility Level", "High")
//!     .with_field("Injury", "None")
//!     .with_field("Medical Condition", "None")
//!     .with_field("Pose", "Tree Pose");
//! let risk = pipeline.predict(&request).unwrap();
//! assert!(pipeline.label_classes().unwrap().iter().any(|c| c == &risk));
//! ```
//!
//! # Modules
//!
//! - [`data`]: Dataset loading from CSV sources
//! - [`preprocessing`]: Category encoding and feature standardization
//! - [`tree`]: Decision tree and random forest classifiers
//! - [`model_selection`]: Train/test splitting
//! - [`metrics`]: Evaluation metrics
//! - [`pipeline`]: The session-scoped load→encode→train→predict pipeline
//! - [`precautions`]: Static pose-precaution lookup
//! - [`schema`]: Column schema constants
//! - [`primitives`]: Core Vector and Matrix types

pub mod data;
pub mod error;
pub mod metrics;
pub mod model_selection;
pub mod pipeline;
pub mod precautions;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod schema;
pub mod traits;
pub mod tree;
