//! Predict command implementation.

use crate::error::{CliError, Result};
use crate::output;
use postura::data::Dataset;
use postura::pipeline::{PredictionRequest, RiskPipeline};
use postura::precautions;
use std::path::Path;

/// Run the predict command
pub(crate) fn run(path: &Path, inputs: &[String], trees: usize, seed: u64) -> Result<()> {
    let request = parse_request(inputs)?;

    let dataset = Dataset::from_path(path)?;
    let mut pipeline = RiskPipeline::new()
        .with_n_trees(trees)
        .with_random_state(seed);
    let report = pipeline.fit(&dataset)?;

    let risk = pipeline.predict(&request)?;

    output::section("Prediction");
    output::kv("Model accuracy", format!("{:.2}%", report.accuracy * 100.0));
    output::success(&format!("Predicted Risk Level: {risk}"));

    if let Some(pose) = request.get("Pose") {
        print_precautions(pose);
    }

    Ok(())
}

/// Build a request from repeated KEY=VALUE arguments
fn parse_request(inputs: &[String]) -> Result<PredictionRequest> {
    if inputs.is_empty() {
        return Err(CliError::InvalidInput(
            "no fields given; pass at least one -i KEY=VALUE".to_string(),
        ));
    }

    let mut request = PredictionRequest::new();
    for input in inputs {
        let (key, value) = input.split_once('=').ok_or_else(|| {
            CliError::InvalidInput(format!("expected KEY=VALUE, got '{input}'"))
        })?;
        request.set_field(key.trim(), value.trim());
    }
    Ok(request)
}

/// Print the static precaution lists for the selected pose, if known
fn print_precautions(pose: &str) {
    let Some(p) = precautions::for_pose(pose) else {
        return;
    };
    output::section(&format!("Precautions: {pose}"));
    output::bullet_list("Guidance", p.guidance);
    output::bullet_list("Avoid", p.contraindications);
}
