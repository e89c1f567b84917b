//! Train command implementation.

use crate::error::Result;
use crate::output;
use postura::data::Dataset;
use postura::pipeline::RiskPipeline;
use std::path::Path;

/// Run the train command
pub(crate) fn run(path: &Path, trees: usize, seed: u64, preview: usize) -> Result<()> {
    let dataset = Dataset::from_path(path)?;

    output::section("Dataset");
    output::kv("File", path.display());
    output::kv("Rows", dataset.n_rows());
    output::kv("Columns", dataset.n_cols());
    print_preview(&dataset, preview);

    let mut pipeline = RiskPipeline::new()
        .with_n_trees(trees)
        .with_random_state(seed);
    let report = pipeline.fit(&dataset)?;

    output::section("Model");
    output::kv("Trees", trees);
    output::kv("Seed", seed);
    output::kv(
        "Train / test rows",
        format!("{} / {}", report.n_train, report.n_test),
    );
    output::kv("Feature order", report.feature_columns.join(", "));
    output::success(&format!("Accuracy: {:.2}%", report.accuracy * 100.0));

    Ok(())
}

/// Print the first rows of the dataset as a plain table
fn print_preview(dataset: &Dataset, n: usize) {
    if n == 0 || dataset.n_rows() == 0 {
        return;
    }
    println!("\n  {}", dataset.column_names().join(" | "));
    for row in dataset.head(n) {
        println!("  {}", row.join(" | "));
    }
}
