//! Poses command implementation.

use crate::error::Result;
use crate::output;
use postura::precautions;

/// Run the poses command
pub(crate) fn run() -> Result<()> {
    output::section("Poses with precaution data");
    for pose in precautions::known_poses() {
        println!("  {pose}");
    }
    Ok(())
}
