//! Subcommand implementations.

pub(crate) mod poses;
pub(crate) mod predict;
pub(crate) mod train;
