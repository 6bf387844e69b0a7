//! CLI subcommand implementations for typeload

pub mod explain;
pub mod output;
pub mod resolve;
pub mod show;
