//! CLI subcommands.

pub mod document;
pub mod migrate;
