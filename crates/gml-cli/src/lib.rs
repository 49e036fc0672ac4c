//! Shared implementation of the `yyfix` and `gmlint` binaries.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
