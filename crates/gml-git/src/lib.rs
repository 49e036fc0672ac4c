//! Git integration for the GML project tools
//!
//! Renaming a script should keep its history, so moves go through the index
//! the way `git mv` does whenever the source file is tracked.

pub mod error;
pub mod staged_move;

pub use error::{Error, Result};
pub use staged_move::{is_tracked, stage_move};
