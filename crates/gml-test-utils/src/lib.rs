//! Shared test utilities for the GML project tools.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git fixtures for index-aware moves
//! - [`project`]: [`project::TestProject`] builder for a `GOAP` project tree

pub mod git;
pub mod project;
