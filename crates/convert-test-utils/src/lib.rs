//! Shared test utilities for the function-converter workspace.
//!
//! This crate provides workspace fixtures so the crate test suites do not
//! each rebuild the same temp-dir scaffolding. It is a dev-dependency only
//! and never published.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`] builder for user function directories

pub mod workspace;

pub use workspace::{TestWorkspace, copy_tree};
