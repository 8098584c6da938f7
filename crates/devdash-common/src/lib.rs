//! # devdash-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the devdash workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and defines the validated devcontainer record that every
//! other crate hands around.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
