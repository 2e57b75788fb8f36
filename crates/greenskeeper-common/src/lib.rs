//! # greenskeeper-common
//!
//! Shared specs, error definitions, configuration models, and constants
//! used by the greenskeeper filesystem helpers.
//!
//! This crate is the leaf of the dependency graph. It performs no
//! filesystem mutation itself; `greenskeeper-core` does.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
