//! # taskdef-common
//!
//! Shared error definitions, update kinds, configuration models, and
//! constants used across the entire taskdef workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
