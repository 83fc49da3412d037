//! # lmsdeck_core
//!
//! Core domain logic for the LMS integration deck: configuration status,
//! remediation guidance, action policy and lifecycle mutations.

pub mod api;
pub mod config;
pub mod integration;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
