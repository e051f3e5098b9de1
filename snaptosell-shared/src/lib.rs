//! # SnapToSell Shared Library
//!
//! This crate contains the domain types and process-wide subsystems shared
//! by the SnapToSell API server and generation engine.
//!
//! ## Module Organization
//!
//! - `models`: generation options, platform constraints, history records
//! - `cache`: expiring key-value cache for generated content
//! - `rate_limit`: sliding-window limiter guarding outbound model calls
//! - `prompt`: prompt construction from generation options

pub mod cache;
pub mod models;
pub mod prompt;
pub mod rate_limit;

/// Current version of the SnapToSell shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
