//! Shared utilities for the jspec package tool.
//!
//! This crate provides cross-cutting concerns used by the other jspec crates:
//! the unified error type, filesystem walking helpers, SHA-256 hashing, and
//! terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
