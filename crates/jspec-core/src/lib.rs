//! Core data types for the jspec package tool.
//!
//! This crate defines the version model (concrete versions and wildcard
//! range bounds), dependency ranges, packages, the `.jspec` manifest format
//! and its loader, file-set collection, requirement parsing and the global
//! configuration.
//!
//! Resolution itself lives in `jspec-resolver`.

pub mod config;
pub mod dependency;
pub mod file_set;
pub mod manifest;
pub mod package;
pub mod properties;
pub mod requirement;
pub mod version;
