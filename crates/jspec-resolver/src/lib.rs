//! Dependency resolution engine: the package index, the candidate tree that
//! unrolls every admissible version of every dependency, and the round-based
//! resolver that collapses the tree to one package per name.

pub mod conflict;
pub mod error;
pub mod index;
pub mod resolver;
pub mod tree;

pub use error::ResolveError;
pub use index::PackageIndex;
pub use resolver::{resolve_requests, ConsistencyResolver, Resolution};
pub use tree::{BuildOptions, CandidateTree, CandidateTreeBuilder};
