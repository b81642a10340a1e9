//! Diagnostics for a name whose dependents cannot agree on one version.

use std::fmt;

use jspec_core::version::Version;

use crate::error::version_list;

/// What one dependent accepts for the conflicting name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demand {
    /// `name version` of the dependent, or `requested` for a root requirement.
    pub dependent: String,
    /// Versions present in the dependent's range, newest first.
    pub accepted: Vec<Version>,
}

/// A version conflict for a single package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    pub name: String,
    pub demands: Vec<Demand>,
    /// Every version of `name` present in the candidate tree, newest first.
    pub candidates: Vec<Version>,
}

impl ConflictReport {
    pub fn new(name: impl Into<String>, candidates: Vec<Version>) -> Self {
        Self {
            name: name.into(),
            demands: Vec::new(),
            candidates,
        }
    }

    pub fn add(&mut self, demand: Demand) {
        self.demands.push(demand);
    }

    /// Dependents in a stable order regardless of how the tree was built.
    pub fn sort(&mut self) {
        self.demands.sort_by(|a, b| a.dependent.cmp(&b.dependent));
    }

    pub fn len(&self) -> usize {
        self.demands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demands.is_empty()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Version conflict for '{}': no version satisfies all {} dependents",
            self.name,
            self.demands.len()
        )?;
        for demand in &self.demands {
            writeln!(
                f,
                "  {} accepts {}",
                demand.dependent,
                version_list(&demand.accepted)
            )?;
        }
        write!(f, "  candidates: {}", version_list(&self.candidates))
    }
}
