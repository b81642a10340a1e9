//! Round-based consistency resolution over a candidate tree.
//!
//! Round 1 settles every name that has a dependency-free candidate. Each later
//! round settles the names whose candidates depend on something settled in the
//! round just before. Within a group of same-named nodes the newest version
//! offered to every parent wins; if no version is offered to all of them the
//! request fails with a conflict report.

use std::collections::{BTreeMap, BTreeSet};

use jspec_core::package::Package;
use jspec_core::requirement::Requirements;
use jspec_core::version::Version;
use petgraph::graph::NodeIndex;

use crate::conflict::{ConflictReport, Demand};
use crate::error::ResolveError;
use crate::index::PackageIndex;
use crate::tree::{BuildOptions, CandidateTree, CandidateTreeBuilder};

/// Exactly one package per name, ordered by name.
pub type Resolution<'a> = BTreeMap<String, &'a Package>;

/// Collapses a [`CandidateTree`] into a [`Resolution`].
///
/// Stateless; the same tree always resolves to the same result.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsistencyResolver;

impl ConsistencyResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve<'a>(&self, tree: &CandidateTree<'a>) -> Result<Resolution<'a>, ResolveError> {
        let mut resolved = Resolution::new();
        let mut previous: BTreeSet<&'a str> = BTreeSet::new();
        let mut round = 1usize;

        loop {
            let ready = ready_groups(tree, &resolved, &previous, round);
            if ready.is_empty() {
                break;
            }

            let mut settled = BTreeSet::new();
            for (name, nodes) in &ready {
                let winner = pick_winner(tree, name, nodes)?;
                record(&mut resolved, name, winner)?;
                settled.insert(*name);
            }
            tracing::debug!(
                "round {round}: resolved {}",
                settled.iter().copied().collect::<Vec<_>>().join(", ")
            );
            previous = settled;
            round += 1;
        }

        // Every name settles one round after its dependencies do, so a
        // finite acyclic tree never leaves anything behind. Internal invariant.
        let names = unresolved_names(tree, &resolved);
        if !names.is_empty() {
            return Err(ResolveError::Unresolved { names });
        }
        Ok(resolved)
    }
}

/// Insert a winner. `ready_groups` skips resolved names, so a second insert
/// for the same name is an internal invariant violation.
fn record<'a>(
    resolved: &mut Resolution<'a>,
    name: &str,
    winner: &'a Package,
) -> Result<(), ResolveError> {
    if resolved.contains_key(name) {
        return Err(ResolveError::DuplicateResolution {
            name: name.to_string(),
        });
    }
    resolved.insert(name.to_string(), winner);
    Ok(())
}

/// Names present in the tree but missing from `resolved`, sorted.
fn unresolved_names(tree: &CandidateTree<'_>, resolved: &Resolution<'_>) -> Vec<String> {
    let names: BTreeSet<&str> = tree
        .nodes()
        .filter_map(|n| tree.package(n))
        .map(|p| p.name.as_str())
        .filter(|name| !resolved.contains_key(*name))
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Build the candidate tree for `requests` and resolve it.
pub fn resolve_requests<'a>(
    index: &'a PackageIndex,
    requests: &Requirements,
    options: &BuildOptions,
) -> Result<Resolution<'a>, ResolveError> {
    let tree = CandidateTreeBuilder::new(index)
        .with_options(*options)
        .build(requests)?;
    ConsistencyResolver::new().resolve(&tree)
}

/// Unresolved nodes eligible in this round, grouped by package name.
fn ready_groups<'a>(
    tree: &CandidateTree<'a>,
    resolved: &Resolution<'a>,
    previous: &BTreeSet<&'a str>,
    round: usize,
) -> BTreeMap<&'a str, Vec<NodeIndex>> {
    let mut ready: BTreeMap<&'a str, Vec<NodeIndex>> = BTreeMap::new();
    for node in tree.nodes() {
        let Some(package) = tree.package(node) else {
            continue;
        };
        if resolved.contains_key(&package.name) {
            continue;
        }
        let eligible = if round == 1 {
            package.is_leaf()
        } else {
            package
                .dependencies
                .iter()
                .any(|d| previous.contains(d.name.as_str()))
        };
        if eligible {
            ready.entry(package.name.as_str()).or_default().push(node);
        }
    }
    ready
}

/// The newest candidate that every parent of the group has as a child.
fn pick_winner<'a>(
    tree: &CandidateTree<'a>,
    name: &str,
    nodes: &[NodeIndex],
) -> Result<&'a Package, ResolveError> {
    let parents: BTreeSet<NodeIndex> = nodes.iter().filter_map(|&n| tree.parent(n)).collect();
    let mut candidates: Vec<&'a Package> = nodes.iter().filter_map(|&n| tree.package(n)).collect();
    candidates.sort_by(|a, b| b.version.cmp(&a.version));
    candidates.dedup_by_key(|p| p.version);

    if let Some(winner) = candidates.iter().find(|candidate| {
        parents
            .iter()
            .all(|&parent| offered(tree, parent, name).any(|v| v == candidate.version))
    }) {
        return Ok(*winner);
    }

    let mut report = ConflictReport::new(name, candidates.iter().map(|p| p.version).collect());
    for &parent in &parents {
        let mut accepted: Vec<Version> = offered(tree, parent, name).collect();
        accepted.sort_by(|a, b| b.cmp(a));
        accepted.dedup();
        let dependent = match tree.package(parent) {
            Some(p) => format!("{} {}", p.name, p.version),
            None => "requested".to_string(),
        };
        report.add(Demand {
            dependent,
            accepted,
        });
    }
    report.sort();
    Err(ResolveError::VersionConflict(report))
}

/// Versions of `name` that `parent` has as children.
fn offered<'t>(
    tree: &'t CandidateTree<'t>,
    parent: NodeIndex,
    name: &'t str,
) -> impl Iterator<Item = Version> + 't {
    tree.children(parent)
        .filter_map(move |c| tree.package(c))
        .filter(move |p| p.name == name)
        .map(|p| p.version)
}
