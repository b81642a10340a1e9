//! The candidate tree: every admissible version of every dependency, unrolled.
//!
//! Each node holds one package borrowed from the [`PackageIndex`]. A package
//! reached along several paths appears once per path, and a dependency range
//! matching several versions fans out into one child per version. The tree
//! lives in a petgraph arena; handles are [`NodeIndex`] values and every node
//! also records its parent for constant-time upward walks.

use std::collections::VecDeque;

use jspec_core::config::{ResolverConfig, Traversal};
use jspec_core::package::Package;
use jspec_core::requirement::Requirements;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::error::{ResolveError, TreeLimit};
use crate::index::PackageIndex;

#[derive(Debug, Clone, Copy)]
struct TreeNode<'a> {
    /// `None` only at the synthetic root.
    package: Option<&'a Package>,
    parent: Option<NodeIndex>,
    depth: usize,
}

/// An unrolled candidate tree scoped to one resolution.
#[derive(Debug)]
pub struct CandidateTree<'a> {
    graph: DiGraph<TreeNode<'a>, ()>,
    root: NodeIndex,
}

impl<'a> CandidateTree<'a> {
    fn new() -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(TreeNode {
            package: None,
            parent: None,
            depth: 0,
        });
        Self { graph, root }
    }

    fn add_child(&mut self, parent: NodeIndex, package: &'a Package) -> NodeIndex {
        let depth = self.graph[parent].depth + 1;
        let child = self.graph.add_node(TreeNode {
            package: Some(package),
            parent: Some(parent),
            depth,
        });
        self.graph.add_edge(parent, child, ());
        child
    }

    /// The synthetic root whose children are the requested packages.
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn package(&self, node: NodeIndex) -> Option<&'a Package> {
        self.graph[node].package
    }

    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph[node].parent
    }

    /// Distance from the root; requested packages are at depth 1.
    pub fn depth(&self, node: NodeIndex) -> usize {
        self.graph[node].depth
    }

    pub fn children(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(node, Direction::Outgoing)
    }

    /// Every node except the root.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        let root = self.root;
        self.graph.node_indices().filter(move |&n| n != root)
    }

    /// Packages from the requested ancestor down to `node` itself.
    pub fn path(&self, node: NodeIndex) -> Vec<&'a Package> {
        let mut path = Vec::with_capacity(self.depth(node));
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(package) = self.package(n) {
                path.push(package);
            }
            current = self.parent(n);
        }
        path.reverse();
        path
    }

    /// Number of package nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Limits and worklist order for [`CandidateTreeBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub max_depth: usize,
    pub max_nodes: usize,
    pub traversal: Traversal,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::from(&ResolverConfig::default())
    }
}

impl From<&ResolverConfig> for BuildOptions {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            max_nodes: config.max_nodes,
            traversal: config.traversal,
        }
    }
}

/// Expands root requirements into a [`CandidateTree`].
pub struct CandidateTreeBuilder<'a> {
    index: &'a PackageIndex,
    options: BuildOptions,
}

impl<'a> CandidateTreeBuilder<'a> {
    pub fn new(index: &'a PackageIndex) -> Self {
        Self {
            index,
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the tree for `requests`. A request without a version takes the
    /// latest registered one.
    pub fn build(&self, requests: &Requirements) -> Result<CandidateTree<'a>, ResolveError> {
        let mut tree = CandidateTree::new();
        let mut worklist = VecDeque::new();

        for (name, version) in requests {
            let version = match version {
                Some(v) => *v,
                None => self.index.latest_version(name)?,
            };
            let package = self.index.get(name, &version)?;
            tracing::debug!("requested {name} {version}");
            let root = tree.root();
            worklist.push_back(self.attach(&mut tree, root, package)?);
        }

        while let Some(node) = self.next(&mut worklist) {
            let Some(package) = tree.package(node) else {
                continue;
            };
            tracing::trace!("expanding {package} at depth {}", tree.depth(node));
            for dep in &package.dependencies {
                check_cycle(&tree, node, &dep.name)?;
                let mut matches = self
                    .index
                    .find_in_range(&dep.name, dep.min, dep.max)?
                    .peekable();
                if matches.peek().is_none() {
                    let mut available: Vec<_> = self.index.versions(&dep.name).collect();
                    available.reverse();
                    return Err(ResolveError::NoMatchingVersion {
                        name: dep.name.clone(),
                        dependent: format!("{} {}", package.name, package.version),
                        min: dep.min,
                        max: dep.max,
                        available,
                    });
                }
                for candidate in matches {
                    worklist.push_back(self.attach(&mut tree, node, candidate)?);
                }
            }
        }

        tracing::debug!("candidate tree has {} node(s)", tree.len());
        Ok(tree)
    }

    fn next(&self, worklist: &mut VecDeque<NodeIndex>) -> Option<NodeIndex> {
        match self.options.traversal {
            Traversal::DepthFirst => worklist.pop_back(),
            Traversal::BreadthFirst => worklist.pop_front(),
        }
    }

    fn attach(
        &self,
        tree: &mut CandidateTree<'a>,
        parent: NodeIndex,
        package: &'a Package,
    ) -> Result<NodeIndex, ResolveError> {
        if tree.len() >= self.options.max_nodes {
            return Err(ResolveError::TreeLimitExceeded {
                limit: TreeLimit::Nodes,
                value: self.options.max_nodes,
            });
        }
        if tree.depth(parent) >= self.options.max_depth {
            return Err(ResolveError::TreeLimitExceeded {
                limit: TreeLimit::Depth,
                value: self.options.max_depth,
            });
        }
        Ok(tree.add_child(parent, package))
    }
}

/// Fail if `name` already appears on the chain from the root to `node`.
fn check_cycle(tree: &CandidateTree<'_>, node: NodeIndex, name: &str) -> Result<(), ResolveError> {
    let chain = tree.path(node);
    if let Some(start) = chain.iter().position(|p| p.name == name) {
        let mut path: Vec<String> = chain[start..].iter().map(|p| p.name.clone()).collect();
        path.push(name.to_string());
        return Err(ResolveError::DependencyCycle { path });
    }
    Ok(())
}
