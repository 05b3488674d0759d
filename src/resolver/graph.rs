//! ResolvedGraph - the immutable dependency graph.
//!
//! Once resolution succeeds the graph is read-only; generation and
//! packaging only walk it.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Topo;

use crate::core::PackageId;
use crate::store::StoreEntry;
use crate::util::InternedString;

/// The resolved dependency graph.
///
/// Nodes are pinned packages; an edge `a -> b` means `a` requires `b`.
/// The root node is the recipe's own package and carries no store entry.
#[derive(Debug, Clone)]
pub struct ResolvedGraph {
    /// Package graph
    graph: DiGraph<PackageId, ()>,

    /// Map from PackageId to node index
    pkg_to_node: HashMap<PackageId, NodeIndex>,

    /// Map from library name to resolved PackageId
    name_to_pkg: HashMap<InternedString, PackageId>,

    /// Store entries for each dependency, in insertion order
    order: Vec<PackageId>,

    /// Store entries keyed by package
    entries: HashMap<PackageId, StoreEntry>,

    /// The recipe's own package
    root: PackageId,
}

impl ResolvedGraph {
    /// Create a graph containing only the root package.
    pub fn new(root: PackageId) -> Self {
        let mut graph = DiGraph::new();
        let node = graph.add_node(root);

        let mut pkg_to_node = HashMap::new();
        pkg_to_node.insert(root, node);

        let mut name_to_pkg = HashMap::new();
        name_to_pkg.insert(root.name(), root);

        ResolvedGraph {
            graph,
            pkg_to_node,
            name_to_pkg,
            order: Vec::new(),
            entries: HashMap::new(),
            root,
        }
    }

    /// The recipe's own package.
    pub fn root(&self) -> PackageId {
        self.root
    }

    /// Add a resolved dependency to the graph.
    pub fn add_package(&mut self, entry: StoreEntry) {
        let pkg_id = entry.package_id();
        if self.pkg_to_node.contains_key(&pkg_id) {
            return;
        }

        let node = self.graph.add_node(pkg_id);
        self.pkg_to_node.insert(pkg_id, node);
        self.name_to_pkg.insert(pkg_id.name(), pkg_id);
        self.order.push(pkg_id);
        self.entries.insert(pkg_id, entry);
    }

    /// Add a requirement edge between packages.
    pub fn add_edge(&mut self, from: PackageId, to: PackageId) {
        if let (Some(&from_node), Some(&to_node)) =
            (self.pkg_to_node.get(&from), self.pkg_to_node.get(&to))
        {
            if !self.graph.contains_edge(from_node, to_node) {
                self.graph.add_edge(from_node, to_node, ());
            }
        }
    }

    /// Get the resolved package for a library name.
    pub fn get_by_name(&self, name: InternedString) -> Option<PackageId> {
        self.name_to_pkg.get(&name).copied()
    }

    /// Get the store entry for a dependency.
    pub fn entry(&self, pkg_id: PackageId) -> Option<&StoreEntry> {
        self.entries.get(&pkg_id)
    }

    /// Iterate over resolved dependencies in resolution order.
    ///
    /// The root package is not included; it has no store entry.
    pub fn dependencies(&self) -> impl Iterator<Item = &StoreEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// The number of resolved dependencies.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the graph has no dependencies.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Check if a package is in the graph.
    pub fn contains(&self, pkg_id: PackageId) -> bool {
        self.pkg_to_node.contains_key(&pkg_id)
    }

    /// Direct requirements of a package.
    pub fn deps(&self, pkg_id: PackageId) -> Vec<PackageId> {
        if let Some(&node) = self.pkg_to_node.get(&pkg_id) {
            self.graph.neighbors(node).map(|n| self.graph[n]).collect()
        } else {
            Vec::new()
        }
    }

    /// Packages that require the given package.
    pub fn dependents(&self, pkg_id: PackageId) -> Vec<PackageId> {
        if let Some(&node) = self.pkg_to_node.get(&pkg_id) {
            self.graph
                .neighbors_directed(node, petgraph::Direction::Incoming)
                .map(|n| self.graph[n])
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Requirement cycles in the graph, as lists of member packages.
    ///
    /// An empty result means the graph is a DAG and has a valid
    /// topological order.
    pub fn cycles(&self) -> Vec<Vec<PackageId>> {
        petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || scc.iter().any(|&n| self.graph.contains_edge(n, n)))
            .map(|scc| scc.into_iter().map(|n| self.graph[n]).collect())
            .collect()
    }

    /// Packages in topological order (requirements before requirers).
    pub fn topological_order(&self) -> Vec<PackageId> {
        let mut topo = Topo::new(&self.graph);
        let mut order = Vec::new();

        while let Some(node) = topo.next(&self.graph) {
            order.push(self.graph[node]);
        }

        // Topo yields a before b for edges a -> b, but an edge means "a
        // requires b", so reverse to put requirements first.
        order.reverse();
        order
    }
}
