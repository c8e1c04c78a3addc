//! core::graph
//!
//! Package uses graph and cycle detection.
//!
//! # Architecture
//!
//! The uses graph is a directed graph where:
//! - Nodes are packages ([`PackageRef`])
//! - An edge `a -> b` means package `a` uses package `b`
//!
//! # Invariants
//!
//! - The graph must be acyclic for the generated tree to compile: a cycle
//!   would make two C++ classes hold each other by value.
//! - Edge order per node is the package's Uses order.

use super::types::PackageRef;
use std::collections::{HashMap, HashSet};

/// Uses edges between packages.
#[derive(Debug, Default)]
pub struct UsesGraph {
    /// Outgoing edges in insertion order.
    edges: HashMap<PackageRef, Vec<PackageRef>>,
}

impl UsesGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no edges (no-op if it exists).
    pub fn add_node(&mut self, node: PackageRef) {
        self.edges.entry(node).or_default();
    }

    /// Record that `from` uses `to`.
    pub fn add_edge(&mut self, from: PackageRef, to: PackageRef) {
        self.edges.entry(to.clone()).or_default();
        self.edges.entry(from).or_default().push(to);
    }

    /// Packages used by `node`, in insertion order.
    pub fn uses(&self, node: &PackageRef) -> &[PackageRef] {
        self.edges.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Check if the graph contains cycles.
    ///
    /// Returns the nodes of one cycle, in edge order, starting and ending
    /// with the same node. Nodes are visited in sorted order so the
    /// reported cycle is deterministic.
    pub fn find_cycle(&self) -> Option<Vec<PackageRef>> {
        let mut visited = HashSet::new();
        let mut path = Vec::new();

        let mut nodes: Vec<_> = self.edges.keys().collect();
        nodes.sort();

        for node in nodes {
            if let Some(cycle) = self.cycle_from(node, &mut visited, &mut path) {
                return Some(cycle);
            }
        }
        None
    }

    fn cycle_from<'a>(
        &'a self,
        node: &'a PackageRef,
        visited: &mut HashSet<&'a PackageRef>,
        path: &mut Vec<&'a PackageRef>,
    ) -> Option<Vec<PackageRef>> {
        if let Some(start) = path.iter().position(|n| *n == node) {
            let mut cycle: Vec<PackageRef> = path[start..].iter().map(|n| (*n).clone()).collect();
            cycle.push(node.clone());
            return Some(cycle);
        }
        if visited.contains(node) {
            return None;
        }

        visited.insert(node);
        path.push(node);

        for next in self.uses(node) {
            if let Some(cycle) = self.cycle_from(next, visited, path) {
                return Some(cycle);
            }
        }

        path.pop();
        None
    }
}
