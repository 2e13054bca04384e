use crate::error::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashSet, VecDeque};

/// Dependency graph over service names.
///
/// Nodes and edges keep insertion order so traversals are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexSet<String>,
    /// `edges[A] = [B, C]` means A depends on B and C
    edges: IndexMap<String, Vec<String>>,
    /// `reverse[A] = [B, C]` means B and C depend on A
    reverse: IndexMap<String, Vec<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, name: String) {
        self.nodes.insert(name.clone());
        self.edges.entry(name.clone()).or_default();
        self.reverse.entry(name).or_default();
    }

    /// Add a dependency edge (from depends on to)
    pub fn add_edge(&mut self, from: String, to: String) {
        self.add_node(from.clone());
        self.add_node(to.clone());

        self.edges.entry(from.clone()).or_default().push(to.clone());
        self.reverse.entry(to).or_default().push(from);
    }

    /// Get all transitive dependencies of a node in topological order
    pub fn get_dependencies(&self, node: &str) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut result = Vec::new();

        self.dfs_dependencies(node, node, &mut visited, &mut result);

        result
    }

    fn dfs_dependencies(
        &self,
        node: &str,
        start_node: &str,
        visited: &mut HashSet<String>,
        result: &mut Vec<String>,
    ) {
        if !visited.insert(node.to_string()) {
            return;
        }

        // Post-order: dependencies land before their dependents
        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                self.dfs_dependencies(dep, start_node, visited, result);
            }
        }

        if node != start_node {
            result.push(node.to_string());
        }
    }

    /// Get direct dependencies of a node
    pub fn get_direct_dependencies(&self, node: &str) -> Vec<String> {
        self.edges.get(node).cloned().unwrap_or_default()
    }

    /// Get nodes that depend on the given node
    pub fn get_dependents(&self, node: &str) -> Vec<String> {
        self.reverse.get(node).cloned().unwrap_or_default()
    }

    /// Topological sort - returns nodes in dependency order (dependencies first)
    pub fn topological_sort(&self) -> Result<Vec<String>> {
        let mut in_degree: IndexMap<&str, usize> = self
            .nodes
            .iter()
            .map(|node| {
                (
                    node.as_str(),
                    self.edges.get(node).map_or(0, |deps| deps.len()),
                )
            })
            .collect();

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(node, _)| *node)
            .collect();

        let mut result = Vec::with_capacity(self.nodes.len());

        while let Some(node) = queue.pop_front() {
            result.push(node.to_string());

            if let Some(dependents) = self.reverse.get(node) {
                for dependent in dependents {
                    if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(dependent.as_str());
                        }
                    }
                }
            }
        }

        if result.len() != self.nodes.len() {
            return Err(Error::CircularDependency(self.find_cycle()));
        }

        Ok(result)
    }

    /// Find a cycle in the graph and return it as a path
    fn find_cycle(&self) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();
        let mut path = Vec::new();

        for node in &self.nodes {
            if !visited.contains(node) {
                if let Some(cycle) =
                    self.find_cycle_dfs(node, &mut visited, &mut rec_stack, &mut path)
                {
                    return cycle;
                }
            }
        }

        // Fallback if we can't find the exact cycle
        self.nodes.iter().take(3).cloned().collect()
    }

    fn find_cycle_dfs(
        &self,
        node: &str,
        visited: &mut HashSet<String>,
        rec_stack: &mut HashSet<String>,
        path: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        visited.insert(node.to_string());
        rec_stack.insert(node.to_string());
        path.push(node.to_string());

        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                if !visited.contains(dep) {
                    if let Some(cycle) = self.find_cycle_dfs(dep, visited, rec_stack, path) {
                        return Some(cycle);
                    }
                } else if rec_stack.contains(dep) {
                    let cycle_start = path.iter().position(|n| n == dep).unwrap_or(0);
                    let mut cycle: Vec<String> = path[cycle_start..].to_vec();
                    cycle.push(dep.clone());
                    return Some(cycle);
                }
            }
        }

        rec_stack.remove(node);
        path.pop();
        None
    }

    /// Check if the graph has any cycles
    pub fn has_cycle(&self) -> bool {
        self.topological_sort().is_err()
    }

    /// Get all nodes in the graph, in insertion order
    pub fn nodes(&self) -> &IndexSet<String> {
        &self.nodes
    }
}
