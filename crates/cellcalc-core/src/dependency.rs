//! Dependency tracking for recalculation
//!
//! An edge `(s, t)` means `t` depends on `s`: `s` is a dependee of `t` and
//! `t` is a dependent of `s`. Nodes are keyed by name in a single map and
//! each node keeps both of its adjacency sets, so the two directions are
//! always updated together and no node holds a reference to another.

use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};

use crate::error::{require_id, Error, Result};

#[derive(Debug, Clone, Default)]
struct Node {
    /// Names that depend on this node
    dependents: AHashSet<String>,
    /// Names this node depends on
    dependees: AHashSet<String>,
}

impl Node {
    fn is_isolated(&self) -> bool {
        self.dependents.is_empty() && self.dependees.is_empty()
    }
}

/// Directed graph of dependencies between named cells
///
/// Nodes are created when the first edge touching them is added and dropped
/// as soon as they have neither dependents nor dependees. Querying a name
/// that has no node is not an error; it simply has no edges.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: AHashMap<String, Node>,
    /// Number of distinct edges
    size: usize,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct `(dependee, dependent)` pairs
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of names that currently have at least one edge
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, s: &str) -> bool {
        self.nodes.contains_key(s)
    }

    /// True if some name depends on `s`
    pub fn has_dependents(&self, s: &str) -> Result<bool> {
        require_id(s)?;
        Ok(self
            .nodes
            .get(s)
            .map_or(false, |node| !node.dependents.is_empty()))
    }

    /// True if `s` depends on some name
    pub fn has_dependees(&self, s: &str) -> Result<bool> {
        require_id(s)?;
        Ok(self
            .nodes
            .get(s)
            .map_or(false, |node| !node.dependees.is_empty()))
    }

    /// Names that depend directly on `s`
    pub fn get_dependents<'a>(&'a self, s: &str) -> Result<impl Iterator<Item = &'a str> + 'a> {
        require_id(s)?;
        Ok(self.dependents_of(s))
    }

    /// Names that `s` depends on directly
    pub fn get_dependees<'a>(&'a self, s: &str) -> Result<impl Iterator<Item = &'a str> + 'a> {
        require_id(s)?;
        Ok(self.dependees_of(s))
    }

    /// Record that `t` depends on `s`. Adding an existing edge has no effect.
    pub fn add_dependency(&mut self, s: &str, t: &str) -> Result<()> {
        require_id(s)?;
        require_id(t)?;
        self.link(s, t);
        Ok(())
    }

    /// Remove the edge `(s, t)` if present
    pub fn remove_dependency(&mut self, s: &str, t: &str) -> Result<()> {
        require_id(s)?;
        require_id(t)?;
        self.unlink(s, t);
        Ok(())
    }

    /// Replace every `(s, r)` edge with `(s, t)` for each `t` in `new_dependents`
    ///
    /// All names are checked before the graph is touched, so a rejected call
    /// leaves the graph unchanged.
    pub fn replace_dependents<I, S>(&mut self, s: &str, new_dependents: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        require_id(s)?;
        let new_dependents = collect_ids(new_dependents)?;

        let old: Vec<String> = self.dependents_of(s).map(str::to_owned).collect();
        for t in &old {
            self.unlink(s, t);
        }
        for t in &new_dependents {
            self.link(s, t);
        }
        Ok(())
    }

    /// Replace every `(r, t)` edge with `(s, t)` for each `s` in `new_dependees`
    ///
    /// All names are checked before the graph is touched, so a rejected call
    /// leaves the graph unchanged.
    pub fn replace_dependees<I, S>(&mut self, t: &str, new_dependees: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        require_id(t)?;
        let new_dependees = collect_ids(new_dependees)?;

        let old: Vec<String> = self.dependees_of(t).map(str::to_owned).collect();
        for s in &old {
            self.unlink(s, t);
        }
        for s in &new_dependees {
            self.link(s, t);
        }
        Ok(())
    }

    /// `start` plus everything that depends on it, directly or indirectly,
    /// ordered so that every name comes after all of its dependees
    ///
    /// Uses Kahn's algorithm over the subgraph reachable from `start`. Names
    /// that become ready at the same time are taken in lexicographic order,
    /// so the result is deterministic. Fails with
    /// [`Error::CircularDependency`] if `start` can reach itself.
    pub fn recalc_order(&self, start: &str) -> Result<Vec<String>> {
        require_id(start)?;

        let mut affected: AHashSet<&str> = AHashSet::new();
        let mut stack = vec![start];
        while let Some(name) = stack.pop() {
            if affected.insert(name) {
                stack.extend(self.dependents_of(name));
            }
        }

        let mut in_degree: AHashMap<&str, usize> = affected
            .iter()
            .map(|&name| {
                let degree = self
                    .dependees_of(name)
                    .filter(|dependee| affected.contains(dependee))
                    .count();
                (name, degree)
            })
            .collect();

        let mut ready: BTreeSet<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(&name, _)| name)
            .collect();

        let mut order = Vec::with_capacity(affected.len());
        while let Some(name) = ready.pop_first() {
            order.push(name.to_string());
            for dependent in self.dependents_of(name) {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        if order.len() != affected.len() {
            return Err(Error::CircularDependency(start.to_string()));
        }
        Ok(order)
    }

    /// Clear the entire graph
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.size = 0;
    }

    fn dependents_of<'a>(&'a self, s: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.nodes
            .get(s)
            .into_iter()
            .flat_map(|node| node.dependents.iter().map(String::as_str))
    }

    fn dependees_of<'a>(&'a self, s: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.nodes
            .get(s)
            .into_iter()
            .flat_map(|node| node.dependees.iter().map(String::as_str))
    }

    fn link(&mut self, s: &str, t: &str) {
        let inserted = self
            .nodes
            .entry(s.to_string())
            .or_default()
            .dependents
            .insert(t.to_string());
        if inserted {
            self.nodes
                .entry(t.to_string())
                .or_default()
                .dependees
                .insert(s.to_string());
            self.size += 1;
        }
    }

    fn unlink(&mut self, s: &str, t: &str) {
        let removed = self
            .nodes
            .get_mut(s)
            .map_or(false, |node| node.dependents.remove(t));
        if !removed {
            return;
        }
        if let Some(node) = self.nodes.get_mut(t) {
            node.dependees.remove(s);
        }
        self.size -= 1;
        self.prune(s);
        self.prune(t);
    }

    fn prune(&mut self, name: &str) {
        if self.nodes.get(name).map_or(false, Node::is_isolated) {
            self.nodes.remove(name);
        }
    }
}

fn collect_ids<I, S>(ids: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter()
        .map(|id| {
            let id = id.into();
            require_id(&id)?;
            Ok(id)
        })
        .collect()
}
