// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Cycle-safe transitive closure over binary relations.
//!
//! [`transitive_closure`] is the one graph primitive behind era hierarchy
//! queries ([`OrdinalReferenceSystem`](crate::OrdinalReferenceSystem)) and
//! concept-style broader/narrower queries on a [`RelationGraph`]. It is
//! iterative, so deep or cyclic relations never grow the call stack.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Nodes reachable from `start` through `successors`.
///
/// With `transitive == false` this is the direct successor list. Otherwise
/// the relation is walked depth-first with a per-call visited set. The
/// result is deduplicated and in discovery order; `start` itself appears
/// only when some path leads back to it.
pub fn transitive_closure<N, F, I>(start: &N, mut successors: F, transitive: bool) -> Vec<N>
where
    N: Clone + Eq + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    let mut seen: HashSet<N> = HashSet::new();
    let mut out = Vec::new();

    if !transitive {
        for next in successors(start) {
            if seen.insert(next.clone()) {
                out.push(next);
            }
        }
        return out;
    }

    // Successors are pushed in reverse so that the first one is expanded
    // first, giving the same order as the recursive walk.
    let mut stack: Vec<N> = successors(start).into_iter().collect();
    stack.reverse();
    while let Some(node) = stack.pop() {
        if !seen.insert(node.clone()) {
            continue;
        }
        let mut children: Vec<N> = successors(&node)
            .into_iter()
            .filter(|child| !seen.contains(child))
            .collect();
        children.reverse();
        stack.extend(children);
        out.push(node);
    }
    out
}

/// A directed relation stored as forward and reverse adjacency.
///
/// Edge insertion order is kept per node so closures are deterministic.
#[derive(Debug, Clone)]
pub struct RelationGraph<N> {
    edges: HashMap<N, Vec<N>>,
    reverse_edges: HashMap<N, Vec<N>>,
}

impl<N> Default for RelationGraph<N> {
    fn default() -> Self {
        Self {
            edges: HashMap::new(),
            reverse_edges: HashMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash> RelationGraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `from → to`. Returns `false` if the pair was already present.
    pub fn insert(&mut self, from: N, to: N) -> bool {
        let forward = self.edges.entry(from.clone()).or_default();
        if forward.contains(&to) {
            return false;
        }
        forward.push(to.clone());
        self.reverse_edges.entry(to).or_default().push(from);
        true
    }

    /// Adds both `a → b` and `b → a` (exact-match style relations).
    pub fn insert_symmetric(&mut self, a: N, b: N) {
        self.insert(a.clone(), b.clone());
        self.insert(b, a);
    }

    pub fn contains(&self, from: &N, to: &N) -> bool {
        self.edges.get(from).is_some_and(|targets| targets.contains(to))
    }

    /// Direct successors of `node`.
    pub fn successors(&self, node: &N) -> &[N] {
        self.edges.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Direct predecessors of `node`.
    pub fn predecessors(&self, node: &N) -> &[N] {
        self.reverse_edges
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Nodes reachable from `start` along the relation.
    pub fn closure(&self, start: &N, transitive: bool) -> Vec<N> {
        transitive_closure(start, |n| self.successors(n).to_vec(), transitive)
    }

    /// Nodes that reach `start` along the relation.
    pub fn inverse_closure(&self, start: &N, transitive: bool) -> Vec<N> {
        transitive_closure(start, |n| self.predecessors(n).to_vec(), transitive)
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
