//! Greedy nearest-node lookup.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::common::{Id, Node, Path};

#[derive(Debug, Clone)]
/// A single lookup toward a target.
///
/// The visited set belongs to the lookup and travels with it from node to
/// node, no node keeps any state about lookups passing through it.
pub struct Lookup {
    target: Id,
    visited: HashSet<Id>,
    expansions: usize,
}

#[derive(Debug, Clone)]
/// Where a [Lookup] ended.
pub struct LookupOutcome {
    /// The closest node to the target the lookup could reach.
    pub closest: Node,
    /// Number of distinct nodes whose routing table was consulted.
    pub expansions: usize,
}

impl Lookup {
    /// Create a lookup toward `target` that has not visited any node yet.
    pub fn new(target: Id) -> Self {
        Self {
            target,
            visited: HashSet::new(),
            expansions: 0,
        }
    }

    // === Getters ===

    pub fn target(&self) -> &Id {
        &self.target
    }

    /// Ids of the nodes expanded so far.
    pub fn visited(&self) -> &HashSet<Id> {
        &self.visited
    }

    // === Public Methods ===

    /// Descend from `entry` to whichever neighbor is closest to the target,
    /// until no neighbor is strictly closer than the current node.
    ///
    /// Every node reached is appended to `trace` before the cycle guard is
    /// checked, so a revisit shows up in the trace too.
    pub fn run(mut self, entry: &Node, mut trace: Option<&mut Path>) -> LookupOutcome {
        let mut current = entry.clone();

        loop {
            if let Some(trace) = trace.as_deref_mut() {
                trace.add_node(current.clone());
            }

            if !self.visited.insert(*current.id()) {
                break;
            }
            self.expansions += 1;

            let candidate = match current.closest_neighbor(&self.target) {
                Some(candidate) => candidate,
                None => break,
            };

            if candidate.id() == current.id()
                || self.target.closer(current.id(), candidate.id()) != Ordering::Greater
            {
                // Local optimum.
                break;
            }

            current = candidate;
        }

        LookupOutcome {
            closest: current,
            expansions: self.expansions,
        }
    }
}
