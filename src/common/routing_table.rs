//! Flat k-closest routing table

use super::node::Node;
use crate::common::Id;
use crate::config::DEFAULT_K;

#[derive(Debug, Clone)]
/// Bounded list of the `k` closest known nodes to [RoutingTable::id],
/// sorted by ascending XOR distance.
///
/// Unlike a full Kademlia table, there is a single list instead of a bucket
/// per shared prefix length. Nodes never leave the network, so entries are
/// strong handles and only eviction by a closer node removes them.
pub struct RoutingTable {
    id: Id,
    k: usize,
    nodes: Vec<Node>,
}

impl RoutingTable {
    /// Create a new [RoutingTable] with a given id and the [DEFAULT_K] capacity.
    pub fn new(id: Id) -> Self {
        Self::with_k(id, DEFAULT_K)
    }

    /// Create a new [RoutingTable] with a given id and capacity.
    pub fn with_k(id: Id, k: usize) -> Self {
        RoutingTable {
            id,
            k,
            nodes: Vec::with_capacity(k + 1),
        }
    }

    // === Getters ===

    /// Returns the [Id] of this node, where the distance is measured from.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Returns the maximum number of nodes this table keeps.
    pub fn k(&self) -> usize {
        self.k
    }

    // === Public Methods ===

    /// Attempts to add a node to this routing table, and returns `true` if it
    /// is part of the table afterwards.
    ///
    /// Self and already known nodes are ignored. If the table overflows, the
    /// farthest node is dropped, which may be the incoming one.
    pub fn add(&mut self, node: &Node) -> bool {
        if node.id() == &self.id {
            // Do not add self to the routing_table
            return false;
        }

        let local = self.id;
        match self
            .nodes
            .binary_search_by(|probe| local.closer(probe.id(), node.id()))
        {
            Ok(_) => false,
            Err(position) => {
                if position >= self.k {
                    return false;
                }

                self.nodes.insert(position, node.clone());
                self.nodes.truncate(self.k);

                true
            }
        }
    }

    /// Returns the node in this table closest to `target`.
    pub fn closest_to(&self, target: &Id) -> Option<Node> {
        self.nodes
            .iter()
            .min_by(|a, b| target.closer(a.id(), b.id()))
            .cloned()
    }

    /// Returns `true` if a node with this id is in the table.
    pub fn contains(&self, id: &Id) -> bool {
        self.nodes.iter().any(|node| node.id() == id)
    }

    /// Returns `true` if this routing table is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return the number of nodes in this routing table.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Ids of the nodes in this table, closest first.
    pub fn ids(&self) -> Vec<Id> {
        self.nodes.iter().map(|node| *node.id()).collect()
    }

    /// Nodes in this table, closest first.
    pub fn nodes(&self) -> Vec<Node> {
        self.nodes.clone()
    }
}
