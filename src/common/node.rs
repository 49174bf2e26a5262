//! Struct and implementation of a Node taking part in the network.
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;

use crate::common::{Id, Path, RoutingTable};
use crate::config::Config;
use crate::core::lookup::Lookup;
use crate::core::migration;
use crate::observer::Observer;

#[derive(Clone)]
/// Node in the network, holding its routing table and a local key/value store.
///
/// This is a cheap handle, cloning it shares the same node.
pub struct Node(pub(crate) Arc<NodeInner>);

pub(crate) struct NodeInner {
    id: Id,
    label: Box<str>,
    rebalance_on_join: bool,
    observer: Arc<dyn Observer>,
    routing_table: RwLock<RoutingTable>,
    store: RwLock<HashMap<Id, Bytes>>,
}

impl Node {
    /// Creates a new Node whose [Id] is derived from `label`, with the default [Config].
    pub fn new(label: &str) -> Node {
        Node::with_config(label, &Config::default())
    }

    /// Creates a new Node whose [Id] is derived from `label`.
    pub fn with_config(label: &str, config: &Config) -> Node {
        Node::build(Id::from_label(label), label, config)
    }

    /// Creates a new Node with an explicit [Id], where `label` is only used for display.
    pub fn from_id(id: Id, label: &str, config: &Config) -> Node {
        Node::build(id, label, config)
    }

    fn build(id: Id, label: &str, config: &Config) -> Node {
        config.observer.node_created(&id, label);

        Node(Arc::new(NodeInner {
            id,
            label: label.into(),
            rebalance_on_join: config.rebalance_on_join,
            observer: config.observer.clone(),
            routing_table: RwLock::new(RoutingTable::with_k(id, config.k)),
            store: RwLock::new(HashMap::new()),
        }))
    }

    // === Getters ===

    pub fn id(&self) -> &Id {
        &self.0.id
    }

    /// The raw label this node was created from.
    pub fn label(&self) -> &str {
        &self.0.label
    }

    /// Maximum number of neighbors.
    pub fn k(&self) -> usize {
        self.0.routing_table.read().k()
    }

    /// Returns a snapshot of the routing table.
    pub fn routing_table(&self) -> RoutingTable {
        self.0.routing_table.read().clone()
    }

    /// Neighbors, closest first.
    pub fn neighbors(&self) -> Vec<Node> {
        self.0.routing_table.read().nodes()
    }

    /// Ids of the neighbors, closest first.
    pub fn neighbor_ids(&self) -> Vec<Id> {
        self.0.routing_table.read().ids()
    }

    pub(crate) fn observer(&self) -> &Arc<dyn Observer> {
        &self.0.observer
    }

    // === Local store ===

    /// Store a value locally, under the [Id] derived from `key`.
    pub fn store_data(&self, key: &str, value: impl Into<Bytes>) -> Id {
        let key = Id::from_label(key);
        self.store_at(key, value.into());

        key
    }

    /// Get a locally stored value by the raw `key` it was stored under.
    pub fn get_data(&self, key: &str) -> Option<Bytes> {
        self.get_at(&Id::from_label(key))
    }

    /// Store a value locally under an already derived key, returning the previous value if any.
    pub fn store_at(&self, key: Id, value: Bytes) -> Option<Bytes> {
        self.0.store.write().insert(key, value)
    }

    pub fn get_at(&self, key: &Id) -> Option<Bytes> {
        self.0.store.read().get(key).cloned()
    }

    pub fn remove_at(&self, key: &Id) -> Option<Bytes> {
        self.0.store.write().remove(key)
    }

    pub fn contains_key(&self, key: &Id) -> bool {
        self.0.store.read().contains_key(key)
    }

    /// Keys of all locally stored values, in no particular order.
    pub fn stored_keys(&self) -> Vec<Id> {
        self.0.store.read().keys().copied().collect()
    }

    /// Number of locally stored values.
    pub fn stored_len(&self) -> usize {
        self.0.store.read().len()
    }

    // === Routing ===

    /// Learn about `other`, and return `true` if it is in the routing table afterwards.
    ///
    /// Adding self or an already known node is a no-op. When rebalancing is
    /// enabled, every stored value whose closest reachable node is now `other`
    /// is moved there.
    pub fn add_to_routing_table(&self, other: &Node) -> bool {
        if other.id() == self.id() {
            return false;
        }

        let added = {
            let mut routing_table = self.0.routing_table.write();

            if routing_table.contains(other.id()) {
                return false;
            }

            routing_table.add(other)
        };

        if self.0.rebalance_on_join {
            migration::rebalance(self, other);
        }

        added
    }

    /// Greedy descent through routing tables, starting at this node, toward
    /// the node closest to `target`.
    ///
    /// Every visited node is appended to `trace` if one is given. Always
    /// returns a node, at worst this one, but only a local optimum of the
    /// routing graph reachable from here.
    pub fn find_closest_node(&self, target: &Id, trace: Option<&mut Path>) -> Node {
        Lookup::new(*target).run(self, trace).closest
    }

    /// Closest neighbor to `target`, if any.
    pub(crate) fn closest_neighbor(&self, target: &Id) -> Option<Node> {
        self.0.routing_table.read().closest_to(target)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Node {}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", self.id())
            .field("label", &self.label())
            .finish()
    }
}
