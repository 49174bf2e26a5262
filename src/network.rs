//! Set of member nodes, and the store/retrieve entry points.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::common::{Id, Node, Path};
use crate::config::{Config, EntryPoint};
use crate::core::lookup::{Lookup, LookupOutcome};
use crate::info::Info;
use crate::observer::Observer;
use crate::{Error, Result};

#[derive(Debug)]
/// In-process network of [Node]s.
///
/// Members only ever grow, through [Network::join]. Every joining node learns
/// about every existing member and vice versa.
pub struct Network {
    config: Config,
    members: Vec<Node>,
    rng: Mutex<StdRng>,
}

impl Default for Network {
    fn default() -> Self {
        Network::new()
    }
}

impl Network {
    /// Create an empty network with the default [Config].
    pub fn new() -> Self {
        Network::with_config(Config::default())
    }

    /// Returns a builder to edit settings before creating the network.
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Network {
            config,
            members: Vec::new(),
            rng: Mutex::new(rng),
        }
    }

    // === Getters ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Members in joining order.
    pub fn members(&self) -> &[Node] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the member with this id, if any.
    pub fn get(&self, id: &Id) -> Option<&Node> {
        self.members.iter().find(|node| node.id() == id)
    }

    /// Information and statistics about this network.
    pub fn info(&self) -> Info {
        Info::from(self)
    }

    /// The member closest to `target` by brute force over every member,
    /// regardless of what routing tables know.
    pub fn closest_member(&self, target: &Id) -> Option<&Node> {
        self.members
            .iter()
            .min_by(|a, b| target.closer(a.id(), b.id()))
    }

    // === Public Methods ===

    /// Create a node sharing this network's [Config], without joining it.
    pub fn create_node(&self, label: &str) -> Node {
        Node::with_config(label, &self.config)
    }

    /// Add a node to the network, and return `false` if a node with the same
    /// id is already a member.
    ///
    /// Every existing member adds the new node to its routing table, and the
    /// new node adds every existing member to its own.
    pub fn join(&mut self, node: Node) -> bool {
        if self.get(node.id()).is_some() {
            return false;
        }

        for existing in &self.members {
            existing.add_to_routing_table(&node);
            node.add_to_routing_table(existing);
        }

        self.members.push(node);

        if let Some(node) = self.members.last() {
            self.observer()
                .joined(node.id(), self.members.len(), node.neighbor_ids().len());
        }

        true
    }

    /// Store a value at the closest node to the [Id] derived from `key`,
    /// and return that node.
    pub fn store_data(
        &self,
        key: &str,
        value: impl Into<Bytes>,
        trace: Option<&mut Path>,
    ) -> Result<Node> {
        self.store_at(Id::from_label(key), value.into(), trace)
    }

    /// Retrieve the value stored for `key` at the closest node to its [Id].
    ///
    /// Returns `Ok(None)` if the lookup ended at a node that has no value for
    /// that key, even if another node holds it.
    pub fn retrieve_data(&self, key: &str, trace: Option<&mut Path>) -> Result<Option<Bytes>> {
        self.retrieve_at(&Id::from_label(key), trace)
    }

    /// Same as [Network::store_data] with an already derived key.
    pub fn store_at(&self, key: Id, value: Bytes, trace: Option<&mut Path>) -> Result<Node> {
        let outcome = self.lookup(key, trace)?;

        outcome.closest.store_at(key, value);
        self.observer()
            .stored(&key, outcome.closest.id(), outcome.expansions);

        Ok(outcome.closest)
    }

    /// Same as [Network::retrieve_data] with an already derived key.
    pub fn retrieve_at(&self, key: &Id, trace: Option<&mut Path>) -> Result<Option<Bytes>> {
        let outcome = self.lookup(*key, trace)?;

        let value = outcome.closest.get_at(key);
        self.observer().retrieved(
            key,
            outcome.closest.id(),
            value.is_some(),
            outcome.expansions,
        );

        Ok(value)
    }

    /// Run a lookup for `target` from an entry point picked per [Config::entry_point].
    pub fn lookup(&self, target: Id, trace: Option<&mut Path>) -> Result<LookupOutcome> {
        let entry = self.entry_point()?;

        Ok(Lookup::new(target).run(entry, trace))
    }

    // === Private Methods ===

    fn entry_point(&self) -> Result<&Node> {
        if self.members.is_empty() {
            return Err(Error::EmptyNetwork);
        }

        let index = match self.config.entry_point {
            EntryPoint::First => 0,
            EntryPoint::Random => self.rng.lock().gen_range(0..self.members.len()),
        };

        self.members.get(index).ok_or(Error::EmptyNetwork)
    }

    fn observer(&self) -> &Arc<dyn Observer> {
        &self.config.observer
    }
}

#[derive(Debug, Default, Clone)]
/// Create a [Network] with custom settings.
pub struct NetworkBuilder(Config);

impl NetworkBuilder {
    /// Set the routing table capacity of nodes created with [Network::create_node].
    pub fn k(&mut self, k: usize) -> &mut Self {
        self.0.k = k;

        self
    }

    /// Enable or disable moving values to closer nodes as they join.
    pub fn rebalance_on_join(&mut self, rebalance_on_join: bool) -> &mut Self {
        self.0.rebalance_on_join = rebalance_on_join;

        self
    }

    /// Set how lookups pick their entry member.
    pub fn entry_point(&mut self, entry_point: EntryPoint) -> &mut Self {
        self.0.entry_point = entry_point;

        self
    }

    /// Seed the random entry point selection, to make runs reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.0.seed = Some(seed);

        self
    }

    /// Set the [Observer] receiving events from the network and its nodes.
    pub fn observer(&mut self, observer: impl Observer + 'static) -> &mut Self {
        self.0.observer = Arc::new(observer);

        self
    }

    /// Returns the configuration this builder would create a network with.
    pub fn config(&self) -> Config {
        self.0.clone()
    }

    /// Create a [Network] node with the options set in this builder.
    pub fn build(&self) -> Network {
        Network::with_config(self.0.clone())
    }
}
