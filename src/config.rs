use std::sync::Arc;

use crate::observer::{Observer, TracingObserver};

/// K = the default maximum number of neighbors in a node's routing table.
pub const DEFAULT_K: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How [crate::Network] picks the member a lookup starts from.
pub enum EntryPoint {
    /// Any member, uniformly at random.
    #[default]
    Random,
    /// The earliest member that joined.
    First,
}

#[derive(Debug, Clone)]
/// Network and node configurations
pub struct Config {
    /// Maximum size of each node's routing table.
    ///
    /// The bigger this is, the fewer hops lookups take, and the more likely
    /// they end at the globally closest node.
    ///
    /// Defaults to [DEFAULT_K]
    pub k: usize,
    /// Move stored values to a newly learned node when it becomes the closest
    /// node to their key.
    ///
    /// Without rebalancing, values stay where they were first placed, and
    /// later lookups may end at a node that doesn't have them.
    ///
    /// Defaults to `true`
    pub rebalance_on_join: bool,
    /// Where store and retrieve lookups start.
    ///
    /// Defaults to [EntryPoint::Random]
    pub entry_point: EntryPoint,
    /// Seed for the random entry point selection.
    ///
    /// Defaults to None, where the generator is seeded from the OS.
    pub seed: Option<u64>,
    /// Receives events about node creation, joins, stores, retrievals and migrations.
    ///
    /// Defaults to [TracingObserver]
    pub observer: Arc<dyn Observer>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            rebalance_on_join: true,
            entry_point: EntryPoint::default(),
            seed: None,
            observer: Arc::new(TracingObserver),
        }
    }
}
