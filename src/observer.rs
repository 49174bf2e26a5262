//! Narrow diagnostics interface the engine reports its events through.

use tracing::{debug, info, trace};

use crate::common::Id;

/// Receives notifications about node creation, joins, stores, retrievals and migrations.
///
/// Every method has a no-op default, so implementors only override what they
/// care about.
///
/// Observers are called synchronously on the thread performing the
/// operation, and may be called while a lookup is in progress, so they need
/// to be fast and must not call back into the [crate::Network].
pub trait Observer: std::fmt::Debug + Send + Sync {
    /// A [crate::Node] was created.
    fn node_created(&self, _id: &Id, _label: &str) {}

    /// A node became a member of the network, learning `table_size` neighbors.
    fn joined(&self, _id: &Id, _members: usize, _table_size: usize) {}

    /// A value for `key` was placed at `holder` after a lookup of `hops` expansions.
    fn stored(&self, _key: &Id, _holder: &Id, _hops: usize) {}

    /// A lookup for `key` ended at `holder`, which did or did not have a value.
    fn retrieved(&self, _key: &Id, _holder: &Id, _found: bool, _hops: usize) {}

    /// The value for `key` moved from `from` to the newly learned `to`.
    fn migrated(&self, _key: &Id, _from: &Id, _to: &Id) {}
}

#[derive(Debug, Default, Clone, Copy)]
/// Default [Observer] emitting structured [tracing] events.
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn node_created(&self, id: &Id, label: &str) {
        trace!(?id, label, "Created node");
    }

    fn joined(&self, id: &Id, members: usize, table_size: usize) {
        debug!(?id, members, table_size, "Node joined the network");
    }

    fn stored(&self, key: &Id, holder: &Id, hops: usize) {
        debug!(?key, ?holder, hops, "Stored value");
    }

    fn retrieved(&self, key: &Id, holder: &Id, found: bool, hops: usize) {
        debug!(?key, ?holder, found, hops, "Retrieved value");
    }

    fn migrated(&self, key: &Id, from: &Id, to: &Id) {
        info!(?key, ?from, ?to, "Migrated value to a closer node");
    }
}

#[derive(Debug, Default, Clone, Copy)]
/// [Observer] that ignores every event.
pub struct NoopObserver;

impl Observer for NoopObserver {}
