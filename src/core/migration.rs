//! Moving stored values toward a newly learned closer node.

use crate::common::{Id, Node};

/// Move every value stored at `holder` whose key now resolves to `newcomer`.
///
/// Each key is looked up starting from `holder`, through the routing graph
/// reachable from it. If the lookup ends at `newcomer`, the value is copied
/// there and then removed from `holder`. Returns the keys that moved.
///
/// Never holds a lock on both nodes at once.
pub(crate) fn rebalance(holder: &Node, newcomer: &Node) -> Vec<Id> {
    let mut migrated = Vec::new();

    for key in holder.stored_keys() {
        let closest = holder.find_closest_node(&key, None);

        if closest.id() != newcomer.id() {
            continue;
        }

        if let Some(value) = holder.get_at(&key) {
            newcomer.store_at(key, value);
            holder.remove_at(&key);

            holder.observer().migrated(&key, holder.id(), newcomer.id());
            migrated.push(key);
        }
    }

    migrated
}
