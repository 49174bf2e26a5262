use crate::network::Network;

/// Information and statistics about a [Network].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    members: usize,
    stored_values: usize,
    k: usize,
    rebalance_on_join: bool,
}

impl Info {
    /// Number of nodes that joined the network.
    pub fn members(&self) -> usize {
        self.members
    }

    /// Total values stored across all members.
    pub fn stored_values(&self) -> usize {
        self.stored_values
    }

    /// Routing table capacity new nodes are created with.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns whether values migrate to closer nodes as they join.
    pub fn rebalance_on_join(&self) -> bool {
        self.rebalance_on_join
    }
}

impl From<&Network> for Info {
    fn from(network: &Network) -> Self {
        Self {
            members: network.len(),
            stored_values: network.members().iter().map(|n| n.stored_len()).sum(),
            k: network.config().k,
            rebalance_on_join: network.config().rebalance_on_join,
        }
    }
}
