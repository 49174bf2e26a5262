//! Core routing logic - pure computation over in-process nodes.
//!
//! Contains the greedy `lookup` and the `migration` step run when a node
//! learns about a closer neighbor. Orchestration lives in `network` and `dht`.

pub(crate) mod lookup;
pub(crate) mod migration;
