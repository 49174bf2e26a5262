#![doc = include_str!("../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
//!

// Public modules
mod common;
mod config;
mod core;
mod error;
mod info;
mod network;
pub mod observer;

#[cfg(feature = "async")]
pub mod async_dht;
mod dht;

pub use crate::common::{Id, Node, Path, RoutingTable, ID_SIZE, MAX_DISTANCE};
pub use crate::config::{Config, EntryPoint, DEFAULT_K};
pub use crate::core::lookup::{Lookup, LookupOutcome};
pub use crate::error::{Error, Result};
pub use crate::info::Info;
pub use crate::network::{Network, NetworkBuilder};
pub use bytes::Bytes;
pub use dht::{Dht, DhtBuilder, DhtError, DhtWasShutdown};
