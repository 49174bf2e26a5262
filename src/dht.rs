//! Dht handle, running a [Network] on its own thread.

use std::thread;

use bytes::Bytes;
use flume::{Receiver, Sender};
use tracing::debug;

use crate::common::{Id, Node};
use crate::config::{Config, EntryPoint};
use crate::info::Info;
use crate::network::Network;
use crate::observer::Observer;
use crate::Error;

#[derive(Debug, Clone)]
/// Handle to a [Network] owned by a dedicated actor thread.
///
/// Operations are sent as messages and run one at a time, so joins never
/// race with each other or with lookups. The thread exits when the last
/// handle is dropped, or on [Dht::shutdown].
pub struct Dht(pub(crate) Sender<ActorMessage>);

#[derive(Debug, Default, Clone)]
/// A builder for [Dht] configuration, same options as [crate::NetworkBuilder].
pub struct DhtBuilder(Config);

impl DhtBuilder {
    /// Set the routing table capacity of every node.
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

    /// Seed the random entry point selection.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.0.seed = Some(seed);

        self
    }

    /// Set the [Observer] receiving events from the network and its nodes.
    pub fn observer(&mut self, observer: impl Observer + 'static) -> &mut Self {
        self.0.observer = std::sync::Arc::new(observer);

        self
    }

    /// Create a Dht with the options set in this builder.
    pub fn build(&self) -> Result<Dht, std::io::Error> {
        Dht::new(self.0.clone())
    }
}

impl Dht {
    /// Create a new Dht with the given [Config], spawning its actor thread.
    pub fn new(config: Config) -> Result<Self, std::io::Error> {
        let (sender, receiver) = flume::unbounded();

        let network = Network::with_config(config);

        thread::Builder::new()
            .name("kadnet-dht".to_string())
            .spawn(move || run(network, receiver))?;

        Ok(Dht(sender))
    }

    /// Returns a builder to edit settings before creating a Dht.
    pub fn builder() -> DhtBuilder {
        DhtBuilder::default()
    }

    // === Getters ===

    /// Information and statistics about the network.
    pub fn info(&self) -> Result<Info, DhtWasShutdown> {
        let (sender, receiver) = flume::bounded::<Info>(1);

        self.0
            .send(ActorMessage::Info(sender))
            .map_err(|_| DhtWasShutdown)?;

        receiver.recv().map_err(|_| DhtWasShutdown)
    }

    // === Public Methods ===

    /// Create a node from `label` with the network's configuration, join it,
    /// and return its [Id].
    pub fn join(&self, label: &str) -> Result<Id, DhtWasShutdown> {
        let (sender, receiver) = flume::bounded::<Id>(1);

        self.0
            .send(ActorMessage::Join(label.to_string(), sender))
            .map_err(|_| DhtWasShutdown)?;

        receiver.recv().map_err(|_| DhtWasShutdown)
    }

    /// Join an existing node, returns `false` if it was already a member.
    pub fn join_node(&self, node: Node) -> Result<bool, DhtWasShutdown> {
        let (sender, receiver) = flume::bounded::<bool>(1);

        self.0
            .send(ActorMessage::JoinNode(node, sender))
            .map_err(|_| DhtWasShutdown)?;

        receiver.recv().map_err(|_| DhtWasShutdown)
    }

    /// Store a value, and return the [Id] of the node it was placed at.
    pub fn store(&self, key: &str, value: impl Into<Bytes>) -> Result<Id, DhtError> {
        let (sender, receiver) = flume::bounded::<Result<Id, Error>>(1);

        self.0
            .send(ActorMessage::Store(Id::from_label(key), value.into(), sender))
            .map_err(|_| DhtWasShutdown)?;

        Ok(receiver.recv().map_err(|_| DhtWasShutdown)??)
    }

    /// Retrieve a value from the closest node a lookup for `key` reaches.
    pub fn retrieve(&self, key: &str) -> Result<Option<Bytes>, DhtError> {
        let (sender, receiver) = flume::bounded::<Result<Option<Bytes>, Error>>(1);

        self.0
            .send(ActorMessage::Retrieve(Id::from_label(key), sender))
            .map_err(|_| DhtWasShutdown)?;

        Ok(receiver.recv().map_err(|_| DhtWasShutdown)??)
    }

    /// Shutdown the actor thread loop.
    pub fn shutdown(&mut self) {
        let (sender, receiver) = flume::bounded::<()>(1);

        let _ = self.0.send(ActorMessage::Shutdown(sender));
        let _ = receiver.recv();
    }
}

fn run(mut network: Network, receiver: Receiver<ActorMessage>) {
    loop {
        let message = match receiver.recv() {
            Ok(message) => message,
            // All handles were dropped.
            Err(_) => break,
        };

        match message {
            ActorMessage::Shutdown(sender) => {
                drop(receiver);
                let _ = sender.send(());

                debug!("kadnet::Dht's actor thread was shutdown.");
                return;
            }
            ActorMessage::Info(sender) => {
                let _ = sender.send(network.info());
            }
            ActorMessage::Join(label, sender) => {
                let node = network.create_node(&label);
                let id = *node.id();

                network.join(node);
                let _ = sender.send(id);
            }
            ActorMessage::JoinNode(node, sender) => {
                let _ = sender.send(network.join(node));
            }
            ActorMessage::Store(key, value, sender) => {
                let result = network
                    .store_at(key, value, None)
                    .map(|holder| *holder.id());

                let _ = sender.send(result);
            }
            ActorMessage::Retrieve(key, sender) => {
                let _ = sender.send(network.retrieve_at(&key, None));
            }
        }
    }

    debug!("kadnet::Dht's actor thread was shutdown after Drop.");
}

#[derive(Debug)]
pub(crate) enum ActorMessage {
    Info(Sender<Info>),
    Join(String, Sender<Id>),
    JoinNode(Node, Sender<bool>),
    Store(Id, Bytes, Sender<Result<Id, Error>>),
    Retrieve(Id, Sender<Result<Option<Bytes>, Error>>),
    Shutdown(Sender<()>),
}

/// Dht Actor thread was shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Dht was shutdown")]
pub struct DhtWasShutdown;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Dht store and retrieve errors
pub enum DhtError {
    #[error(transparent)]
    /// Common network errors
    Network(#[from] Error),

    #[error(transparent)]
    /// Dht was shutdown
    Shutdown(#[from] DhtWasShutdown),
}
