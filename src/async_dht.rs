//! AsyncDht node.

use bytes::Bytes;

use crate::{
    common::{Id, Node},
    dht::{ActorMessage, Dht, DhtError, DhtWasShutdown},
    info::Info,
    Error,
};

impl Dht {
    /// Return an async version of the Dht client.
    pub fn as_async(self) -> AsyncDht {
        AsyncDht(self)
    }
}

#[derive(Debug, Clone)]
/// Async version of the Dht node.
pub struct AsyncDht(Dht);

impl AsyncDht {
    // === Getters ===

    /// Information and statistics about the network.
    pub async fn info(&self) -> Result<Info, DhtWasShutdown> {
        let (sender, receiver) = flume::bounded::<Info>(1);

        self.0
             .0
            .send(ActorMessage::Info(sender))
            .map_err(|_| DhtWasShutdown)?;

        receiver.recv_async().await.map_err(|_| DhtWasShutdown)
    }

    // === Public Methods ===

    /// Shutdown the actor thread loop.
    pub async fn shutdown(&mut self) {
        let (sender, receiver) = flume::bounded::<()>(1);

        let _ = self.0 .0.send(ActorMessage::Shutdown(sender));
        let _ = receiver.recv_async().await;
    }

    /// Create a node from `label`, join it, and return its [Id].
    pub async fn join(&self, label: &str) -> Result<Id, DhtWasShutdown> {
        let (sender, receiver) = flume::bounded::<Id>(1);

        self.0
             .0
            .send(ActorMessage::Join(label.to_string(), sender))
            .map_err(|_| DhtWasShutdown)?;

        receiver.recv_async().await.map_err(|_| DhtWasShutdown)
    }

    /// Join an existing node, returns `false` if it was already a member.
    pub async fn join_node(&self, node: Node) -> Result<bool, DhtWasShutdown> {
        let (sender, receiver) = flume::bounded::<bool>(1);

        self.0
             .0
            .send(ActorMessage::JoinNode(node, sender))
            .map_err(|_| DhtWasShutdown)?;

        receiver.recv_async().await.map_err(|_| DhtWasShutdown)
    }

    /// Store a value, and return the [Id] of the node it was placed at.
    pub async fn store(&self, key: &str, value: impl Into<Bytes>) -> Result<Id, DhtError> {
        let (sender, receiver) = flume::bounded::<Result<Id, Error>>(1);

        self.0
             .0
            .send(ActorMessage::Store(Id::from_label(key), value.into(), sender))
            .map_err(|_| DhtWasShutdown)?;

        Ok(receiver
            .recv_async()
            .await
            .map_err(|_| DhtWasShutdown)??)
    }

    /// Retrieve a value from the closest node a lookup for `key` reaches.
    pub async fn retrieve(&self, key: &str) -> Result<Option<Bytes>, DhtError> {
        let (sender, receiver) = flume::bounded::<Result<Option<Bytes>, Error>>(1);

        self.0
             .0
            .send(ActorMessage::Retrieve(Id::from_label(key), sender))
            .map_err(|_| DhtWasShutdown)?;

        Ok(receiver
            .recv_async()
            .await
            .map_err(|_| DhtWasShutdown)??)
    }
}
