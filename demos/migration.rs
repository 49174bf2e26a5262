//! Walk through a few joins and watch values migrate in the logs.
//!
//! Run: `cargo run --example migration`

use kadnet::{Network, Path};
use tracing::Level;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    let mut network = Network::new();

    network.join(network.create_node("alice"));
    network.join(network.create_node("bob"));

    for key in ["apple", "banana", "cherry", "durian"] {
        let holder = network
            .store_data(key, format!("{key} value"), None)
            .expect("network has members");

        println!("{key} -> {}", holder.label());
    }

    for label in ["carol", "dave", "erin"] {
        network.join(network.create_node(label));
    }

    for key in ["apple", "banana", "cherry", "durian"] {
        let mut path = Path::new();
        let value = network
            .retrieve_data(key, Some(&mut path))
            .expect("network has members");

        println!("{key}: {:?} via {path}", value);
    }

    for node in network.members() {
        println!(
            "{} holds {} values, knows {:?}",
            node.label(),
            node.stored_len(),
            node.neighbors()
                .iter()
                .map(|n| n.label().to_string())
                .collect::<Vec<_>>()
        );
    }
}
