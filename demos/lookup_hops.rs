//! Build a network, store random keys, and report how many hops lookups
//! take and how often a retrieve starting elsewhere misses the value.
//!
//! Run: `cargo run --example lookup_hops -- --nodes 500 --k 2`

use clap::Parser;
use histo::Histogram;
use kadnet::{observer::NoopObserver, Id, Network};
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of nodes in the network
    #[arg(short, long, default_value_t = 200)]
    nodes: usize,
    /// Routing table capacity of each node
    #[arg(short, long, default_value_t = kadnet::DEFAULT_K)]
    k: usize,
    /// Number of keys to store then retrieve
    #[arg(short, long, default_value_t = 1000)]
    lookups: usize,
    /// Disable moving values to closer nodes as they join
    #[arg(long)]
    no_rebalance: bool,
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    let mut network = Network::builder()
        .k(cli.k)
        .rebalance_on_join(!cli.no_rebalance)
        .observer(NoopObserver)
        .build();

    for i in 0..cli.nodes {
        network.join(network.create_node(&format!("node-{i}")));
    }

    info!(nodes = cli.nodes, k = cli.k, "Network ready");

    let mut hops = Histogram::with_buckets(10);
    let mut found = 0;
    let mut optimal = 0;

    for i in 0..cli.lookups {
        let key = format!("key-{i}");
        let target = Id::from_label(&key);

        network.store_data(&key, i.to_string(), None).unwrap();

        let outcome = network.lookup(target, None).unwrap();
        hops.add(outcome.expansions as u64);

        if network.closest_member(&target) == Some(&outcome.closest) {
            optimal += 1;
        }

        if network.retrieve_data(&key, None).unwrap().is_some() {
            found += 1;
        }
    }

    println!("Lookup expansions:\n{}", hops);
    println!(
        "Retrieved {found}/{} values, {optimal}/{} lookups reached the globally closest node",
        cli.lookups, cli.lookups
    );
}
