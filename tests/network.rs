//! End to end behavior of joins, placement, retrieval and migration.

use std::cmp::Ordering;
use std::sync::Arc;

use kadnet::observer::{NoopObserver, Observer};
use kadnet::{Bytes, EntryPoint, Error, Id, Network, Node, Path};
use parking_lot::Mutex;

fn quiet() -> Network {
    Network::builder().observer(NoopObserver).seed(1).build()
}

/// First `key-{i}` whose id is closer to `near` than to `far`.
fn key_closer_to(near: &Node, far: &Node) -> String {
    (0..)
        .map(|i| format!("key-{i}"))
        .find(|key| Id::from_label(key).closer(near.id(), far.id()) == Ordering::Less)
        .unwrap()
}

/// First `{prefix}-{i}` label whose id is closer to `key` than `holder` is.
fn label_closer_than(prefix: &str, key: &str, holder: &Node) -> String {
    let key = Id::from_label(key);

    (0..)
        .map(|i| format!("{prefix}-{i}"))
        .find(|label| key.closer(&Id::from_label(label), holder.id()) == Ordering::Less)
        .unwrap()
}

#[test]
fn store_retrieve_round_trip() {
    let mut network = quiet();

    let a = network.create_node("A");
    let b = network.create_node("B");
    network.join(a.clone());
    network.join(b.clone());

    let key = key_closer_to(&b, &a);

    for _ in 0..10 {
        let holder = network.store_data(&key, "v", None).unwrap();
        assert_eq!(holder, b);
    }

    assert_eq!(network.retrieve_data(&key, None).unwrap(), Some(Bytes::from("v")));
    assert_eq!(b.get_data(&key), Some(Bytes::from("v")));
    assert_eq!(a.get_data(&key), None);
}

#[test]
fn migration_on_join() {
    let mut network = quiet();

    let a = network.create_node("A");
    let b = network.create_node("B");
    network.join(a.clone());
    network.join(b.clone());

    let key = "migrating-key";
    let holder = network.store_data(key, "v", None).unwrap();
    let other = if holder == a { &b } else { &a };
    assert_eq!(other.get_data(key), None);

    let c = network.create_node(&label_closer_than("C", key, &holder));
    network.join(c.clone());

    assert_eq!(c.get_data(key), Some(Bytes::from("v")));
    assert_eq!(holder.get_data(key), None);
    assert_eq!(other.get_data(key), None);

    for _ in 0..10 {
        assert_eq!(network.retrieve_data(key, None).unwrap(), Some(Bytes::from("v")));
    }
}

#[test]
fn no_migration_misses_data() {
    let mut network = Network::builder()
        .observer(NoopObserver)
        .rebalance_on_join(false)
        .seed(1)
        .build();

    let a = network.create_node("A");
    let b = network.create_node("B");
    network.join(a.clone());
    network.join(b.clone());

    let key = "stranded-key";
    let holder = network.store_data(key, "v", None).unwrap();

    let c = network.create_node(&label_closer_than("C", key, &holder));
    network.join(c.clone());

    // Still where it was placed, but every lookup now ends at C.
    assert_eq!(holder.get_data(key), Some(Bytes::from("v")));
    assert_eq!(c.get_data(key), None);
    assert_eq!(network.retrieve_data(key, None).unwrap(), None);
}

#[test]
fn idempotent_join() {
    let mut network = quiet();

    let a = network.create_node("A");
    let b = network.create_node("B");

    assert!(network.join(a.clone()));
    assert!(network.join(b.clone()));
    assert!(!network.join(a.clone()));
    assert!(!network.join(b.clone()));

    assert_eq!(network.len(), 2);
    assert_eq!(a.neighbor_ids(), vec![*b.id()]);
    assert_eq!(b.neighbor_ids(), vec![*a.id()]);
}

#[test]
fn empty_network_guard() {
    let network = quiet();
    let mut trace = Path::new();

    assert_eq!(
        network.store_data("key", "v", Some(&mut trace)).err(),
        Some(Error::EmptyNetwork)
    );
    assert_eq!(
        network.retrieve_data("key", Some(&mut trace)),
        Err(Error::EmptyNetwork)
    );

    assert!(trace.is_empty());
    assert!(network.is_empty());
    assert_eq!(network.info().stored_values(), 0);
}

#[test]
fn routing_tables_stay_bounded() {
    let mut network = quiet();

    for i in 0..64 {
        network.join(network.create_node(&format!("node-{i}")));
    }

    for node in network.members() {
        let ids = node.neighbor_ids();

        assert!(ids.len() <= node.k());
        assert!(!ids.contains(node.id()));

        let mut sorted = ids.clone();
        sorted.sort_by(|a, b| node.id().closer(a, b));
        sorted.dedup();
        assert_eq!(ids, sorted);
    }
}

#[test]
fn lookup_terminates_and_descends() {
    let mut network = quiet();

    for i in 0..64 {
        network.join(network.create_node(&format!("node-{i}")));
    }

    for _ in 0..200 {
        let target = Id::random();
        let mut trace = Path::new();

        let outcome = network.lookup(target, Some(&mut trace)).unwrap();

        assert!(outcome.expansions <= network.len() + 1);
        assert!(trace.len() <= network.len() + 1);
        assert_eq!(trace.last(), Some(&outcome.closest));

        // Every hop gets strictly closer to the target.
        for hop in trace.ids().windows(2) {
            assert_eq!(target.closer(&hop[1], &hop[0]), Ordering::Less);
        }
    }
}

#[test]
fn full_tables_find_global_optimum() {
    let mut network = Network::builder()
        .observer(NoopObserver)
        .k(32)
        .seed(9)
        .build();

    for i in 0..24 {
        network.join(network.create_node(&format!("node-{i}")));
    }

    for i in 0..100 {
        let key = format!("key-{i}");
        let holder = network.store_data(&key, i.to_string(), None).unwrap();

        assert_eq!(Some(&holder), network.closest_member(&Id::from_label(&key)));
        assert_eq!(
            network.retrieve_data(&key, None).unwrap(),
            Some(Bytes::from(i.to_string()))
        );
    }
}

#[test]
fn same_entry_point_always_finds() {
    let mut network = Network::builder()
        .observer(NoopObserver)
        .entry_point(EntryPoint::First)
        .build();

    for i in 0..48 {
        network.join(network.create_node(&format!("node-{i}")));
    }

    for i in 0..100 {
        network
            .store_data(&format!("key-{i}"), i.to_string(), None)
            .unwrap();
    }

    for i in 0..100 {
        assert_eq!(
            network.retrieve_data(&format!("key-{i}"), None).unwrap(),
            Some(Bytes::from(i.to_string()))
        );
    }

    assert_eq!(network.info().stored_values(), 100);
}

#[test]
fn values_are_never_lost_by_migration() {
    let mut network = quiet();

    network.join(network.create_node("node-0"));

    for i in 0..50 {
        network
            .store_data(&format!("key-{i}"), i.to_string(), None)
            .unwrap();
    }

    for i in 1..32 {
        network.join(network.create_node(&format!("node-{i}")));
        assert_eq!(network.info().stored_values(), 50);
    }
}

#[derive(Debug, Default)]
struct Recorder {
    migrations: Mutex<Vec<(Id, Id, Id)>>,
    stores: Mutex<Vec<(Id, Id)>>,
}

#[derive(Debug, Clone, Default)]
struct SharedRecorder(Arc<Recorder>);

impl Observer for SharedRecorder {
    fn stored(&self, key: &Id, holder: &Id, _hops: usize) {
        self.0.stores.lock().push((*key, *holder));
    }

    fn migrated(&self, key: &Id, from: &Id, to: &Id) {
        self.0.migrations.lock().push((*key, *from, *to));
    }
}

#[test]
fn observer_sees_stores_and_migrations() {
    let recorder = SharedRecorder::default();

    let mut network = Network::builder().observer(recorder.clone()).seed(5).build();

    let a = network.create_node("A");
    let b = network.create_node("B");
    network.join(a.clone());
    network.join(b.clone());

    let key = "observed-key";
    let holder = network.store_data(key, "v", None).unwrap();

    assert_eq!(
        recorder.0.stores.lock().as_slice(),
        &[(Id::from_label(key), *holder.id())]
    );

    let c = network.create_node(&label_closer_than("C", key, &holder));
    network.join(c.clone());

    assert_eq!(
        recorder.0.migrations.lock().as_slice(),
        &[(Id::from_label(key), *holder.id(), *c.id())]
    );
}
