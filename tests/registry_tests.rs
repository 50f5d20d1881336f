use flyer_clicks::infrastructure::mocks::MockClock;
use flyer_clicks::{
    ClickError, Flyer, FlyerId, FlyerRegistry, InMemoryRegistry, RegistryError, ShardedStorage,
};
use std::sync::Arc;
use std::thread;

fn registry_with(ids: &[&str]) -> InMemoryRegistry {
    let registry = InMemoryRegistry::builder()
        .with_clock(Arc::new(MockClock::new(0)))
        .build()
        .unwrap();
    for id in ids {
        registry.add_flyer(Flyer::new(*id, 5, 3).unwrap()).unwrap();
    }
    registry
}

#[test]
fn test_adding_one_flyer() {
    let registry = registry_with(&["1"]);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_adding_flyer_same_id() {
    let registry = registry_with(&["1"]);

    let result = registry.add_flyer(Flyer::new("1", 5, 3).unwrap());

    assert_eq!(registry.len(), 1);
    assert_eq!(
        result,
        Err(RegistryError::FlyerAlreadyExists(FlyerId::from("1")))
    );
}

#[test]
fn test_duplicate_with_different_policy_keeps_original() {
    let registry = registry_with(&["1"]);

    let duplicate = Flyer::new("1", 100, 1).unwrap();
    assert!(registry.add_flyer(duplicate).is_err());

    let policy = registry.with_flyer("1", |f| *f.policy()).unwrap();
    assert_eq!(policy.interval(), 5);
    assert_eq!(policy.rate_limit(), 3);
}

#[test]
fn test_adding_clicks_through_registry() {
    let registry = registry_with(&["1"]);

    registry.record_click("1", 1).unwrap();
    registry.record_click("1", 1).unwrap();
    registry.record_click("1", 2).unwrap();

    assert_eq!(registry.get_flyer("1").unwrap().total_clicks(), 3);
}

#[test]
fn test_spam_detection_through_registry() {
    let registry = registry_with(&["1"]);

    registry.record_click("1", 1).unwrap();
    registry.record_click("1", 2).unwrap();
    assert!(registry.record_click("1", 3).is_ok());

    let err = registry.record_click("1", 4).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Click(ClickError::SpamLimitExceeded { .. })
    ));

    assert!(registry.record_click("1", 5).is_err());
    assert_eq!(registry.get_flyer("1").unwrap().clicks(), &[1, 2, 3]);
}

#[test]
fn test_most_clicked_scenario() {
    let registry = registry_with(&["1", "2", "3"]);

    registry
        .with_flyer_mut("1", |f| {
            f.add_click(1).unwrap();
            f.add_click(5).unwrap();
        })
        .unwrap();

    registry
        .with_flyer_mut("2", |f| {
            f.add_click(1).unwrap();
            f.add_click(3).unwrap();
            f.add_click(4).unwrap();
            assert!(f.add_click(4).is_err());
            assert!(f.add_click(5).is_err());
        })
        .unwrap();

    assert_eq!(registry.get_flyer("1").unwrap().clicks(), &[1, 5]);
    assert_eq!(registry.get_flyer("2").unwrap().clicks(), &[1, 3, 4]);
    assert_eq!(registry.get_flyer("3").unwrap().total_clicks(), 0);

    let leader = registry.most_clicked(1, 4).unwrap();
    assert_eq!(leader.id, FlyerId::from("2"));
    assert_eq!(leader.clicks, 3);

    // Repeated reads without writes agree
    assert_eq!(registry.most_clicked(1, 4).unwrap(), leader);

    let ranking = registry.ranking(1, 4);
    let counts: Vec<usize> = ranking.iter().map(|l| l.clicks).collect();
    assert_eq!(counts, vec![3, 1, 0]);
}

#[test]
fn test_most_clicked_leader_is_a_handle() {
    let registry = registry_with(&["a", "b"]);
    registry.record_click("b", 2).unwrap();

    let leader = registry.most_clicked(0, 10).unwrap();
    registry.record_click(leader.id.as_str(), 3).unwrap();

    assert_eq!(registry.get_flyer("b").unwrap().clicks(), &[2, 3]);
}

#[test]
fn test_most_clicked_window_edges() {
    let registry = registry_with(&["edge", "inside"]);
    registry.record_click("edge", 10).unwrap();
    registry.record_click("edge", 20).unwrap();
    registry.record_click("inside", 15).unwrap();

    // Both bounds inclusive
    assert_eq!(registry.most_clicked(10, 20).unwrap().id.as_str(), "edge");
    // Just outside both bounds of "edge"
    assert_eq!(registry.most_clicked(11, 19).unwrap().id.as_str(), "inside");
    // Inverted range counts nothing
    assert_eq!(
        registry.most_clicked(20, 10),
        Err(RegistryError::NoQualifyingFlyer)
    );
}

#[test]
fn test_most_clicked_empty_and_all_zero() {
    let empty = registry_with(&[]);
    assert_eq!(
        empty.most_clicked(0, u64::MAX),
        Err(RegistryError::NoQualifyingFlyer)
    );

    let idle = registry_with(&["1", "2", "3"]);
    assert_eq!(
        idle.most_clicked(0, u64::MAX),
        Err(RegistryError::NoQualifyingFlyer)
    );
}

#[test]
fn test_tie_break_independent_of_insertion_order() {
    for order in [["x", "y", "z"], ["z", "y", "x"], ["y", "z", "x"]] {
        let registry = registry_with(&order);
        for id in order {
            registry.record_click(id, 7).unwrap();
        }
        assert_eq!(registry.most_clicked(0, 10).unwrap().id.as_str(), "x");
    }
}

#[test]
fn test_custom_storage_backend() {
    let registry: FlyerRegistry<Arc<ShardedStorage<FlyerId, Flyer>>> = FlyerRegistry::new(
        Arc::new(ShardedStorage::with_capacity_and_shards(4, 2)),
        Arc::new(MockClock::new(0)),
    );
    registry.add_flyer(Flyer::new("1", 5, 3).unwrap()).unwrap();
    assert!(registry.contains("1"));
    assert!(!registry.contains("2"));
}

#[test]
fn test_concurrent_registration_is_unique() {
    let registry = Arc::new(registry_with(&[]));
    let mut handles = vec![];

    for _ in 0..8 {
        let registry_clone = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            (0..50)
                .filter(|i| {
                    let flyer = Flyer::new(format!("flyer_{}", i), 5, 3).unwrap();
                    registry_clone.add_flyer(flyer).is_ok()
                })
                .count()
        }));
    }

    let registered: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(registered, 50);
    assert_eq!(registry.len(), 50);
    assert_eq!(registry.metrics().flyers_registered(), 50);
}

#[test]
fn test_concurrent_spam_gate_holds_per_flyer() {
    let registry = Arc::new(registry_with(&["hot"]));
    let mut handles = vec![];

    // Many writers hammer one flyer at the same timestamp
    for _ in 0..8 {
        let registry_clone = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            for _ in 0..20 {
                let _ = registry_clone.record_click("hot", 10);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.get_flyer("hot").unwrap().total_clicks(), 3);
    let snapshot = registry.metrics().snapshot();
    assert_eq!(snapshot.clicks_accepted, 3);
    assert_eq!(snapshot.clicks_rejected, 157);
}
