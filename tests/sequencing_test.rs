use std::sync::Arc;
use tour_engine::mock::MockTour;
use tour_engine::{Tour, TourStatus, TourSystem};

const ALL: [TourStatus; 4] = [
    TourStatus::Off,
    TourStatus::On,
    TourStatus::Waiting,
    TourStatus::Ended,
];

async fn system_with(tours: &[Arc<MockTour>]) -> TourSystem {
    let system = TourSystem::new();
    for tour in tours {
        system
            .service
            .register_tour(MockTour::as_tour(tour))
            .await
            .unwrap();
    }
    system
}

/// Only an OFF tour directly followed by an ON tour produces a hand-off.
#[tokio::test]
async fn test_next_active_over_every_pair() {
    for first in ALL {
        for second in ALL {
            let a = MockTour::new("a", first);
            let b = MockTour::new("b", second);
            let system = system_with(&[a, b]).await;

            let next = system.service.get_next_active_tour().await.unwrap();
            let expected = first == TourStatus::Off && second == TourStatus::On;
            assert_eq!(next.is_some(), expected, "{first} -> {second}");
            if expected {
                assert_eq!(next.unwrap().name(), Some("b"));
            }

            system.shutdown().await.unwrap();
        }
    }
}

/// A single tour never hands off, whatever its status.
#[tokio::test]
async fn test_next_active_single_tour() {
    for status in ALL {
        let system = system_with(&[MockTour::new("solo", status)]).await;
        assert!(system.service.get_next_active_tour().await.unwrap().is_none());
        system.shutdown().await.unwrap();
    }
}

/// `has_next_tour` and `get_next_tour` agree after registry changes.
#[tokio::test]
async fn test_has_next_matches_get_next() {
    let a = MockTour::new("a", TourStatus::Off);
    let b = MockTour::new("b", TourStatus::Off);
    let c = MockTour::new("c", TourStatus::Off);
    let system = system_with(&[a.clone(), b.clone(), c.clone()]).await;

    let check = |names: &'static [&'static str]| {
        let service = system.service.clone();
        async move {
            for name in names {
                let has = service.has_next_tour(*name).await.unwrap();
                let next = service.get_next_tour(*name).await.unwrap();
                assert_eq!(has, next.is_some(), "{name}");
            }
        }
    };

    check(&["a", "b", "c", "nope"]).await;
    system
        .service
        .unregister_tour(MockTour::as_tour(&b))
        .await
        .unwrap();
    check(&["a", "b", "c", "nope"]).await;

    let after_a = system.service.get_next_tour("a").await.unwrap().unwrap();
    assert_eq!(after_a.name(), Some("c"));
    assert!(system.service.get_next_tour("b").await.unwrap().is_none());

    // Lookup by instance
    let after_a = system
        .service
        .get_next_tour(MockTour::as_tour(&a))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_a.name(), Some("c"));

    system.shutdown().await.unwrap();
}

/// Waiting is an OR over every tour.
#[tokio::test]
async fn test_is_tour_waiting() {
    let empty = TourSystem::new();
    assert!(!empty.service.is_tour_waiting().await.unwrap());
    empty.shutdown().await.unwrap();

    let a = MockTour::new("a", TourStatus::On);
    let b = MockTour::new("b", TourStatus::Off);
    let c = MockTour::new("c", TourStatus::Waiting);
    let system = system_with(&[a.clone(), b.clone(), c.clone()]).await;

    assert!(system.service.is_tour_waiting().await.unwrap());
    assert_eq!(a.status_queries(), 1);
    assert_eq!(b.status_queries(), 1);
    assert_eq!(c.status_queries(), 1);

    c.set_status(TourStatus::Ended);
    assert!(!system.service.is_tour_waiting().await.unwrap());

    system.shutdown().await.unwrap();
}

/// Registering the same tour twice keeps both entries; unregister removes one.
#[tokio::test]
async fn test_duplicate_registration() {
    let a = MockTour::new("a", TourStatus::Off);
    let b = MockTour::new("b", TourStatus::Off);
    let system = system_with(&[a.clone(), b.clone(), a.clone()]).await;
    assert_eq!(system.service.len().await.unwrap(), 3);

    system
        .service
        .unregister_tour(MockTour::as_tour(&a))
        .await
        .unwrap();
    let names: Vec<_> = system
        .service
        .tours()
        .await
        .unwrap()
        .iter()
        .map(|t| t.name().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(names, vec!["b", "a"]);

    system.shutdown().await.unwrap();
}
