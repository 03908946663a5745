mod common;
use common::{add_device, device_status, new_place, open, seed, setup_test_db};
use rcampus::core::status::verify_all;
use rcampus::core::{PlacementRegistry, ProblemStore};
use rcampus::db::pool::DbPool;
use rcampus::models::problem::{NewProblem, ProblemStatus};
use std::sync::{Arc, Barrier};
use std::thread;

const WORKERS: usize = 8;

#[test]
fn test_concurrent_problem_creation_keeps_status_consistent() {
    let db_path = setup_test_db("concurrency_scenario_c");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    let barrier = Arc::new(Barrier::new(WORKERS));
    let handles: Vec<_> = (0..WORKERS)
        .map(|i| {
            let path = db_path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut pool = DbPool::new(&path).expect("worker db");
                let status = ProblemStatus::ALL[i % ProblemStatus::ALL.len()];
                barrier.wait();
                ProblemStore::create(
                    &mut pool,
                    &NewProblem::reported(fx.device, fx.user, format!("worker {i}"))
                        .with_status(status),
                )
                .map(|(p, _)| p)
            })
        })
        .collect();

    let created: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked").expect("create failed"))
        .collect();
    assert_eq!(created.len(), WORKERS);

    let first = created.iter().min_by_key(|p| p.id).unwrap();
    assert_eq!(device_status(&pool, fx.device), first.status.to_db_str());
    assert!(verify_all(&pool.conn).unwrap().is_empty());
}

#[test]
fn test_concurrent_deactivation_settles_on_survivor() {
    let db_path = setup_test_db("concurrency_deactivate");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    let mut ids = Vec::new();
    for i in 0..WORKERS {
        let status = ProblemStatus::ALL[i % ProblemStatus::ALL.len()];
        let (p, _) = ProblemStore::create(
            &mut pool,
            &NewProblem::reported(fx.device, fx.user, format!("p{i}")).with_status(status),
        )
        .unwrap();
        ids.push(p.id);
    }
    let survivor = *ids.last().unwrap();
    let expected = ProblemStore::get(&pool, survivor).unwrap().status;

    let barrier = Arc::new(Barrier::new(WORKERS - 1));
    let handles: Vec<_> = ids[..WORKERS - 1]
        .iter()
        .map(|&id| {
            let path = db_path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut pool = DbPool::new(&path).expect("worker db");
                barrier.wait();
                ProblemStore::delete(&mut pool, id)
            })
        })
        .collect();
    for h in handles {
        h.join().expect("worker panicked").expect("delete failed");
    }

    assert_eq!(device_status(&pool, fx.device), expected.to_db_str());
    assert!(verify_all(&pool.conn).unwrap().is_empty());
}

#[test]
fn test_concurrent_place_creation_has_one_winner() {
    let db_path = setup_test_db("concurrency_place_race");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    let barrier = Arc::new(Barrier::new(WORKERS));
    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let path = db_path.clone();
            let barrier = Arc::clone(&barrier);
            let classroom = fx.classroom;
            thread::spawn(move || {
                let mut pool = DbPool::new(&path).expect("worker db");
                barrier.wait();
                PlacementRegistry::create_place(&mut pool, &new_place(classroom, 7, 7))
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.is_conflict())
    );

    let at_seven = PlacementRegistry::list_places(&pool, Some(fx.classroom))
        .unwrap()
        .into_iter()
        .filter(|p| (p.x, p.y) == (7, 7))
        .count();
    assert_eq!(at_seven, 1);
}

#[test]
fn test_independent_devices_in_parallel() {
    let db_path = setup_test_db("concurrency_independent");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    let mut devices = vec![fx.device];
    for i in 1..WORKERS as i64 {
        let spot = new_place(fx.classroom, i, 0);
        let place = PlacementRegistry::create_place(&mut pool, &spot).unwrap();
        devices.push(add_device(&mut pool, place.id));
    }

    let handles: Vec<_> = devices
        .iter()
        .map(|&device| {
            let path = db_path.clone();
            thread::spawn(move || {
                let mut pool = DbPool::new(&path).expect("worker db");
                ProblemStore::create(
                    &mut pool,
                    &NewProblem::reported(device, fx.user, "parallel")
                        .with_status(ProblemStatus::InProgress),
                )
            })
        })
        .collect();
    for h in handles {
        h.join().expect("worker panicked").expect("create failed");
    }

    for device in devices {
        assert_eq!(device_status(&pool, device), "In Progress");
    }
}
