mod common;
use common::{count, device_status, new_place, open, seed, setup_test_db};
use rcampus::core::{DeviceRegistry, PlacementRegistry, ProblemStore};
use rcampus::errors::AppError;
use rcampus::models::device::DevicePatch;
use rcampus::models::place::{NewPlace, PlacePatch};
use rcampus::models::problem::NewProblem;

#[test]
fn test_same_coordinates_conflict_only_within_classroom() {
    let db_path = setup_test_db("placement_scenario_a");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    // (0, 0) in the first classroom is taken by the fixture place
    let err = PlacementRegistry::create_place(&mut pool, &new_place(fx.classroom, 0, 0))
        .expect_err("duplicate coordinates must fail");
    assert!(err.is_conflict(), "unexpected error: {err}");
    assert_eq!(err.status_code(), 409);

    let other = PlacementRegistry::create_place(&mut pool, &new_place(fx.other_classroom, 0, 0))
        .expect("same coordinates in another classroom");
    assert_eq!((other.x, other.y), (0, 0));
    assert_eq!(other.classroom_id, fx.other_classroom);

    assert_eq!(count(&pool, "places"), 2);
}

#[test]
fn test_create_place_in_missing_classroom() {
    let db_path = setup_test_db("placement_missing_classroom");
    let mut pool = open(&db_path);
    seed(&mut pool);

    let err = PlacementRegistry::create_place(&mut pool, &new_place(9999, 3, 3))
        .expect_err("missing classroom");
    assert!(matches!(
        err,
        AppError::NotFound {
            entity: "Classroom",
            id: 9999
        }
    ));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn test_blank_place_type_is_rejected() {
    let db_path = setup_test_db("placement_blank_type");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    let err = PlacementRegistry::create_place(
        &mut pool,
        &NewPlace {
            classroom_id: fx.classroom,
            x: 5,
            y: 5,
            place_type: "   ".into(),
        },
    )
    .expect_err("blank type");
    assert!(matches!(err, AppError::ValidationFailed(_)));
}

#[test]
fn test_update_uses_effective_coordinates() {
    let db_path = setup_test_db("placement_update_effective");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    // fixture place at (0,0); add (1,0) and (1,1)
    let p10 = PlacementRegistry::create_place(&mut pool, &new_place(fx.classroom, 1, 0)).unwrap();
    PlacementRegistry::create_place(&mut pool, &new_place(fx.classroom, 1, 1)).unwrap();

    // moving only y of (1,0) to 1 collides with (1,1)
    let err = PlacementRegistry::update_place(
        &mut pool,
        p10.id,
        &PlacePatch {
            y: Some(1),
            ..Default::default()
        },
    )
    .expect_err("collision on effective coordinates");
    assert!(err.is_conflict());

    // moving only x of (1,0) to 0 collides with the fixture place (0,0)
    let err = PlacementRegistry::update_place(
        &mut pool,
        p10.id,
        &PlacePatch {
            x: Some(0),
            ..Default::default()
        },
    )
    .expect_err("collision with fixture place");
    assert!(err.is_conflict());

    // y = 2 is free
    let moved = PlacementRegistry::update_place(
        &mut pool,
        p10.id,
        &PlacePatch {
            y: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!((moved.x, moved.y), (1, 2));
    assert_eq!(moved.place_type, "standard");
}

#[test]
fn test_update_to_own_coordinates_is_not_a_conflict() {
    let db_path = setup_test_db("placement_update_self");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    let same = PlacementRegistry::update_place(
        &mut pool,
        fx.place,
        &PlacePatch {
            x: Some(0),
            y: Some(0),
            place_type: Some("lectern".into()),
        },
    )
    .expect("the place itself is excluded from the check");
    assert_eq!((same.x, same.y), (0, 0));
    assert_eq!(same.place_type, "lectern");

    let stored = PlacementRegistry::get_place(&pool, fx.place).unwrap();
    assert_eq!(stored, same);
}

#[test]
fn test_partial_update_leaves_other_fields() {
    let db_path = setup_test_db("placement_partial_update");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    let updated = PlacementRegistry::update_place(
        &mut pool,
        fx.place,
        &PlacePatch {
            place_type: Some("window".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!((updated.x, updated.y), (0, 0));
    assert_eq!(updated.place_type, "window");

    let unchanged =
        PlacementRegistry::update_place(&mut pool, fx.place, &PlacePatch::default()).unwrap();
    assert_eq!(unchanged, updated);
}

#[test]
fn test_update_missing_place() {
    let db_path = setup_test_db("placement_update_missing");
    let mut pool = open(&db_path);
    seed(&mut pool);

    let err = PlacementRegistry::update_place(
        &mut pool,
        4242,
        &PlacePatch {
            x: Some(1),
            ..Default::default()
        },
    )
    .expect_err("missing place");
    assert!(err.is_not_found());
}

#[test]
fn test_rejected_create_leaves_no_row_or_log() {
    let db_path = setup_test_db("placement_rejected_no_side_effect");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    let places_before = count(&pool, "places");
    let log_before = count(&pool, "log");

    PlacementRegistry::create_place(&mut pool, &new_place(fx.classroom, 0, 0)).unwrap_err();

    assert_eq!(count(&pool, "places"), places_before);
    assert_eq!(count(&pool, "log"), log_before);
}

#[test]
fn test_list_places_by_classroom() {
    let db_path = setup_test_db("placement_list");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);

    PlacementRegistry::create_place(&mut pool, &new_place(fx.classroom, 0, 1)).unwrap();
    PlacementRegistry::create_place(&mut pool, &new_place(fx.other_classroom, 0, 1)).unwrap();

    let first = PlacementRegistry::list_places(&pool, Some(fx.classroom)).unwrap();
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|p| p.classroom_id == fx.classroom));

    let all = PlacementRegistry::list_places(&pool, None).unwrap();
    assert_eq!(all.len(), 3);

    assert!(
        PlacementRegistry::list_places(&pool, Some(777))
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn test_device_edit_moves_and_clears_description() {
    let db_path = setup_test_db("placement_device_edit");
    let mut pool = open(&db_path);
    let fx = seed(&mut pool);
    let new = NewProblem::reported(fx.device, fx.user, "no boot");
    ProblemStore::create(&mut pool, &new).unwrap();
    let spot = new_place(fx.classroom, 3, 1);
    let place = PlacementRegistry::create_place(&mut pool, &spot).unwrap();

    let moved = DevicePatch {
        place_id: Some(place.id),
        ..Default::default()
    };
    let device = DeviceRegistry::update_device(&mut pool, fx.device, &moved).unwrap();
    assert_eq!(device.place_id, place.id);
    assert_eq!(device.description.as_deref(), Some("PC-01"));
    assert_eq!(device_status(&pool, fx.device), "Pending");

    let cleared = DevicePatch {
        description: Some(None),
        ..Default::default()
    };
    let device = DeviceRegistry::update_device(&mut pool, fx.device, &cleared).unwrap();
    assert_eq!(device.description, None);
    assert_eq!(device.place_id, place.id);

    let renamed = DevicePatch {
        description: Some(Some("PC-02".into())),
        ..Default::default()
    };
    let device = DeviceRegistry::update_device(&mut pool, fx.device, &renamed).unwrap();
    assert_eq!(device.description.as_deref(), Some("PC-02"));

    let missing = DevicePatch {
        place_id: Some(999),
        ..Default::default()
    };
    let err = DeviceRegistry::update_device(&mut pool, fx.device, &missing).unwrap_err();
    assert_eq!(err.to_string(), "Place 999 not found");
}
