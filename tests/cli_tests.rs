mod common;
use common::{rca, setup_test_db};
use predicates::str::contains;

fn init(db_path: &str) {
    rca()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));
}

/// campus 1, classroom 1, place 1 at (0,0), device 1, user 1
fn seed(db_path: &str) {
    init(db_path);
    let steps: [&[&str]; 5] = [
        &["campus", "add", "--number", "1", "--address", "Main"],
        &["classroom", "add", "--campus", "1", "--number", "101"],
        &["place", "add", "--classroom", "1", "--x", "0", "--y", "0"],
        &["device", "add", "--place", "1", "--description", "PC-01"],
        &["user", "add", "--login", "bob", "--email", "bob@example.org"],
    ];
    for args in steps {
        rca()
            .args(["--db", db_path, "--test"])
            .args(args)
            .assert()
            .success();
    }
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");
    init(&db_path);
    assert!(std::path::Path::new(&db_path).exists());

    rca()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Places"));
}

#[test]
fn test_duplicate_place_fails_with_conflict() {
    let db_path = setup_test_db("cli_place_conflict");
    seed(&db_path);

    rca()
        .args(["--db", &db_path, "--test", "place", "add"])
        .args(["--classroom", "1", "--x", "0", "--y", "0"])
        .assert()
        .failure()
        .stderr(contains("Conflict"));

    rca()
        .args(["--db", &db_path, "--test", "place", "add"])
        .args(["--classroom", "1", "--x", "-1", "--y", "0"])
        .assert()
        .success()
        .stdout(contains("Place (-1, 0) created"));
}

#[test]
fn test_problem_flow_updates_device_status() {
    let db_path = setup_test_db("cli_problem_flow");
    seed(&db_path);

    rca()
        .args(["--db", &db_path, "--test", "problem", "add"])
        .args(["--device", "1", "--user", "1", "--description", "no boot"])
        .assert()
        .success()
        .stdout(contains("Device 1 status: (none) → Pending"));

    rca()
        .args(["--db", &db_path, "--test", "--json", "device", "show", "1"])
        .assert()
        .success()
        .stdout(contains("\"status\": \"Pending\""));

    rca()
        .args(["--db", &db_path, "--test", "problem", "edit", "1"])
        .args(["--status", "in-progress"])
        .assert()
        .success()
        .stdout(contains("Pending → In Progress"));

    rca()
        .args(["--db", &db_path, "--test", "problem", "edit", "1"])
        .args(["--status", "Broken"])
        .assert()
        .failure()
        .stderr(contains("Validation failed"));

    rca()
        .args(["--db", &db_path, "--test", "problem", "del", "1"])
        .assert()
        .success()
        .stdout(contains("In Progress → (none)"));

    rca()
        .args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(contains("All device statuses are consistent"));
}

#[test]
fn test_place_delete_cascades() {
    let db_path = setup_test_db("cli_place_delete");
    seed(&db_path);

    rca()
        .args(["--db", &db_path, "--test", "problem", "add"])
        .args(["--device", "1", "--user", "1"])
        .assert()
        .success();

    rca()
        .args(["--db", &db_path, "--test", "place", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("1 place(s), 1 device(s), 1 problem(s)"));

    rca()
        .args(["--db", &db_path, "--test", "device", "show", "1"])
        .assert()
        .failure()
        .stderr(contains("Device 1 not found"));

    rca()
        .args(["--db", &db_path, "--test", "--json", "problem", "list"])
        .assert()
        .success()
        .stdout(contains("[]"));
}

#[test]
fn test_missing_references_report_not_found() {
    let db_path = setup_test_db("cli_not_found");
    seed(&db_path);

    rca()
        .args(["--db", &db_path, "--test", "problem", "add"])
        .args(["--device", "99", "--user", "1"])
        .assert()
        .failure()
        .stderr(contains("Device 99 not found"));

    rca()
        .args(["--db", &db_path, "--test", "place", "del", "42", "-y"])
        .assert()
        .failure()
        .stderr(contains("Place 42 not found"));
}

#[test]
fn test_duplicate_user_is_conflict() {
    let db_path = setup_test_db("cli_user_conflict");
    seed(&db_path);

    rca()
        .args(["--db", &db_path, "--test", "user", "add"])
        .args(["--login", "bob", "--email", "other@example.org"])
        .assert()
        .failure()
        .stderr(contains("Conflict"));
}

#[test]
fn test_log_records_mutations() {
    let db_path = setup_test_db("cli_log_print");
    seed(&db_path);

    rca()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("place 1"));
}

#[test]
fn test_read_commands_do_not_create_database() {
    let db_path = setup_test_db("cli_read_missing");

    for args in [["place", "list"], ["device", "show"], ["log", "--print"]] {
        let mut cmd = rca();
        cmd.args(["--db", &db_path, "--test"]).args(args);
        if args[1] == "show" {
            cmd.arg("1");
        }
        cmd.assert()
            .failure()
            .stderr(contains("run `rcampus init` first"));
    }
    assert!(!std::path::Path::new(&db_path).exists());

    init(&db_path);
    rca()
        .args(["--db", &db_path, "--test", "--json", "campus", "list"])
        .assert()
        .success()
        .stdout(contains("[]"));
}

#[test]
fn test_device_description_can_be_cleared() {
    let db_path = setup_test_db("cli_device_description");
    seed(&db_path);

    rca()
        .args(["--db", &db_path, "--test", "device", "edit", "1"])
        .args(["--description", ""])
        .assert()
        .success();

    rca()
        .args(["--db", &db_path, "--test", "--json", "device", "show", "1"])
        .assert()
        .success()
        .stdout(contains("\"description\": null"));
}
