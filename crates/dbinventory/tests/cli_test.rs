mod common;

use common::TestProject;
use predicates::prelude::*;
use serde_json::json;

const LEDGER: &str = r#"{
    "groups": [
        {"name": "role", "type": "multiselect"},
        {"name": "env", "type": "select"}
    ],
    "tags": [
        {"name": "web", "group": "role"},
        {"name": "db", "group": "role"},
        {"name": "prod", "group": "env"}
    ],
    "hosts": [
        {"host": "10.0.0.1", "host_name": "web 1", "ssh_user": "deploy", "ssh_port": 2222, "tags": ["web", "prod"]},
        {"host": "10.0.0.2", "tags": ["db", "prod"]}
    ]
}"#;

/// Snapshot as the provider cache would have written it
const SNAPSHOT: &str = r#"{
    "data": {
        "droplets": [
            {"id": "5", "name": "app", "ip_address": "192.0.2.10", "region_id": "1",
             "image_id": "42", "size_id": "66", "status": "active"}
        ],
        "regions": [{"id": "1", "name": "New York 1", "slug": "nyc1"}],
        "images": [{"id": "42", "name": "Ubuntu 22.04", "slug": "ubuntu-22-04-x64", "distribution": "Ubuntu"}],
        "sizes": [{"id": "66", "name": "512MB", "slug": "512mb"}],
        "ssh_keys": [{"id": "7", "name": "laptop"}],
        "domains": []
    },
    "index": {
        "region_to_name": {"1": "nyc1"},
        "size_to_name": {"66": "512mb"},
        "image_to_name": {"42": "ubuntu-22-04-x64"},
        "image_to_distro": {"42": "Ubuntu"},
        "host_to_droplet": {"192.0.2.10": "5"}
    },
    "inventory": {
        "5": ["192.0.2.10"],
        "app": ["192.0.2.10"],
        "region_1": ["192.0.2.10"],
        "region_nyc1": ["192.0.2.10"],
        "status_active": ["192.0.2.10"]
    }
}"#;

fn imported() -> TestProject {
    let project = TestProject::new();
    let ledger = project.write_file("ledger.json", LEDGER);
    project
        .cmd()
        .args(["--db-create", "--db-import"])
        .arg(&ledger)
        .assert()
        .success();
    project
}

#[test]
fn test_help() {
    let project = TestProject::new();
    project
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--db-create"))
        .stdout(predicate::str::contains("--force-cache"));
}

#[test]
fn test_missing_database_without_create_fails() {
    let project = TestProject::new();
    project
        .cmd()
        .arg("--list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("--db-create"));
    assert!(!project.db_path().exists());
}

#[test]
fn test_create_then_list_empty() {
    let project = TestProject::new();
    let listed = project.json(&["--db-create"]);
    assert_eq!(listed, json!({}));
    assert!(project.db_path().exists());
}

#[test]
fn test_db_path_from_environment() {
    let project = TestProject::new();
    let db = project.path().join("elsewhere.sqlite3");
    project
        .cmd()
        .env("DBINVENTORY_PATH", &db)
        .arg("-c")
        .assert()
        .success();
    assert!(db.exists());
    assert!(!project.db_path().exists());
}

#[test]
fn test_import_then_list() {
    let project = imported();
    let listed = project.json(&["--list"]);

    assert_eq!(listed["web_1"], json!(["10.0.0.1"]));
    assert_eq!(listed["web"], json!(["10.0.0.1"]));
    assert_eq!(listed["role_web"], json!(["10.0.0.1"]));
    assert_eq!(listed["db"], json!(["10.0.0.2"]));
    assert_eq!(listed["env_prod"], json!(["10.0.0.1", "10.0.0.2"]));
}

#[test]
fn test_import_missing_file_fails() {
    let project = TestProject::new();
    project
        .cmd()
        .args(["-c", "-i", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_import_with_unknown_group_fails() {
    let project = TestProject::new();
    let bad = project.write_file(
        "bad.json",
        r#"{"tags": [{"name": "web", "group": "missing"}]}"#,
    );
    project
        .cmd()
        .args(["-c", "-i"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("group `missing` not found"));
}

#[test]
fn test_export_round_trip() {
    let project = imported();
    let exported = project.json(&["--db-export"]);

    assert_eq!(exported["groups"].as_array().unwrap().len(), 2);
    assert_eq!(exported["groups"][0], json!({"name": "role", "type": "multiselect"}));
    assert_eq!(exported["hosts"][0]["tags"], json!(["web", "prod"]));

    let copy = TestProject::new();
    let document = copy.write_file("export.json", &exported.to_string());
    copy.cmd()
        .args(["-c", "-i"])
        .arg(&document)
        .assert()
        .success();

    assert_eq!(copy.json(&["--list"]), project.json(&["--list"]));
}

#[test]
fn test_host_variables_for_ledger_host() {
    let project = imported();
    let vars = project.json(&["--host", "10.0.0.1"]);

    assert_eq!(vars["ansible_host"], "10.0.0.1");
    assert_eq!(vars["ansible_user"], "deploy");
    assert_eq!(vars["ansible_port"], 2222);
    assert!(vars.get("ansible_ssh_pass").is_none());
}

#[test]
fn test_host_variables_for_unknown_host() {
    let project = imported();
    assert_eq!(project.json(&["--host", "203.0.113.99"]), json!({}));
}

#[test]
fn test_add_host() {
    let project = imported();
    project
        .cmd()
        .args([
            "--add",
            "--address",
            "10.0.0.3",
            "--name",
            "cache",
            "--tag",
            "db",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("cache"));

    let listed = project.json(&[]);
    assert_eq!(listed["cache"], json!(["10.0.0.3"]));
    assert_eq!(listed["role_db"], json!(["10.0.0.2", "10.0.0.3"]));
}

#[test]
fn test_bare_host_is_listed_under_its_address() {
    let project = imported();
    project
        .cmd()
        .args(["--add", "--address", "10.0.0.7"])
        .assert()
        .success();

    let listed = project.json(&["--list"]);
    assert_eq!(listed["10.0.0.7"], json!(["10.0.0.7"]));
    assert_eq!(listed["10.0.0.1"], json!(["10.0.0.1"]));
}

#[test]
fn test_add_duplicate_host_keeps_first_fields() {
    let project = imported();
    project
        .cmd()
        .args(["-a", "--address", "10.0.0.1", "--ssh-user", "root"])
        .assert()
        .success();

    let vars = project.json(&["--host", "10.0.0.1"]);
    assert_eq!(vars["ansible_user"], "deploy");
}

#[test]
fn test_add_with_password_requires_secret() {
    let project = imported();
    project
        .cmd()
        .args(["-a", "--address", "10.0.0.4", "--ssh-pass", "hunter2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("database secret is required"));

    assert_eq!(project.json(&["--host", "10.0.0.4"]), json!({}));
}

#[test]
fn test_add_with_password_and_secret() {
    let project = imported();
    project
        .cmd()
        .args(["-a", "--address", "10.0.0.4", "--ssh-pass", "hunter2", "-s", "s3cret"])
        .assert()
        .success();

    let vars = project.json(&["--host", "10.0.0.4", "--db-secret", "s3cret"]);
    assert_eq!(vars["ansible_ssh_pass"], "hunter2");

    let without_secret = project.json(&["--host", "10.0.0.4"]);
    assert!(without_secret.get("ansible_ssh_pass").is_none());

    project
        .cmd()
        .args(["--host", "10.0.0.4", "-s", "wrong"])
        .assert()
        .failure();
}

#[test]
fn test_manage_shows_ledger() {
    let project = imported();
    project
        .cmd()
        .arg("--manage")
        .assert()
        .success()
        .stdout(predicate::str::contains("role"))
        .stdout(predicate::str::contains("10.0.0.2"))
        .stdout(predicate::str::contains("env:prod"));
}

#[test]
fn test_pretty_output() {
    let project = imported();
    project
        .cmd()
        .args(["--list", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"db\": [\n    \"10.0.0.2\"\n  ]"));
}

#[test]
fn test_env_without_credentials_fails() {
    let project = TestProject::new();
    project
        .cmd()
        .arg("--env")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DO_CLIENT_ID and DO_API_KEY"));
}

#[test]
fn test_env_prints_credentials() {
    let project = TestProject::new();
    project
        .cmd()
        .env("DO_CLIENT_ID", "abc")
        .args(["--env", "--api-key", "xyz"])
        .assert()
        .success()
        .stdout("DO_CLIENT_ID=abc DO_API_KEY=xyz\n");
}

#[test]
fn test_collection_without_credentials_fails() {
    let project = TestProject::new();
    project
        .cmd()
        .arg("--regions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("client_id and api_key"));
}

fn with_snapshot(project: &TestProject) {
    project.write_file("ansible-digital_ocean.cache", SNAPSHOT);
}

#[test]
fn test_collection_from_forced_cache() {
    let project = TestProject::new();
    with_snapshot(&project);

    let regions = project.json(&[
        "--regions",
        "--force-cache",
        "--client-id",
        "id",
        "--api-key",
        "key",
    ]);
    assert_eq!(
        regions,
        json!({"regions": [{"id": "1", "name": "New York 1", "slug": "nyc1"}]})
    );
}

#[test]
fn test_list_merges_cached_droplets() {
    let project = imported();
    with_snapshot(&project);

    let listed = project.json(&["--force-cache", "--client-id", "id", "--api-key", "key"]);
    assert_eq!(listed["web"], json!(["10.0.0.1"]));
    assert_eq!(listed["region_nyc1"], json!(["192.0.2.10"]));
}

#[test]
fn test_host_variables_from_forced_cache() {
    let project = imported();
    with_snapshot(&project);

    let vars = project.json(&[
        "--host",
        "192.0.2.10",
        "--force-cache",
        "--client-id",
        "id",
        "--api-key",
        "key",
    ]);
    assert_eq!(vars["do_name"], "app");
    assert_eq!(vars["do_region"], "nyc1");
    assert_eq!(vars["do_distro"], "Ubuntu");
    assert!(vars.get("ansible_host").is_none());
}

#[test]
fn test_empty_forced_cache_fails() {
    let project = TestProject::new();
    project.write_file("ansible-digital_ocean.cache", "{}");

    project
        .cmd()
        .args(["--all", "--force-cache", "--client-id", "id", "--api-key", "key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cache is empty"));
}
