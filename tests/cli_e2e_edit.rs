//! End-to-end tests for the `set` and `delete` commands.

mod common;
use common::prelude::*;

#[test]
fn test_set_prints_updated_document() {
    let fixture = TestFixture::new().with_file("doc.json", "{}");

    fixture
        .command()
        .args(["set", "doc.json", "x.y.z", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"z\": 5"));

    // Without --in-place the file is untouched.
    assert_eq!(fixture.read("doc.json"), "{}");
}

#[test]
fn test_set_in_place() {
    let fixture = TestFixture::new().with_file("doc.json", documents::NESTED_JSON);

    fixture
        .command()
        .args(["set", "doc.json", "a.d", r#"{"deep": [1, 2]}"#, "--in-place"])
        .assert()
        .success();

    let updated: serde_json::Value = serde_json::from_str(&fixture.read("doc.json")).unwrap();
    assert_eq!(updated["a"]["d"], serde_json::json!({"deep": [1, 2]}));
    assert_eq!(updated["a"]["b"], serde_json::json!(1));
}

#[test]
fn test_set_plain_string_value_in_yaml() {
    let fixture = TestFixture::new().with_file("doc.yaml", documents::NESTED_YAML);

    fixture
        .command()
        .args(["set", "doc.yaml", "a.c", "hello world", "-i"])
        .assert()
        .success();

    fixture
        .command()
        .args(["get", "doc.yaml", "a.c"])
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn test_set_through_scalar_fails() {
    let fixture = TestFixture::new().with_file("doc.json", r#"{"a": 5}"#);

    fixture
        .command()
        .args(["set", "doc.json", "a.b", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Type mismatch"));
}

#[test]
fn test_set_no_replace_refuses_existing() {
    let fixture = TestFixture::new().with_file("doc.json", documents::NESTED_JSON);

    fixture
        .command()
        .args(["set", "doc.json", "a.b", "2", "--no-replace"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry already exists"));

    fixture
        .command()
        .args(["set", "doc.json", "a.new", "2", "--no-replace"])
        .assert()
        .success();
}

#[test]
fn test_delete_in_place() {
    let fixture = TestFixture::new().with_file("doc.toml", documents::NESTED_TOML);

    fixture
        .command()
        .args(["delete", "doc.toml", "owner.name", "--in-place"])
        .assert()
        .success();

    let updated = fixture.read("doc.toml");
    assert!(updated.contains("title = \"demo\""));
    assert!(!updated.contains("someone"));
}

#[test]
fn test_delete_missing_fails() {
    let fixture = TestFixture::new().with_file("doc.yaml", documents::NESTED_YAML);

    fixture
        .command()
        .args(["delete", "doc.yaml", "servers.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key not found"));
}
