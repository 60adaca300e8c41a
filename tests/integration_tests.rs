//! End-to-end tests against a mock admin backend
//!
//! Each test starts the backend on an ephemeral port and drives the
//! console binary against it.

mod common;

use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use common::{console_cmd, MockBackend};

fn debug_backend() -> MockBackend {
    MockBackend::start(
        json!({"debug": {"type": "bool", "default": false, "description": "Debug mode"}}),
        json!({"debug": true}),
        json!([]),
    )
}

#[test]
fn test_settings_render_checks_debug() {
    let backend = debug_backend();

    console_cmd(&backend.url())
        .args(["settings", "render"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<input type="checkbox" id="debug" checked>"#))
        .stdout(predicate::str::contains("Debug mode"));
}

#[test]
fn test_unchanged_submit_posts_loaded_values() {
    let backend = debug_backend();

    console_cmd(&backend.url())
        .args(["settings", "set", "debug=true"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[success] Settings saved"));

    let posts = backend.posts_to("/api/config");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body, json!({"debug": true}));
}

#[test]
fn test_settings_set_types_every_field() {
    let backend = MockBackend::start(
        json!({
            "port": {"type": "int", "default": 8080},
            "ratio": {"type": "float"},
            "tags": {"type": "list"},
            "name": {"type": "string"}
        }),
        json!({"port": 80, "ratio": 0.5, "tags": ["a", "b"], "name": "x"}),
        json!([]),
    );

    console_cmd(&backend.url())
        .args(["settings", "set", "port=abc", "ratio=1.25", "tags=c, d", "name= y "])
        .assert()
        .success();

    let posts = backend.posts_to("/api/config");
    assert_eq!(
        posts[0].body,
        json!({"port": 8080, "ratio": 1.25, "tags": ["c", "d"], "name": "y"})
    );
}

#[test]
fn test_settings_set_unknown_field_fails_without_posting() {
    let backend = debug_backend();

    console_cmd(&backend.url())
        .args(["settings", "set", "nope=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));

    assert!(backend.posts_to("/api/config").is_empty());
}

#[test]
fn test_settings_render_to_file() {
    let backend = debug_backend();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("settings.html");

    console_cmd(&backend.url())
        .args(["settings", "render", "--output", out.to_str().unwrap()])
        .assert()
        .success();

    let html = std::fs::read_to_string(out).unwrap();
    assert!(html.contains(r#"id="debug""#));
}

#[test]
fn test_empty_persona_list_offers_create() {
    let backend = debug_backend();

    console_cmd(&backend.url())
        .args(["persona", "render"])
        .assert()
        .success()
        .stdout(predicate::str::contains("empty-personas"))
        .stdout(predicate::str::contains(r#"data-action="add""#));
}

#[test]
fn test_persona_add_persists_placeholder() {
    let backend = debug_backend();

    console_cmd(&backend.url())
        .args(["persona", "add"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("character_"))
        .stderr(predicate::str::contains("Persona created"));

    let personas = backend.personas();
    let list = personas.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert!(list[0]["persona_id"].as_str().unwrap().starts_with("character_"));
    assert_eq!(list[0]["png_path"], "");
    assert_eq!(list[0]["polished_prompt"], "Please enter a persona description...");
}

#[test]
fn test_persona_rename_collision_is_refused() {
    let backend = MockBackend::start(
        json!({}),
        json!({}),
        json!([{"persona_id": "alice"}, {"persona_id": "bob"}]),
    );

    console_cmd(&backend.url())
        .args(["persona", "rename", "alice", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in use"));

    assert!(backend.posts_to("/api/personas").is_empty());
}

#[test]
fn test_persona_delete_with_yes() {
    let backend = MockBackend::start(
        json!({}),
        json!({}),
        json!([{"persona_id": "alice", "voice": "alto"}, {"persona_id": "bob"}]),
    );

    console_cmd(&backend.url())
        .args(["persona", "delete", "bob", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Persona deleted"));

    assert_eq!(
        backend.personas(),
        json!([{"persona_id": "alice", "png_path": "", "polished_prompt": "", "polish_time": "", "voice": "alto"}])
    );
}

#[test]
fn test_persona_upload_sets_image() {
    let backend = MockBackend::start(json!({}), json!({}), json!([{"persona_id": "alice"}]));
    let tmp = TempDir::new().unwrap();
    let image = tmp.path().join("face.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

    console_cmd(&backend.url())
        .args(["persona", "upload", "alice", image.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Upload succeeded"));

    assert_eq!(backend.uploads(), vec![("face.png".to_string(), 4)]);
    assert_eq!(backend.personas()[0]["png_path"], "/img/face.png");
}

#[test]
fn test_persona_upload_rejects_text_file() {
    let backend = MockBackend::start(json!({}), json!({}), json!([{"persona_id": "alice"}]));
    let tmp = TempDir::new().unwrap();
    let notes = tmp.path().join("notes.txt");
    std::fs::write(&notes, "hello").unwrap();

    console_cmd(&backend.url())
        .args(["persona", "upload", "alice", notes.to_str().unwrap()])
        .assert()
        .failure()
        .code(60)
        .stderr(predicate::str::contains("E600"));

    assert!(backend.uploads().is_empty());
}

#[test]
fn test_persona_list_prints_ids() {
    let backend = MockBackend::start(
        json!({}),
        json!({}),
        json!([{"persona_id": "alice", "polish_time": "2024/3/9 08:05:01"}, {"persona_id": "bob"}]),
    );

    console_cmd(&backend.url())
        .args(["persona", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice\t2024/3/9 08:05:01"))
        .stdout(predicate::str::contains("bob\t-"));
}

#[test]
fn test_unknown_persona_exit_code() {
    let backend = MockBackend::start(json!({}), json!({}), json!([]));

    console_cmd(&backend.url())
        .args(["persona", "set-prompt", "ghost", "hello"])
        .assert()
        .failure()
        .code(50)
        .stderr(predicate::str::contains("E500"));
}

#[test]
fn test_persona_save_accepts_reply_without_flag() {
    let backend = MockBackend::start(
        json!({}),
        json!({}),
        json!([{"persona_id": "alice", "polished_prompt": "calm"}]),
    );

    console_cmd(&backend.url())
        .args(["persona", "save", "alice"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[success] Saved"));

    let posts = backend.posts_to("/api/personas");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body[0]["persona_id"], "alice");
    assert_eq!(posts[0].body[0]["polished_prompt"], "calm");
}
