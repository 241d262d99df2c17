//! Integration tests checking that the CLI and the library share state and
//! output formatting.

use std::process::Command;

use skillpath_core::{PlanDraft, Store, Suggestions, User};
use tempfile::TempDir;

/// Run a CLI command against `store_path` and capture its output
fn run_cli_command(store_path: &str, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_skillpath"));
    cmd.env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--api-url")
        .arg("http://127.0.0.1:9/api")
        .arg("--store-file")
        .arg(store_path);

    for arg in args {
        cmd.arg(arg);
    }

    cmd.output().expect("Failed to run CLI command")
}

#[tokio::test]
async fn test_staged_draft_is_visible_to_library() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store_path = temp_dir.path().join("store.db");
    let store_arg = store_path.to_str().unwrap();

    let output = run_cli_command(
        store_arg,
        &[
            "plan",
            "create",
            "--title",
            "Hooks",
            "--background",
            "Some React",
            "--scope",
            "Custom hooks",
            "--skill",
            "React",
            "--topic",
            "Hooks",
            "--task",
            "Read the docs:react.dev",
            "--course",
            "c-1",
            "--stage",
        ],
    );
    assert!(output.status.success());

    let store = Store::open(&store_path).await.expect("Failed to open store");
    let draft: PlanDraft = store
        .staged_draft()
        .await
        .unwrap()
        .expect("draft should be staged");

    assert_eq!(draft.title, "Hooks");
    assert_eq!(draft.skills, vec!["React"]);
    assert_eq!(draft.topics, vec!["Hooks"]);
    assert_eq!(draft.tasks.len(), 1);
    assert_eq!(draft.tasks[0].task_name, "Read the docs");
    assert_eq!(draft.tasks[0].task_description, "react.dev");
    assert_eq!(draft.related_course_ids, vec!["c-1"]);
}

#[tokio::test]
async fn test_logout_clears_library_state() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store_path = temp_dir.path().join("store.db");
    let store_arg = store_path.to_str().unwrap();

    let store = Store::open(&store_path).await.expect("Failed to open store");
    store.login(&User::with_id("u-1")).await.unwrap();
    store.set_saved("post-1", true).await.unwrap();

    assert!(run_cli_command(store_arg, &["logout"]).status.success());

    assert_eq!(store.current_user().await.unwrap(), None);
    assert!(store.saved_post_ids().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_whoami_matches_display_impl() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store_path = temp_dir.path().join("store.db");
    let store_arg = store_path.to_str().unwrap();

    assert!(run_cli_command(store_arg, &["login", "u-7", "--name", "Grace"])
        .status
        .success());

    let output = run_cli_command(store_arg, &["whoami"]);
    let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output");

    let user = User {
        name: Some("Grace".to_string()),
        ..User::with_id("u-7")
    };
    assert_eq!(stdout, user.to_string());
}

#[test]
fn test_empty_suggestions_text() {
    let empty = Suggestions {
        tasks: &[],
        selected: &[],
    };
    assert_eq!(empty.to_string(), "No generated tasks.\n");
}
