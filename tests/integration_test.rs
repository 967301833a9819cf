// Integration tests for browser-session
// Run with: cargo test --test integration_test

use std::path::Path;
use std::process::Command;

use browser_session::bookmarks::FAVORITES_ID;
use browser_session::storage::{keys, KeyValueStore, MemoryStore, Persistence, SqliteStore};
use browser_session::{ClearRange, GroupColor, SessionStore};
use tempfile::TempDir;

fn run_cli(db: &Path, args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_browser-session"))
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.success(), stdout, stderr)
}

fn sqlite_session(path: &Path) -> SessionStore {
    let backend = SqliteStore::open(path).expect("open sqlite store");
    SessionStore::open(Persistence::new(backend))
}

#[test]
fn test_new_session_round_trip() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("session.sqlite3");

    let (first_id, second_id) = {
        let mut session = sqlite_session(&db);
        let first = session.active_tab_id().unwrap().to_string();
        session.navigate(&first, "example.com");
        session.finish_loading(&first, Some("Example Domain"));
        let second = session.create_tab(Some("rust-lang.org"), None).id;
        session.create_group("Docs", GroupColor::Green, &[second.as_str()]);
        (first, second)
    };

    let session = sqlite_session(&db);
    assert_eq!(session.tabs().len(), 2);
    assert_eq!(session.active_tab_id(), Some(second_id.as_str()));

    let first = session.tab(&first_id).unwrap();
    assert_eq!(first.url, "https://example.com");
    assert_eq!(first.title, "Example Domain");
    assert_eq!(first.history_index, 1);

    let group = &session.groups()[0];
    assert_eq!(group.tab_ids, vec![second_id.clone()]);
    assert_eq!(session.history().entries()[0].title, "Example Domain");
}

#[test]
fn test_reopen_after_multi_close() {
    let mut session = SessionStore::open(Persistence::in_memory());
    let urls = ["one.com", "two.com", "three.com"];
    let ids: Vec<String> = urls
        .iter()
        .map(|url| session.create_tab(Some(*url), None).id)
        .collect();

    for id in &ids {
        session.close_tab(id);
    }

    let reopened: Vec<String> = std::iter::from_fn(|| session.reopen_closed_tab())
        .map(|tab| tab.url)
        .collect();
    assert_eq!(
        reopened,
        vec!["https://three.com", "https://two.com", "https://one.com"]
    );
    assert_eq!(session.tabs().len(), 4);
}

#[test]
fn test_closed_stack_is_bounded() {
    let mut session = SessionStore::open(Persistence::in_memory());
    for i in 0..30 {
        let id = session.create_tab(Some(format!("site{}.com", i).as_str()), None).id;
        session.close_tab(&id);
    }
    assert_eq!(session.closed_tabs().len(), 25);
    assert_eq!(
        session.closed_tabs().peek().unwrap().tab.url,
        "https://site29.com"
    );
}

#[test]
fn test_history_search_and_clear() {
    let mut session = SessionStore::open(Persistence::in_memory());
    let id = session.active_tab_id().unwrap().to_string();
    session.navigate(&id, "rust-lang.org");
    session.navigate(&id, "rust lang");
    session.navigate(&id, "example.com");

    let hits = session.search_history("RUST");
    assert_eq!(hits.len(), 2);
    assert!(hits[0].url.starts_with("https://www.google.com/search?q=rust"));

    assert_eq!(session.clear_history(ClearRange::Hour), 0);
    assert_eq!(session.clear_history(ClearRange::All), 3);
    assert!(session.search_history("").is_empty());
}

#[test]
fn test_top_sites_ranking() {
    let mut session = SessionStore::open(Persistence::in_memory());
    let id = session.active_tab_id().unwrap().to_string();
    for _ in 0..3 {
        session.navigate(&id, "news.example.com");
    }
    session.navigate(&id, "blog.example.com");

    let top = session.top_sites(2);
    assert_eq!(top[0].url, "https://news.example.com");
    assert_eq!(top[0].visit_count, 3);
    assert_eq!(top[1].url, "https://blog.example.com");
}

#[test]
fn test_corrupt_payloads_fall_back() {
    let mut backend = MemoryStore::new();
    backend.set(keys::HISTORY, "not json").unwrap();
    backend.set(keys::BOOKMARKS, "{\"type\": \"folder\"}").unwrap();
    backend.set(keys::READING_LIST, "[]").unwrap();

    let session = SessionStore::open(Persistence::new(backend));
    assert!(session.history().is_empty());
    assert!(session.bookmarks().find(FAVORITES_ID).is_some());
    assert_eq!(session.tabs().len(), 1);

    let report = session.validation_report();
    assert!(report.discarded().contains(&keys::HISTORY));
    assert!(report.discarded().contains(&keys::BOOKMARKS));
    assert!(!report.discarded().contains(&keys::READING_LIST));
}

#[test]
fn test_failed_import_leaves_tree_untouched() {
    let mut session = SessionStore::open(Persistence::in_memory());
    session.add_bookmark("https://a.com", "A", None);
    let before = session.export_bookmarks();

    let bad = r#"[{"type": "bookmark", "title": "ok", "url": "https://b.com"}, {"type": "bookmark"}]"#;
    assert!(!session.import_bookmarks(bad));
    assert_eq!(session.export_bookmarks(), before);
}

#[test]
fn test_cli_open_and_list_tabs() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");

    let (success, stdout, stderr) = run_cli(&db, &["open", "example.com"]);
    assert!(success, "open failed: {}", stderr);
    assert!(stdout.contains("https://example.com"));

    let (success, stdout, _) = run_cli(&db, &["tabs"]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.lines().any(|line| line.starts_with('*') && line.contains("https://example.com")));

    let (success, stdout, _) = run_cli(&db, &["validate"]);
    assert!(success);
    assert!(stdout.contains("Session Validation Report"));
    assert!(stdout.contains("Summary"));

    println!("✅ CLI open/tabs/validate works");
}

#[test]
fn test_cli_rejects_bad_range() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");

    let (success, _, _) = run_cli(&db, &["clear-history", "fortnight"]);
    assert!(!success);
}
