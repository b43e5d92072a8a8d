#[allow(dead_code)]
mod common;

use common::TestServer;
use tempfile::TempDir;

const ENTRY: &str = "<!doctype html><title>bobyx</title>";

/// Web root with an entry document and one asset. Removed on drop, so keep
/// the handle alive until the test finishes.
fn web_root() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("client")).unwrap();
    std::fs::write(root.path().join("client/index.html"), ENTRY).unwrap();
    std::fs::write(root.path().join("app.js"), "console.log('hi');").unwrap();
    root
}

#[tokio::test]
async fn serves_files_from_web_root() {
    let root = web_root();
    let server = TestServer::with_web_root(root.path()).await;

    let resp = reqwest::get(format!("{}/app.js", server.base_url()))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "console.log('hi');");
}

#[tokio::test]
async fn unmatched_paths_serve_entry_document() {
    let root = web_root();
    let server = TestServer::with_web_root(root.path()).await;

    for path in ["/", "/play/42", "/editor"] {
        let resp = reqwest::get(format!("{}{path}", server.base_url()))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "path {path}");
        assert_eq!(resp.text().await.unwrap(), ENTRY);
    }
}

#[tokio::test]
async fn api_routes_take_precedence() {
    let root = web_root();
    let server = TestServer::with_web_root(root.path()).await;

    let resp = reqwest::get(server.games_url()).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "games": [] }));
}

#[tokio::test]
async fn web_root_lives_for_the_whole_test() {
    let root = web_root();
    let server = TestServer::with_web_root(root.path()).await;

    for _ in 0..3 {
        let resp = reqwest::get(format!("{}/app.js", server.base_url()))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }
    assert!(root.path().join("client/index.html").is_file());

    let path = root.path().to_path_buf();
    drop(root);
    assert!(!path.exists());
}
