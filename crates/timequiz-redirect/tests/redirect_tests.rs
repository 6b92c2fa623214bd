//! Redirect server integration tests over a real socket.

use reqwest::redirect::Policy;
use reqwest::StatusCode;
use timequiz_redirect::{serve_on, PathMap};
use tokio::net::TcpListener;

/// Spawn the server on a random port and return its base URL.
async fn spawn_server(map: PathMap) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        serve_on(listener, map).await.unwrap();
    });

    format!("http://127.0.0.1:{port}")
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn yaml_map_layered_over_defaults() {
    let yaml = r#"
- path: /urlshort
  url: https://github.com/gophercises/urlshort
"#;
    let map = PathMap::defaults().overlay(PathMap::from_yaml(yaml).unwrap());
    let base = spawn_server(map).await;
    let client = client();

    let response = client
        .get(format!("{base}/urlshort"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()["location"],
        "https://github.com/gophercises/urlshort"
    );

    let response = client
        .get(format!("{base}/urlshort-godoc"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn unknown_path_gets_fallback_page() {
    let base = spawn_server(PathMap::defaults()).await;

    let response = client()
        .get(format!("{base}/random_path_that_does_not_exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Hello, world!\n");
}

#[tokio::test]
async fn json_file_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paths.json");
    std::fs::write(&path, r#"[{"path": "/rust", "url": "https://www.rust-lang.org"}]"#).unwrap();

    let base = spawn_server(PathMap::from_file(&path).unwrap()).await;
    let response = client().get(format!("{base}/rust")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()["location"], "https://www.rust-lang.org");
}
