//! mockito fixtures for the npm registry and GitHub endpoints

use mockito::{Mock, ServerGuard};

use dep_digest::config::Config;

/// Config pointing every endpoint at `server`, without vulnerability delay
pub fn test_config(server: &ServerGuard) -> Config {
    Config {
        registry_url: server.url(),
        github_api_url: server.url(),
        github_raw_url: server.url(),
        github_token: Some("test-token".to_string()),
        vulnerability_delay_ms: 0,
        ..Config::default()
    }
}

/// Mock `GET /{name}` on the npm registry
pub async fn mock_npm_package(
    server: &mut ServerGuard,
    name: &str,
    latest: &str,
    repository_url: Option<&str>,
) -> Mock {
    let repository = repository_url
        .map(|url| serde_json::json!({ "type": "git", "url": url }))
        .unwrap_or(serde_json::Value::Null);
    let body = serde_json::json!({
        "name": name,
        "dist-tags": { "latest": latest },
        "repository": repository,
    });

    server
        .mock("GET", format!("/{}", name).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Mock `GET /repos/{owner}/{repo}/releases/latest`
pub async fn mock_release(
    server: &mut ServerGuard,
    owner: &str,
    repo: &str,
    status: usize,
    body: &str,
) -> Mock {
    server
        .mock(
            "GET",
            format!("/repos/{}/{}/releases/latest", owner, repo).as_str(),
        )
        .match_header("authorization", "token test-token")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Mock `GET /{owner}/{repo}/main/CHANGELOG.md`
pub async fn mock_changelog(
    server: &mut ServerGuard,
    owner: &str,
    repo: &str,
    status: usize,
    body: &str,
) -> Mock {
    server
        .mock(
            "GET",
            format!("/{}/{}/main/CHANGELOG.md", owner, repo).as_str(),
        )
        .match_header("authorization", "token test-token")
        .with_status(status)
        .with_body(body)
        .create_async()
        .await
}
