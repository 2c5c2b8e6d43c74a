//! Account and container mock tests

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::TryStreamExt;
use stratus_core::{ClientConfig, RestClient, RetryConfig};
use stratus_keystone::StaticToken;
use stratus_swift::SwiftApi;
use stratus_swift::options::{CreateContainerOptions, ListContainerOptions, UpdateContainerOptions};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn swift(server: &MockServer) -> SwiftApi {
    let config = ClientConfig::default().with_retry(RetryConfig::none());
    let endpoint = format!("{}/v1/AUTH_tenant", server.uri());
    let client = RestClient::new(&endpoint, config, Arc::new(StaticToken::new("token"))).unwrap();
    SwiftApi::new(client)
}

fn metadata(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Account
// ============================================================================

#[tokio::test]
async fn test_get_account() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/v1/AUTH_tenant"))
        .and(header("X-Auth-Token", "token"))
        .respond_with(
            ResponseTemplate::new(204)
                .insert_header("X-Account-Container-Count", "3")
                .insert_header("X-Account-Object-Count", "42")
                .insert_header("X-Account-Bytes-Used", "323479")
                .insert_header("X-Account-Meta-Temp-Url-Key", "secret")
                .insert_header("X-Account-Meta-Owner", "ops"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let account = swift(&server).account_api().get().await?;
    assert_eq!(account.container_count, 3);
    assert_eq!(account.object_count, 42);
    assert_eq!(account.bytes_used, 323479);
    assert_eq!(account.temporary_url_key(), Some("secret"));
    assert_eq!(account.metadata.get("owner").map(String::as_str), Some("ops"));
    Ok(())
}

#[tokio::test]
async fn test_account_metadata() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/AUTH_tenant"))
        .and(header("X-Account-Meta-Temp-Url-Key", "new-key"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/AUTH_tenant"))
        .and(header("X-Remove-Account-Meta-Owner", "x"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let account = swift(&server).account_api();
    assert!(account.update_temporary_url_key("new-key").await?);
    assert!(account.delete_metadata(&metadata(&[("Owner", "")])).await?);
    Ok(())
}

// ============================================================================
// Containers
// ============================================================================

#[tokio::test]
async fn test_list_containers() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/AUTH_tenant"))
        .and(query_param("format", "json"))
        .and(query_param("prefix", "ph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"count": 2, "bytes": 78, "name": "photos"},
            {"count": 0, "bytes": 0, "name": "physics"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let containers = swift(&server)
        .container_api()
        .list(&ListContainerOptions::new().prefix("ph"))
        .await?;
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].name, "photos");
    assert_eq!(containers[0].object_count, 2);
    assert_eq!(containers[0].bytes_used, 78);
    Ok(())
}

#[tokio::test]
async fn test_list_empty_account() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/AUTH_tenant"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let containers = swift(&server)
        .container_api()
        .list(&ListContainerOptions::new())
        .await?;
    assert!(containers.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_all_containers_uses_last_name_as_marker() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/AUTH_tenant"))
        .and(query_param("marker", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"count": 0, "bytes": 0, "name": "c"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/AUTH_tenant"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"count": 0, "bytes": 0, "name": "a"},
            {"count": 0, "bytes": 0, "name": "b"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let names: Vec<String> = swift(&server)
        .container_api()
        .list_all(&ListContainerOptions::new().limit(2))
        .map_ok(|container| container.name)
        .try_collect()
        .await?;
    assert_eq!(names, vec!["a", "b", "c"]);
    Ok(())
}

#[tokio::test]
async fn test_create_container() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/AUTH_tenant/photos"))
        .and(header("X-Container-Meta-Owner", "ops"))
        .and(header("X-Container-Read", ".r:*,.rlistings"))
        .and(header("X-Versions-Location", "photos-versions"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/AUTH_tenant/existing"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let containers = swift(&server).container_api();
    let created = containers
        .create(
            "photos",
            &CreateContainerOptions::new()
                .metadata("Owner", "ops")
                .anybody_read()
                .versions_location("photos-versions"),
        )
        .await?;
    assert!(created);
    assert!(
        !containers
            .create("existing", &CreateContainerOptions::new())
            .await?
    );
    Ok(())
}

#[tokio::test]
async fn test_get_container() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/v1/AUTH_tenant/photos"))
        .respond_with(
            ResponseTemplate::new(204)
                .insert_header("X-Container-Object-Count", "12")
                .insert_header("X-Container-Bytes-Used", "2048")
                .insert_header("X-Container-Read", ".r:*,.rlistings")
                .insert_header("X-Container-Meta-Web-Index", "index.html"),
        )
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/v1/AUTH_tenant/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let containers = swift(&server).container_api();
    let container = containers.get("photos").await?.expect("container exists");
    assert_eq!(container.name, "photos");
    assert_eq!(container.object_count, 12);
    assert_eq!(container.bytes_used, 2048);
    assert_eq!(container.anybody_read, Some(true));
    assert_eq!(
        container.metadata.get("web-index").map(String::as_str),
        Some("index.html")
    );

    assert!(containers.get("missing").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_update_container() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/AUTH_tenant/photos"))
        .and(header("X-Remove-Container-Read", "x"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/AUTH_tenant/photos"))
        .and(header("X-Container-Meta-Owner", "dev"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/AUTH_tenant/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let containers = swift(&server).container_api();
    assert!(
        containers
            .update("photos", &UpdateContainerOptions::new().anybody_read(false))
            .await?
    );
    assert!(
        containers
            .update_metadata("photos", &metadata(&[("owner", "dev")]))
            .await?
    );
    assert!(
        !containers
            .delete_metadata("missing", &metadata(&[("owner", "")]))
            .await?
    );
    Ok(())
}

#[tokio::test]
async fn test_delete_if_empty() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/AUTH_tenant/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/AUTH_tenant/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/AUTH_tenant/full"))
        .respond_with(ResponseTemplate::new(409).set_body_string("There was a conflict"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/AUTH_tenant/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let containers = swift(&server).container_api();
    assert!(containers.delete_if_empty("empty").await?);
    assert!(containers.delete_if_empty("gone").await?);
    assert!(!containers.delete_if_empty("full").await?);
    assert!(containers.delete_if_empty("broken").await.is_err());
    Ok(())
}
