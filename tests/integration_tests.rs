//! Integration tests using mock HTTP server
//!
//! Exercises the full path: params → URI → GET → JSON decode

use pagefetch::config::load_config_from_str;
use pagefetch::{ErrorKind, Fetcher, HttpClient, HttpClientConfig, Page, PageParams};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Asset {
    id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct AssetList {
    data: Vec<Asset>,
}

fn fetcher_for(server: &MockServer) -> Fetcher<HttpClient> {
    Fetcher::new(HttpClient::new(server.uri()).unwrap())
}

fn filter_active() -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("filter".to_string(), "active".to_string());
    params
}

// ============================================================================
// get_page
// ============================================================================

#[tokio::test]
async fn test_get_page_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .and(query_param("filter", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[{"id":"1"}]}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let list: AssetList = fetcher.get_page("/assets", &filter_active()).await.unwrap();

    assert_eq!(
        list,
        AssetList {
            data: vec![Asset {
                id: "1".to_string()
            }]
        }
    );
}

#[tokio::test]
async fn test_get_page_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":"#))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let err = fetcher
        .get_page::<AssetList, _>("/assets", &filter_active())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_get_page_not_found_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": []})))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let err = fetcher
        .get_page::<AssetList, _>("/missing", &())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_get_page_server_error_is_retryable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let err = fetcher
        .get_page::<AssetList, _>("/flaky", &())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_get_page_resolution_failure_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let err = fetcher
        .get_page::<AssetList, _>("", &filter_active())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert!(err.to_string().contains("filter=active"));
}

#[tokio::test]
async fn test_get_page_with_page_params_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/assets"))
        .and(query_param("page[limit]", "2"))
        .and(query_param("filter[state]", "active"))
        .and(header("Accept", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "a"}, {"id": "b"}],
            "links": {"self": "/v3/assets?page[limit]=2"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/v3/", mock_server.uri()))
        .header("Accept", "application/vnd.api+json")
        .build();
    let fetcher = Fetcher::new(HttpClient::with_config(config).unwrap());

    let params = PageParams::new().limit(2).filter("state", "active");
    let page: Page<Asset> = fetcher.get_page("assets", &params).await.unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.next_link().is_none());
}

// ============================================================================
// page_from_link
// ============================================================================

#[tokio::test]
async fn test_page_from_absolute_link() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .and(query_param("page[cursor]", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "9"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // No base URL: the link must stand on its own
    let fetcher = Fetcher::new(HttpClient::with_config(HttpClientConfig::default()).unwrap());
    let link = format!("{}/assets?page%5Bcursor%5D=abc", mock_server.uri());

    let list: AssetList = fetcher.page_from_link(&link).await.unwrap();
    assert_eq!(list.data[0].id, "9");
}

#[tokio::test]
async fn test_page_from_malformed_link() {
    let fetcher = Fetcher::new(HttpClient::with_config(HttpClientConfig::default()).unwrap());

    let err = fetcher
        .page_from_link::<AssetList>("not a link at all")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

// ============================================================================
// Page walking
// ============================================================================

#[tokio::test]
async fn test_collect_all_follows_relative_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .and(query_param("page[cursor]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "3"}],
            "links": {"next": "/assets?page[cursor]=3"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .and(query_param("page[cursor]", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "links": {"next": "/assets?page[cursor]=4"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .and(query_param("page[limit]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "1"}, {"id": "2"}],
            "links": {"next": "/assets?page[cursor]=2"}
        })))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let assets: Vec<Asset> = fetcher
        .collect_all("/assets", &PageParams::new().limit(2), None)
        .await
        .unwrap();

    let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

// ============================================================================
// Config → Fetcher
// ============================================================================

#[tokio::test]
async fn test_fetcher_from_yaml_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/assets"))
        .and(header("X-Api-Key", "k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let yaml = format!(
        "base_url: {}/api\ntimeout_secs: 5\nheaders:\n  X-Api-Key: k1\n",
        mock_server.uri()
    );
    let fetcher = load_config_from_str(&yaml)
        .unwrap()
        .build_fetcher()
        .unwrap();

    let list: AssetList = fetcher.get_page("/assets", &()).await.unwrap();
    assert!(list.data.is_empty());
}

#[tokio::test]
async fn test_concurrent_fetches_share_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "1"}]
        })))
        .expect(5)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let calls = (0..5).map(|_| fetcher.get_page::<AssetList, _>("/assets", &()));
    let results = futures::future::join_all(calls).await;

    for result in results {
        assert_eq!(result.unwrap().data.len(), 1);
    }
}
