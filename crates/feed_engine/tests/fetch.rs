use std::time::Duration;

use feed_core::{ArticleId, LoadError, LoadErrorKind, PageRequest};
use feed_engine::{ArticleSource, FailureKind, FetchSettings, ReqwestArticleSource};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> ReqwestArticleSource {
    source_with(server, FetchSettings::default())
}

fn source_with(server: &MockServer, settings: FetchSettings) -> ReqwestArticleSource {
    ReqwestArticleSource::new(FetchSettings {
        base_url: format!("{}/api", server.uri()),
        ..settings
    })
    .expect("client")
}

fn first_page(section: Option<&str>) -> PageRequest {
    PageRequest {
        generation: 0,
        page: 1,
        limit: 2,
        section: section.map(ToOwned::to_owned),
        append: false,
    }
}

#[tokio::test]
async fn page_request_carries_paging_and_section() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .and(query_param("section", "news1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [
                { "id": 1, "title": "Flood", "section": "news1" },
                { "id": 2, "title": "Court", "section": "news1" }
            ],
            "page": 1,
            "totalItems": 9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let articles = source_for(&server)
        .fetch_page(&first_page(Some("news1")))
        .await
        .expect("page");

    let ids: Vec<_> = articles.iter().map(|article| article.id.clone()).collect();
    assert_eq!(ids, vec![ArticleId::Number(1), ArticleId::Number(2)]);
    assert_eq!(articles[0].title(), Some("Flood"));
}

#[tokio::test]
async fn bare_array_body_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param_is_missing("section"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "a-1" }])))
        .mount(&server)
        .await;

    let articles = source_for(&server)
        .fetch_page(&first_page(None))
        .await
        .expect("page");

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, ArticleId::Text("a-1".to_string()));
}

#[tokio::test]
async fn html_response_is_an_unexpected_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<!doctype html><html></html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_page(&first_page(None))
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::UnexpectedContentType {
            content_type: Some("text/html; charset=utf-8".to_string())
        }
    );
    assert_eq!(
        LoadError::from(err).kind,
        LoadErrorKind::UnexpectedContentType
    );
}

#[tokio::test]
async fn broken_json_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"articles\": [", "application/json"))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_page(&first_page(None))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedJson);
    assert_eq!(LoadError::from(err).kind, LoadErrorKind::Network);
}

#[tokio::test]
async fn json_of_the_wrong_shape_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_page(&first_page(None))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::UnexpectedShape);
}

#[tokio::test]
async fn server_error_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .fetch_page(&first_page(None))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(LoadError::from(err).kind, LoadErrorKind::Http(503));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let err = source_with(&server, settings)
        .fetch_page(&first_page(None))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(LoadError::from(err).kind, LoadErrorKind::Network);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("[{\"id\": 1}, {\"id\": 2}]", "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let err = source_with(&server, settings)
        .fetch_page(&first_page(None))
        .await
        .unwrap_err();

    assert!(
        matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }),
        "{err}"
    );
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Bind and release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("free port")
        .port();
    let source = ReqwestArticleSource::new(FetchSettings {
        base_url: format!("http://127.0.0.1:{port}/api"),
        ..FetchSettings::default()
    })
    .expect("client");

    let err = source.fetch_page(&first_page(None)).await.unwrap_err();

    assert_eq!(LoadError::from(err).kind, LoadErrorKind::Network);
}
