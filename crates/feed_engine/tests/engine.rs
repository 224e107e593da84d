use std::time::Duration;

use feed_core::{update, Effect, FeedOptions, FeedState, LoadError, Msg, PageRequest};
use feed_engine::{EngineEvent, EngineHandle, FetchSettings};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn engine_for(server: &MockServer) -> EngineHandle {
    EngineHandle::new(FetchSettings {
        base_url: format!("{}/api", server.uri()),
        ..FetchSettings::default()
    })
    .expect("engine")
}

fn requests(effects: Vec<Effect>) -> Vec<PageRequest> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::FetchPage(request) => Some(request),
            _ => None,
        })
        .collect()
}

fn next_page(engine: &EngineHandle) -> Msg {
    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::PageFetched { request, result }) => Msg::PageFetched {
            request,
            result: result.map_err(LoadError::from),
        },
        other => panic!("expected a page, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_reports_article_lookups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "title": "x" })),
        )
        .mount(&server)
        .await;
    let engine = engine_for(&server);

    engine.fetch_article("7");

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::ArticleFetched { key, result }) => {
            assert_eq!(key, "7");
            let article = result.expect("lookup").expect("found");
            assert_eq!(article.title(), Some("x"));
        }
        other => panic!("expected an article, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn repeated_sentinel_sightings_issue_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }, { "id": 2 }])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(200))
                .set_body_json(json!([{ "id": 3 }])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let engine = engine_for(&server);
    let options = FeedOptions {
        page_size: 2,
        section: None,
        infinite_scroll: true,
    };

    let (state, effects) = update(FeedState::new(options), Msg::Mounted);
    for request in requests(effects) {
        engine.fetch_page(request);
    }
    let (state, _) = update(state, next_page(&engine));
    assert_eq!(state.items().len(), 2);

    let (state, first) = update(state, Msg::SentinelVisibility { ratio: 0.4 });
    let (state, second) = update(state, Msg::SentinelVisibility { ratio: 1.0 });
    let issued: Vec<_> = requests(first).into_iter().chain(requests(second)).collect();
    assert_eq!(issued.len(), 1);
    for request in issued {
        engine.fetch_page(request);
    }

    let (state, _) = update(state, next_page(&engine));
    assert_eq!(state.items().len(), 3);
    assert!(!state.has_more());
    assert!(engine.recv_timeout(Duration::from_millis(200)).is_none());
}
