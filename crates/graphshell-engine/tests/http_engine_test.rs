//! Integration tests for the HTTP retrieval client against a mock service

use graphshell_core::config::Settings;
use graphshell_core::models::{Row, SearchOptions, Table, TableName};
use graphshell_core::ports::{BasicSearchTables, LocalSearchTables, SearchEngine};
use graphshell_core::GraphshellError;
use graphshell_engine::HttpSearchEngine;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn table(name: TableName, id: &str) -> Table {
    let row: Row = json!({ "id": id }).as_object().cloned().unwrap();
    Table::new(name, vec![row])
}

fn options() -> SearchOptions {
    SearchOptions {
        community_level: 2,
        response_type: "Multiple Paragraphs".to_string(),
        dynamic_community_selection: false,
    }
}

/// JSON bodies of every request the mock service received
async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .map(|req| serde_json::from_slice(&req.body).expect("JSON request body"))
        .collect()
}

#[tokio::test]
async fn test_local_search_sends_mode_tables_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/local"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Scrooge is a miser.",
            "context": { "entities": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine =
        HttpSearchEngine::new(server.uri(), Some("sk-test".to_string()), Duration::from_secs(5))
            .unwrap();

    let entities = table(TableName::Entities, "e1");
    let communities = table(TableName::Communities, "c1");
    let reports = table(TableName::CommunityReports, "r1");
    let text_units = table(TableName::TextUnits, "t1");
    let relationships = table(TableName::Relationships, "rel1");

    let response = engine
        .local_search(
            &Settings::default(),
            LocalSearchTables {
                entities: &entities,
                communities: &communities,
                community_reports: &reports,
                text_units: &text_units,
                relationships: &relationships,
                covariates: None,
            },
            "Who is Scrooge?",
            &options(),
        )
        .await
        .unwrap();

    assert_eq!(response.response, "Scrooge is a miser.");
    assert_eq!(response.context["entities"], 3);

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["query"], "Who is Scrooge?");
    assert_eq!(body["options"]["community_level"], 2);
    assert!(body["tables"]["covariates"].is_null());
    assert_eq!(body["tables"]["entities"]["rows"][0]["id"], "e1");
}

#[tokio::test]
async fn test_basic_search_sends_only_text_units() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/basic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = HttpSearchEngine::new(server.uri(), None, Duration::from_secs(5)).unwrap();
    let text_units = table(TableName::TextUnits, "t1");

    let response = engine
        .basic_search(
            &Settings::default(),
            BasicSearchTables {
                text_units: &text_units,
            },
            "What happens on Christmas Eve?",
            &options(),
        )
        .await
        .unwrap();

    assert_eq!(response.response, "ok");
    assert!(response.context.is_null());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let tables = body["tables"].as_object().unwrap();
    assert_eq!(tables.keys().collect::<Vec<_>>(), vec!["text_units"]);
}

#[tokio::test]
async fn test_service_error_status_is_search_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/basic"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "model overloaded" })),
        )
        .mount(&server)
        .await;

    let engine = HttpSearchEngine::new(server.uri(), None, Duration::from_secs(5)).unwrap();
    let text_units = table(TableName::TextUnits, "t1");

    let err = engine
        .basic_search(
            &Settings::default(),
            BasicSearchTables {
                text_units: &text_units,
            },
            "anything",
            &options(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GraphshellError::Search { ref mode, .. } if mode == "basic"));
    assert!(err.to_string().contains("model overloaded"));
}

#[tokio::test]
async fn test_undecodable_reply_is_search_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/basic"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let engine = HttpSearchEngine::new(server.uri(), None, Duration::from_secs(5)).unwrap();
    let text_units = table(TableName::TextUnits, "t1");

    let err = engine
        .basic_search(
            &Settings::default(),
            BasicSearchTables {
                text_units: &text_units,
            },
            "anything",
            &options(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GraphshellError::Search { .. }));
    assert!(err.to_string().contains("Failed to parse service response"));
}

#[tokio::test]
async fn test_unreachable_service_is_engine_unavailable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let engine =
        HttpSearchEngine::new(format!("http://{}", addr), None, Duration::from_secs(5)).unwrap();
    let text_units = table(TableName::TextUnits, "t1");

    let err = engine
        .basic_search(
            &Settings::default(),
            BasicSearchTables {
                text_units: &text_units,
            },
            "anything",
            &options(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GraphshellError::EngineUnavailable { .. }));
}
