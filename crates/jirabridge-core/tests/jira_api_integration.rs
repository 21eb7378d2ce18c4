//! Integration tests for the Jira REST client and action modes against a mock server

use assert_matches::assert_matches;
use jirabridge_core::config::{ActionInputs, MapSource};
use jirabridge_core::document::{ColumnPolicy, EnvironmentRow, FixedSchema, ParsedRow};
use jirabridge_core::jira::{self, CommentBody};
use jirabridge_core::{
    ClientConfig, CommentOutcome, ErrorKind, IssueInfoOutcome, IssueTracker, JiraClient,
    RunOutcome, TransitionOutcome,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTH: &str = "Basic Ym90QGV4YW1wbGUuY29tOmFwaS10b2tlbg==";

fn client(server: &MockServer) -> JiraClient {
    JiraClient::new(ClientConfig::new(
        server.uri(),
        "bot@example.com".to_string(),
        "api-token".to_string(),
    ))
}

fn cell(kind: &str, paragraphs: Vec<Value>) -> Value {
    json!({"type": kind, "content": paragraphs})
}

fn text_para(text: &str) -> Value {
    json!({"type": "paragraph", "content": [{"type": "text", "text": text}]})
}

fn environment_issue(key: &str) -> Value {
    json!({
        "key": key,
        "fields": {
            "summary": "Release train",
            "status": {"name": "Ready for Release"},
            "issuetype": {"name": "Story"},
            "environment": {
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "table",
                    "content": [
                        {"type": "tableRow", "content": [
                            cell("tableHeader", vec![text_para("Environment")]),
                            cell("tableHeader", vec![text_para("Branch")]),
                            cell("tableHeader", vec![text_para("Path to Build")]),
                        ]},
                        {"type": "tableRow", "content": [
                            cell("tableCell", vec![text_para("Staging")]),
                            cell("tableCell", vec![text_para("main")]),
                            cell("tableCell", vec![json!({
                                "type": "paragraph",
                                "content": [
                                    {"type": "text", "text": "/builds/a"},
                                    {"type": "hardBreak"},
                                    {"type": "text", "text": "/builds/b"}
                                ]
                            })]),
                        ]}
                    ]
                }]
            }
        }
    })
}

#[tokio::test]
async fn test_get_sends_basic_auth_and_parses_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-1"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "PROJ-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let value = client(&server).get("/issue/PROJ-1").await.unwrap();
    assert_eq!(value, Some(json!({"key": "PROJ-1"})));
}

#[tokio::test]
async fn test_status_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/GONE-1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/DENY-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/BOOM-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server on fire"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/api/3/issue/EMPTY-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.get("/issue/GONE-1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = client.get("/issue/DENY-1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = client.get("/issue/BOOM-1").await.unwrap_err();
    assert_eq!(err.to_string(), "API error 500: server on fire");

    assert_eq!(client.delete("/issue/EMPTY-1").await.unwrap(), None);
}

#[tokio::test]
async fn test_put_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/rest/api/3/issue/PROJ-1"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"fields": {"summary": "new"}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .put("/issue/PROJ-1", &json!({"fields": {"summary": "new"}}))
        .await
        .unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_invalid_json_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/myself"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server).get("/myself").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Json);
}

#[tokio::test]
async fn test_issue_info_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/REL-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(environment_issue("REL-7")))
        .mount(&server)
        .await;

    let schema = FixedSchema::parse("Environment,Branch,Path to Build").unwrap();
    let policy = ColumnPolicy::Fixed(schema);
    let outcome = jira::issue_info(&client(&server), &server.uri(), "REL-7", &policy)
        .await
        .unwrap();

    let IssueInfoOutcome::Found(info) = outcome else {
        panic!("expected Found, got {:?}", outcome);
    };
    assert_eq!(info.status.as_deref(), Some("Ready for Release"));
    assert_eq!(info.url, format!("{}/browse/REL-7", server.uri()));
    assert_eq!(
        info.environments,
        vec![ParsedRow::Fixed(EnvironmentRow {
            env: "Staging".to_string(),
            branch: "main".to_string(),
            build_paths: vec!["/builds/a".to_string(), "/builds/b".to_string()],
            upsert_paths: vec![],
        })]
    );

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["environments"][0]["buildPaths"], json!(["/builds/a", "/builds/b"]));
}

#[tokio::test]
async fn test_issue_info_open_schema() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/REL-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(environment_issue("REL-8")))
        .mount(&server)
        .await;

    let outcome = jira::issue_info(&client(&server), &server.uri(), "REL-8", &ColumnPolicy::open())
        .await
        .unwrap();
    let IssueInfoOutcome::Found(info) = outcome else {
        panic!("expected Found");
    };
    let json = serde_json::to_value(&info.environments).unwrap();
    assert_eq!(
        json,
        json!([{
            "environment": ["Staging"],
            "branch": ["main"],
            "pathToBuild": ["/builds/a", "/builds/b"]
        }])
    );
}

#[tokio::test]
async fn test_transition_flow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "PROJ-2",
            "fields": {
                "summary": "x",
                "issuetype": {"name": "Story"},
                "status": {"name": "In Progress"}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/PROJ-2/transitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transitions": [
                {"id": "11", "name": "To Do"},
                {"id": "31", "name": "CODE REVIEW"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/issue/PROJ-2/transitions"))
        .and(body_json(json!({"transition": {"id": "31"}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let source = MapSource::new()
        .with("JIRA_BASE_URL", server.uri())
        .with("JIRA_USER_EMAIL", "bot@example.com")
        .with("JIRA_API_TOKEN", "api-token")
        .with("JIRA_ISSUE_KEY", "proj 2")
        .with("ACTIONS_MODE", "Transition");
    let inputs = ActionInputs::from_source(&source).unwrap();

    let outcome = jirabridge_core::run(&inputs).await.unwrap();
    assert_matches!(
        outcome,
        RunOutcome::Transition(TransitionOutcome::Transitioned { ref transition })
            if transition.id == "31"
    );
}

#[tokio::test]
async fn test_comment_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/api/3/issue/PROJ-3/comment"))
        .and(body_json(json!({
            "body": {
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [{"type": "text", "text": "Deployed"}]
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "10001"})))
        .expect(1)
        .mount(&server)
        .await;

    let body = CommentBody::Plain("Deployed".to_string());
    let outcome = jira::add_comment(&client(&server), "PROJ-3", &body)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        CommentOutcome::Posted {
            id: Some("10001".to_string())
        }
    );
}

#[tokio::test]
async fn test_tracker_missing_issue() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/issue/NOPE-1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).get_issue("NOPE-1").await.unwrap_err();
    assert!(err.is_not_found());

    let policy = ColumnPolicy::default();
    let outcome = jira::issue_info(&client(&server), &server.uri(), "NOPE-1", &policy)
        .await
        .unwrap();
    assert_eq!(outcome, IssueInfoOutcome::IssueNotFound);
}
