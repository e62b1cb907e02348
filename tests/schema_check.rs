use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use confkeep::SchemaError;
use confkeep::schema::{SchemaDocument, document::send_validated};
use serde_json::{Value, json};
use std::{
    fs,
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

async fn served_document() -> SchemaDocument {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "confkeep-openapi-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let store = confkeep::ConfigStorage::connect(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store");
    let app = confkeep::router::confkeep_router(confkeep::router::ConfkeepState::new(
        store.clone(),
    ));

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let raw: Value = serde_json::from_slice(&bytes).expect("openapi document is not json");

    store.close().await;
    let _ = fs::remove_file(&db_path);
    SchemaDocument::from_value(raw)
}

#[tokio::test]
async fn served_document_yields_request_models() {
    let doc = served_document().await;
    assert!(doc.model("ConfigCreate").is_some());
    assert!(doc.model("ConfigUpdate").is_some());
    assert!(doc.model("ConfigResponse").is_some());

    let create = doc.model_for_endpoint("/configs", "post").unwrap();
    assert_eq!(create.name, "ConfigCreate");
    let update = doc.model_for_endpoint("/configs/{key}", "put").unwrap();
    assert_eq!(update.name, "ConfigUpdate");
}

#[tokio::test]
async fn example_payload_validates_against_create_model() {
    let doc = served_document().await;
    let payload = json!({"key": "feature_x", "value": "true", "type": "boolean"});
    let validated = doc
        .validate_arguments("/configs", "post", &payload)
        .unwrap();
    assert_eq!(validated, payload);
}

#[tokio::test]
async fn payload_missing_required_field_is_rejected() {
    let doc = served_document().await;
    let err = doc
        .validate_arguments("/configs", "post", &json!({"value": "true"}))
        .unwrap_err();
    match err {
        SchemaError::Validation { model, issues } => {
            assert_eq!(model, "ConfigCreate");
            assert!(issues.fields().any(|f| f == "key"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn read_endpoints_have_no_request_model() {
    let doc = served_document().await;
    assert!(matches!(
        doc.model_for_endpoint("/configs", "get"),
        Err(SchemaError::MissingSchemaRef(_))
    ));
}

#[tokio::test]
async fn send_validated_succeeds_then_fails_on_conflict() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "confkeep-send-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let mut cfg = confkeep::config::Config::default();
    cfg.database_url = format!("sqlite:{}", db_path.display());
    let services = confkeep::service::registry::Services::start(&cfg)
        .await
        .expect("services failed to start");
    let app = confkeep::router::confkeep_router(confkeep::router::ConfkeepState::from(&services));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("no local addr");
    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = reqwest::Client::new();
    let base_url = Url::parse(&format!("http://{addr}")).expect("invalid base url");
    let payload = json!({"key": "feature_x", "value": "true", "type": "boolean"});

    let document = SchemaDocument::fetch(&client, &base_url)
        .await
        .expect("document fetch failed");
    let validated = document
        .validate_arguments("/configs", "post", &payload)
        .expect("payload rejected");

    let created = send_validated(&client, &base_url, "/configs", "post", &validated)
        .await
        .expect("first create failed");
    assert_eq!(created, payload);

    let err = send_validated(&client, &base_url, "/configs", "post", &validated)
        .await
        .unwrap_err();
    match err {
        SchemaError::Reqwest(e) => {
            assert_eq!(e.status(), Some(reqwest::StatusCode::BAD_REQUEST));
        }
        other => panic!("expected HTTP status error, got {other:?}"),
    }

    server.abort();
    services.close().await;
    let _ = fs::remove_file(&db_path);
}
