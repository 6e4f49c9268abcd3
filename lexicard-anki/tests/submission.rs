//! End-to-end submission flows against a mock AnkiConnect endpoint.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lexicard_anki::schema::{self, NoteSchema};
use lexicard_anki::{AnkiClient, AnkiError, MappingLayout, NoteSubmitter};
use lexicard_core::assembler::assemble;
use lexicard_core::language::LanguageProfile;
use lexicard_core::parser::parse_response;
use lexicard_core::types::DisplayCard;

const KISSA: &str =
    r#"{"phrase":"kissa","translations":["Cat"],"examples":["Kissa nukkuu."],"notes":["feline"]}"#;

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "result": result, "error": null }))
}

fn kissa_card() -> DisplayCard {
    assemble(&parse_response(KISSA).expect("fixture parses"))
}

async fn mount_result(server: &MockServer, action: &str, result: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "action": action, "version": 6 })))
        .respond_with(ok(result))
        .mount(server)
        .await;
}

async fn mount_error(server: &MockServer, action: &str, message: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "action": action })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "result": null, "error": message })),
        )
        .mount(server)
        .await;
}

fn submitter(server: &MockServer) -> NoteSubmitter {
    NoteSubmitter::new(AnkiClient::new(server.uri()), "Suomi", LanguageProfile::new("Finnish"))
}

#[tokio::test]
async fn rich_schema_places_headword_in_language_field() {
    let server = MockServer::start().await;
    mount_result(&server, "version", json!(6)).await;
    mount_result(&server, "modelNames", json!(["Basic", "Finnish Vocab"])).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "modelFieldNames",
            "params": { "modelName": "Finnish Vocab" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": ["Finnish", "Translation", "Finnish Example", "Notes"],
            "error": null
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "addNote",
            "params": { "note": {
                "deckName": "Suomi",
                "modelName": "Finnish Vocab",
                "fields": {
                    "Finnish": "kissa",
                    "Translation": "- cat",
                    "Finnish Example": "Kissa nukkuu.",
                    "Notes": "feline"
                },
                "tags": ["auto-generated", "finnish"]
            }}
        })))
        .respond_with(ok(json!(1_700_000_000_001_i64)))
        .expect(1)
        .mount(&server)
        .await;

    let submission = submitter(&server).submit(&kissa_card()).await.expect("should submit");
    assert_eq!(submission.note_id, 1_700_000_000_001);
    assert_eq!(submission.note_type, "Finnish Vocab");
    assert_eq!(submission.layout, MappingLayout::Rich);
    assert!(!submission.degraded);
}

#[tokio::test]
async fn front_back_schema_gets_composed_back() {
    let server = MockServer::start().await;
    mount_result(&server, "version", json!(6)).await;
    mount_result(&server, "modelNames", json!(["Basic", "Cloze"])).await;
    mount_result(&server, "modelFieldNames", json!(["Front", "Back"])).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "addNote",
            "params": { "note": {
                "modelName": "Basic",
                "fields": {
                    "Front": "kissa",
                    "Back": "**Translation:** - cat\n\n**Examples:**\nKissa nukkuu.\n\n**Notes:**\nfeline"
                }
            }}
        })))
        .respond_with(ok(json!(42)))
        .expect(1)
        .mount(&server)
        .await;

    let submission = submitter(&server).submit(&kissa_card()).await.expect("should submit");
    assert_eq!(submission.layout, MappingLayout::Generic);
    assert_eq!(submission.note_type, "Basic");
}

#[tokio::test]
async fn schema_is_resolved_again_for_every_submission() {
    let server = MockServer::start().await;
    mount_result(&server, "version", json!(6)).await;
    mount_result(&server, "modelNames", json!(["Finnish"])).await;

    // The note type gains the rich fields between the two submissions.
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "action": "modelFieldNames" })))
        .respond_with(ok(json!(["Front", "Back"])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "action": "modelFieldNames" })))
        .respond_with(ok(json!(["Finnish", "Translation", "Finnish Example", "Notes"])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "addNote",
            "params": { "note": { "fields": { "Front": "kissa" } } }
        })))
        .respond_with(ok(json!(1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "addNote",
            "params": { "note": { "fields": { "Finnish": "kissa" } } }
        })))
        .respond_with(ok(json!(2)))
        .expect(1)
        .mount(&server)
        .await;

    let submitter = submitter(&server);
    let first = submitter.submit(&kissa_card()).await.expect("first submit");
    let second = submitter.submit(&kissa_card()).await.expect("second submit");

    assert_eq!((first.note_id, first.layout), (1, MappingLayout::Generic));
    assert_eq!((second.note_id, second.layout), (2, MappingLayout::Rich));
}

#[tokio::test]
async fn field_introspection_failure_degrades_but_submits() {
    let server = MockServer::start().await;
    mount_result(&server, "version", json!(6)).await;
    mount_result(&server, "modelNames", json!(["Finnish"])).await;
    mount_error(&server, "modelFieldNames", "model was not found").await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "addNote",
            "params": { "note": { "modelName": "Finnish", "fields": { "Front": "kissa" } } }
        })))
        .respond_with(ok(json!(7)))
        .expect(1)
        .mount(&server)
        .await;

    let submission = submitter(&server).submit(&kissa_card()).await.expect("degraded submit");
    assert!(submission.degraded);
    assert_eq!(submission.layout, MappingLayout::Generic);
}

#[tokio::test]
async fn resolver_returns_degraded_schema_on_field_error() {
    let server = MockServer::start().await;
    mount_result(&server, "modelNames", json!(["Finnish"])).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "action": "modelFieldNames" })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let schema = schema::resolve(&AnkiClient::new(server.uri()), "finnish")
        .await
        .expect("resolver never fails on field errors");
    assert_eq!(schema, NoteSchema::degraded("Finnish"));
}

#[tokio::test]
async fn unreachable_store_fails_before_other_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "action": "version" })))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "action": "modelNames" })))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = submitter(&server).submit(&kissa_card()).await.expect_err("unreachable");
    assert!(matches!(err, AnkiError::Unreachable { .. }));
}

#[tokio::test]
async fn add_note_rejection_is_rpc_error() {
    let server = MockServer::start().await;
    mount_result(&server, "version", json!(6)).await;
    mount_error(&server, "addNote", "cannot create note because it is a duplicate").await;

    let schema = NoteSchema::new("Basic", vec!["Front".into(), "Back".into()]);
    let err = submitter(&server)
        .submit_with_schema(&kissa_card(), &schema)
        .await
        .expect_err("duplicate");
    match err {
        AnkiError::Rpc { action, message } => {
            assert_eq!(action, "addNote");
            assert!(message.contains("duplicate"));
        }
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn envelope_error_wins_over_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "result": null, "error": "boom" })),
        )
        .mount(&server)
        .await;

    let err = AnkiClient::new(server.uri()).model_names().await.expect_err("rpc error");
    assert!(matches!(err, AnkiError::Rpc { .. }));
}

#[tokio::test]
async fn missing_result_is_decode_error() {
    let server = MockServer::start().await;
    mount_result(&server, "deckNames", serde_json::Value::Null).await;

    let err = AnkiClient::new(server.uri()).deck_names().await.expect_err("null result");
    assert!(matches!(err, AnkiError::Decode { .. }));
}

#[tokio::test]
async fn deck_exists_checks_deck_names() {
    let server = MockServer::start().await;
    mount_result(&server, "deckNames", json!(["Default", "Suomi"])).await;
    assert!(submitter(&server).deck_exists().await.expect("deck names"));
}
