//! Schema-driven form integration tests

mod common;

use common::ScriptedTransport;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tabula_core::{DynamicForm, FormState, FormType, FormValues, Method, TabulaError, Widget};
use tokio::sync::Notify;
use tokio::time::timeout;

const SCHEMA_URL: &str = "http://records.test/api/machine/schema";
const SUBMIT_URL: &str = "http://records.test/api/machine/submit";

fn form(transport: &ScriptedTransport, form_type: FormType) -> DynamicForm {
    DynamicForm::new(transport.shared(), "Machine", form_type, SCHEMA_URL, SUBMIT_URL)
}

#[tokio::test]
async fn test_enum_schema_renders_one_selector() {
    let transport = ScriptedTransport::new();
    transport.reply(200, json!({"info": {"status": {"type": "enum", "enum": ["A", "B"]}}}));
    let mut form = form(&transport, FormType::Create);

    form.mount().await.expect("schema loads");

    let controls = form.controls();
    assert_eq!(controls.len(), 1);
    assert!(controls[0].is_selector());
    assert_eq!(
        controls[0].widget,
        Widget::Selector {
            options: vec!["A".to_string(), "B".to_string()],
            selected: None,
        }
    );

    let request = transport.last_request().expect("schema requested");
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.body, Some(json!({})));
}

#[tokio::test]
async fn test_text_schema_renders_one_input() {
    let transport = ScriptedTransport::new();
    transport.reply(200, json!({"info": {"name": {"type": "text"}}}));
    let mut form = form(&transport, FormType::Create);

    form.mount().await.expect("schema loads");

    let controls = form.controls();
    assert_eq!(controls.len(), 1);
    assert!(!controls[0].is_selector());
    assert_eq!(controls[0].key, "name");
}

#[tokio::test]
async fn test_schema_order_is_kept() {
    let transport = ScriptedTransport::new();
    transport.reply(
        200,
        json!({"info": {
            "zeta": {"type": "text"},
            "alpha": {"type": "text"},
            "mode": {"type": "enum", "enum": ["On", "Off"]}
        }}),
    );
    let mut form = form(&transport, FormType::Create);
    form.mount().await.expect("schema loads");

    let keys: Vec<String> = form.controls().into_iter().map(|c| c.key).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mode"]);
}

#[tokio::test]
async fn test_failed_schema_fetch_is_an_explicit_state() {
    let transport = ScriptedTransport::new();
    transport.reply_empty(500);
    transport.reply(200, json!({"info": {"name": {"type": "text"}}}));
    let mut form = form(&transport, FormType::Create);

    let result = form.mount().await;
    assert!(matches!(result, Err(TabulaError::Http { .. })));
    assert!(matches!(form.state(), FormState::Failed(_)));
    assert!(form.controls().is_empty());

    form.mount().await.expect("mounting again retries");
    assert_eq!(form.state(), &FormState::Ready);
}

#[tokio::test]
async fn test_submit_posts_values_and_closes() {
    let transport = ScriptedTransport::new();
    transport.reply(
        200,
        json!({"info": {
            "name": {"type": "text"},
            "status": {"type": "enum", "enum": ["A", "B"]}
        }}),
    );
    let mut form = form(&transport, FormType::Update)
        .with_initial(FormValues::from_json(&json!({"id": "4", "name": "Press"})));
    form.mount().await.expect("schema loads");
    assert_eq!(form.title(), "Update Machine");

    form.set_value("status", "B").expect("valid option");
    assert!(form.set_value("status", "C").is_err());

    transport.reply(200, json!({"ok": true}));
    form.submit().expect("form is ready");
    assert!(!form.is_open());
    assert_eq!(form.state(), &FormState::Submitting);

    let response = form.settle().await.expect("submission succeeds");
    assert_eq!(response.map(|r| r.status), Some(200));
    assert_eq!(form.state(), &FormState::Ready);

    let request = transport.last_request().expect("submission sent");
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, SUBMIT_URL);
    assert_eq!(
        request.body,
        Some(json!({"id": "4", "name": "Press", "status": "B"}))
    );
    assert_eq!(form.values().display("status"), "");
    assert_eq!(form.values().display("name"), "Press");
}

#[tokio::test]
async fn test_cancel_discards_typed_values() {
    let transport = ScriptedTransport::new();
    transport.reply(200, json!({"info": {"name": {"type": "text"}}}));
    let mut form = form(&transport, FormType::Create);
    form.mount().await.expect("schema loads");

    form.set_value("name", "Draft").expect("known field");
    form.cancel();

    assert!(!form.is_open());
    assert_eq!(form.values().display("name"), "");
    assert_eq!(transport.requests().len(), 1);
}

async fn wait_for_requests(transport: &ScriptedTransport, count: usize) {
    timeout(Duration::from_secs(1), async {
        while transport.requests().len() < count {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("request reaches the transport");
}

#[tokio::test]
async fn test_unmount_still_sends_confirmed_submission() {
    let gate = Arc::new(Notify::new());
    let transport = ScriptedTransport::gated(gate.clone());
    transport.reply(200, json!({"info": {"name": {"type": "text"}}}));
    transport.reply(200, json!({"ok": true}));
    let mut form = form(&transport, FormType::Create);

    gate.notify_one();
    form.mount().await.expect("schema loads");
    form.set_value("name", "Keep me").expect("known field");
    form.submit().expect("form is ready");
    form.unmount();

    wait_for_requests(&transport, 2).await;
    gate.notify_one();
    tokio::task::yield_now().await;

    let request = transport.last_request().expect("submission sent");
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, SUBMIT_URL);
    assert_eq!(request.body, Some(json!({"name": "Keep me"})));

    assert_eq!(form.state(), &FormState::Unmounted);
    assert!(form.controls().is_empty());
    assert_eq!(form.values().display("name"), "");
    assert_eq!(form.settle().await, Ok(None));
}

#[tokio::test]
async fn test_dropped_form_still_sends_confirmed_submission() {
    let transport = ScriptedTransport::new();
    transport.reply(200, json!({"info": {"name": {"type": "text"}}}));
    transport.reply(200, json!({"ok": true}));
    let mut form = form(&transport, FormType::Create);

    form.mount().await.expect("schema loads");
    form.set_value("name", "Keep me").expect("known field");
    form.submit().expect("form is ready");
    drop(form);

    wait_for_requests(&transport, 2).await;
    assert_eq!(
        transport.last_request().map(|r| r.url),
        Some(SUBMIT_URL.to_string())
    );
}
