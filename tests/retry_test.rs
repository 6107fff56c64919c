//! Retry behaviour of the transport stack

mod common;

use common::{ScriptedTransport, collection_url, config, machine};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tabula_core::http::RetryingTransport;
use tabula_core::recovery::RetryConfig;
use tabula_core::{FormValues, TableController, TabulaError};

fn retrying(transport: &ScriptedTransport) -> TableController {
    let retry = RetryConfig::default()
        .with_max_attempts(2)
        .with_initial_delay(Duration::from_millis(1))
        .with_max_delay(Duration::from_millis(5));
    let stack = RetryingTransport::new(transport.clone(), retry);
    TableController::new(Arc::new(stack), &config())
}

#[tokio::test]
async fn test_load_retries_transient_status() {
    let transport = ScriptedTransport::new();
    transport
        .reply_empty(503)
        .fail(TabulaError::http("connection reset", collection_url()))
        .reply(200, json!([machine("1", "A", true)]));
    let mut table = retrying(&transport);

    let count = table.load().await.expect("third attempt succeeds");

    assert_eq!(count, 1);
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn test_load_gives_up_after_max_attempts() {
    let transport = ScriptedTransport::new();
    transport.reply_empty(502).reply_empty(502).reply_empty(502);
    let mut table = retrying(&transport);

    let result = table.load().await;

    assert!(matches!(
        result,
        Err(TabulaError::Http {
            status_code: Some(502),
            ..
        })
    ));
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn test_create_is_sent_once() {
    let transport = ScriptedTransport::new();
    transport.reply(200, json!([])).reply_empty(503);
    let mut table = retrying(&transport);
    table.load().await.expect("collection loads");

    let values: FormValues = [("name", "B"), ("enum", "Active")].into_iter().collect();
    let result = table.create(&values).await;

    assert!(result.is_err());
    assert_eq!(transport.requests().len(), 2);
    assert!(table.records().is_empty());
}
