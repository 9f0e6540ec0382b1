mod common;

use common::{network_error, records, ScriptedSource};
use mdx_engine::{fetch_all, ContentPage, FailureKind, DEFAULT_PAGE_LIMIT};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn stops_when_total_count_is_reached() {
    let source = ScriptedSource::with_sizes(&[100, 100, 37], Some(237));
    let ingestion = fetch_all(&source, DEFAULT_PAGE_LIMIT).await;

    assert_eq!(ingestion.records.len(), 237);
    assert_eq!(source.request_count(), 3);
    assert!(!ingestion.is_partial());
}

#[tokio::test]
async fn offsets_advance_by_the_limit() {
    let source = ScriptedSource::with_sizes(&[100, 100, 37], Some(237));
    fetch_all(&source, DEFAULT_PAGE_LIMIT).await;

    let requests = source.requests.lock().unwrap().clone();
    assert_eq!(requests, [(0, 100), (100, 100), (200, 100)]);
}

#[tokio::test]
async fn without_total_count_an_empty_page_ends_the_walk() {
    let source = ScriptedSource::with_sizes(&[100, 100, 37], None);
    let ingestion = fetch_all(&source, DEFAULT_PAGE_LIMIT).await;

    assert_eq!(ingestion.records.len(), 237);
    assert_eq!(source.request_count(), 4);
    assert_eq!(ingestion.pages, 4);
}

#[tokio::test]
async fn records_keep_page_order() {
    let source = ScriptedSource::with_sizes(&[2, 2], Some(4));
    let ingestion = fetch_all(&source, 2).await;

    let ids: Vec<_> = ingestion.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["0", "1", "2", "3"]);
}

#[tokio::test]
async fn failure_on_second_page_keeps_the_first() {
    let source = ScriptedSource::new(vec![
        Ok(ContentPage {
            contents: records(100, 0),
            total_count: Some(300),
        }),
        Err(network_error()),
    ]);
    let ingestion = fetch_all(&source, DEFAULT_PAGE_LIMIT).await;

    assert_eq!(ingestion.records.len(), 100);
    assert_eq!(source.request_count(), 2);
    assert!(ingestion.is_partial());
    assert_eq!(
        ingestion.stopped_early.map(|err| err.kind),
        Some(FailureKind::Network)
    );
}

#[tokio::test]
async fn failure_on_first_page_yields_nothing() {
    let source = ScriptedSource::new(vec![Err(network_error())]);
    let ingestion = fetch_all(&source, DEFAULT_PAGE_LIMIT).await;

    assert!(ingestion.records.is_empty());
    assert_eq!(ingestion.pages, 0);
    assert!(ingestion.is_partial());
}

#[tokio::test]
async fn zero_total_count_is_treated_as_absent() {
    let source = ScriptedSource::with_sizes(&[3], Some(0));
    let ingestion = fetch_all(&source, DEFAULT_PAGE_LIMIT).await;

    assert_eq!(ingestion.records.len(), 3);
    assert_eq!(source.request_count(), 2);
}
