//! Request Handler Integration Tests
//!
//! End-to-end read and mutation paths against an in-memory catalog.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use pokedex::adapters::{fetch_catalog, UpstreamError};
use pokedex::core::{apply_mutation, load_page, HandlerError};
use pokedex::domain::{CatalogEntry, DecodeError, Intent, PageState};
use tokio::sync::Barrier;

use common::{form, settings, starter_catalog, FakeSource};

fn names(entries: &[CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[tokio::test]
async fn test_read_path_without_filters() {
    let source = FakeSource::new(starter_catalog());

    let view = load_page(&source, &settings(), Some("captured=%5B4%5D"))
        .await
        .unwrap();

    assert_eq!(names(&view.all), vec!["bulbasaur", "charmander"]);
    assert_eq!(names(&view.displayed), vec!["bulbasaur", "charmander"]);
    assert_eq!(names(&view.captured), vec!["charmander"]);
}

#[tokio::test]
async fn test_read_path_captured_independent_of_filters() {
    let source = FakeSource::new(starter_catalog());

    let unfiltered = load_page(&source, &settings(), Some("captured=%5B1%2C4%5D"))
        .await
        .unwrap();
    let filtered = load_page(
        &source,
        &settings(),
        Some("captured=%5B1%2C4%5D&filterName=bulb&filterType=grass"),
    )
    .await
    .unwrap();

    assert_eq!(names(&filtered.displayed), vec!["bulbasaur"]);
    assert_eq!(filtered.captured, unfiltered.captured);
    assert_eq!(names(&filtered.captured), vec!["bulbasaur", "charmander"]);
}

#[tokio::test]
async fn test_read_path_rejects_malformed_captured() {
    let source = FakeSource::new(starter_catalog());

    let err = load_page(&source, &settings(), Some("captured=not-json"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HandlerError::Decode(DecodeError::MalformedCaptured { .. })
    ));
    // Rejected before anything was fetched
    assert_eq!(source.list_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_read_path_fails_whole_page_on_one_detail_failure() {
    let source = FakeSource::new(starter_catalog()).failing_detail(4);

    let err = load_page(&source, &settings(), None).await.unwrap_err();

    assert!(matches!(
        err,
        HandlerError::Upstream(UpstreamError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_fetch_catalog_respects_limit_and_order() {
    let entries: Vec<CatalogEntry> = (1..=10)
        .map(|id| CatalogEntry::new(id, format!("mon{}", id), "s", ["normal"]))
        .collect();
    let source = FakeSource::new(entries);

    let page = fetch_catalog(&source, 3, 2).await.unwrap();

    let ids: Vec<u64> = page.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 4, 5]);
    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_fetch_catalog_issues_details_concurrently() {
    // Every detail fetch blocks until all of them have started, so a
    // sequential implementation would never finish.
    let barrier = Arc::new(Barrier::new(2));
    let source = FakeSource::new(starter_catalog()).with_barrier(barrier);

    let page = tokio::time::timeout(Duration::from_secs(5), fetch_catalog(&source, 24, 0))
        .await
        .expect("detail fetches were not issued concurrently")
        .unwrap();

    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn test_fetch_catalog_empty_page() {
    let source = FakeSource::new(Vec::new());
    let page = fetch_catalog(&source, 24, 0).await.unwrap();
    assert!(page.is_empty());
}

#[test]
fn test_mutation_capture_adds_to_existing() {
    let mutation = apply_mutation(
        "/",
        Some("captured=%5B4%5D"),
        &form(&[("intent", "capture"), ("pokemonId", "1")]),
    )
    .unwrap();

    let query = mutation.location.strip_prefix("/?").unwrap();
    let state = PageState::from_query(Some(query)).unwrap();
    assert_eq!(state.captured.iter().collect::<Vec<_>>(), vec![1, 4]);
}

#[test]
fn test_mutation_capture_twice_is_noop() {
    let first = apply_mutation(
        "/",
        Some("captured=%5B4%5D"),
        &form(&[("intent", "capture"), ("pokemonId", "4")]),
    )
    .unwrap();

    assert_eq!(first.location, "/?captured=%5B4%5D");
}

#[test]
fn test_mutation_release_absent_is_noop() {
    let mutation = apply_mutation(
        "/",
        Some("captured=%5B4%5D"),
        &form(&[("intent", "release"), ("pokemonId", "25")]),
    )
    .unwrap();

    assert_eq!(mutation.intent, Intent::Release(25));
    assert_eq!(mutation.location, "/?captured=%5B4%5D");
}

#[test]
fn test_mutation_filter_clears_empty_params() {
    let mutation = apply_mutation(
        "/",
        Some("filterType=fire"),
        &form(&[("intent", "filter"), ("filterName", "char"), ("filterType", "")]),
    )
    .unwrap();

    assert_eq!(mutation.location, "/?filterName=char&captured=%5B%5D");
    assert!(!mutation.location.contains("filterType"));
}

#[test]
fn test_mutation_filter_carries_captured_through() {
    let mutation = apply_mutation(
        "/pokedex",
        Some("captured=%5B1%2C4%5D&filterName=old"),
        &form(&[("intent", "filter"), ("filterName", ""), ("filterType", "grass")]),
    )
    .unwrap();

    assert_eq!(
        mutation.location,
        "/pokedex?filterType=grass&captured=%5B1%2C4%5D"
    );
}

#[test]
fn test_mutation_capture_carries_filters_through() {
    let mutation = apply_mutation(
        "/",
        Some("filterName=char&filterType=fire"),
        &form(&[("intent", "capture"), ("pokemonId", "4")]),
    )
    .unwrap();

    assert_eq!(
        mutation.location,
        "/?filterName=char&filterType=fire&captured=%5B4%5D"
    );
}

#[test]
fn test_mutation_rejects_malformed_captured() {
    let err = apply_mutation(
        "/",
        Some("captured=%5B-4%5D"),
        &form(&[("intent", "release"), ("pokemonId", "4")]),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        HandlerError::Decode(DecodeError::MalformedCaptured { .. })
    ));
}

#[test]
fn test_mutation_keeps_unrelated_query_params() {
    let mutation = apply_mutation(
        "/",
        Some("lang=es&captured=%5B4%5D&utm_source=mail"),
        &form(&[("intent", "capture"), ("pokemonId", "1")]),
    )
    .unwrap();

    assert_eq!(
        mutation.location,
        "/?lang=es&utm_source=mail&captured=%5B1%2C4%5D"
    );
}

#[test]
fn test_mutation_filter_keeps_unrelated_query_params() {
    let mutation = apply_mutation(
        "/",
        Some("filterName=old&lang=es"),
        &form(&[("intent", "filter"), ("filterName", ""), ("filterType", "fire")]),
    )
    .unwrap();

    assert_eq!(mutation.location, "/?lang=es&filterType=fire&captured=%5B%5D");
}
