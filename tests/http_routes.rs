//! HTTP Route Tests
//!
//! Drives the full router in-process:
//! - Pages render inside the layout
//! - Search answers with JSON arrays
//! - Create and edit redirect to the detail page
//! - Lookup failures surface as plain-text bodies
//! - Deleting a missing id never fails the request

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use beersample::catalog::{Catalog, CatalogConfig};
use beersample::store::{DocumentStore, Freshness, MemoryStore, ViewIndex};
use beersample::web::{build_router, AppState, TemplateRegistry};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

fn app() -> (Arc<MemoryStore>, Router) {
    app_with(CatalogConfig {
        beer_freshness: Freshness::UpdateBefore,
        ..Default::default()
    })
}

fn app_with(config: CatalogConfig) -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let catalog = Catalog::new(store.clone(), config);
    let state = Arc::new(AppState::new(
        catalog,
        TemplateRegistry::embedded().unwrap(),
    ));
    (store, build_router(state, &static_dir()))
}

fn seed(store: &MemoryStore) {
    store
        .upsert(
            "sierra_nevada",
            &json!({ "type": "brewery", "name": "Sierra Nevada", "city": "Chico" }),
        )
        .unwrap();
    store
        .upsert(
            "sierra_nevada-pale_ale",
            &json!({
                "type": "beer",
                "name": "Pale Ale",
                "brewery_id": "sierra_nevada",
                "abv": 5.6
            }),
        )
        .unwrap();
    store
        .upsert(
            "sierra_nevada-porter",
            &json!({ "type": "beer", "name": "Porter", "brewery_id": "sierra_nevada" }),
        )
        .unwrap();
}

async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(router: &Router, uri: &str, form: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

// =============================================================================
// Page Tests
// =============================================================================

#[tokio::test]
async fn test_welcome_page() {
    let (_, router) = app();

    let response = get(&router, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<html"));
    assert!(html.contains("Welcome to the Beer Sample"));
}

#[tokio::test]
async fn test_beer_index_lists_names() {
    let (store, router) = app();
    seed(&store);

    let response = get(&router, "/beers").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    let pale = html.find("Pale Ale").unwrap();
    let porter = html.find("Porter").unwrap();
    assert!(pale < porter);
    assert!(html.contains("/beers/show/sierra_nevada-pale_ale"));
}

#[tokio::test]
async fn test_beer_show_page() {
    let (store, router) = app();
    seed(&store);

    let response = get(&router, "/beers/show/sierra_nevada-pale_ale").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Pale Ale"));
    assert!(html.contains("5.6"));
}

#[tokio::test]
async fn test_brewery_pages() {
    let (store, router) = app();
    seed(&store);

    let html = body_text(get(&router, "/breweries").await).await;
    assert!(html.contains("Sierra Nevada"));

    let response = get(&router, "/breweries/show/sierra_nevada").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Chico"));
}

#[tokio::test]
async fn test_create_form_renders() {
    let (_, router) = app();

    let response = get(&router, "/beers/create").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("beer_name"));
}

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_beer_search_json() {
    let (store, router) = app();
    seed(&store);

    let response = get(&router, "/beers/search?value=Pa").await;
    assert_eq!(response.status(), StatusCode::OK);
    let results: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], "sierra_nevada-pale_ale");
    assert_eq!(results[0]["name"], "Pale Ale");
    assert_eq!(results[0]["brewery_id"], "sierra_nevada");
}

#[tokio::test]
async fn test_search_without_match_is_empty_array() {
    let (store, router) = app();
    seed(&store);

    let body = body_text(get(&router, "/beers/search?value=Zzz").await).await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));

    let body = body_text(get(&router, "/breweries/search?value=Zzz").await).await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn test_brewery_search_json() {
    let (store, router) = app();
    seed(&store);

    let body = body_text(get(&router, "/breweries/search?value=Sie").await).await;
    let results: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        results,
        json!([{ "id": "sierra_nevada", "name": "Sierra Nevada" }])
    );
}

// =============================================================================
// Write Tests
// =============================================================================

#[tokio::test]
async fn test_create_redirects_to_show() {
    let (_, router) = app();

    let response = post_form(
        &router,
        "/beers/create",
        "beer_name=Pale+Ale&beer_brewery_id=sierra-nevada&beer_abv=5.5&beer_ibu=abc",
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/beers/show/sierra-nevada-pale-ale");

    let html = body_text(get(&router, "/beers/show/sierra-nevada-pale-ale").await).await;
    assert!(html.contains("Pale Ale"));
    assert!(html.contains("5.5"));
}

#[tokio::test]
async fn test_created_beer_listed_with_default_config() {
    let (_, router) = app_with(CatalogConfig::default());

    let response = post_form(
        &router,
        "/beers/create",
        "beer_name=IPA+%232&beer_brewery_id=b",
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    let show = location(&response).to_string();
    assert_eq!(show, "/beers/show/b-ipa-%232");

    // The first stale read may miss the write; the next one sees it
    get(&router, "/beers").await;
    let html = body_text(get(&router, "/beers").await).await;
    assert!(html.contains(r#"href="/beers/show/b-ipa-%232""#));
    assert!(html.contains(r#"href="/beers/delete/b-ipa-%232""#));
    assert!(!html.contains(r#"href="/beers/show/b-ipa-#2""#));

    let body = body_text(get(&router, "/beers/search?value=IPA").await).await;
    let results: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(results[0]["id"], "b-ipa-#2");

    // Following the rendered link reaches the beer
    let response = get(&router, &show).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("IPA #2"));
    assert!(html.contains(r#"href="/beers/edit/b-ipa-%232""#));
}

#[tokio::test]
async fn test_create_duplicate_still_redirects() {
    let (store, router) = app();
    let form = "beer_name=Porter&beer_brewery_id=anchor&beer_description=first";
    post_form(&router, "/beers/create", form).await;

    let response = post_form(
        &router,
        "/beers/create",
        "beer_name=Porter&beer_brewery_id=anchor&beer_description=second",
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/beers/show/anchor-porter");

    // The first write is kept
    assert_eq!(store.get("anchor-porter").unwrap()["description"], "first");
}

#[tokio::test]
async fn test_edit_replaces_document() {
    let (store, router) = app();
    seed(&store);

    let response = post_form(
        &router,
        "/beers/edit/sierra_nevada-porter",
        "beer_name=Porter&beer_brewery_id=sierra_nevada&beer_style=Robust+Porter",
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/beers/show/sierra_nevada-porter");

    let document = store.get("sierra_nevada-porter").unwrap();
    assert_eq!(document["style"], "Robust Porter");
    assert_eq!(document["abv"], 0.0);
}

#[tokio::test]
async fn test_edit_form_prefilled() {
    let (store, router) = app();
    seed(&store);

    let response = get(&router, "/beers/edit/sierra_nevada-pale_ale").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Pale Ale"));
}

#[tokio::test]
async fn test_delete_redirects_home() {
    let (store, router) = app();
    seed(&store);

    let response = get(&router, "/beers/delete/sierra_nevada-porter").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
    assert!(store.get("sierra_nevada-porter").is_err());
}

#[tokio::test]
async fn test_delete_missing_is_quiet() {
    let (_, router) = app();

    let response = get(&router, "/beers/delete/nope").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.is_empty());

    let response = get(&router, "/breweries/delete/nope").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_show_missing_is_plain_text() {
    let (_, router) = app();

    let response = get(&router, "/beers/show/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
    let body = body_text(response).await;
    assert!(body.starts_with("Get Error: "));
    assert!(body.contains("nope"));
}

#[tokio::test]
async fn test_show_undecodable_is_server_error() {
    let (store, router) = app();
    store
        .upsert("broken", &json!({ "type": "beer", "name": 42 }))
        .unwrap();

    let response = get(&router, "/beers/show/broken").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.starts_with("Get Error: "));
}

// =============================================================================
// Static and Health Tests
// =============================================================================

#[tokio::test]
async fn test_static_files() {
    let (_, router) = app();

    let response = get(&router, "/css/beersample.css").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&router, "/js/beersample.js").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&router, "/css/missing.css").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let (_, router) = app();

    let response = get(&router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_unavailable_without_views() {
    let store = Arc::new(MemoryStore::with_views(ViewIndex::new(&[])));
    let catalog = Catalog::new(store, CatalogConfig::default());
    let state = Arc::new(AppState::new(
        catalog,
        TemplateRegistry::embedded().unwrap(),
    ));
    let router = build_router(state, &static_dir());

    let response = get(&router, "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "unavailable");
    assert!(body["error"].as_str().unwrap().contains("by_name"));

    // Listings fail the same way, as a plain-text 500
    let response = get(&router, "/beers").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.starts_with("Error: "));
}
