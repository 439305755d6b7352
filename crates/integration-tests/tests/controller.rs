//! Integration tests for the page controller against a live fake backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use freshbite_core::{Notice, PagePhase, Product, ProductKey};
use freshbite_integration_tests::{
    CatalogMode, FakeBackend, controller_for, dead_backend_url, sample_catalog,
};
use rust_decimal::Decimal;

fn catalog_products() -> Vec<Product> {
    serde_json::from_value(sample_catalog()).unwrap()
}

#[tokio::test]
async fn test_load_populates_products() {
    let backend = FakeBackend::with_catalog(CatalogMode::Products(sample_catalog())).await;
    let controller = backend.controller();
    assert_eq!(controller.snapshot().phase, PagePhase::Loading);

    controller.load().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, PagePhase::Ready);
    assert_eq!(snapshot.products, catalog_products());
    assert_eq!(snapshot.catalog_size, 3);
    assert_eq!(snapshot.notice, None);
    assert_eq!(backend.last_limit(), 50);
}

#[tokio::test]
async fn test_recovered_state_matches_direct_state() {
    let direct = FakeBackend::with_catalog(CatalogMode::Products(sample_catalog())).await;
    let recovering =
        FakeBackend::with_catalog(CatalogMode::GarbageUntilSeeded(sample_catalog())).await;

    let direct_controller = direct.controller();
    let recovered_controller = recovering.controller();
    direct_controller.load().await;
    recovered_controller.load().await;

    assert_eq!(direct_controller.snapshot(), recovered_controller.snapshot());
}

#[tokio::test]
async fn test_rejected_load_is_ready_and_empty() {
    let backend = FakeBackend::with_catalog(CatalogMode::Status(503)).await;
    let controller = backend.controller();

    controller.load().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, PagePhase::Ready);
    assert!(snapshot.products.is_empty());
    assert_eq!(snapshot.notice, Some(Notice::LoadFailed));
    assert_eq!(snapshot.message.as_deref(), Some("Failed to load products."));
}

#[tokio::test]
async fn test_unavailable_backend() {
    let controller = controller_for(&dead_backend_url().await);

    controller.load().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, PagePhase::Unavailable);
    assert!(snapshot.products.is_empty());
    assert_eq!(snapshot.message.as_deref(), Some("Backend unavailable."));
}

#[tokio::test]
async fn test_search_after_load() {
    let backend = FakeBackend::with_catalog(CatalogMode::Products(sample_catalog())).await;
    let controller = backend.controller();
    controller.load().await;

    assert_eq!(controller.search("DRINKS"), 1);
    assert_eq!(controller.snapshot().products[0].title, "Green Smoothie");

    assert_eq!(controller.search("chocolate"), 1);
    assert_eq!(controller.search("zzz"), 0);
    assert_eq!(controller.search(""), 3);
}

#[tokio::test]
async fn test_query_survives_reload() {
    let backend = FakeBackend::with_catalog(CatalogMode::Products(sample_catalog())).await;
    let controller = backend.controller();
    controller.search("wrap");

    controller.load().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.query, "wrap");
    assert_eq!(snapshot.products.len(), 1);
    assert_eq!(snapshot.catalog_size, 3);
}

#[tokio::test]
async fn test_cart_aggregates_and_totals() {
    let backend = FakeBackend::with_catalog(CatalogMode::Products(sample_catalog())).await;
    let controller = backend.controller();
    controller.load().await;

    controller.add_to_cart(&ProductKey::new("smoothie")).unwrap();
    controller.add_to_cart(&ProductKey::new("wrap")).unwrap();
    let quantity = controller.add_to_cart(&ProductKey::new("smoothie")).unwrap();
    // Title is the identity of a product without an id.
    controller
        .add_to_cart(&ProductKey::new("Dark Chocolate"))
        .unwrap();

    assert_eq!(quantity, 2);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.cart_count, 3);
    assert_eq!(snapshot.cart[0].product_id, ProductKey::new("smoothie"));
    assert_eq!(snapshot.cart[0].quantity, 2);
    assert_eq!(snapshot.cart[2].title, "Dark Chocolate");
    assert_eq!(snapshot.cart_total.amount(), Decimal::new(925, 2));
    assert_eq!(snapshot.cart_total.display(), "$9.25");
}

#[tokio::test]
async fn test_subscribers_see_load_result() {
    let backend = FakeBackend::with_catalog(CatalogMode::Products(sample_catalog())).await;
    let controller = backend.controller();
    let mut updates = controller.subscribe();

    let task = tokio::spawn({
        let controller = controller.clone();
        async move { controller.load().await }
    });

    updates
        .wait_for(|snapshot| snapshot.phase == PagePhase::Ready)
        .await
        .unwrap();
    task.await.unwrap();

    assert_eq!(updates.borrow().catalog_size, 3);
}

#[tokio::test]
async fn test_concurrent_loads_share_one_state() {
    let backend = FakeBackend::with_catalog(CatalogMode::Products(sample_catalog())).await;
    let controller = backend.controller();

    let (first, second) = tokio::join!(controller.load(), controller.load());

    assert_eq!(first, second);
    assert_eq!(backend.product_requests(), 2);
    assert_eq!(controller.snapshot().catalog_size, 3);
}
