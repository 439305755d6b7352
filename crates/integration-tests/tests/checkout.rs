//! Integration tests for checkout through the page controller.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use freshbite_core::{Cart, Customer, Notice, OrderId, Product, ProductKey};
use freshbite_integration_tests::{
    FakeBackend, FakeConfig, backend_config, dead_backend_url, sample_catalog,
};
use freshbite_storefront::backend::BackendClient;
use freshbite_storefront::checkout::{CheckoutOutcome, CheckoutRequest, submit};
use freshbite_storefront::controller::StorefrontController;

async fn loaded(backend: &FakeBackend) -> StorefrontController {
    let controller = backend.controller();
    controller.load().await;
    controller
}

fn fill_cart(controller: &StorefrontController) {
    controller.add_to_cart(&ProductKey::new("smoothie")).unwrap();
    controller.add_to_cart(&ProductKey::new("smoothie")).unwrap();
    controller.add_to_cart(&ProductKey::new("wrap")).unwrap();
}

#[tokio::test]
async fn test_empty_cart_makes_no_request() {
    let backend = FakeBackend::with_checkout_reply(200, r#"{"success": true}"#).await;
    let controller = loaded(&backend).await;

    assert_eq!(controller.checkout().await, None);

    assert_eq!(backend.checkout_requests(), 0);
    assert_eq!(
        controller.snapshot().message.as_deref(),
        Some("Your cart is empty.")
    );
}

#[tokio::test]
async fn test_success_clears_cart_and_reports_order() {
    let backend =
        FakeBackend::with_checkout_reply(200, r#"{"success": true, "order_id": "A1"}"#).await;
    let controller = loaded(&backend).await;
    fill_cart(&controller);

    let outcome = controller.checkout().await;

    assert_eq!(
        outcome,
        Some(CheckoutOutcome::Placed {
            order_id: Some(OrderId::new("A1"))
        })
    );
    let snapshot = controller.snapshot();
    assert!(snapshot.cart.is_empty());
    assert_eq!(snapshot.cart_count, 0);
    assert!(snapshot.message.unwrap().contains("A1"));
    assert_eq!(backend.checkout_requests(), 1);
}

#[tokio::test]
async fn test_placed_order_clears_lines_added_in_flight() {
    let backend = FakeBackend::start(FakeConfig {
        checkout_delay: Duration::from_millis(200),
        ..FakeConfig::default()
    })
    .await;
    let controller = loaded(&backend).await;
    controller.add_to_cart(&ProductKey::new("smoothie")).unwrap();

    let pending = tokio::spawn({
        let controller = controller.clone();
        async move { controller.checkout().await }
    });
    while backend.checkout_requests() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    controller.add_to_cart(&ProductKey::new("wrap")).unwrap();
    assert_eq!(controller.snapshot().cart_count, 2);

    let outcome = pending.await.unwrap();

    assert!(outcome.unwrap().is_placed());
    let submitted = backend.last_checkout().unwrap();
    assert_eq!(submitted["items"].as_array().unwrap().len(), 1);
    assert!(controller.snapshot().cart.is_empty());
}

#[tokio::test]
async fn test_request_carries_guest_and_cart() {
    let backend = FakeBackend::with_checkout_reply(200, r#"{"success": true}"#).await;
    let controller = loaded(&backend).await;
    fill_cart(&controller);

    controller.checkout().await;

    let body = backend.last_checkout().unwrap();
    assert_eq!(body["customer_name"], "Guest");
    assert_eq!(body["email"], "guest@example.com");
    assert_eq!(body["address"], "123 Market St");
    assert_eq!(body["city"], "San Francisco");
    assert_eq!(body["country"], "USA");

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product_id"], "smoothie");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["price"], 2.5);
    assert_eq!(items[1]["product_id"], "wrap");
    assert_eq!(items[1]["quantity"], 1);
}

#[tokio::test]
async fn test_declined_keeps_cart_and_shows_detail() {
    let backend = FakeBackend::with_checkout_reply(
        402,
        r#"{"success": false, "detail": "Card declined"}"#,
    )
    .await;
    let controller = loaded(&backend).await;
    fill_cart(&controller);
    let before = controller.snapshot().cart;

    let outcome = controller.checkout().await;

    assert_eq!(
        outcome,
        Some(CheckoutOutcome::Declined {
            detail: Some("Card declined".to_string())
        })
    );
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.cart, before);
    assert_eq!(snapshot.message.as_deref(), Some("Card declined"));
}

#[tokio::test]
async fn test_success_status_without_success_flag_is_declined() {
    let backend = FakeBackend::with_checkout_reply(200, r#"{"order_id": "A1"}"#).await;
    let controller = loaded(&backend).await;
    fill_cart(&controller);

    controller.checkout().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.message.as_deref(), Some("Checkout failed"));
    assert_eq!(snapshot.cart_count, 2);
}

#[tokio::test]
async fn test_success_flag_with_error_status_is_declined() {
    let backend = FakeBackend::with_checkout_reply(500, r#"{"success": true}"#).await;
    let controller = loaded(&backend).await;
    fill_cart(&controller);

    let outcome = controller.checkout().await;

    assert_eq!(outcome, Some(CheckoutOutcome::Declined { detail: None }));
    assert_eq!(controller.snapshot().cart_count, 2);
}

#[tokio::test]
async fn test_undecodable_reply_is_checkout_error() {
    let backend = FakeBackend::with_checkout_reply(502, "<html>Bad Gateway</html>").await;
    let controller = loaded(&backend).await;
    fill_cart(&controller);

    let outcome = controller.checkout().await;

    assert!(matches!(outcome, Some(CheckoutOutcome::Failed { .. })));
    let snapshot = controller.snapshot();
    assert!(
        snapshot
            .message
            .as_deref()
            .unwrap()
            .starts_with("Checkout error: JSON parse error")
    );
    assert_eq!(snapshot.cart_count, 2);
}

#[tokio::test]
async fn test_failed_checkout_can_be_retried() {
    let backend = FakeBackend::with_checkout_reply(
        200,
        r#"{"success": false, "detail": "Out of stock"}"#,
    )
    .await;
    let controller = loaded(&backend).await;
    fill_cart(&controller);

    controller.checkout().await;
    controller.checkout().await;

    assert_eq!(backend.checkout_requests(), 2);
    assert_eq!(controller.snapshot().cart_count, 2);
}

#[tokio::test]
async fn test_unreachable_checkout_is_checkout_error() {
    let product: Product = serde_json::from_value(sample_catalog()[0].clone()).unwrap();
    let mut cart = Cart::new();
    cart.add(&product).unwrap();
    let request = CheckoutRequest::new(Customer::guest(), cart.lines());
    let client = BackendClient::new(&backend_config(&dead_backend_url().await));

    let outcome = submit(&client, &request).await;

    let CheckoutOutcome::Failed { reason } = &outcome else {
        panic!("expected Failed, got {outcome:?}");
    };
    assert!(reason.starts_with("HTTP error"), "{reason}");
    let Notice::CheckoutError { .. } = outcome.notice() else {
        panic!("expected a checkout error notice");
    };
    assert!(outcome.notice().is_error());
}
