//! Integration test support for the FreshBite storefront.
//!
//! [`FakeBackend`] serves the three backend endpoints from an axum router
//! bound to an ephemeral local port, with scripted catalog and checkout
//! behavior and request counters.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p freshbite-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use freshbite_storefront::backend::BackendClient;
use freshbite_storefront::config::{BackendConfig, StorefrontConfig};
use freshbite_storefront::controller::StorefrontController;
use freshbite_storefront::state::AppState;
use futures::stream;
use serde::Deserialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How the fake answers `GET /api/products`.
#[derive(Debug, Clone)]
pub enum CatalogMode {
    /// 200 with this JSON body.
    Products(Value),
    /// This status with a plain-text body.
    Status(u16),
    /// 200 with a body that is not JSON.
    Garbage,
    /// `Garbage` until `POST /api/seed` has been called, then `Products`.
    GarbageUntilSeeded(Value),
    /// 200 whose body is cut off by a connection reset, until
    /// `POST /api/seed` has been called, then `Products`.
    ResetUntilSeeded(Value),
}

/// Scripted behavior for a [`FakeBackend`].
#[derive(Debug, Clone)]
pub struct FakeConfig {
    pub catalog: CatalogMode,
    /// Status returned by `POST /api/seed`.
    pub seed_status: u16,
    /// Status and raw body returned by `POST /api/checkout`.
    pub checkout_reply: (u16, String),
    /// How long `POST /api/checkout` waits before answering.
    pub checkout_delay: Duration,
}

impl Default for FakeConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogMode::Products(sample_catalog()),
            seed_status: 200,
            checkout_reply: (200, r#"{"success": true, "order_id": "A1"}"#.to_string()),
            checkout_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
struct FakeState {
    config: FakeConfig,
    product_requests: AtomicUsize,
    seed_requests: AtomicUsize,
    checkout_requests: AtomicUsize,
    last_limit: AtomicU32,
    last_checkout: Mutex<Option<Value>>,
}

/// A scripted backend listening on `127.0.0.1`.
///
/// The server task is aborted when the value is dropped.
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<FakeState>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Start a fake backend with the given behavior.
    pub async fn start(config: FakeConfig) -> Self {
        let state = Arc::new(FakeState {
            config,
            product_requests: AtomicUsize::new(0),
            seed_requests: AtomicUsize::new(0),
            checkout_requests: AtomicUsize::new(0),
            last_limit: AtomicU32::new(0),
            last_checkout: Mutex::new(None),
        });

        let app = Router::new()
            .route("/api/products", get(products))
            .route("/api/seed", post(seed))
            .route("/api/checkout", post(checkout))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend server");
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Start a fake backend with a custom catalog and default checkout.
    pub async fn with_catalog(catalog: CatalogMode) -> Self {
        Self::start(FakeConfig {
            catalog,
            ..FakeConfig::default()
        })
        .await
    }

    /// Start a fake backend with the sample catalog and a custom checkout reply.
    pub async fn with_checkout_reply(status: u16, body: &str) -> Self {
        Self::start(FakeConfig {
            checkout_reply: (status, body.to_string()),
            ..FakeConfig::default()
        })
        .await
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[must_use]
    pub fn product_requests(&self) -> usize {
        self.state.product_requests.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn seed_requests(&self) -> usize {
        self.state.seed_requests.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn checkout_requests(&self) -> usize {
        self.state.checkout_requests.load(Ordering::SeqCst)
    }

    /// The `limit` query parameter of the latest catalog request.
    #[must_use]
    pub fn last_limit(&self) -> u32 {
        self.state.last_limit.load(Ordering::SeqCst)
    }

    /// JSON body of the latest checkout request.
    #[must_use]
    pub fn last_checkout(&self) -> Option<Value> {
        self.state
            .last_checkout
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A backend client pointed at this fake.
    #[must_use]
    pub fn client(&self) -> BackendClient {
        BackendClient::new(&backend_config(&self.base_url()))
    }

    /// A fresh controller pointed at this fake.
    #[must_use]
    pub fn controller(&self) -> StorefrontController {
        controller_for(&self.base_url())
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

#[derive(Debug, Deserialize)]
struct ProductsQuery {
    limit: Option<u32>,
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn garbage() -> Response {
    (StatusCode::OK, "<html>catalog warming up</html>").into_response()
}

/// A 200 whose body stream fails midway, so the client sees a transport error.
fn reset() -> Response {
    let chunks: Vec<Result<&'static str, io::Error>> = vec![
        Ok(r#"[{"id": "smoo"#),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
    ];
    (StatusCode::OK, Body::from_stream(stream::iter(chunks))).into_response()
}

async fn products(
    State(state): State<Arc<FakeState>>,
    Query(query): Query<ProductsQuery>,
) -> Response {
    state.product_requests.fetch_add(1, Ordering::SeqCst);
    state
        .last_limit
        .store(query.limit.unwrap_or(0), Ordering::SeqCst);

    match &state.config.catalog {
        CatalogMode::Products(body) => Json(body.clone()).into_response(),
        CatalogMode::Status(code) => (status(*code), "catalog error").into_response(),
        CatalogMode::Garbage => garbage(),
        CatalogMode::GarbageUntilSeeded(body) => {
            if state.seed_requests.load(Ordering::SeqCst) > 0 {
                Json(body.clone()).into_response()
            } else {
                garbage()
            }
        }
        CatalogMode::ResetUntilSeeded(body) => {
            if state.seed_requests.load(Ordering::SeqCst) > 0 {
                Json(body.clone()).into_response()
            } else {
                reset()
            }
        }
    }
}

async fn seed(State(state): State<Arc<FakeState>>) -> Response {
    state.seed_requests.fetch_add(1, Ordering::SeqCst);
    (status(state.config.seed_status), r#"{"seeded": true}"#).into_response()
}

async fn checkout(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    state.checkout_requests.fetch_add(1, Ordering::SeqCst);
    *state
        .last_checkout
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(body);
    tokio::time::sleep(state.config.checkout_delay).await;

    let (code, body) = &state.config.checkout_reply;
    (
        status(*code),
        [(header::CONTENT_TYPE, "application/json")],
        body.clone(),
    )
        .into_response()
}

// =============================================================================
// Helpers
// =============================================================================

/// Three products: two with ids, one identified only by title.
#[must_use]
pub fn sample_catalog() -> Value {
    serde_json::json!([
        {
            "id": "smoothie",
            "title": "Green Smoothie",
            "description": "Spinach, apple, ginger",
            "price": 2.5,
            "image": "https://img.example/smoothie.jpg",
            "category": "Drinks",
            "featured": true
        },
        {
            "id": "wrap",
            "title": "Chicken Wrap",
            "description": "Grilled chicken, greens",
            "price": 1.0,
            "image": "https://img.example/wrap.jpg",
            "category": "Meals",
            "featured": false
        },
        {
            "title": "Dark Chocolate",
            "description": "70% cacao",
            "price": 3.25,
            "image": "https://img.example/chocolate.jpg"
        }
    ])
}

/// A base URL nothing is listening on.
pub async fn dead_backend_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

#[must_use]
pub fn backend_config(base_url: &str) -> BackendConfig {
    BackendConfig {
        base_url: base_url.to_string(),
        ..BackendConfig::default()
    }
}

#[must_use]
pub fn controller_for(base_url: &str) -> StorefrontController {
    StorefrontController::new(&backend_config(base_url))
}

/// Application state around `controller`, with default server settings.
#[must_use]
pub fn app_state(controller: StorefrontController) -> AppState {
    let config = StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        backend: BackendConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
    };
    AppState::with_controller(config, controller)
}
