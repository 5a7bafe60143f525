//! Integration tests for the Pixel Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pixel-store-integration-tests
//! ```
//!
//! Each test starts its own storefront on an ephemeral localhost port with a
//! fresh inventory, so tests do not share carts or stock.

use std::net::SocketAddr;

use pixel_store_storefront::inventory::Catalog;
use pixel_store_storefront::state::AppState;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;

/// A running storefront plus an HTTP client pointed at it.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    pub state: AppState,
}

impl TestServer {
    /// Start a storefront seeded with the built-in catalog.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start() -> Self {
        let catalog = Catalog::builtin().expect("built-in catalog is valid");
        Self::start_with(catalog).await
    }

    /// Start a storefront seeded with `catalog`.
    ///
    /// # Panics
    ///
    /// Panics if the catalog is invalid or the listener cannot bind.
    pub async fn start_with(catalog: Catalog) -> Self {
        let state = AppState::with_catalog(catalog)
            .expect("catalog should be valid");
        let app = pixel_store_storefront::app(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("listener has an address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
            state,
        }
    }

    /// URL for `path` scoped to `session`.
    ///
    /// Sessions in tests are plain ASCII and need no escaping.
    #[must_use]
    pub fn url(&self, path: &str, session: &str) -> String {
        format!("{}{path}?session_id={session}", self.base_url)
    }

    /// POST a JSON body to `path` with the given session.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post<B: Serialize + Sync>(&self, path: &str, session: &str, body: &B) -> Response {
        self.client
            .post(self.url(path, session))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    /// POST with no body to `path` with the given session.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_empty(&self, path: &str, session: &str) -> Response {
        self.client
            .post(self.url(path, session))
            .send()
            .await
            .expect("request failed")
    }

    /// `results` array of a JSON response.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON with a `results` array.
    pub async fn results(response: Response) -> Vec<Value> {
        let body: Value = response.json().await.expect("response is JSON");
        body["results"]
            .as_array()
            .cloned()
            .expect("response has results array")
    }
}
