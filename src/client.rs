//! Benchmark server client.
//!
//! `BenchmarkBackend` is the seam the orchestrator talks to; `HttpBackend`
//! is the production implementation over reqwest.

use crate::error::ApiError;
use crate::models::{BenchmarkRequest, BenchmarkResponse, ErrorResponse, LibrariesResponse};
use futures::future::{BoxFuture, FutureExt};

/// Trait for the benchmark server (library catalog + benchmark execution)
pub trait BenchmarkBackend: Send + Sync {
    /// `GET /api/libraries`
    fn fetch_libraries(&self) -> BoxFuture<'static, Result<Vec<String>, ApiError>>;

    /// `POST /api/benchmark`
    fn run_benchmark(
        &self,
        request: BenchmarkRequest,
    ) -> BoxFuture<'static, Result<BenchmarkResponse, ApiError>>;
}

/// reqwest-backed implementation talking JSON to the benchmark server.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend for `base_url` (e.g. `http://localhost:8080`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpBackend {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-success response into `ApiError::Backend`, keeping the
/// server's `error` message when the body carries one.
async fn backend_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.error);
    ApiError::Backend { status, message }
}

impl BenchmarkBackend for HttpBackend {
    fn fetch_libraries(&self) -> BoxFuture<'static, Result<Vec<String>, ApiError>> {
        let client = self.client.clone();
        let url = self.endpoint("/api/libraries");

        async move {
            log::debug!("[Client] GET {}", url);
            let response = client.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(backend_error(response).await);
            }
            let body: LibrariesResponse = response.json().await?;
            log::debug!("[Client] Catalog lists {} libraries", body.libraries.len());
            Ok(body.libraries)
        }
        .boxed()
    }

    fn run_benchmark(
        &self,
        request: BenchmarkRequest,
    ) -> BoxFuture<'static, Result<BenchmarkResponse, ApiError>> {
        let client = self.client.clone();
        let url = self.endpoint("/api/benchmark");

        async move {
            log::debug!(
                "[Client] POST {} ({} libraries, {} iterations, concurrency {})",
                url,
                request.libraries.len(),
                request.iterations,
                request.concurrency
            );
            let response = client.post(&url).json(&request).send().await?;
            if !response.status().is_success() {
                let err = backend_error(response).await;
                log::warn!("[Client] Benchmark rejected: {}", err);
                return Err(err);
            }
            let body: BenchmarkResponse = response.json().await?;
            Ok(body)
        }
        .boxed()
    }
}
