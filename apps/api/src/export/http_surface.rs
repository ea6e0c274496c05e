//! Print surface backed by an external HTML-to-PDF print service.
//!
//! Protocol:
//! - `POST {base}/documents` with `{ title, html }` → `{ id }`. 401/403/429 mean
//!   the service refuses to open a surface for us.
//! - `GET {base}/documents/{id}` → `{ status: "loading" | "ready" | "failed" }`,
//!   polled until ready.
//! - `POST {base}/documents/{id}/print` → the printed artifact (usually PDF).
//! - `DELETE {base}/documents/{id}` once printing finished or loading failed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::export::{PrintReceipt, RenderSurface, SurfaceError, SurfaceHandle};
use crate::render::Document;

const DOCUMENTS_ENDPOINT: &str = "/documents";
const POLL_INTERVAL: Duration = Duration::from_millis(250);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct OpenRequest<'a> {
    title: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: LoadStatus,
    error: Option<String>,
}

#[derive(Clone)]
pub struct HttpPrintSurface {
    client: Client,
    base_url: String,
}

impl HttpPrintSurface {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build print service client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RenderSurface for HttpPrintSurface {
    async fn open(&self, document: &Document) -> Result<Box<dyn SurfaceHandle>, SurfaceError> {
        let url = format!("{}{}", self.base_url, DOCUMENTS_ENDPOINT);
        let response = self
            .client
            .post(&url)
            .json(&OpenRequest {
                title: document.title(),
                html: document.as_str(),
            })
            .send()
            .await
            .map_err(|e| SurfaceError::Unavailable(format!("{url}: {e}")))?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
        ) {
            let body = response.text().await.unwrap_or_default();
            return Err(SurfaceError::Blocked(format!("{status}: {body}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SurfaceError::Failed(format!("open returned {status}: {body}")));
        }

        let opened: OpenResponse = response
            .json()
            .await
            .map_err(|e| SurfaceError::Failed(format!("invalid open response: {e}")))?;
        debug!("Print service opened document {}", opened.id);

        Ok(Box::new(HttpSurfaceHandle {
            client: self.client.clone(),
            document_url: format!("{}{}/{}", self.base_url, DOCUMENTS_ENDPOINT, opened.id),
        }))
    }
}

struct HttpSurfaceHandle {
    client: Client,
    document_url: String,
}

impl HttpSurfaceHandle {
    /// Closes the document on the service. Failures are only logged.
    async fn release(&self) {
        match self.client.delete(&self.document_url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Released print document {}", self.document_url)
            }
            Ok(response) => warn!(
                "Print service kept {} after release: {}",
                self.document_url,
                response.status()
            ),
            Err(e) => warn!("Could not release {}: {e}", self.document_url),
        }
    }

    async fn poll_until_ready(&self) -> Result<(), SurfaceError> {
        loop {
            let response = self
                .client
                .get(&self.document_url)
                .send()
                .await
                .map_err(|e| SurfaceError::Unavailable(e.to_string()))?;

            if !response.status().is_success() {
                return Err(SurfaceError::Failed(format!(
                    "status check returned {}",
                    response.status()
                )));
            }

            let status: StatusResponse = response
                .json()
                .await
                .map_err(|e| SurfaceError::Failed(format!("invalid status response: {e}")))?;

            match status.status {
                LoadStatus::Ready => return Ok(()),
                LoadStatus::Failed => {
                    return Err(SurfaceError::Failed(
                        status.error.unwrap_or_else(|| "document failed to load".to_string()),
                    ))
                }
                LoadStatus::Loading => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }
    }

    async fn print_document(&self) -> Result<PrintReceipt, SurfaceError> {
        let url = format!("{}/print", self.document_url);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| SurfaceError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SurfaceError::Failed(format!("print returned {status}: {body}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let artifact = response
            .bytes()
            .await
            .map_err(|e| SurfaceError::Failed(format!("failed to read printed document: {e}")))?;

        Ok(PrintReceipt {
            content_type,
            artifact: (!artifact.is_empty()).then_some(artifact),
        })
    }
}

#[async_trait]
impl SurfaceHandle for HttpSurfaceHandle {
    async fn ready(&mut self) -> Result<(), SurfaceError> {
        let result = self.poll_until_ready().await;
        if result.is_err() {
            self.release().await;
        }
        result
    }

    async fn print(self: Box<Self>) -> Result<PrintReceipt, SurfaceError> {
        let result = self.print_document().await;
        self.release().await;
        result
    }
}
