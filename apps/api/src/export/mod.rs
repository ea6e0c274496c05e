//! Export trigger: hands a standalone document to an external print surface.
//!
//! # Flow
//! 1. `RenderSurface::open` loads the document into a fresh surface. A refusal
//!    (the server-side equivalent of a blocked pop-up) is reported as
//!    `ExportError::SurfaceBlocked` so the caller can tell the user what to change.
//! 2. The trigger waits for the surface's readiness signal, bounded by
//!    `ready_timeout`. On timeout it prints anyway.
//! 3. `SurfaceHandle::print` produces the hard copy / PDF.
//!
//! There is no retry: a failed export needs a new request.

pub mod command_surface;
pub mod http_surface;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::render::{Document, RenderMode};

pub use command_surface::CommandPrintSurface;
pub use http_surface::HttpPrintSurface;

/// Matches the fallback delay the web client used before printing regardless.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The environment refused to provide a surface.
    #[error("print surface refused: {0}")]
    Blocked(String),

    #[error("print surface unavailable: {0}")]
    Unavailable(String),

    #[error("print surface failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("only standalone documents can be exported")]
    NotStandalone,

    #[error("print surface blocked: {0}")]
    SurfaceBlocked(String),

    #[error(transparent)]
    Surface(SurfaceError),
}

impl From<SurfaceError> for ExportError {
    fn from(err: SurfaceError) -> Self {
        match err {
            SurfaceError::Blocked(reason) => ExportError::SurfaceBlocked(reason),
            other => ExportError::Surface(other),
        }
    }
}

/// What the surface produced when printing.
#[derive(Debug, Clone, Default)]
pub struct PrintReceipt {
    pub content_type: Option<String>,
    /// The printed artifact, when the surface hands one back.
    pub artifact: Option<Bytes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    /// The surface reported the document as loaded before printing.
    Signalled,
    /// The wait elapsed and printing went ahead anyway.
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub readiness: Readiness,
    pub receipt: PrintReceipt,
}

/// An environment capability that can display and print a standalone document.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    async fn open(&self, document: &Document) -> Result<Box<dyn SurfaceHandle>, SurfaceError>;
}

/// One opened surface holding a loaded (or loading) document.
#[async_trait]
pub trait SurfaceHandle: Send {
    /// Resolves once the surface reports the document ready to print.
    async fn ready(&mut self) -> Result<(), SurfaceError>;

    async fn print(self: Box<Self>) -> Result<PrintReceipt, SurfaceError>;
}

#[derive(Clone)]
pub struct ExportTrigger {
    surface: Arc<dyn RenderSurface>,
    ready_timeout: Duration,
}

impl ExportTrigger {
    pub fn new(surface: Arc<dyn RenderSurface>, ready_timeout: Duration) -> Self {
        Self {
            surface,
            ready_timeout,
        }
    }

    pub fn ready_timeout(&self) -> Duration {
        self.ready_timeout
    }

    pub async fn export(&self, document: &Document) -> Result<ExportOutcome, ExportError> {
        if document.mode() != RenderMode::Standalone {
            return Err(ExportError::NotStandalone);
        }

        info!("Opening print surface for '{}'", document.title());
        let mut handle = self.surface.open(document).await.map_err(|e| {
            warn!("Print surface could not be opened: {e}");
            ExportError::from(e)
        })?;

        let readiness = match tokio::time::timeout(self.ready_timeout, handle.ready()).await {
            Ok(Ok(())) => Readiness::Signalled,
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                warn!(
                    "Print surface not ready after {}ms, printing anyway",
                    self.ready_timeout.as_millis()
                );
                Readiness::TimedOut
            }
        };

        let receipt = handle.print().await?;
        info!(
            "Printed '{}' ({:?}, {} bytes)",
            document.title(),
            readiness,
            receipt.artifact.as_ref().map_or(0, |a| a.len())
        );

        Ok(ExportOutcome { readiness, receipt })
    }
}
