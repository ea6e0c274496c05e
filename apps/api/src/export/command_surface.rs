//! Print surface backed by a local headless-browser command.
//!
//! The document is written to a temporary directory and the configured command
//! is run with `{input}` / `{output}` replaced by the HTML and PDF paths, e.g.
//! `chromium --headless --disable-gpu --print-to-pdf={output} {input}`.
//! Arguments are split on whitespace; quoting is not supported.
//!
//! The command is killed when it outlives `print_timeout` or when the export
//! request is dropped before it finishes.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

use crate::export::{PrintReceipt, RenderSurface, SurfaceError, SurfaceHandle};
use crate::render::Document;

const INPUT_PLACEHOLDER: &str = "{input}";
const OUTPUT_PLACEHOLDER: &str = "{output}";
const DEFAULT_PRINT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct CommandPrintSurface {
    program: String,
    args: Vec<String>,
    print_timeout: Duration,
}

impl CommandPrintSurface {
    /// Parses a command line template. Fails when it is empty.
    pub fn from_template(template: &str) -> anyhow::Result<Self> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("Print command template is empty"))?;
        Ok(Self {
            program,
            args: parts.collect(),
            print_timeout: DEFAULT_PRINT_TIMEOUT,
        })
    }

    pub fn with_print_timeout(mut self, print_timeout: Duration) -> Self {
        self.print_timeout = print_timeout;
        self
    }

    fn args_for(&self, input: &str, output: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|a| {
                a.replace(INPUT_PLACEHOLDER, input)
                    .replace(OUTPUT_PLACEHOLDER, output)
            })
            .collect()
    }
}

#[async_trait]
impl RenderSurface for CommandPrintSurface {
    async fn open(&self, document: &Document) -> Result<Box<dyn SurfaceHandle>, SurfaceError> {
        let workdir = TempDir::new()
            .map_err(|e| SurfaceError::Unavailable(format!("cannot create work dir: {e}")))?;
        let input = workdir.path().join("resume.html");
        let output = workdir.path().join("resume.pdf");

        tokio::fs::write(&input, document.as_str())
            .await
            .map_err(|e| SurfaceError::Failed(format!("cannot write {}: {e}", input.display())))?;
        debug!("Wrote document to {}", input.display());

        Ok(Box::new(CommandSurfaceHandle {
            surface: self.clone(),
            expected_len: document.as_str().len() as u64,
            input,
            output,
            _workdir: workdir,
        }))
    }
}

struct CommandSurfaceHandle {
    surface: CommandPrintSurface,
    expected_len: u64,
    input: PathBuf,
    output: PathBuf,
    // Removed (with its files) when the handle is dropped.
    _workdir: TempDir,
}

#[async_trait]
impl SurfaceHandle for CommandSurfaceHandle {
    async fn ready(&mut self) -> Result<(), SurfaceError> {
        let meta = tokio::fs::metadata(&self.input)
            .await
            .map_err(|e| SurfaceError::Failed(format!("document missing: {e}")))?;
        if meta.len() != self.expected_len {
            return Err(SurfaceError::Failed(format!(
                "document truncated: {} of {} bytes",
                meta.len(),
                self.expected_len
            )));
        }
        Ok(())
    }

    async fn print(self: Box<Self>) -> Result<PrintReceipt, SurfaceError> {
        let input = self.input.to_string_lossy();
        let output = self.output.to_string_lossy();
        let args = self.surface.args_for(&input, &output);
        debug!("Running print command: {} {:?}", self.surface.program, args);

        let run = Command::new(&self.surface.program)
            .args(&args)
            .kill_on_drop(true)
            .output();

        let result = tokio::time::timeout(self.surface.print_timeout, run)
            .await
            .map_err(|_| {
                SurfaceError::Failed(format!(
                    "print command did not finish within {}ms",
                    self.surface.print_timeout.as_millis()
                ))
            })?
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => SurfaceError::Blocked(
                    format!("cannot run '{}': {e}", self.surface.program),
                ),
                _ => SurfaceError::Unavailable(e.to_string()),
            })?;

        if !result.status.success() {
            return Err(SurfaceError::Failed(format!(
                "print command exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        let artifact = match tokio::fs::read(&self.output).await {
            Ok(bytes) if !bytes.is_empty() => Some(Bytes::from(bytes)),
            _ => None,
        };

        Ok(PrintReceipt {
            content_type: artifact.as_ref().map(|_| "application/pdf".to_string()),
            artifact,
        })
    }
}
