use super::TextClassifier;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time;
use tracing::{debug, trace};

pub const DEFAULT_SNIFF_TIMEOUT: Duration = Duration::from_secs(5);

/// Sniffs content with the `file` utility. A sample is text when its MIME type
/// starts with `text/`.
#[derive(Debug, Clone)]
pub struct MimeClassifier {
    program: String,
    timeout: Duration,
}

impl Default for MimeClassifier {
    fn default() -> Self {
        MimeClassifier::new(DEFAULT_SNIFF_TIMEOUT)
    }
}

impl MimeClassifier {
    pub fn new(timeout: Duration) -> Self {
        MimeClassifier {
            program: "file".to_owned(),
            timeout,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub async fn mime_type(&self, sample: &[u8]) -> Option<String> {
        match time::timeout(self.timeout, self.run(sample)).await {
            Ok(Ok(mime)) => Some(mime),
            Ok(Err(e)) => {
                debug!("Content type check with '{}' failed: {}", self.program, e);
                None
            }
            Err(_) => {
                debug!(
                    "Content type check with '{}' timed out after {:?}",
                    self.program, self.timeout
                );
                None
            }
        }
    }

    async fn run(&self, sample: &[u8]) -> std::io::Result<String> {
        let mut child = Command::new(&self.program)
            .args(["--mime-type", "-b", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // `file` may stop reading once it has seen enough.
            if let Err(e) = stdin.write_all(sample).await {
                trace!("Sniffer closed stdin early: {}", e);
            }
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("exited with {}", output.status),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }
}

#[async_trait]
impl TextClassifier for MimeClassifier {
    async fn is_text(&self, sample: &[u8]) -> bool {
        match self.mime_type(sample).await {
            Some(mime) => {
                trace!("Sniffed MIME type {}", mime);
                mime.starts_with("text/")
            }
            None => false,
        }
    }
}
