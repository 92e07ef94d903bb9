use crate::errors::RecopyError;
use arboard::Clipboard;
use std::io::Write;
use tracing::{debug, info, warn};

pub trait ClipboardWriter {
    fn set_text(&mut self, text: String) -> Result<(), RecopyError>;
}

/// System clipboard backed by `arboard`.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, RecopyError> {
        debug!("Initializing clipboard");
        let clipboard =
            Clipboard::new().map_err(|e| RecopyError::ClipboardInitError(e.to_string()))?;
        Ok(SystemClipboard { clipboard })
    }
}

impl ClipboardWriter for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<(), RecopyError> {
        self.clipboard
            .set_text(text)
            .map_err(|e| RecopyError::ClipboardWriteError(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Clipboard,
    Printed,
}

/// Sends the rendered output to the clipboard when one is given, falling back
/// to `out` when there is none or the write fails.
pub fn deliver<W: Write>(
    text: &str,
    copied: usize,
    clipboard: Option<&mut dyn ClipboardWriter>,
    out: &mut W,
) -> Result<Delivery, RecopyError> {
    if let Some(clipboard) = clipboard {
        match clipboard.set_text(text.to_owned()) {
            Ok(()) => {
                info!("Files copied to clipboard successfully.");
                writeln!(out, "✓ Copied {} files to clipboard", copied)?;
                return Ok(Delivery::Clipboard);
            }
            Err(e) => {
                warn!("Could not copy to clipboard: {}", e);
            }
        }
    }

    writeln!(out, "{}", text)?;
    Ok(Delivery::Printed)
}
