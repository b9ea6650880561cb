//! Clipboard abstraction layer.
//!
//! The grid only ever exchanges plain TSV text with the clipboard, so the
//! provider trait is text in, text out.

/// Trait for clipboard operations.
pub trait ClipboardProvider {
    /// Get text from clipboard.
    fn get_text(&mut self) -> Option<String>;

    /// Set text to clipboard.
    fn set_text(&mut self, text: String) -> bool;
}

/// System clipboard implementation using arboard.
pub struct SystemClipboard;

impl SystemClipboard {
    /// Whether a system clipboard can be opened at all (no display on a bare tty).
    pub fn available() -> bool {
        arboard::Clipboard::new().is_ok()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        let mut cb = arboard::Clipboard::new()
            .map_err(|err| tracing::warn!(error = %err, "clipboard unavailable"))
            .ok()?;
        cb.get_text().ok()
    }

    fn set_text(&mut self, text: String) -> bool {
        let mut cb = match arboard::Clipboard::new() {
            Ok(cb) => cb,
            Err(err) => {
                tracing::warn!(error = %err, "clipboard unavailable");
                return false;
            }
        };
        cb.set_text(text).is_ok()
    }
}

/// Process-local clipboard, used when no system clipboard is reachable.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    pub text: Option<String>,
}

impl ClipboardProvider for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) -> bool {
        self.text = Some(text);
        true
    }
}
