//! System clipboard over OSC 52.

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;

/// Ask the terminal to place `text` on the clipboard. Terminals without
/// OSC 52 support ignore the sequence.
pub fn copy(text: &str) {
    let mut out = std::io::stdout();
    match execute!(out, CopyToClipboard::to_clipboard_from(text.as_bytes())) {
        Ok(()) => tracing::debug!(bytes = text.len(), "clipboard write sent"),
        Err(e) => tracing::warn!(error = %e, "clipboard write failed"),
    }
}
