//! System clipboard access for the `copy` directive.

use tracing::debug;

#[derive(thiserror::Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Destination for copied results.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard, via arboard.
///
/// The handle is opened on first use so that a REPL without a display can
/// still start, and kept open afterwards because some X11 setups drop the
/// selection when the owner goes away.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };
        let clipboard = self.inner.insert(clipboard);

        clipboard.set_text(text.to_owned())?;
        debug!(bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}
