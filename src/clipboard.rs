// System clipboard access behind a small trait so the pipeline can be
// exercised without touching the real clipboard.

use anyhow::Result;

/// Write-only text clipboard surface.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The real clipboard, backed by arboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text)?;
        Ok(())
    }
}

/// In-memory clipboard used by tests across the crate.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemClipboard {
    pub text: Option<String>,
    pub fail: bool,
}

#[cfg(test)]
impl Clipboard for MemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("clipboard unavailable");
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}
