// Best-effort TabHost for running outside a real browser-extension host:
// every URL goes to the operating system's default browser. The browser
// decides tab grouping and placement itself, so the count and index hints
// are honored only as far as the platform allows (that is, not at all).

use anyhow::{anyhow, Result};

use super::dispatcher::{TabHost, TabId, WindowId};

/// Opens URLs through the system default browser.
#[derive(Debug, Default)]
pub struct SystemTabHost {
    opened: u64,
}

impl SystemTabHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn launch(&mut self, url: &str) -> Result<u64> {
        open::that_detached(url).map_err(|e| anyhow!("failed to open {url}: {e}"))?;
        self.opened += 1;
        Ok(self.opened)
    }
}

impl TabHost for SystemTabHost {
    fn tab_count(&self) -> Result<usize> {
        // No tab strip to measure; callers fall back to default placement.
        Ok(0)
    }

    fn create_tab(&mut self, url: &str, _active: bool, _index: Option<usize>) -> Result<TabId> {
        self.launch(url)
    }

    fn create_window(&mut self, url: &str) -> Result<WindowId> {
        self.launch(url)
    }

    fn create_tab_in_window(&mut self, _window: WindowId, url: &str) -> Result<TabId> {
        self.launch(url)
    }
}
