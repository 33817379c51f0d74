// Watches the settings file and delivers freshly normalized trigger lists.
//
// On read/parse error the previous list is kept and a warning is logged; the
// callback only fires when the normalized list actually changed.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use super::store;
use super::types::ActionConfig;

/// Watches the settings document for changes and invokes a callback with the
/// new trigger list. The watcher thread shuts down cleanly when dropped
/// (notify handles this on drop).
pub struct SettingsWatcher {
    _watcher: RecommendedWatcher,
    _path: PathBuf,
}

impl SettingsWatcher {
    /// Create a new settings watcher.
    ///
    /// - `path` — the settings file to watch
    /// - `current` — baseline list for change detection
    /// - `on_change` — called with the new list when a valid change lands
    pub fn new<F>(
        path: &Path,
        current: Vec<ActionConfig>,
        on_change: F,
    ) -> Result<Self, notify::Error>
    where
        F: Fn(Vec<ActionConfig>) + Send + 'static,
    {
        let settings_path = path.to_path_buf();
        let previous = Arc::new(Mutex::new(current));

        let watch_path = settings_path.clone();
        let mut watcher =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                let event = match res {
                    Ok(ev) => ev,
                    Err(e) => {
                        log::warn!("settings watcher error: {e}");
                        return;
                    }
                };

                // Only react to modify/create events (covers writes and atomic saves)
                use notify::EventKind;
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) => {}
                    _ => return,
                }

                let actions = match store::load_actions(&watch_path) {
                    Ok(actions) => actions,
                    Err(e) => {
                        log::warn!("settings reload failed (keeping previous): {e}");
                        return;
                    }
                };

                let mut prev = previous.lock().unwrap();
                if *prev != actions {
                    log::info!("settings changed: {} trigger(s)", actions.len());
                    on_change(actions.clone());
                    *prev = actions;
                }
            })?;

        // Watch the parent directory (some editors do atomic saves via rename)
        let watch_dir = path.parent().unwrap_or(path);
        watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            _path: settings_path,
        })
    }
}
