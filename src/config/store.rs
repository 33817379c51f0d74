// Persisted settings document: a JSON file owned by the options surface.
// The engine only ever reads it; writes happen elsewhere.

use std::path::Path;

use serde_json::Value;

use super::types::{normalize_actions, ActionConfig, ConfigError};

/// Key holding the trigger list inside the settings document.
const ACTIONS_KEY: &str = "actions";

/// Load and normalize the trigger list from a settings file.
pub fn load_actions(path: &Path) -> Result<Vec<ActionConfig>, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_actions(&contents)
}

/// Parse a settings document and normalize its trigger list. A missing or
/// malformed `actions` key yields an empty list; only an unreadable document
/// is an error.
pub fn parse_actions(contents: &str) -> Result<Vec<ActionConfig>, ConfigError> {
    let doc: Value =
        serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(normalize_actions(doc.get(ACTIONS_KEY).unwrap_or(&Value::Null)))
}
