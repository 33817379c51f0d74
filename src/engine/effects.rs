// Presentation commands the engine emits for the embedding host to apply.
// The engine owns the policy (what is shown, when); the host owns the
// mechanism (elements, classes, inline styles).

use crate::config::types::{ActionConfig, BorderStyle};
use crate::select::rect::SelectionRect;

/// Visual styling for the selection box, taken from the bound configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    pub color: String,
    pub border: BorderStyle,
    pub border_size: u32,
}

impl BoxStyle {
    pub fn from_config(config: &ActionConfig) -> Self {
        Self {
            color: config.color.clone(),
            border: config.border,
            border_size: config.border_size,
        }
    }
}

/// One page mutation requested by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Create (or restyle in place) the selection box and status line.
    ShowOverlay {
        rect: SelectionRect,
        style: BoxStyle,
        status: String,
    },
    /// Move/resize the selection box and refresh the status text.
    UpdateOverlay { rect: SelectionRect, status: String },
    /// Replace the highlight marks with exactly this set of link ids. Always
    /// the full set, never a patch, so stale marks cannot survive.
    SetHighlights { ids: Vec<u64>, color: String },
    /// Remove the selection box, status line, and every highlight mark.
    ClearOverlay,
    /// Swallow click and context-menu events until told otherwise.
    BlockPageClicks,
    /// Stop swallowing click and context-menu events.
    UnblockPageClicks,
    /// Scroll the page vertically by the given pixel delta.
    ScrollBy { dy: f64 },
}
