// Trigger configuration types and the tolerant normalization layer that
// turns persisted JSON (written by the options surface, possibly by older
// versions) into well-formed values. Malformed fields are coerced to
// defaults; entries that could never fire are skipped with a warning.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Default selection-box and highlight color.
const DEFAULT_COLOR: &str = "#667eea";

/// Default selection-box border width in pixels.
const DEFAULT_BORDER_SIZE: u32 = 2;

/// Errors from loading the persisted settings document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Physical mouse button a trigger is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "middle" => Some(Self::Middle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Middle => "middle",
        }
    }
}

/// A single modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Meta,
}

impl Modifier {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ctrl" => Some(Self::Ctrl),
            "shift" => Some(Self::Shift),
            "alt" => Some(Self::Alt),
            "meta" => Some(Self::Meta),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Ctrl => 1 << 0,
            Self::Shift => 1 << 1,
            Self::Alt => 1 << 2,
            Self::Meta => 1 << 3,
        }
    }
}

/// A deduplicated, order-insensitive set of modifier keys. Two sets are equal
/// iff they hold exactly the same modifiers; trigger matching uses equality,
/// not subset containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet {
    bits: u8,
}

impl ModifierSet {
    pub const EMPTY: Self = Self { bits: 0 };

    pub fn from_modifiers(modifiers: &[Modifier]) -> Self {
        let mut set = Self::EMPTY;
        for m in modifiers {
            set.insert(*m);
        }
        set
    }

    pub fn insert(&mut self, m: Modifier) {
        self.bits |= m.bit();
    }

    pub fn remove(&mut self, m: Modifier) {
        self.bits &= !m.bit();
    }

    pub fn contains(&self, m: Modifier) -> bool {
        self.bits & m.bit() != 0
    }

    /// Builder-style insertion, handy in literals.
    pub fn with(mut self, m: Modifier) -> Self {
        self.insert(m);
        self
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// The effect a trigger applies to the collected links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    OpenNewTab,
    OpenNewWindow,
    CopyUrls,
    CopyUrlsWithTitle,
    CopyTitles,
}

impl ActionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open_new_tab" => Some(Self::OpenNewTab),
            "open_new_window" => Some(Self::OpenNewWindow),
            "copy_urls" => Some(Self::CopyUrls),
            "copy_urls_with_title" => Some(Self::CopyUrlsWithTitle),
            "copy_titles" => Some(Self::CopyTitles),
            _ => None,
        }
    }

    /// Storage key, also used to pick the per-action advanced options.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenNewTab => "open_new_tab",
            Self::OpenNewWindow => "open_new_window",
            Self::CopyUrls => "copy_urls",
            Self::CopyUrlsWithTitle => "copy_urls_with_title",
            Self::CopyTitles => "copy_titles",
        }
    }

    /// Short label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenNewTab => "open in new tabs",
            Self::OpenNewWindow => "open in new window",
            Self::CopyUrls => "copy URLs",
            Self::CopyUrlsWithTitle => "copy URLs with titles",
            Self::CopyTitles => "copy titles",
        }
    }

    /// Whether dedup keys on the display title instead of the href.
    pub fn dedups_by_title(&self) -> bool {
        matches!(self, Self::CopyTitles)
    }
}

/// Selection-box border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
}

impl BorderStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "solid" => Some(Self::Solid),
            "dashed" => Some(Self::Dashed),
            "dotted" => Some(Self::Dotted),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

/// Output pattern for the copy-with-titles action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatPattern {
    TitleUrl,
    UrlTitle,
    Markdown,
    Html,
    Json,
}

impl FormatPattern {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "title_url" => Some(Self::TitleUrl),
            "url_title" => Some(Self::UrlTitle),
            "markdown" => Some(Self::Markdown),
            "html" => Some(Self::Html),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Separator placed between title and URL for the plain patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorKind {
    Space,
    Dash,
    Pipe,
    Colon,
    Tab,
    Newline,
}

impl SeparatorKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "space" => Some(Self::Space),
            "dash" => Some(Self::Dash),
            "pipe" => Some(Self::Pipe),
            "colon" => Some(Self::Colon),
            "tab" => Some(Self::Tab),
            "newline" => Some(Self::Newline),
            _ => None,
        }
    }
}

/// Per-action tuning knobs. Stored under `advancedOptions[<action name>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvancedOptions {
    /// Deduplicate the link list before acting (on unless explicitly off).
    pub smart_select: bool,
    /// Reverse the deduplicated sequence.
    pub reverse_order: bool,
    /// Seconds to wait between successive tab creations.
    pub tab_delay_secs: f64,
    /// Insert new tabs at the end of the tab strip.
    pub open_at_end: bool,
    pub format_pattern: FormatPattern,
    pub separator: SeparatorKind,
    pub separator_count: usize,
    /// Extra blank lines between formatted entries.
    pub blank_lines: usize,
}

impl Default for AdvancedOptions {
    fn default() -> Self {
        Self {
            smart_select: true,
            reverse_order: false,
            tab_delay_secs: 0.0,
            open_at_end: false,
            format_pattern: FormatPattern::TitleUrl,
            separator: SeparatorKind::Space,
            separator_count: 1,
            blank_lines: 0,
        }
    }
}

/// A user-defined trigger: mouse button + exact modifier set bound to an
/// action with presentation and tuning options.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionConfig {
    pub id: String,
    pub button: MouseButton,
    pub modifiers: ModifierSet,
    pub color: String,
    pub border: BorderStyle,
    pub border_size: u32,
    pub action: ActionKind,
    pub options: AdvancedOptions,
    pub created_at: Option<DateTime<Utc>>,
}

impl ActionConfig {
    /// Normalize one stored entry. Returns `None` (after a warning) for
    /// entries that could never fire: non-object values, or an unknown
    /// button or action. Every other malformed field is coerced.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                log::warn!("skipping non-object trigger entry: {value}");
                return None;
            }
        };

        let id = obj
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let button = match obj.get("mouseButton").and_then(Value::as_str) {
            Some(s) => match MouseButton::parse(s) {
                Some(b) => b,
                None => {
                    log::warn!("skipping trigger {id:?}: unknown mouse button {s:?}");
                    return None;
                }
            },
            None => {
                log::warn!("skipping trigger {id:?}: missing mouse button");
                return None;
            }
        };

        let action = match obj.get("action").and_then(Value::as_str) {
            Some(s) => match ActionKind::parse(s) {
                Some(a) => a,
                None => {
                    log::warn!("skipping trigger {id:?}: unknown action {s:?}");
                    return None;
                }
            },
            None => {
                log::warn!("skipping trigger {id:?}: missing action");
                return None;
            }
        };

        let modifiers = normalize_modifiers(obj.get("modifiers"));

        let color = obj
            .get("color")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_COLOR)
            .to_string();

        let border = obj
            .get("borderType")
            .and_then(Value::as_str)
            .and_then(BorderStyle::parse)
            .unwrap_or(BorderStyle::Solid);

        let border_size = obj
            .get("borderSize")
            .and_then(Value::as_u64)
            .map(|n| n as u32)
            .unwrap_or(DEFAULT_BORDER_SIZE);

        let created_at = obj
            .get("createdAt")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc));

        let options =
            normalize_options(obj.get("advancedOptions").and_then(|v| v.get(action.name())));

        Some(Self {
            id,
            button,
            modifiers,
            color,
            border,
            border_size,
            action,
            options,
            created_at,
        })
    }
}

/// Normalize the whole stored action list. Anything that is not an array
/// becomes an empty list.
pub fn normalize_actions(value: &Value) -> Vec<ActionConfig> {
    match value.as_array() {
        Some(entries) => entries.iter().filter_map(ActionConfig::from_value).collect(),
        None => {
            if !value.is_null() {
                log::warn!("trigger list is not an array, treating as empty");
            }
            Vec::new()
        }
    }
}

/// Coerce the stored `modifiers` field. Older versions sometimes persisted
/// the array as an object keyed by index; any other shape means no modifiers.
/// Unknown modifier names are ignored.
fn normalize_modifiers(value: Option<&Value>) -> ModifierSet {
    let names: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::Object(map)) => map.values().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    let mut set = ModifierSet::EMPTY;
    for name in names {
        match Modifier::parse(name) {
            Some(m) => set.insert(m),
            None => log::warn!("ignoring unknown modifier {name:?}"),
        }
    }
    set
}

fn normalize_options(value: Option<&Value>) -> AdvancedOptions {
    let defaults = AdvancedOptions::default();
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return defaults,
    };

    // Smart select is on unless stored as the literal boolean false.
    let smart_select = !matches!(obj.get("smartSelectEnabled"), Some(Value::Bool(false)));
    // Reverse order is off unless stored as the literal boolean true.
    let reverse_order = matches!(obj.get("reverseOrderEnabled"), Some(Value::Bool(true)));
    let open_at_end = matches!(obj.get("openAtEndEnabled"), Some(Value::Bool(true)));

    let tab_delay_secs = obj
        .get("tabOpeningDelay")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .max(0.0);

    let format_pattern = obj
        .get("formatPattern")
        .and_then(Value::as_str)
        .and_then(FormatPattern::parse)
        .unwrap_or(defaults.format_pattern);

    let separator = obj
        .get("separatorType")
        .and_then(Value::as_str)
        .and_then(SeparatorKind::parse)
        .unwrap_or(defaults.separator);

    let separator_count = match obj.get("separatorCount").and_then(Value::as_u64) {
        Some(0) | None => defaults.separator_count,
        Some(n) => n as usize,
    };

    let blank_lines = obj
        .get("newLinesCount")
        .and_then(Value::as_u64)
        .unwrap_or(0) as usize;

    AdvancedOptions {
        smart_select,
        reverse_order,
        tab_delay_secs,
        open_at_end,
        format_pattern,
        separator,
        separator_count,
        blank_lines,
    }
}
