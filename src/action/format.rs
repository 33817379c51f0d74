// Output formatting for the copy actions: title resolution, separators, and
// the per-pattern entry layouts.

use serde::Serialize;

use crate::config::types::{AdvancedOptions, FormatPattern, SeparatorKind};
use crate::page::PageLink;

/// Placeholder for anchors with neither visible text nor a title attribute.
pub const UNTITLED: &str = "Untitled";

/// Resolve the display title for a link: trimmed visible text, else the
/// `title` attribute, else the fixed placeholder.
pub fn resolve_title(link: &PageLink) -> String {
    let text = link.text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    if !link.title_attr.is_empty() {
        return link.title_attr.clone();
    }
    UNTITLED.to_string()
}

/// The separator string for the plain patterns, repeated `count` times.
pub fn separator(kind: SeparatorKind, count: usize) -> String {
    let s = match kind {
        SeparatorKind::Space => " ",
        SeparatorKind::Dash => "-",
        SeparatorKind::Pipe => "|",
        SeparatorKind::Colon => ":",
        SeparatorKind::Tab => "\t",
        SeparatorKind::Newline => "\n",
    };
    s.repeat(count)
}

#[derive(Serialize)]
struct UrlEntry {
    url: String,
    title: String,
}

#[derive(Serialize)]
struct UrlDocument {
    urls: Vec<UrlEntry>,
}

/// Format (title, href) pairs per the configured pattern.
///
/// The two plain patterns put the separator between title and URL and join
/// entries with `blank_lines + 1` newlines; `markdown` and `html` ignore the
/// separator; `json` ignores both knobs and emits one pretty-printed
/// document.
pub fn format_with_titles(links: &[PageLink], opts: &AdvancedOptions) -> String {
    if opts.format_pattern == FormatPattern::Json {
        let doc = UrlDocument {
            urls: links
                .iter()
                .map(|l| UrlEntry {
                    url: l.href.clone(),
                    title: resolve_title(l),
                })
                .collect(),
        };
        return serde_json::to_string_pretty(&doc).unwrap_or_default();
    }

    let sep = separator(opts.separator, opts.separator_count);
    let entries: Vec<String> = links
        .iter()
        .map(|l| {
            let title = resolve_title(l);
            let url = &l.href;
            match opts.format_pattern {
                FormatPattern::TitleUrl => format!("{title}{sep}{url}"),
                FormatPattern::UrlTitle => format!("{url}{sep}{title}"),
                FormatPattern::Markdown => format!("[{title}]({url})"),
                FormatPattern::Html => format!("<a href=\"{url}\">{title}</a>"),
                // Handled by the early return above
                FormatPattern::Json => String::new(),
            }
        })
        .collect();

    entries.join(&"\n".repeat(opts.blank_lines + 1))
}
