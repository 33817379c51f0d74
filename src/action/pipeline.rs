// Action pipeline: what happens to the captured link list after a gesture
// completes. Dedup, ordering, validity filtering, then either a local
// clipboard write or a request to the background dispatcher.

use std::collections::HashSet;

use crate::clipboard::Clipboard;
use crate::config::types::{ActionConfig, ActionKind};
use crate::dispatch::service::DispatchClient;
use crate::dispatch::DispatchRequest;
use crate::notice::Notice;
use crate::page::PageLink;

use super::format;

/// Deduplicate links, keeping the first occurrence in encounter order.
/// Keys on the display title for the titles action, on the href otherwise.
pub fn smart_select(links: &[PageLink], kind: ActionKind) -> Vec<PageLink> {
    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|link| {
            let key = if kind.dedups_by_title() {
                format::resolve_title(link)
            } else {
                link.href.clone()
            };
            seen.insert(key)
        })
        .cloned()
        .collect()
}

/// Only http(s) URLs are acted on; everything else (javascript:, mailto:,
/// fragments, ...) is silently dropped.
fn is_actionable_url(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Apply dedup, ordering, and the validity filter, in that order.
pub fn prepare(config: &ActionConfig, links: &[PageLink]) -> Vec<PageLink> {
    let mut out = if config.options.smart_select {
        smart_select(links, config.action)
    } else {
        links.to_vec()
    };
    if config.options.reverse_order {
        out.reverse();
    }
    out.retain(|link| is_actionable_url(&link.href));
    out
}

/// What a completed gesture resolves to before any side effect runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPlan {
    /// Send to the background dispatcher (tab/window creation).
    Dispatch(DispatchRequest),
    /// Write text to the clipboard; `done` is the success notification.
    CopyText { text: String, done: String },
    /// Nothing survived filtering; skip silently.
    Nothing,
}

/// Resolve the final link list against the configuration into a plan.
pub fn plan(config: &ActionConfig, links: &[PageLink]) -> ActionPlan {
    let links = prepare(config, links);
    if links.is_empty() {
        return ActionPlan::Nothing;
    }
    let n = links.len();
    let hrefs = || links.iter().map(|l| l.href.clone()).collect::<Vec<_>>();

    match config.action {
        ActionKind::OpenNewTab => ActionPlan::Dispatch(DispatchRequest::OpenTabs {
            urls: hrefs(),
            delay: config.options.tab_delay_secs,
            open_at_end: config.options.open_at_end,
        }),
        ActionKind::OpenNewWindow => ActionPlan::Dispatch(DispatchRequest::OpenWindow {
            urls: hrefs(),
            delay: config.options.tab_delay_secs,
        }),
        ActionKind::CopyUrls => ActionPlan::CopyText {
            text: hrefs().join("\n"),
            done: format!("Copied {n} URLs to clipboard"),
        },
        ActionKind::CopyUrlsWithTitle => ActionPlan::CopyText {
            text: format::format_with_titles(&links, &config.options),
            done: format!("Copied {n} URLs with titles to clipboard"),
        },
        ActionKind::CopyTitles => ActionPlan::CopyText {
            text: links
                .iter()
                .map(format::resolve_title)
                .collect::<Vec<_>>()
                .join("\n"),
            done: format!("Copied {n} titles to clipboard"),
        },
    }
}

/// Execute a plan. Returns the user-facing notification, or `None` for a
/// silent no-op. Every failure resolves to a failure notice; nothing here
/// escapes as an error.
pub fn execute(
    plan: ActionPlan,
    clipboard: &mut dyn Clipboard,
    dispatch: &DispatchClient,
) -> Option<Notice> {
    match plan {
        ActionPlan::Nothing => None,
        ActionPlan::CopyText { text, done } => Some(match clipboard.set_text(&text) {
            Ok(()) => Notice::new(done),
            Err(e) => {
                log::error!("clipboard write failed: {e}");
                Notice::new("Failed to copy to clipboard".to_string())
            }
        }),
        ActionPlan::Dispatch(req) => Some(dispatch_and_summarize(req, dispatch)),
    }
}

fn dispatch_and_summarize(req: DispatchRequest, dispatch: &DispatchClient) -> Notice {
    let (is_window, total) = match &req {
        DispatchRequest::OpenTabs { urls, .. } => (false, urls.len()),
        DispatchRequest::OpenWindow { urls, .. } => (true, urls.len()),
    };
    let what = if is_window { "window" } else { "tabs" };

    match dispatch.request(req) {
        Ok(resp) if resp.success => {
            if is_window {
                Notice::new(format!("Opened new window with {total} tabs"))
            } else {
                Notice::new(format!(
                    "Opened {} tabs",
                    resp.success_count.unwrap_or(total)
                ))
            }
        }
        Ok(resp) => {
            let reason = resp.error.unwrap_or_else(|| "Unknown error".to_string());
            log::error!("failed to open {what}: {reason}");
            Notice::new(format!("Failed to open {what}: {reason}"))
        }
        Err(e) => {
            log::error!("dispatch transport failed: {e}");
            Notice::new(format!("Failed to open {what}"))
        }
    }
}
