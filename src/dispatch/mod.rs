// Message protocol between the page-side engine and the background
// dispatcher. The wire shape is JSON; field names below are the protocol.

pub mod dispatcher;
pub mod opener;
pub mod service;

use serde::{Deserialize, Serialize};

/// A request crossing the context boundary. At-most-once from the sender's
/// point of view: the engine never retries a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum DispatchRequest {
    /// Open each URL as an inactive tab in the current window, in order.
    #[serde(rename = "openTabs", rename_all = "camelCase")]
    OpenTabs {
        urls: Vec<String>,
        /// Seconds to wait between successive creations.
        #[serde(default)]
        delay: f64,
        /// Insert at the end of the tab strip instead of default placement.
        #[serde(default)]
        open_at_end: bool,
    },
    /// Open a focused window from the first URL, the rest as inactive tabs.
    #[serde(rename = "openWindow", rename_all = "camelCase")]
    OpenWindow {
        urls: Vec<String>,
        #[serde(default)]
        delay: f64,
    },
}

/// The single terminal reply to a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispatchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_links: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Wire shape ───────────────────────────────────────────────────

    #[test]
    fn open_tabs_request_wire_shape() {
        let req = DispatchRequest::OpenTabs {
            urls: vec!["http://a".to_string()],
            delay: 1.5,
            open_at_end: true,
        };
        let wire = serde_json::to_value(&req).unwrap();
        assert_eq!(
            wire,
            json!({
                "action": "openTabs",
                "urls": ["http://a"],
                "delay": 1.5,
                "openAtEnd": true
            })
        );
    }

    #[test]
    fn open_window_request_wire_shape() {
        let req = DispatchRequest::OpenWindow {
            urls: vec!["http://a".to_string(), "http://b".to_string()],
            delay: 0.0,
        };
        let wire = serde_json::to_value(&req).unwrap();
        assert_eq!(wire["action"], "openWindow");
        assert_eq!(wire["urls"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn request_defaults_apply_on_decode() {
        let req: DispatchRequest =
            serde_json::from_value(json!({"action": "openTabs", "urls": []})).unwrap();
        assert_eq!(
            req,
            DispatchRequest::OpenTabs {
                urls: vec![],
                delay: 0.0,
                open_at_end: false,
            }
        );
    }

    #[test]
    fn response_omits_absent_fields() {
        let resp = DispatchResponse {
            success: true,
            success_count: Some(3),
            total_links: Some(3),
            ..Default::default()
        };
        let wire = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            wire,
            json!({"success": true, "successCount": 3, "totalLinks": 3})
        );
    }

    #[test]
    fn response_round_trips() {
        let resp = DispatchResponse {
            success: false,
            success_count: Some(2),
            total_links: Some(3),
            window_id: None,
            error: Some("boom".to_string()),
        };
        let wire = serde_json::to_string(&resp).unwrap();
        let back: DispatchResponse = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, resp);
    }

    #[test]
    fn failure_constructor_sets_error_only() {
        let resp = DispatchResponse::failure("no window");
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("no window"));
        assert!(resp.success_count.is_none());
    }
}
