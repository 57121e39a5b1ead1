//! Messages between the control surface and the engine.
//!
//! Requests arrive as `PluginMessage`, replies leave as `UiMessage`, both
//! tagged by `type` in SCREAMING_SNAKE_CASE. `Session` turns one into the
//! other against the current selection.

use serde::{Deserialize, Serialize};

use crate::engine::{apply, scan, ApplyRequest, Metrics, Progress, ScanOptions, ScanResult};
use crate::error::{Result, RetintError};
use crate::scene::SceneNode;

/// Message shown when a scan is requested with nothing selected.
pub const EMPTY_SELECTION: &str = "Please select a frame first.";

/// Control surface to engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PluginMessage {
    ScanRequest {
        #[serde(default)]
        options: ScanOptions,
    },
    ApplyRequest(ApplyRequest),
}

/// Engine to control surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UiMessage {
    ScanResult(ScanResult),
    ApplyResult { metrics: Metrics },
    Progress(Progress),
    Error { message: String },
}

/// Dispatches control-surface requests.
///
/// Calls run to completion before returning; callers must not overlap
/// them on the same selection.
#[derive(Debug, Clone)]
pub struct Session {
    rescan_after_apply: bool,
    rescan_options: ScanOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            rescan_after_apply: true,
            rescan_options: ScanOptions::default(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fresh palette is sent after every apply.
    pub fn with_rescan_after_apply(mut self, enabled: bool) -> Self {
        self.rescan_after_apply = enabled;
        self
    }

    /// Handle one request, sending replies to `sink` in order.
    pub fn handle<N, S>(&self, message: PluginMessage, selection: &mut [N], mut sink: S)
    where
        N: SceneNode,
        S: FnMut(UiMessage),
    {
        match message {
            PluginMessage::ScanRequest { options } => {
                if selection.is_empty() {
                    sink(UiMessage::Error {
                        message: EMPTY_SELECTION.to_string(),
                    });
                    return;
                }
                sink(UiMessage::ScanResult(scan(selection, &options)));
            }
            PluginMessage::ApplyRequest(request) => {
                if selection.is_empty() {
                    return;
                }
                let metrics = apply(selection, &request, |progress| {
                    sink(UiMessage::Progress(progress));
                });
                sink(UiMessage::ApplyResult { metrics });

                if self.rescan_after_apply {
                    self.selection_changed(selection, &mut sink);
                }
            }
        }
    }

    /// Parse a JSON request and handle it.
    pub fn handle_json<N, S>(&self, json: &str, selection: &mut [N], sink: S) -> Result<()>
    where
        N: SceneNode,
        S: FnMut(UiMessage),
    {
        let message: PluginMessage = serde_json::from_str(json).map_err(|e| RetintError::Parse {
            message: format!("Invalid plugin message: {}", e),
            help: Some("Expected {\"type\": \"SCAN_REQUEST\" | \"APPLY_REQUEST\", ...}".to_string()),
        })?;
        self.handle(message, selection, sink);
        Ok(())
    }

    /// Re-scan after the selection changed. An empty selection produces an
    /// empty palette rather than an error.
    pub fn selection_changed<N, S>(&self, selection: &[N], mut sink: S)
    where
        N: SceneNode,
        S: FnMut(UiMessage),
    {
        sink(UiMessage::ScanResult(scan(selection, &self.rescan_options)));
    }
}
