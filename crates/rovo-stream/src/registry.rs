//! Tool call correlation table.
//!
//! Completed tool calls are recorded by id. A later tool return with the
//! same id consumes the entry and carries the call as `toolCallMessage`.
//! Each entry is used at most once.

use std::collections::HashMap;

use rovo_core::events::ToolCall;
use tracing::debug;

/// Completed tool calls awaiting their return, keyed by `tool_call_id`.
#[derive(Clone, Debug, Default)]
pub struct ToolCallRegistry {
    calls: HashMap<String, ToolCall>,
}

impl ToolCallRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed call. A later call with the same id replaces it.
    pub fn record(&mut self, call: ToolCall) {
        debug!(tool_call_id = %call.tool_call_id, tool_name = %call.tool_name, "tool call recorded");
        if let Some(previous) = self.calls.insert(call.tool_call_id.clone(), call) {
            debug!(tool_call_id = %previous.tool_call_id, "replaced earlier tool call with same id");
        }
    }

    /// Remove and return the call for `tool_call_id`.
    pub fn consume(&mut self, tool_call_id: &str) -> Option<ToolCall> {
        let call = self.calls.remove(tool_call_id);
        if call.is_none() {
            debug!(tool_call_id, "tool return without a recorded call");
        }
        call
    }

    /// Look up a pending call without consuming it.
    pub fn get(&self, tool_call_id: &str) -> Option<&ToolCall> {
        self.calls.get(tool_call_id)
    }

    /// Number of calls awaiting a return.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether no calls are pending.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
