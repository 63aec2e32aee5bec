//! Response events produced by the stream parser.
//!
//! [`ResponseEvent`] is the only thing the UI layer ever receives from a
//! response stream. Every upstream event kind maps to exactly one variant,
//! and [`ResponseEvent::ParsingError`] carries locally recovered failures so a
//! bad frame never ends the stream.
//!
//! Events serialize with a `kind` discriminant and camelCase fields, which is
//! the shape the webview renderer consumes.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// ToolCall — invocation record shared by several variants
// ─────────────────────────────────────────────────────────────────────────────

/// A tool invocation announced by the agent.
///
/// Stored in the parser's correlation table until the matching tool return
/// arrives, then attached to that return as `toolCallMessage`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    /// Name of the invoked tool.
    pub tool_name: String,
    /// Raw JSON argument text, exactly as streamed.
    pub args: String,
    /// MCP server hosting the tool, when the tool is not built in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp_server: Option<String>,
    /// Correlation id shared with the eventual tool return.
    pub tool_call_id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// ToolReturnContent
// ─────────────────────────────────────────────────────────────────────────────

/// Result payload of a tool return.
///
/// Serialized as either a `content` string field or a `parsedContent`
/// structured field, never both.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ToolReturnContent {
    /// The tool returned plain text.
    #[serde(rename = "content")]
    Text(String),
    /// The tool returned structured JSON.
    #[serde(rename = "parsedContent")]
    Parsed(Value),
}

impl ToolReturnContent {
    /// Classify a wire `content` value: strings stay text, anything else is structured.
    ///
    /// `null` is treated as absent and becomes empty text.
    pub fn from_wire(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Null => Self::Text(String::new()),
            other => Self::Parsed(other),
        }
    }

    /// Plain text content, if the tool returned text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Parsed(_) => None,
        }
    }

    /// Structured content, if the tool returned JSON.
    pub fn as_parsed(&self) -> Option<&Value> {
        match self {
            Self::Text(_) => None,
            Self::Parsed(value) => Some(value),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ParseErrorReason
// ─────────────────────────────────────────────────────────────────────────────

/// Why a [`ResponseEvent::ParsingError`] was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorReason {
    /// Frame text does not match `event: <kind>` / `data: <json>`, or the JSON is invalid.
    MalformedFrame,
    /// The frame names a kind outside the known set.
    UnknownEventKind,
    /// A part delta arrived with nothing (or something else) accumulating.
    UnexpectedPartDelta,
    /// The stream ended in the middle of a frame.
    DanglingInput,
}

impl ParseErrorReason {
    /// Stable machine-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedFrame => "malformed_frame",
            Self::UnknownEventKind => "unknown_event_kind",
            Self::UnexpectedPartDelta => "unexpected_part_delta",
            Self::DanglingInput => "dangling_input",
        }
    }
}

impl fmt::Display for ParseErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ResponseEvent
// ─────────────────────────────────────────────────────────────────────────────

/// One semantically complete event from an agent response stream.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ResponseEvent {
    /// The user's prompt, echoed back by the agent.
    #[serde(rename = "user-prompt")]
    UserPrompt {
        /// Prompt text.
        content: String,
        /// Server-side timestamp.
        timestamp: String,
    },

    /// Assistant text. In streaming mode each increment is its own event.
    #[serde(rename = "text")]
    Text {
        /// Position of the text part within the response.
        index: u64,
        /// Text (or text increment).
        content: String,
    },

    /// A tool invocation.
    #[serde(rename = "tool-call")]
    ToolCall(ToolCall),

    /// The result of a tool invocation.
    #[serde(rename = "tool-return", rename_all = "camelCase")]
    ToolReturn {
        /// Name of the tool that produced the result.
        tool_name: String,
        /// Text or structured result.
        #[serde(flatten)]
        content: ToolReturnContent,
        /// Correlation id of the originating call.
        tool_call_id: String,
        /// Server-side timestamp.
        timestamp: String,
        /// The originating call, when it was observed on this stream.
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_call_message: Option<ToolCall>,
    },

    /// The agent asks to retry a tool call.
    #[serde(rename = "retry-prompt", rename_all = "camelCase")]
    RetryPrompt {
        /// Tool being retried.
        tool_name: String,
        /// Retry instructions.
        content: String,
        /// Correlation id of the call being retried.
        tool_call_id: String,
        /// Server-side timestamp.
        timestamp: String,
    },

    /// The agent reported a failure.
    #[serde(rename = "exception")]
    Exception {
        /// Error message.
        message: String,
        /// Optional headline.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Error type name reported upstream.
        #[serde(rename = "type")]
        error_type: String,
    },

    /// A non-fatal warning.
    #[serde(rename = "warning")]
    Warning {
        /// Warning message.
        message: String,
        /// Optional headline.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },

    /// The conversation history was cleared.
    #[serde(rename = "clear")]
    Clear {
        /// Status message.
        message: String,
    },

    /// The conversation history was pruned.
    #[serde(rename = "prune")]
    Prune {
        /// Status message.
        message: String,
    },

    /// The agent is about to run a batch of tools.
    #[serde(rename = "on_call_tools_start")]
    OnCallToolsStart {
        /// Calls in the batch.
        tools: Vec<ToolCall>,
    },

    /// The agent closed the response.
    #[serde(rename = "close")]
    Close,

    /// A locally recovered parse failure. Never sent by the backend.
    #[serde(rename = "parsing-error", rename_all = "camelCase")]
    ParsingError {
        /// Failure category.
        reason: ParseErrorReason,
        /// Human-readable description.
        detail: String,
        /// Offending frame text, when there was one.
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_frame: Option<String>,
    },
}

impl ResponseEvent {
    /// Build a parsing error event.
    pub fn parsing_error(
        reason: ParseErrorReason,
        detail: impl Into<String>,
        raw_frame: Option<String>,
    ) -> Self {
        Self::ParsingError {
            reason,
            detail: detail.into(),
            raw_frame,
        }
    }

    /// Canonical kind name, identical to the serialized `kind` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::UserPrompt { .. } => "user-prompt",
            Self::Text { .. } => "text",
            Self::ToolCall(_) => "tool-call",
            Self::ToolReturn { .. } => "tool-return",
            Self::RetryPrompt { .. } => "retry-prompt",
            Self::Exception { .. } => "exception",
            Self::Warning { .. } => "warning",
            Self::Clear { .. } => "clear",
            Self::Prune { .. } => "prune",
            Self::OnCallToolsStart { .. } => "on_call_tools_start",
            Self::Close => "close",
            Self::ParsingError { .. } => "parsing-error",
        }
    }

    /// Whether this is a synthetic parse failure.
    pub fn is_parsing_error(&self) -> bool {
        matches!(self, Self::ParsingError { .. })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
