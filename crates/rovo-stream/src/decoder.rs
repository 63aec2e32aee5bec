//! Frame decoding: `event:` / `data:` text into typed records.
//!
//! Decoding happens in two steps:
//! 1. [`decode`] matches the frame shape, normalizes the kind name and parses
//!    the JSON payload into a [`RawFrame`]
//! 2. [`interpret`] maps the payload onto a [`ResponseEvent`] (or a part
//!    start/delta envelope) using per-kind wire structs
//!
//! Both steps are pure. Failures come back as [`FrameError`] values.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use rovo_core::events::{ResponseEvent, ToolCall, ToolReturnContent};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::FrameError;

static FRAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\s*event:[ \t]*(?P<kind>\S+)[ \t]*\r?\ndata:[ \t]*(?P<data>.*)\z")
        .expect("valid frame pattern")
});

// ─────────────────────────────────────────────────────────────────────────────
// EventKind
// ─────────────────────────────────────────────────────────────────────────────

/// Every kind name the protocol defines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `user-prompt` / `user_prompt`
    UserPrompt,
    /// `text`
    Text,
    /// `tool-call` / `tool_call`
    ToolCall,
    /// `tool-return` / `tool_return`
    ToolReturn,
    /// `retry-prompt` / `retry_prompt`
    RetryPrompt,
    /// `exception`
    Exception,
    /// `warning`
    Warning,
    /// `clear`
    Clear,
    /// `prune`
    Prune,
    /// `on_call_tools_start`
    OnCallToolsStart,
    /// `close`
    Close,
    /// `part_start` envelope.
    PartStart,
    /// `part_delta` envelope.
    PartDelta,
}

impl EventKind {
    /// Resolve a wire name, accepting hyphenated and underscored spellings.
    pub fn from_wire(name: &str) -> Option<Self> {
        let kind = match name.trim().replace('_', "-").as_str() {
            "user-prompt" => Self::UserPrompt,
            "text" => Self::Text,
            "tool-call" => Self::ToolCall,
            "tool-return" => Self::ToolReturn,
            "retry-prompt" => Self::RetryPrompt,
            "exception" => Self::Exception,
            "warning" => Self::Warning,
            "clear" => Self::Clear,
            "prune" => Self::Prune,
            "on-call-tools-start" => Self::OnCallToolsStart,
            "close" => Self::Close,
            "part-start" => Self::PartStart,
            "part-delta" => Self::PartDelta,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserPrompt => "user-prompt",
            Self::Text => "text",
            Self::ToolCall => "tool-call",
            Self::ToolReturn => "tool-return",
            Self::RetryPrompt => "retry-prompt",
            Self::Exception => "exception",
            Self::Warning => "warning",
            Self::Clear => "clear",
            Self::Prune => "prune",
            Self::OnCallToolsStart => "on_call_tools_start",
            Self::Close => "close",
            Self::PartStart => "part_start",
            Self::PartDelta => "part_delta",
        }
    }

    /// Whether the kind may be streamed as a part start followed by deltas.
    pub fn is_streamable(self) -> bool {
        matches!(self, Self::UserPrompt | Self::Text | Self::ToolCall)
    }

    /// Whether the kind is a part envelope rather than a message kind.
    pub fn is_envelope(self) -> bool {
        matches!(self, Self::PartStart | Self::PartDelta)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RawFrame / Decoded
// ─────────────────────────────────────────────────────────────────────────────

/// A frame whose shape and JSON are valid.
#[derive(Clone, Debug, PartialEq)]
pub struct RawFrame {
    /// Normalized kind.
    pub kind: EventKind,
    /// Parsed `data:` payload.
    pub payload: Value,
}

/// An incremental update to a streamed part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartDelta {
    /// Kind named by `part_delta_kind`.
    pub kind: EventKind,
    /// Text appended to `content`.
    pub content_delta: String,
    /// Text appended to `args`.
    pub args_delta: String,
    /// Late-arriving tool call id, if the start frame lacked one.
    pub tool_call_id: Option<String>,
}

/// What a frame means to the reconstructor.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    /// A complete, non-part event.
    Event(ResponseEvent),
    /// A part start carrying the initial state of its inner event.
    PartStart(ResponseEvent),
    /// A part delta.
    PartDelta(PartDelta),
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Match the frame shape and parse its payload.
pub fn decode(frame: &str) -> Result<RawFrame, FrameError> {
    let caps = FRAME_PATTERN.captures(frame).ok_or(FrameError::BadShape)?;
    let name = &caps["kind"];
    let kind = EventKind::from_wire(name).ok_or_else(|| FrameError::UnknownKind(name.to_owned()))?;
    let payload = serde_json::from_str(&caps["data"]).map_err(FrameError::InvalidJson)?;
    Ok(RawFrame { kind, payload })
}

/// Map a raw frame onto its typed meaning.
pub fn interpret(raw: RawFrame) -> Result<Decoded, FrameError> {
    match raw.kind {
        EventKind::PartStart => {
            let envelope: WirePartStart = from_payload(EventKind::PartStart, raw.payload)?;
            Ok(Decoded::PartStart(decode_part(envelope.part)?))
        }
        EventKind::PartDelta => {
            let envelope: WirePartDelta = from_payload(EventKind::PartDelta, raw.payload)?;
            let wire = envelope.delta;
            let kind = EventKind::from_wire(&wire.part_delta_kind)
                .ok_or(FrameError::DeltaForUnknownKind(wire.part_delta_kind))?;
            Ok(Decoded::PartDelta(PartDelta {
                kind,
                content_delta: wire.content_delta,
                args_delta: args_text(wire.args_delta),
                tool_call_id: wire.tool_call_id,
            }))
        }
        kind => Ok(Decoded::Event(decode_payload(kind, raw.payload)?)),
    }
}

/// Decode a whole frame: [`decode`] then [`interpret`].
pub fn decode_frame(frame: &str) -> Result<Decoded, FrameError> {
    interpret(decode(frame)?)
}

/// Whether the `event:` line of `frame` names a part envelope.
///
/// Read from the frame head alone, so a bad payload does not change the
/// answer. Unknown kinds are not envelopes. `None` when the frame lacks the
/// `event:` / `data:` shape.
pub fn names_envelope(frame: &str) -> Option<bool> {
    let caps = FRAME_PATTERN.captures(frame)?;
    Some(EventKind::from_wire(&caps["kind"]).is_some_and(EventKind::is_envelope))
}

/// Decode the `part` object of a part start.
fn decode_part(part: Value) -> Result<ResponseEvent, FrameError> {
    let name = part
        .get("part_kind")
        .and_then(Value::as_str)
        .ok_or_else(|| FrameError::InvalidPayload {
            kind: EventKind::PartStart.as_str(),
            source: serde::de::Error::missing_field("part_kind"),
        })?
        .to_owned();
    match EventKind::from_wire(&name) {
        Some(kind) if !kind.is_envelope() => decode_payload(kind, part),
        _ => Err(FrameError::UnknownKind(name)),
    }
}

/// Per-kind field mapping for message kinds.
pub fn decode_payload(kind: EventKind, payload: Value) -> Result<ResponseEvent, FrameError> {
    let event = match kind {
        EventKind::UserPrompt => {
            let wire: WireUserPrompt = from_payload(kind, payload)?;
            ResponseEvent::UserPrompt {
                content: wire.content,
                timestamp: wire.timestamp,
            }
        }
        EventKind::Text => {
            let wire: WireText = from_payload(kind, payload)?;
            ResponseEvent::Text {
                index: wire.index,
                content: wire.content,
            }
        }
        EventKind::ToolCall => ResponseEvent::ToolCall(from_payload::<WireToolCall>(kind, payload)?.into()),
        EventKind::ToolReturn => {
            let wire: WireToolReturn = from_payload(kind, payload)?;
            ResponseEvent::ToolReturn {
                tool_name: wire.tool_name,
                content: ToolReturnContent::from_wire(wire.content),
                tool_call_id: wire.tool_call_id,
                timestamp: wire.timestamp,
                tool_call_message: None,
            }
        }
        EventKind::RetryPrompt => {
            let wire: WireRetryPrompt = from_payload(kind, payload)?;
            ResponseEvent::RetryPrompt {
                tool_name: wire.tool_name,
                content: content_text(wire.content),
                tool_call_id: wire.tool_call_id,
                timestamp: wire.timestamp,
            }
        }
        EventKind::Exception => {
            let wire: WireException = from_payload(kind, payload)?;
            ResponseEvent::Exception {
                message: wire.message,
                title: wire.title,
                error_type: wire.error_type,
            }
        }
        EventKind::Warning => {
            let wire: WireWarning = from_payload(kind, payload)?;
            ResponseEvent::Warning {
                message: wire.message,
                title: wire.title,
            }
        }
        EventKind::Clear => ResponseEvent::Clear {
            message: from_payload::<WireMessage>(kind, payload)?.message,
        },
        EventKind::Prune => ResponseEvent::Prune {
            message: from_payload::<WireMessage>(kind, payload)?.message,
        },
        EventKind::OnCallToolsStart => {
            let wire: WireOnCallToolsStart = from_payload(kind, payload)?;
            ResponseEvent::OnCallToolsStart {
                tools: wire.tools.into_iter().map(ToolCall::from).collect(),
            }
        }
        EventKind::Close => {
            let _: WireClose = from_payload(kind, payload)?;
            ResponseEvent::Close
        }
        EventKind::PartStart | EventKind::PartDelta => {
            return Err(FrameError::UnknownKind(kind.as_str().to_owned()));
        }
    };
    Ok(event)
}

fn from_payload<T: DeserializeOwned>(kind: EventKind, payload: Value) -> Result<T, FrameError> {
    serde_json::from_value(payload).map_err(|source| FrameError::InvalidPayload {
        kind: kind.as_str(),
        source,
    })
}

/// Tool arguments as text: strings verbatim, other JSON re-serialized.
fn args_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Free-form content as text, same rules as [`args_text`].
fn content_text(value: Value) -> String {
    args_text(value)
}

/// Treat an explicit `null` like an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Wire payloads ---

#[derive(Deserialize)]
struct WireUserPrompt {
    #[serde(default, deserialize_with = "nullable")]
    content: String,
    #[serde(default, deserialize_with = "nullable")]
    timestamp: String,
}

#[derive(Deserialize)]
struct WireText {
    index: u64,
    #[serde(default, deserialize_with = "nullable")]
    content: String,
}

#[derive(Deserialize)]
struct WireToolCall {
    tool_name: String,
    #[serde(default)]
    args: Value,
    #[serde(default)]
    mcp_server: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    tool_call_id: String,
}

impl From<WireToolCall> for ToolCall {
    fn from(wire: WireToolCall) -> Self {
        Self {
            tool_name: wire.tool_name,
            args: args_text(wire.args),
            mcp_server: wire.mcp_server,
            tool_call_id: wire.tool_call_id,
        }
    }
}

#[derive(Deserialize)]
struct WireToolReturn {
    tool_name: String,
    #[serde(default)]
    content: Value,
    tool_call_id: String,
    #[serde(default, deserialize_with = "nullable")]
    timestamp: String,
}

#[derive(Deserialize)]
struct WireRetryPrompt {
    #[serde(default, deserialize_with = "nullable")]
    tool_name: String,
    #[serde(default)]
    content: Value,
    #[serde(default, deserialize_with = "nullable")]
    tool_call_id: String,
    #[serde(default, deserialize_with = "nullable")]
    timestamp: String,
}

#[derive(Deserialize)]
struct WireException {
    #[serde(default, deserialize_with = "nullable")]
    message: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    error_type: String,
}

#[derive(Deserialize)]
struct WireWarning {
    #[serde(default, deserialize_with = "nullable")]
    message: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize)]
struct WireMessage {
    #[serde(default, deserialize_with = "nullable")]
    message: String,
}

#[derive(Deserialize)]
struct WireOnCallToolsStart {
    #[serde(default, deserialize_with = "nullable")]
    tools: Vec<WireToolCall>,
}

#[derive(Deserialize)]
struct WireClose {}

#[derive(Deserialize)]
struct WirePartStart {
    part: Value,
}

#[derive(Deserialize)]
struct WirePartDelta {
    delta: WireDelta,
}

#[derive(Deserialize)]
struct WireDelta {
    part_delta_kind: String,
    #[serde(default, deserialize_with = "nullable")]
    content_delta: String,
    #[serde(default)]
    args_delta: Value,
    #[serde(default)]
    tool_call_id: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rovo_core::events::ParseErrorReason;
    use serde_json::json;

    // ── EventKind ───────────────────────────────────────────────────

    #[test]
    fn dual_spellings_normalize() {
        for (a, b) in [
            ("tool-call", "tool_call"),
            ("tool-return", "tool_return"),
            ("user-prompt", "user_prompt"),
            ("retry-prompt", "retry_prompt"),
        ] {
            assert_eq!(EventKind::from_wire(a), EventKind::from_wire(b));
            assert_eq!(EventKind::from_wire(a).unwrap().as_str(), a);
        }
    }

    #[test]
    fn envelope_kinds_keep_wire_spelling() {
        assert_eq!(EventKind::from_wire("part_start"), Some(EventKind::PartStart));
        assert_eq!(EventKind::PartDelta.as_str(), "part_delta");
        assert_eq!(
            EventKind::from_wire("on_call_tools_start").unwrap().as_str(),
            "on_call_tools_start"
        );
    }

    #[test]
    fn unknown_kind_is_none() {
        assert_eq!(EventKind::from_wire("bogus"), None);
        assert_eq!(EventKind::from_wire(""), None);
    }

    #[test]
    fn streamable_kinds() {
        assert!(EventKind::Text.is_streamable());
        assert!(EventKind::UserPrompt.is_streamable());
        assert!(EventKind::ToolCall.is_streamable());
        assert!(!EventKind::ToolReturn.is_streamable());
        assert!(!EventKind::Close.is_streamable());
    }

    // ── decode ──────────────────────────────────────────────────────

    #[test]
    fn decode_basic_frame() {
        let raw = decode("event: text\ndata: {\"index\":0,\"content\":\"hi\"}").unwrap();
        assert_eq!(raw.kind, EventKind::Text);
        assert_eq!(raw.payload, json!({"index": 0, "content": "hi"}));
    }

    #[test]
    fn decode_without_space_after_colon() {
        let raw = decode("event:close\ndata:{}").unwrap();
        assert_eq!(raw.kind, EventKind::Close);
    }

    #[test]
    fn decode_tolerates_crlf() {
        let raw = decode("event: close\r\ndata: {}\r\n").unwrap();
        assert_eq!(raw.kind, EventKind::Close);
    }

    #[test]
    fn decode_bad_shape() {
        assert_matches!(decode("data: {}"), Err(FrameError::BadShape));
        assert_matches!(decode("event: text"), Err(FrameError::BadShape));
        assert_matches!(decode("hello world"), Err(FrameError::BadShape));
    }

    #[test]
    fn decode_invalid_json() {
        assert_matches!(decode("event: text\ndata: {nope"), Err(FrameError::InvalidJson(_)));
    }

    #[test]
    fn decode_unknown_kind() {
        assert_matches!(decode("event: bogus\ndata: {}"), Err(FrameError::UnknownKind(k)) if k == "bogus");
    }

    // ── interpret: message kinds ────────────────────────────────────

    #[test]
    fn tool_call_with_string_args() {
        let decoded = decode_frame(
            r#"event: tool_call
data: {"tool_name":"grep","args":"{\"q\":1}","tool_call_id":"c1","mcp_server":"search"}"#,
        )
        .unwrap();
        assert_matches!(decoded, Decoded::Event(ResponseEvent::ToolCall(call)) => {
            assert_eq!(call.tool_name, "grep");
            assert_eq!(call.args, r#"{"q":1}"#);
            assert_eq!(call.tool_call_id, "c1");
            assert_eq!(call.mcp_server.as_deref(), Some("search"));
        });
    }

    #[test]
    fn tool_call_with_object_args_serialized() {
        let event = decode_payload(
            EventKind::ToolCall,
            json!({"tool_name": "grep", "args": {"q": 1}, "tool_call_id": "c1"}),
        )
        .unwrap();
        assert_matches!(event, ResponseEvent::ToolCall(call) => assert_eq!(call.args, r#"{"q":1}"#));
    }

    #[test]
    fn tool_call_missing_args_defaults_empty() {
        let event =
            decode_payload(EventKind::ToolCall, json!({"tool_name": "ls", "tool_call_id": "c9"})).unwrap();
        assert_matches!(event, ResponseEvent::ToolCall(call) => assert_eq!(call.args, ""));
    }

    #[test]
    fn tool_return_string_content() {
        let event = decode_payload(
            EventKind::ToolReturn,
            json!({"tool_name": "grep", "content": "3 matches", "tool_call_id": "c1", "timestamp": "t"}),
        )
        .unwrap();
        assert_matches!(event, ResponseEvent::ToolReturn { content: ToolReturnContent::Text(text), tool_call_message: None, .. } => {
            assert_eq!(text, "3 matches");
        });
    }

    #[test]
    fn tool_return_object_content() {
        let event = decode_payload(
            EventKind::ToolReturn,
            json!({"tool_name": "grep", "content": {"count": 3}, "tool_call_id": "c1"}),
        )
        .unwrap();
        assert_matches!(event, ResponseEvent::ToolReturn { content: ToolReturnContent::Parsed(v), timestamp, .. } => {
            assert_eq!(v["count"], 3);
            assert_eq!(timestamp, "");
        });
    }

    #[test]
    fn tool_return_missing_id_is_invalid_payload() {
        let err = decode_payload(EventKind::ToolReturn, json!({"tool_name": "grep"})).unwrap_err();
        assert_matches!(err, FrameError::InvalidPayload { kind: "tool-return", .. });
    }

    #[test]
    fn text_requires_index() {
        assert!(decode_payload(EventKind::Text, json!({"content": "hi"})).is_err());
    }

    #[test]
    fn user_prompt_defaults_content() {
        let event = decode_payload(EventKind::UserPrompt, json!({"timestamp": "t", "content": null})).unwrap();
        assert_eq!(
            event,
            ResponseEvent::UserPrompt {
                content: String::new(),
                timestamp: "t".into()
            }
        );
    }

    #[test]
    fn exception_and_warning_fields() {
        let event = decode_payload(
            EventKind::Exception,
            json!({"message": "boom", "title": "Oops", "type": "RuntimeError"}),
        )
        .unwrap();
        assert_eq!(
            event,
            ResponseEvent::Exception {
                message: "boom".into(),
                title: Some("Oops".into()),
                error_type: "RuntimeError".into()
            }
        );

        let event = decode_payload(EventKind::Warning, json!({"message": "careful"})).unwrap();
        assert_eq!(
            event,
            ResponseEvent::Warning {
                message: "careful".into(),
                title: None
            }
        );
    }

    #[test]
    fn clear_prune_close() {
        assert_eq!(
            decode_payload(EventKind::Clear, json!({"message": "cleared"})).unwrap(),
            ResponseEvent::Clear { message: "cleared".into() }
        );
        assert_eq!(
            decode_payload(EventKind::Prune, json!({"message": "pruned"})).unwrap(),
            ResponseEvent::Prune { message: "pruned".into() }
        );
        assert_eq!(decode_payload(EventKind::Close, json!({})).unwrap(), ResponseEvent::Close);
    }

    #[test]
    fn close_with_non_object_payload_is_invalid() {
        assert!(decode_payload(EventKind::Close, json!(42)).is_err());
    }

    #[test]
    fn on_call_tools_start_lists_calls() {
        let event = decode_payload(
            EventKind::OnCallToolsStart,
            json!({"tools": [
                {"tool_name": "grep", "args": "{}", "tool_call_id": "a"},
                {"tool_name": "ls", "args": {"path": "."}, "tool_call_id": "b"}
            ]}),
        )
        .unwrap();
        assert_matches!(event, ResponseEvent::OnCallToolsStart { tools } => {
            assert_eq!(tools.len(), 2);
            assert_eq!(tools[1].args, r#"{"path":"."}"#);
        });
    }

    #[test]
    fn retry_prompt_fields() {
        let event = decode_payload(
            EventKind::RetryPrompt,
            json!({"tool_name": "grep", "content": "try again", "tool_call_id": "c1", "timestamp": "t"}),
        )
        .unwrap();
        assert_matches!(event, ResponseEvent::RetryPrompt { content, .. } => assert_eq!(content, "try again"));
    }

    // ── interpret: envelopes ────────────────────────────────────────

    #[test]
    fn part_start_carries_inner_event() {
        let decoded = decode_frame(
            r#"event: part_start
data:{"part":{"part_kind":"text","index":0,"content":"hi"}}"#,
        )
        .unwrap();
        assert_eq!(
            decoded,
            Decoded::PartStart(ResponseEvent::Text {
                index: 0,
                content: "hi".into()
            })
        );
    }

    #[test]
    fn part_start_unknown_inner_kind() {
        let err = decode_frame(r#"event: part_start
data: {"part":{"part_kind":"thinking"}}"#)
        .unwrap_err();
        assert_matches!(err, FrameError::UnknownKind(k) if k == "thinking");
    }

    #[test]
    fn part_start_missing_part_kind() {
        let err = decode_frame("event: part_start\ndata: {\"part\":{}}").unwrap_err();
        assert_matches!(err, FrameError::InvalidPayload { kind: "part_start", .. });
    }

    #[test]
    fn part_delta_fields() {
        let decoded = decode_frame(
            r#"event: part_delta
data:{"delta":{"part_delta_kind":"text","content_delta":" there","index":0}}"#,
        )
        .unwrap();
        assert_eq!(
            decoded,
            Decoded::PartDelta(PartDelta {
                kind: EventKind::Text,
                content_delta: " there".into(),
                args_delta: String::new(),
                tool_call_id: None,
            })
        );
    }

    #[test]
    fn part_delta_tool_call_spelling() {
        let decoded = decode_frame(
            r#"event: part_delta
data: {"delta":{"part_delta_kind":"tool_call","args_delta":"{\"a\""}}"#,
        )
        .unwrap();
        assert_matches!(decoded, Decoded::PartDelta(d) => {
            assert_eq!(d.kind, EventKind::ToolCall);
            assert_eq!(d.args_delta, "{\"a\"");
        });
    }

    #[test]
    fn part_delta_unknown_kind_is_unexpected_delta() {
        let err = decode_frame(
            "event: part_delta\ndata: {\"delta\":{\"part_delta_kind\":\"thinking\",\"content_delta\":\"x\"}}",
        )
        .unwrap_err();
        assert_matches!(&err, FrameError::DeltaForUnknownKind(k) if k == "thinking");
        assert_eq!(err.reason(), ParseErrorReason::UnexpectedPartDelta);
    }

    // ── names_envelope ──────────────────────────────────────────────

    #[test]
    fn envelope_read_from_head_only() {
        assert_eq!(names_envelope("event: part_start\ndata: {oops"), Some(true));
        assert_eq!(names_envelope("event: part-delta\ndata: {}"), Some(true));
        assert_eq!(names_envelope("event: close\ndata: {oops"), Some(false));
        assert_eq!(names_envelope("event: bogus\ndata: {}"), Some(false));
        assert_eq!(names_envelope("garbage"), None);
    }
}
