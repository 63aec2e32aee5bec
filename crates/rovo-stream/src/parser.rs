//! # Response Parser
//!
//! Per-connection entry point tying the pipeline together:
//!
//! ```text
//! chunk ─► splitter ─► decoder ─► reconstructor ─► registry ─► ResponseEvent
//! ```
//!
//! One [`ResponseParser`] is created when a response stream opens, fed every
//! chunk in arrival order through [`ResponseParser::parse`], and consumed by
//! [`ResponseParser::flush`] when the stream ends.

use std::collections::VecDeque;
use std::vec;

use rovo_core::events::ResponseEvent;
use rovo_core::text::preview;
use tracing::{debug, warn};

use crate::decoder::{Decoded, decode_frame, names_envelope};
use crate::error::FrameError;
use crate::reconstruct::PartReconstructor;
use crate::registry::ToolCallRegistry;
use crate::splitter::{split, strip_keepalives};

/// Maximum characters of a frame quoted in log output.
const FRAME_PREVIEW_CHARS: usize = 120;

/// Constructor-time parser configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Hold streamed text until its part completes, emitting it once.
    pub merge_all_chunks: bool,
}

/// Incremental parser for one response stream.
#[derive(Debug, Default)]
pub struct ResponseParser {
    text_buffer: String,
    reconstructor: PartReconstructor,
    tool_calls: ToolCallRegistry,
}

impl ResponseParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Create a parser with explicit options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            text_buffer: String::new(),
            reconstructor: PartReconstructor::new(options.merge_all_chunks),
            tool_calls: ToolCallRegistry::new(),
        }
    }

    /// Feed the next chunk of the stream.
    ///
    /// Complete frames are cut out immediately; the returned iterator then
    /// processes them one at a time. Dropping it early leaves the rest of this
    /// chunk's frames unprocessed.
    #[must_use = "frames are only processed while the iterator is consumed"]
    pub fn parse(&mut self, chunk: &str) -> ParseIter<'_> {
        let (frames, tail) = split(&self.text_buffer, chunk);
        self.text_buffer = tail;
        ParseIter {
            parser: self,
            frames: frames.into_iter(),
            pending: VecDeque::new(),
        }
    }

    /// End the stream, draining whatever is still in progress.
    ///
    /// Leftover incomplete text becomes a dangling-input parsing error.
    pub fn flush(mut self) -> vec::IntoIter<ResponseEvent> {
        let mut out = Vec::new();
        if let Some(event) = self.reconstructor.flush() {
            out.push(self.settle(event));
        }
        let tail = std::mem::take(&mut self.text_buffer);
        if strip_keepalives(&tail).is_some() {
            out.push(report(FrameError::Dangling(tail.len()), tail));
        }
        debug!(events = out.len(), pending_tool_calls = self.tool_calls.len(), "parser flushed");
        out.into_iter()
    }

    /// Tool calls still waiting for their return.
    pub fn pending_tool_calls(&self) -> &ToolCallRegistry {
        &self.tool_calls
    }

    fn handle_frame(&mut self, frame: String, pending: &mut VecDeque<ResponseEvent>) {
        let mut produced = Vec::new();
        // Any non-part frame ends the part, even one that fails to decode.
        if names_envelope(&frame) == Some(false) {
            produced.extend(self.reconstructor.flush());
        }
        match decode_frame(&frame) {
            Ok(Decoded::Event(event)) => {
                debug!(kind = event.kind_name(), "frame decoded");
                produced.push(event);
            }
            Ok(Decoded::PartStart(inner)) => {
                debug!(kind = inner.kind_name(), "part start decoded");
                self.reconstructor.start(inner, &mut produced);
            }
            Ok(Decoded::PartDelta(delta)) => {
                if let Err(error) = self.reconstructor.delta(&delta, &mut produced) {
                    produced.push(report(error, frame));
                }
            }
            Err(error) => produced.push(report(error, frame)),
        }
        for event in produced {
            pending.push_back(self.settle(event));
        }
    }

    /// Keep the tool call registry in step with an outgoing event.
    fn settle(&mut self, event: ResponseEvent) -> ResponseEvent {
        match event {
            ResponseEvent::ToolCall(call) => {
                if call.tool_call_id.is_empty() {
                    debug!(tool_name = %call.tool_name, "tool call without id not recorded");
                } else {
                    self.tool_calls.record(call.clone());
                }
                ResponseEvent::ToolCall(call)
            }
            ResponseEvent::ToolReturn {
                tool_name,
                content,
                tool_call_id,
                timestamp,
                tool_call_message: _,
            } => {
                let tool_call_message = self.tool_calls.consume(&tool_call_id);
                ResponseEvent::ToolReturn {
                    tool_name,
                    content,
                    tool_call_id,
                    timestamp,
                    tool_call_message,
                }
            }
            other => other,
        }
    }
}

/// Log a frame failure and turn it into its event.
fn report(error: FrameError, frame: String) -> ResponseEvent {
    warn!(
        reason = %error.reason(),
        detail = %error,
        frame_preview = %preview(&frame, FRAME_PREVIEW_CHARS),
        "failed to parse response frame"
    );
    error.into_event(Some(frame))
}

/// Events produced by one [`ResponseParser::parse`] call.
#[derive(Debug)]
pub struct ParseIter<'a> {
    parser: &'a mut ResponseParser,
    frames: vec::IntoIter<String>,
    pending: VecDeque<ResponseEvent>,
}

impl Iterator for ParseIter<'_> {
    type Item = ResponseEvent;

    fn next(&mut self) -> Option<ResponseEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            let frame = self.frames.next()?;
            self.parser.handle_frame(frame, &mut self.pending);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
