//! Multi-part message reconstruction.
//!
//! A streamed message arrives as one `part_start` frame followed by zero or
//! more `part_delta` frames. The [`PartReconstructor`] holds at most one such
//! message at a time and decides, per kind, when it is surfaced:
//!
//! | kind        | accumulation                 | emitted                         |
//! |-------------|------------------------------|---------------------------------|
//! | user-prompt | `content += content_delta`   | at flush                        |
//! | text        | `content += content_delta`   | on start and every delta        |
//! | tool-call   | `args += args_delta`         | at flush                        |
//!
//! With `merge_all_chunks` set, text is held until flush like a user prompt.
//! A message is flushed by the next part start, by any non-part frame, or at
//! end of stream. Every other kind is atomic and never accumulates.

use rovo_core::events::{ResponseEvent, ToolCall};
use tracing::debug;

use crate::decoder::{EventKind, PartDelta};
use crate::error::FrameError;

// ─────────────────────────────────────────────────────────────────────────────
// PartialEvent
// ─────────────────────────────────────────────────────────────────────────────

/// A streamable event under reconstruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartialEvent {
    /// User prompt accumulating `content`.
    UserPrompt {
        /// Content so far.
        content: String,
        /// Timestamp from the start frame.
        timestamp: String,
    },
    /// Text accumulating `content`.
    Text {
        /// Part index from the start frame.
        index: u64,
        /// Content so far.
        content: String,
    },
    /// Tool call accumulating `args`.
    ToolCall(ToolCall),
}

impl PartialEvent {
    /// Begin reconstruction from a part start's inner event.
    ///
    /// Atomic events are handed back unchanged in `Err`.
    pub fn from_event(event: ResponseEvent) -> Result<Self, ResponseEvent> {
        match event {
            ResponseEvent::UserPrompt { content, timestamp } => {
                Ok(Self::UserPrompt { content, timestamp })
            }
            ResponseEvent::Text { index, content } => Ok(Self::Text { index, content }),
            ResponseEvent::ToolCall(call) => Ok(Self::ToolCall(call)),
            atomic => Err(atomic),
        }
    }

    /// Kind being reconstructed.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::UserPrompt { .. } => EventKind::UserPrompt,
            Self::Text { .. } => EventKind::Text,
            Self::ToolCall(_) => EventKind::ToolCall,
        }
    }

    /// Finish reconstruction.
    pub fn into_event(self) -> ResponseEvent {
        match self {
            Self::UserPrompt { content, timestamp } => ResponseEvent::UserPrompt { content, timestamp },
            Self::Text { index, content } => ResponseEvent::Text { index, content },
            Self::ToolCall(call) => ResponseEvent::ToolCall(call),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reducers
// ─────────────────────────────────────────────────────────────────────────────

/// Check that `delta` may be applied to what is accumulating.
pub fn check_delta(accumulating: Option<&PartialEvent>, delta: &PartDelta) -> Result<(), FrameError> {
    if !delta.kind.is_streamable() {
        return Err(FrameError::DeltaForAtomicKind(delta.kind.as_str()));
    }
    let Some(partial) = accumulating else {
        return Err(FrameError::DeltaWithoutStart(delta.kind.as_str()));
    };
    if partial.kind() != delta.kind {
        return Err(FrameError::DeltaKindMismatch {
            accumulating: partial.kind().as_str(),
            delta: delta.kind.as_str(),
        });
    }
    Ok(())
}

/// Apply a delta already accepted by [`check_delta`].
pub fn apply_delta(prior: PartialEvent, delta: &PartDelta) -> PartialEvent {
    match prior {
        PartialEvent::UserPrompt { mut content, timestamp } => {
            content.push_str(&delta.content_delta);
            PartialEvent::UserPrompt { content, timestamp }
        }
        PartialEvent::Text { index, mut content } => {
            content.push_str(&delta.content_delta);
            PartialEvent::Text { index, content }
        }
        PartialEvent::ToolCall(mut call) => {
            call.args.push_str(&delta.args_delta);
            if call.tool_call_id.is_empty() {
                if let Some(id) = &delta.tool_call_id {
                    call.tool_call_id.clone_from(id);
                }
            }
            PartialEvent::ToolCall(call)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PartReconstructor
// ─────────────────────────────────────────────────────────────────────────────

/// `Idle` / `Accumulating` state machine over part frames.
#[derive(Clone, Debug, Default)]
pub struct PartReconstructor {
    merge_all_chunks: bool,
    in_progress: Option<PartialEvent>,
}

impl PartReconstructor {
    /// Create an idle reconstructor.
    pub fn new(merge_all_chunks: bool) -> Self {
        Self {
            merge_all_chunks,
            in_progress: None,
        }
    }

    /// Kind currently accumulating, if any.
    pub fn accumulating(&self) -> Option<EventKind> {
        self.in_progress.as_ref().map(PartialEvent::kind)
    }

    fn streams_text(&self) -> bool {
        !self.merge_all_chunks
    }

    /// Handle a part start: flush whatever was accumulating, then begin the new part.
    ///
    /// Events ready for the caller are appended to `out` in order.
    pub fn start(&mut self, inner: ResponseEvent, out: &mut Vec<ResponseEvent>) {
        out.extend(self.flush());
        match PartialEvent::from_event(inner) {
            Ok(partial) => {
                debug!(kind = %partial.kind(), "part started");
                if let PartialEvent::Text { index, content } = &partial {
                    if self.streams_text() {
                        out.push(ResponseEvent::Text {
                            index: *index,
                            content: content.clone(),
                        });
                    }
                }
                self.in_progress = Some(partial);
            }
            Err(atomic) => out.push(atomic),
        }
    }

    /// Handle a part delta.
    ///
    /// A rejected delta leaves the accumulating part untouched.
    pub fn delta(&mut self, delta: &PartDelta, out: &mut Vec<ResponseEvent>) -> Result<(), FrameError> {
        check_delta(self.in_progress.as_ref(), delta)?;
        let Some(prior) = self.in_progress.take() else {
            return Err(FrameError::DeltaWithoutStart(delta.kind.as_str()));
        };
        let updated = apply_delta(prior, delta);
        if let PartialEvent::Text { index, .. } = &updated {
            if self.streams_text() {
                out.push(ResponseEvent::Text {
                    index: *index,
                    content: delta.content_delta.clone(),
                });
            }
        }
        self.in_progress = Some(updated);
        Ok(())
    }

    /// Finish the accumulating part, returning it if it still needs emitting.
    ///
    /// Streamed text has already been emitted piecewise and yields nothing.
    pub fn flush(&mut self) -> Option<ResponseEvent> {
        let partial = self.in_progress.take()?;
        debug!(kind = %partial.kind(), "part flushed");
        match partial {
            PartialEvent::Text { .. } if self.streams_text() => None,
            partial => Some(partial.into_event()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
