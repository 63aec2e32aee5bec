//! Frame-level failures.
//!
//! Nothing here ever escapes the parser as an `Err`: every [`FrameError`] is
//! turned into a [`ResponseEvent::ParsingError`] in the output sequence.

use rovo_core::events::{ParseErrorReason, ResponseEvent};
use thiserror::Error;

/// Why a frame could not be turned into an event.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Frame text does not have the `event:` / `data:` shape.
    #[error("frame does not match `event: <kind>` / `data: <json>`")]
    BadShape,

    /// The `data:` line is not valid JSON.
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The JSON is valid but lacks fields the kind requires.
    #[error("invalid `{kind}` payload: {source}")]
    InvalidPayload {
        /// Canonical kind being decoded.
        kind: &'static str,
        /// Deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// The kind name is not part of the protocol.
    #[error("unknown event kind '{0}'")]
    UnknownKind(String),

    /// A part delta arrived while nothing was accumulating.
    #[error("part delta for '{0}' without a preceding part start")]
    DeltaWithoutStart(&'static str),

    /// A part delta names a different kind than the one accumulating.
    #[error("part delta for '{delta}' while accumulating '{accumulating}'")]
    DeltaKindMismatch {
        /// Kind currently accumulating.
        accumulating: &'static str,
        /// Kind named by the delta.
        delta: &'static str,
    },

    /// A part delta naming a kind outside the protocol.
    #[error("part delta for unknown kind '{0}'")]
    DeltaForUnknownKind(String),

    /// A part delta for a kind that is always sent whole.
    #[error("part delta for atomic kind '{0}'")]
    DeltaForAtomicKind(&'static str),

    /// The stream ended inside a frame.
    #[error("stream ended with {0} unterminated bytes")]
    Dangling(usize),
}

impl FrameError {
    /// Error category reported on the event.
    pub fn reason(&self) -> ParseErrorReason {
        match self {
            Self::BadShape | Self::InvalidJson(_) | Self::InvalidPayload { .. } => {
                ParseErrorReason::MalformedFrame
            }
            Self::UnknownKind(_) => ParseErrorReason::UnknownEventKind,
            Self::DeltaWithoutStart(_)
            | Self::DeltaKindMismatch { .. }
            | Self::DeltaForAtomicKind(_)
            | Self::DeltaForUnknownKind(_) => ParseErrorReason::UnexpectedPartDelta,
            Self::Dangling(_) => ParseErrorReason::DanglingInput,
        }
    }

    /// Convert into the event placed in the output sequence.
    pub fn into_event(self, raw_frame: Option<String>) -> ResponseEvent {
        ResponseEvent::parsing_error(self.reason(), self.to_string(), raw_frame)
    }
}
