//! # rovo-stream
//!
//! Incremental parser for Rovo agent response streams.
//!
//! Converts the agent's `event:` / `data:` text stream into typed
//! [`ResponseEvent`]s as chunks arrive:
//! - Frame reassembly across arbitrary chunk boundaries, keep-alives dropped
//! - Kind-name normalization (`tool-call` and `tool_call` are the same kind)
//! - Reconstruction of `part_start` / `part_delta` sequences, with text streamed
//!   incrementally unless merge-all-chunks is enabled
//! - Tool call ⇄ tool return correlation
//! - Malformed frames reported as [`ResponseEvent::ParsingError`] in-band
//!
//! [`ResponseParser`] is the synchronous core; [`parse_response_stream`]
//! adapts it to an async byte stream.

#![deny(unsafe_code)]

pub mod decoder;
pub mod error;
pub mod parser;
pub mod reconstruct;
pub mod registry;
pub mod splitter;
pub mod stream;

pub use error::FrameError;
pub use parser::{ParseIter, ParserOptions, ResponseParser};
pub use registry::ToolCallRegistry;
pub use rovo_core::events::{ParseErrorReason, ResponseEvent, ToolCall, ToolReturnContent};
pub use stream::parse_response_stream;
