//! # rovo-core
//!
//! Shared vocabulary for the Rovo agent stream parser.
//!
//! - **Response events**: [`events::ResponseEvent`], the closed set of events the
//!   parser hands to the UI layer, plus the [`events::ToolCall`] record used for
//!   tool correlation
//! - **Logging**: `tracing` subscriber setup and an in-memory capture layer for tests
//! - **Text helpers**: char-boundary-safe previews for log fields

#![deny(unsafe_code)]

pub mod events;
pub mod logging;
pub mod text;

pub use events::{ParseErrorReason, ResponseEvent, ToolCall, ToolReturnContent};
