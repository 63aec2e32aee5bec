//! # Byte Stream Adapter
//!
//! Drives a [`ResponseParser`] from an already-open byte stream, such as an
//! HTTP response body.
//!
//! - Multi-byte characters split across reads are carried to the next read
//! - Invalid UTF-8 is replaced with `U+FFFD` rather than dropped
//! - A transport error ends the stream; the parser is still flushed

use std::collections::VecDeque;
use std::fmt::Display;

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use rovo_core::events::ResponseEvent;
use tracing::{debug, warn};

use crate::parser::{ParserOptions, ResponseParser};

struct StreamState<S> {
    bytes: S,
    carry: BytesMut,
    parser: Option<ResponseParser>,
    ready: VecDeque<ResponseEvent>,
}

impl<S> StreamState<S> {
    fn feed(&mut self, chunk: &[u8]) {
        self.carry.extend_from_slice(chunk);
        let text = take_utf8(&mut self.carry);
        if let Some(parser) = self.parser.as_mut() {
            self.ready.extend(parser.parse(&text));
        }
    }

    fn finish(&mut self) {
        let Some(mut parser) = self.parser.take() else {
            return;
        };
        if !self.carry.is_empty() {
            let rest = String::from_utf8_lossy(&self.carry).into_owned();
            self.carry.clear();
            self.ready.extend(parser.parse(&rest));
        }
        self.ready.extend(parser.flush());
    }
}

/// Parse a stream of byte chunks into response events.
///
/// Every chunk is handed to [`ResponseParser::parse`] in arrival order and
/// [`ResponseParser::flush`] runs once when the byte stream ends or fails.
pub fn parse_response_stream<S, E>(
    byte_stream: S,
    options: ParserOptions,
) -> impl Stream<Item = ResponseEvent>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    let state = StreamState {
        bytes: byte_stream,
        carry: BytesMut::with_capacity(8192),
        parser: Some(ResponseParser::with_options(options)),
        ready: VecDeque::new(),
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.ready.pop_front() {
                return Some((event, state));
            }
            if state.parser.is_none() {
                return None;
            }
            match state.bytes.next().await {
                Some(Ok(chunk)) => state.feed(&chunk),
                Some(Err(e)) => {
                    warn!(error = %e, "response stream read error, ending stream");
                    state.finish();
                }
                None => {
                    debug!("response stream ended");
                    state.finish();
                }
            }
        }
    })
}

/// Take the longest decodable prefix of `buffer`.
///
/// An incomplete trailing sequence stays in `buffer` for the next read.
fn take_utf8(buffer: &mut BytesMut) -> String {
    let mut text = String::new();
    loop {
        match std::str::from_utf8(&buffer[..]) {
            Ok(valid) => {
                text.push_str(valid);
                buffer.clear();
                return text;
            }
            Err(error) => {
                let head = buffer.split_to(error.valid_up_to());
                text.push_str(&String::from_utf8_lossy(&head));
                match error.error_len() {
                    Some(invalid) => {
                        let _ = buffer.split_to(invalid);
                        text.push(char::REPLACEMENT_CHARACTER);
                    }
                    None => return text,
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io;

    use assert_matches::assert_matches;
    use rovo_core::events::ParseErrorReason;

    use super::*;

    async fn collect(chunks: Vec<Result<Bytes, io::Error>>, options: ParserOptions) -> Vec<ResponseEvent> {
        parse_response_stream(futures::stream::iter(chunks), options)
            .collect()
            .await
    }

    fn ok(bytes: &'static [u8]) -> Result<Bytes, io::Error> {
        Ok(Bytes::from_static(bytes))
    }

    // ── take_utf8 ───────────────────────────────────────────────────

    #[test]
    fn take_utf8_keeps_incomplete_suffix() {
        let mut buffer = BytesMut::from(&"hé".as_bytes()[..2]);
        assert_eq!(take_utf8(&mut buffer), "h");
        assert_eq!(buffer.len(), 1);
        buffer.extend_from_slice(&"é".as_bytes()[1..]);
        assert_eq!(take_utf8(&mut buffer), "é");
        assert!(buffer.is_empty());
    }

    #[test]
    fn take_utf8_replaces_invalid_bytes() {
        let mut buffer = BytesMut::from(&b"a\xffb"[..]);
        assert_eq!(take_utf8(&mut buffer), "a\u{FFFD}b");
        assert!(buffer.is_empty());
    }

    // ── parse_response_stream ───────────────────────────────────────

    #[tokio::test]
    async fn single_chunk() {
        let events = collect(
            vec![ok(b"event: text\ndata: {\"index\":0,\"content\":\"hi\"}\n\n")],
            ParserOptions::default(),
        )
        .await;
        assert_eq!(
            events,
            vec![ResponseEvent::Text {
                index: 0,
                content: "hi".into()
            }]
        );
    }

    #[tokio::test]
    async fn multibyte_char_split_across_chunks() {
        let frame = "event: text\ndata: {\"index\":0,\"content\":\"caf\u{e9}\"}\n\n".as_bytes();
        let cut = frame.iter().position(|&b| b == 0xc3).unwrap() + 1;
        let chunks = vec![
            Ok(Bytes::copy_from_slice(&frame[..cut])),
            Ok(Bytes::copy_from_slice(&frame[cut..])),
        ];
        let events = collect(chunks, ParserOptions::default()).await;
        assert_eq!(
            events,
            vec![ResponseEvent::Text {
                index: 0,
                content: "caf\u{e9}".into()
            }]
        );
    }

    #[tokio::test]
    async fn flush_runs_at_end_of_stream() {
        let events = collect(
            vec![ok(
                b"event: part_start\ndata: {\"part\":{\"part_kind\":\"user-prompt\",\"content\":\"Hi\",\"timestamp\":\"t\"}}\n\n",
            )],
            ParserOptions::default(),
        )
        .await;
        assert_eq!(
            events,
            vec![ResponseEvent::UserPrompt {
                content: "Hi".into(),
                timestamp: "t".into()
            }]
        );
    }

    #[tokio::test]
    async fn transport_error_ends_stream_and_flushes() {
        let chunks = vec![
            ok(b"event: close\ndata: {}\n\nevent: text\ndata: {\"ind"),
            Err(io::Error::other("connection reset")),
            ok(b"event: close\ndata: {}\n\n"),
        ];
        let events = collect(chunks, ParserOptions::default()).await;
        assert_matches!(&events[..], [
            ResponseEvent::Close,
            ResponseEvent::ParsingError { reason: ParseErrorReason::DanglingInput, .. },
        ]);
    }

    #[tokio::test]
    async fn empty_stream_yields_nothing() {
        let events = collect(Vec::new(), ParserOptions::default()).await;
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn merge_option_forwarded() {
        let chunks = vec![
            ok(b"event: part_start\ndata: {\"part\":{\"part_kind\":\"text\",\"index\":0,\"content\":\"a\"}}\n\n"),
            ok(b"event: part_delta\ndata: {\"delta\":{\"part_delta_kind\":\"text\",\"content_delta\":\"b\"}}\n\n"),
        ];
        let events = collect(chunks, ParserOptions { merge_all_chunks: true }).await;
        assert_eq!(
            events,
            vec![ResponseEvent::Text {
                index: 0,
                content: "ab".into()
            }]
        );
    }
}
