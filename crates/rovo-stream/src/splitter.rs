//! Frame splitting over a cumulative text buffer.
//!
//! Frames are separated by a blank line (`\n\n`, `\r\n\r\n`, or a mix of the
//! two). Whatever follows the last delimiter is an incomplete frame and is
//! handed back as the new tail, to be prefixed to the next chunk.
//!
//! Keep-alive lines (`: ping - <timestamp>`) are removed here, before a frame
//! ever reaches the decoder.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

static FRAME_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n\r?\n").expect("valid frame delimiter pattern"));

/// Prefix of a keep-alive comment line.
pub const KEEPALIVE_PREFIX: &str = ": ping";

/// Append `chunk` to `existing_tail` and cut out every complete frame.
///
/// Returns the complete frames (keep-alives removed, empty frames dropped)
/// and the new tail. An empty tail means the input ended exactly on a frame
/// boundary.
pub fn split(existing_tail: &str, chunk: &str) -> (Vec<String>, String) {
    let mut buffer = String::with_capacity(existing_tail.len() + chunk.len());
    buffer.push_str(existing_tail);
    buffer.push_str(chunk);

    let mut segments: Vec<&str> = FRAME_DELIMITER.split(&buffer).collect();
    let tail = segments.pop().unwrap_or_default().to_owned();
    let frames = segments.into_iter().filter_map(strip_keepalives).collect();

    (frames, tail)
}

/// Remove keep-alive lines from a segment.
///
/// Returns `None` when nothing but keep-alives and whitespace remains.
pub fn strip_keepalives(segment: &str) -> Option<String> {
    let mut kept = Vec::new();
    for line in segment.lines() {
        if line.starts_with(KEEPALIVE_PREFIX) {
            trace!(line, "dropping keep-alive");
        } else {
            kept.push(line);
        }
    }
    let frame = kept.join("\n");
    if frame.trim().is_empty() {
        None
    } else {
        Some(frame)
    }
}
