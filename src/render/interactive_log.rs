//! Interactive log parsing and rendering
//!
//! Interactive problems record the conversation between validator and
//! submission as a sequence of frames:
//!
//! ```text
//! [0.012s/5]>: hello
//! ```
//!
//! The byte before the timestamp opens the frame, the timestamp runs up to
//! `/`, the decimal payload length up to `]`. One direction byte (`>` for the
//! validator) and a two byte separator precede the payload, a newline ends
//! the frame. The judge may cut the log short and append
//! `[output display truncated after N B]`.

use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::constants::{
    FRAME_SEPARATOR_LEN, FRAME_TERMINATOR_LEN, LINE_BREAK_GLYPH, VALIDATOR_DIRECTION,
};
use crate::models::{InteractiveLog, LogEntry};
use crate::utils::html::escape;

static TRUNCATION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\[output display truncated after \d* B\])\n?\z")
        .expect("valid truncation marker regex")
});

/// Forward-only cursor over the raw log bytes
struct FrameCursor<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> FrameCursor<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, position: 0 }
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Bytes up to (not including) `delimiter`; the cursor moves past it
    fn take_until(&mut self, delimiter: u8) -> Option<&'a [u8]> {
        let rest = &self.input[self.position..];
        let offset = rest.iter().position(|&b| b == delimiter)?;
        self.position += offset + 1;
        Some(&rest[..offset])
    }

    /// Exactly `len` bytes, or nothing if fewer remain
    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if len > self.remaining() {
            return None;
        }
        let bytes = &self.input[self.position..self.position + len];
        self.position += len;
        Some(bytes)
    }

    /// Up to `len` bytes; never fails
    fn skip(&mut self, len: usize) {
        self.position += len.min(self.remaining());
    }

    /// Decode the next frame; `None` means the rest is not a complete frame
    fn next_frame(&mut self) -> Option<LogEntry> {
        let time_field = self.take_until(b'/')?;
        let timestamp = time_field.get(1..).unwrap_or_default();

        let len_field = self.take_until(b']')?;
        let len: usize = std::str::from_utf8(len_field).ok()?.trim().parse().ok()?;

        let direction = self.take(1)?[0];
        self.take(FRAME_SEPARATOR_LEN)?;
        let payload = self.take(len)?;
        self.skip(FRAME_TERMINATOR_LEN);

        Some(LogEntry {
            timestamp: String::from_utf8_lossy(timestamp).into_owned(),
            is_validator_side: direction == VALIDATOR_DIRECTION,
            text: String::from_utf8_lossy(payload).into_owned(),
        })
    }
}

/// Split off a trailing truncation marker
fn strip_truncation(raw: &[u8]) -> (&[u8], Option<String>) {
    match TRUNCATION_MARKER.captures(raw) {
        Some(caps) => {
            let whole = caps.get(0).map_or(raw.len(), |m| m.start());
            let notice = caps
                .get(1)
                .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned());
            (&raw[..whole], notice)
        }
        None => (raw, None),
    }
}

/// Parse an interactive log given as text
pub fn parse(raw: &str) -> InteractiveLog {
    parse_bytes(raw.as_bytes())
}

/// Parse a raw interactive log into its frames
///
/// Frame lengths count bytes, so the log must not be decoded before it is
/// scanned; each payload is decoded on its own. Never fails: scanning stops
/// at the first malformed or incomplete frame and everything decoded up to
/// that point is returned.
pub fn parse_bytes(raw: &[u8]) -> InteractiveLog {
    let (body, truncation_notice) = strip_truncation(raw);

    let mut cursor = FrameCursor::new(body);
    let mut entries = Vec::new();
    while !cursor.is_exhausted() {
        let frame_start = cursor.position;
        match cursor.next_frame() {
            Some(entry) => entries.push(entry),
            None => {
                tracing::debug!(
                    offset = frame_start,
                    remaining = body.len() - frame_start,
                    "interactive log ends with a malformed frame"
                );
                break;
            }
        }
    }

    InteractiveLog {
        entries,
        truncation_notice,
    }
}

fn payload_cell(text: &str) -> String {
    format!(
        r#"<td class="output_text">{}</td>"#,
        escape(text).replace('\n', LINE_BREAK_GLYPH)
    )
}

/// Render a parsed log as a table with time, validator and submission columns
pub fn render(log: &InteractiveLog) -> String {
    let mut html =
        String::from("<table><tr><th>time</th><th>validator</th><th>submission</th></tr>\n");

    for entry in &log.entries {
        let content = payload_cell(&entry.text);
        let (validator, submission) = if entry.is_validator_side {
            (content.as_str(), "<td/>")
        } else {
            ("<td/>", content.as_str())
        };
        html.push_str(&format!(
            "<tr><td>{}</td>{}{}</tr>\n",
            escape(&entry.timestamp),
            validator,
            submission
        ));
    }

    html.push_str("</table>");
    if let Some(notice) = &log.truncation_notice {
        html.push_str(&escape(notice));
    }
    html
}
