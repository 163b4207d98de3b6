//! SSE stream parsing and text accumulation
//!
//! Turns the raw byte stream of a chat completion response into a sequence of
//! update callbacks carrying display-ready text. Two response shapes exist on
//! the wire inside one envelope:
//!
//! - **delta**: `choices[0].delta.content` carries an incremental fragment;
//!   the fragment is appended to the call-scoped accumulator and the whole
//!   accumulated text is emitted
//! - **full message**: `choices[0].message.content` carries a complete
//!   assistant message (Perplexity's async completion style), optionally with
//!   top-level `citations`; the accumulator is bypassed and the message text
//!   replaces the displayed content
//!
//! Physical chunks are reassembled into logical `data:` lines through a byte
//! buffer, so chunk boundaries (including splits inside a multi-byte
//! character) never change what gets emitted. A `data:` line whose payload
//! fails whole-object JSON parse is dropped silently; there is no cross-line
//! JSON reassembly.

use crate::format::OutputFormatter;
use crate::logging::log_trace;
use serde::Deserialize;

/// Marker prefix of meaningful SSE lines.
const DATA_PREFIX: &str = "data: ";

/// Literal end-of-stream payload.
const DONE_SENTINEL: &str = "[DONE]";

/// One parsed `data:` payload.
#[derive(Debug, Deserialize)]
pub(crate) struct StreamFrame {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    message: Option<FrameMessage>,
    #[serde(default)]
    delta: Option<FrameDelta>,
}

#[derive(Debug, Deserialize)]
struct FrameMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FrameDelta {
    #[serde(default)]
    content: Option<String>,
}

/// The two mutually exclusive response shapes, as an explicit variant.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FrameShape {
    /// Complete assistant message; replaces displayed content.
    Full {
        text: String,
        citations: Vec<String>,
    },
    /// Incremental fragment; appended to the accumulator.
    Delta { fragment: String },
}

/// Classify a frame by which field is present, full message checked first.
pub(crate) fn classify_frame(frame: StreamFrame) -> Option<FrameShape> {
    let choice = frame.choices.into_iter().next()?;

    if let Some(message) = choice.message {
        return Some(FrameShape::Full {
            text: message.content.unwrap_or_default(),
            citations: frame.citations,
        });
    }

    let fragment = choice.delta?.content?;
    Some(FrameShape::Delta { fragment })
}

/// Chunk-by-chunk SSE consumer with a call-scoped text accumulator.
///
/// Owned exclusively by one in-flight completion call and discarded after it
/// returns. Feed network chunks through [`push_chunk`](Self::push_chunk) and
/// call [`finish`](Self::finish) once the underlying stream completes.
pub struct SseAccumulator {
    formatter: OutputFormatter,
    /// Undecoded bytes carried across chunk boundaries, always line-aligned
    /// at drain time so a split multi-byte character is completed by the
    /// next chunk rather than corrupted.
    buffer: Vec<u8>,
    /// Monotonically growing delta accumulation.
    content: String,
    done: bool,
}

impl SseAccumulator {
    pub fn new(formatter: OutputFormatter) -> Self {
        Self {
            formatter,
            buffer: Vec::new(),
            content: String::new(),
            done: false,
        }
    }

    /// Whether the termination sentinel has been observed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The accumulated delta text so far (unformatted).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume one network chunk, invoking `on_update` once per classified
    /// frame that yields non-empty text.
    pub fn push_chunk(&mut self, chunk: &[u8], on_update: &mut dyn FnMut(&str)) {
        if self.done {
            return;
        }

        self.buffer.extend_from_slice(chunk);

        while !self.done {
            let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') else {
                break;
            };
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            self.process_line(&line[..newline], on_update);
        }

        if self.done {
            self.buffer.clear();
        }
    }

    /// Flush a trailing line without a final newline, once the underlying
    /// stream reports completion.
    pub fn finish(&mut self, on_update: &mut dyn FnMut(&str)) {
        if self.done || self.buffer.is_empty() {
            return;
        }

        let line = std::mem::take(&mut self.buffer);
        self.process_line(&line, on_update);
    }

    fn process_line(&mut self, raw: &[u8], on_update: &mut dyn FnMut(&str)) {
        let line = String::from_utf8_lossy(raw);
        let Some(payload) = line.trim().strip_prefix(DATA_PREFIX) else {
            return;
        };
        let payload = payload.trim();

        if payload == DONE_SENTINEL {
            self.done = true;
            return;
        }

        let frame: StreamFrame = match serde_json::from_str(payload) {
            Ok(frame) => frame,
            Err(_) => {
                // Providers may split one JSON object across physical chunks;
                // fragments that fail whole-object parse are dropped.
                log_trace!(payload_len = payload.len(), "Dropping malformed stream frame");
                return;
            }
        };

        match classify_frame(frame) {
            Some(FrameShape::Full { text, citations }) => {
                if !text.is_empty() {
                    let formatted = (self.formatter)(&text, &citations);
                    on_update(&formatted);
                }
            }
            Some(FrameShape::Delta { fragment }) => {
                if !fragment.is_empty() {
                    self.content.push_str(&fragment);
                    let formatted = (self.formatter)(&self.content, &[]);
                    on_update(&formatted);
                }
            }
            None => {}
        }
    }
}

impl std::fmt::Debug for SseAccumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SseAccumulator")
            .field("buffered_bytes", &self.buffer.len())
            .field("content_len", &self.content.len())
            .field("done", &self.done)
            .finish()
    }
}
