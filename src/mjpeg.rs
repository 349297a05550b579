//! Reassembly of JPEG frames out of a raw MJPEG byte stream.
//!
//! Printer camera streams tend to drop connections mid-frame and pad the
//! stream with partial multipart headers. Instead of forwarding the
//! upstream bytes verbatim, frames are cut out by their JPEG start/end
//! markers and re-wrapped into a clean `multipart/x-mixed-replace` body.

use bytes::{BufMut, Bytes, BytesMut};

/// JPEG start-of-image marker.
const SOI: [u8; 2] = [0xFF, 0xD8];
/// JPEG end-of-image marker.
const EOI: [u8; 2] = [0xFF, 0xD9];

/// Multipart boundary used for the re-emitted stream.
pub const BOUNDARY: &str = "foo";

/// Upper bound on a buffered partial frame. Printer cameras emit frames
/// well under a megabyte; anything larger is a stream that lost its end
/// markers and must not grow the buffer forever.
const MAX_PENDING_FRAME: usize = 4 * 1024 * 1024;

/// Incremental JPEG frame parser over arbitrary chunk boundaries.
#[derive(Debug, Default)]
pub struct FrameExtractor {
    buf: BytesMut,
}

impl FrameExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of raw stream bytes. Returns every complete JPEG
    /// frame that became available, in stream order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        self.buf.extend_from_slice(chunk);

        let mut frames = Vec::new();
        loop {
            let Some(start) = find_marker(&self.buf, &SOI) else {
                // No frame start in sight. Drop the garbage, keeping one
                // trailing byte in case it is the first half of a marker.
                if self.buf.len() > 1 {
                    let tail = self.buf.split_off(self.buf.len() - 1);
                    self.buf = tail;
                }
                break;
            };
            if start > 0 {
                // Discard multipart headers or noise preceding the frame.
                let _ = self.buf.split_to(start);
            }

            // Look for the end marker past the start marker.
            let Some(end) = find_marker(&self.buf[SOI.len()..], &EOI) else {
                if self.buf.len() > MAX_PENDING_FRAME {
                    tracing::debug!(
                        "discarding {} buffered bytes with no frame end",
                        self.buf.len()
                    );
                    self.buf.clear();
                }
                break;
            };
            let frame_len = SOI.len() + end + EOI.len();
            frames.push(self.buf.split_to(frame_len).freeze());
        }
        frames
    }
}

fn find_marker(haystack: &[u8], marker: &[u8; 2]) -> Option<usize> {
    haystack.windows(marker.len()).position(|w| w == marker)
}

/// Wrap a JPEG frame into one part of a `multipart/x-mixed-replace` body.
pub fn encode_part(frame: &[u8]) -> Bytes {
    let header = format!(
        "--{BOUNDARY}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
        frame.len()
    );
    let mut part = BytesMut::with_capacity(header.len() + frame.len() + 2);
    part.put_slice(header.as_bytes());
    part.put_slice(frame);
    part.put_slice(b"\r\n");
    part.freeze()
}

/// Content-Type header value for the re-emitted stream.
pub fn content_type() -> String {
    format!("multipart/x-mixed-replace; boundary={BOUNDARY}")
}
