//! Line-based codec for tokio.
//!
//! This module provides a codec that reads/writes newline-terminated lines,
//! with a length limit and a partial-line flush for timeout-bounded readers.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error;

/// Line-based codec that handles newline-terminated input.
///
/// By default, lines are limited to 512 bytes. An over-long line yields one
/// [`error::ProtocolError::LineTooLong`] and the remainder of that line is
/// skipped, so the stream stays usable afterwards.
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Skipping the tail of an over-long line until its newline
    discarding: bool,
}

impl LineCodec {
    /// Create a new codec with the default max line length.
    pub fn new() -> Self {
        Self {
            next_index: 0,
            max_len: 512,
            discarding: false,
        }
    }

    /// Create a new codec with custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len,
            ..Self::new()
        }
    }

    /// Flush whatever has been buffered as a final, terminator-less line.
    ///
    /// Called after a read timeout: the line source accepts the partial
    /// input as complete rather than waiting forever for a newline. Returns
    /// `Ok(None)` when the buffer is empty or held only discarded bytes.
    pub fn take_partial(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        self.next_index = 0;
        let bytes = src.split();

        if self.discarding {
            self.discarding = false;
            return Ok(None);
        }
        if bytes.is_empty() {
            return Ok(None);
        }

        let line = String::from_utf8(bytes.to_vec())?;
        Ok(Some(line))
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            if self.discarding {
                // Drop bytes up to and including the newline that ends the
                // over-long line, then resume normal decoding.
                match src.iter().position(|b| *b == b'\n') {
                    Some(offset) => {
                        src.advance(offset + 1);
                        self.discarding = false;
                        self.next_index = 0;
                    }
                    None => {
                        src.clear();
                        return Ok(None);
                    }
                }
                continue;
            }

            // Look for newline starting from where we left off
            return if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
                // Found a line - extract it
                let line = src.split_to(self.next_index + offset + 1);
                self.next_index = 0;

                // Check length limit
                if line.len() > self.max_len {
                    return Err(error::ProtocolError::LineTooLong {
                        actual: line.len(),
                        limit: self.max_len,
                    });
                }

                let data = String::from_utf8(line.to_vec())?;
                Ok(Some(data))
            } else {
                // No complete line yet - remember where we stopped
                self.next_index = src.len();

                // Check if partial line already exceeds limit
                if src.len() > self.max_len {
                    self.discarding = true;
                    return Err(error::ProtocolError::LineTooLong {
                        actual: src.len(),
                        limit: self.max_len,
                    });
                }

                Ok(None)
            };
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            // Stream ended mid-line: accept the partial input as final.
            None => self.take_partial(src),
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend(msg.into_bytes());
        dst.extend_from_slice(b"\n");
        Ok(())
    }
}
