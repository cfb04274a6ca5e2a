//! Canonical encoder.

use std::io::{BufWriter, Write};

use crate::error::Result;
use crate::value::Value;

/// Writes bencode tokens to a [`Write`].
///
/// Every `encode_*` method returns the number of bytes it wrote. The encoder
/// does no buffering of its own; wrap slow writers in a [`BufWriter`] and call
/// [`Encoder::finish`] to flush.
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
    written: usize,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Total bytes written by this encoder.
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    /// Encodes `value` and everything nested in it, depth first.
    ///
    /// Recursion is one stack frame per nesting level. Trees built in code
    /// are not depth limited the way decoded ones are, so very deep trees
    /// need a thread with a correspondingly large stack.
    pub fn encode_value(&mut self, value: &Value) -> Result<usize> {
        match value {
            Value::String(bytes) => self.encode_string(bytes),
            Value::Integer(n) => self.encode_integer(*n),
            Value::List(items) => self.encode_list(items),
            Value::Dictionary(map) => self.encode_dictionary(map),
        }
    }

    /// Flushes the writer and hands it back.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Encodes `value` to `writer` and returns the number of bytes written.
///
/// Output is buffered internally and flushed before returning; a failed
/// flush is reported as an error like any other write failure.
pub fn encode<W: Write>(value: &Value, writer: W) -> Result<usize> {
    let mut encoder = Encoder::new(BufWriter::new(writer));
    let written = encoder.encode_value(value)?;
    // Drains the BufWriter into `writer`, then flushes `writer` itself.
    encoder.finish()?;
    tracing::trace!("encoded value: {written} bytes");
    Ok(written)
}

/// Encodes `value` into a new buffer.
pub fn to_vec(value: &Value) -> Vec<u8> {
    let mut buf = Vec::with_capacity(value.encoded_len());
    if let Err(e) = Encoder::new(&mut buf).encode_value(value) {
        unreachable!("writing to a Vec failed: {e}");
    }
    buf
}
