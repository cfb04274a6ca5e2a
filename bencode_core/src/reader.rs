use std::io::{BufRead, ErrorKind};

use crate::error::{DecodeErrorKind, Error, Result};

/// Initial capacity cap for string payloads. Declared lengths come from
/// untrusted input, so buffers grow with the bytes actually received.
const READ_CHUNK: usize = 64 * 1024;

/// Byte-at-a-time view over a [`BufRead`] that counts consumed bytes.
///
/// Never consumes more than the decoder asks for, so the underlying reader is
/// positioned right after the last decoded value.
#[derive(Debug)]
pub(crate) struct ByteSource<R> {
    inner: R,
    position: u64,
}

impl<R: BufRead> ByteSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }

    /// Error of `kind` at the current position.
    pub(crate) fn error(&self, kind: DecodeErrorKind) -> Error {
        Error::decode(kind, self.position)
    }

    /// Runs `f` over the reader's buffered bytes, refilling it first if it is
    /// empty. An empty slice means end of stream; it is never re-read.
    fn with_buf<T>(&mut self, f: impl FnOnce(&[u8]) -> T) -> Result<T> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(f(buf)),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Next byte without consuming it. `None` at end of stream.
    pub(crate) fn peek(&mut self) -> Result<Option<u8>> {
        self.with_buf(|buf| buf.first().copied())
    }

    pub(crate) fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.inner.consume(1);
            self.position += 1;
        }
        Ok(byte)
    }

    /// Reads up to `len` bytes, stopping early only at end of stream.
    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len.min(READ_CHUNK));
        while out.len() < len {
            let want = len - out.len();
            let take = self.with_buf(|buf| {
                let take = buf.len().min(want);
                out.extend_from_slice(&buf[..take]);
                take
            })?;
            if take == 0 {
                break;
            }
            self.inner.consume(take);
            self.position += take as u64;
        }
        Ok(out)
    }
}
