//! Length-prefixed byte strings: `<len>:<bytes>`.

use bytes::Bytes;
use std::io::{BufRead, Write};

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{DecodeErrorKind, Error, Result};

impl<R: BufRead> Decoder<R> {
    /// Decodes a string token.
    pub fn decode_string(&mut self) -> Result<Bytes> {
        let start = self.src.position();
        let len = self.decode_length()?;
        if len > self.config.max_string_len {
            return Err(Error::decode(DecodeErrorKind::StringTooLong, start));
        }
        let payload = self.src.read_bytes(len)?;
        if payload.len() < len {
            return Err(self.src.error(DecodeErrorKind::TruncatedStream));
        }
        Ok(payload.into())
    }

    /// Reads the decimal length and its `:` delimiter.
    fn decode_length(&mut self) -> Result<usize> {
        let start = self.src.position();
        match self.src.peek()? {
            Some(b) if b.is_ascii_digit() => {}
            Some(_) => return Err(self.src.error(DecodeErrorKind::MalformedLength)),
            None => return Err(self.src.error(DecodeErrorKind::TruncatedStream)),
        }

        let mut len: u64 = 0;
        let mut digits = 0usize;
        let mut leading_zero = false;
        loop {
            let offset = self.src.position();
            match self.src.next_byte()? {
                Some(b':') => break,
                Some(b @ b'0'..=b'9') => {
                    if digits == 0 && b == b'0' {
                        leading_zero = true;
                    }
                    digits += 1;
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(u64::from(b - b'0')))
                        .ok_or_else(|| Error::decode(DecodeErrorKind::MalformedLength, start))?;
                }
                Some(_) => return Err(Error::decode(DecodeErrorKind::MissingDelimiter, offset)),
                None => return Err(self.src.error(DecodeErrorKind::TruncatedStream)),
            }
        }

        if self.config.strict && leading_zero && digits > 1 {
            tracing::debug!("rejecting string length with leading zeros at byte {start}");
            return Err(Error::decode(DecodeErrorKind::LeadingZero, start));
        }
        usize::try_from(len).map_err(|_| Error::decode(DecodeErrorKind::MalformedLength, start))
    }
}

impl<W: Write> Encoder<W> {
    /// Writes `bytes` as a string token and returns the number of bytes written.
    pub fn encode_string(&mut self, bytes: &[u8]) -> Result<usize> {
        let prefix = bytes.len().to_string();
        self.write(prefix.as_bytes())?;
        self.write(b":")?;
        self.write(bytes)?;
        Ok(prefix.len() + 1 + bytes.len())
    }
}
