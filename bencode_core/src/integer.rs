//! Delimited signed integers: `i<decimal>e`.

use std::io::{BufRead, Write};

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{DecodeErrorKind, Error, Result};

impl<R: BufRead> Decoder<R> {
    /// Decodes an integer token.
    ///
    /// Only canonical forms are accepted: no leading zeros, no `-0`.
    pub fn decode_integer(&mut self) -> Result<i64> {
        self.expect_introducer(b'i')?;

        let start = self.src.position();
        let negative = match self.src.peek()? {
            Some(b'-') => {
                self.src.next_byte()?;
                true
            }
            Some(b) if b.is_ascii_digit() => false,
            Some(_) => return Err(self.src.error(DecodeErrorKind::MalformedInteger)),
            None => return Err(self.src.error(DecodeErrorKind::TruncatedStream)),
        };

        let mut magnitude: u64 = 0;
        let mut digits = 0usize;
        let mut first = 0u8;
        while let Some(b @ b'0'..=b'9') = self.src.peek()? {
            let offset = self.src.position();
            self.src.next_byte()?;
            if digits == 0 {
                first = b;
            }
            digits += 1;
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u64::from(b - b'0')))
                .ok_or_else(|| Error::decode(DecodeErrorKind::IntegerOverflow, offset))?;
        }

        if digits == 0 {
            // Only reachable after a '-'.
            if self.src.peek()?.is_none() {
                return Err(self.src.error(DecodeErrorKind::TruncatedStream));
            }
            return Err(Error::decode(DecodeErrorKind::InvalidSign, start));
        }
        if digits > 1 && first == b'0' {
            return Err(Error::decode(DecodeErrorKind::LeadingZero, start));
        }
        if negative && magnitude == 0 {
            return Err(Error::decode(DecodeErrorKind::InvalidSign, start));
        }

        match self.src.peek()? {
            Some(b'e') => {
                self.src.next_byte()?;
            }
            Some(_) => return Err(self.src.error(DecodeErrorKind::ExpectedTerminator)),
            None => return Err(self.src.error(DecodeErrorKind::TruncatedStream)),
        }

        let value = if negative {
            0i64.checked_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).ok()
        };
        value.ok_or_else(|| Error::decode(DecodeErrorKind::IntegerOverflow, start))
    }
}

impl<W: Write> Encoder<W> {
    /// Writes `n` as an integer token and returns the number of bytes written.
    pub fn encode_integer(&mut self, n: i64) -> Result<usize> {
        let digits = n.to_string();
        self.write(b"i")?;
        self.write(digits.as_bytes())?;
        self.write(b"e")?;
        Ok(digits.len() + 2)
    }
}
