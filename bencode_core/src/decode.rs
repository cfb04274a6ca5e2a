//! Dispatching decoder and the public decode entry points.

use std::io::{BufRead, BufReader, Read};

use crate::config::DecodeConfig;
use crate::error::{DecodeErrorKind, Error, Result};
use crate::reader::ByteSource;
use crate::value::Value;

/// Reads bencode values from a [`BufRead`].
///
/// Each call to [`Decoder::decode_value`] consumes exactly one value, so a
/// stream holding several concatenated values can be read one at a time.
/// Errors carry the byte offset, counted from where the decoder started.
#[derive(Debug)]
pub struct Decoder<R> {
    pub(crate) src: ByteSource<R>,
    pub(crate) config: DecodeConfig,
    depth: usize,
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecodeConfig::default())
    }

    pub fn with_config(reader: R, config: DecodeConfig) -> Self {
        Self {
            src: ByteSource::new(reader),
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.src.position()
    }

    pub fn into_inner(self) -> R {
        self.src.into_inner()
    }

    /// Whether the underlying stream has no more bytes.
    pub fn is_at_end(&mut self) -> Result<bool> {
        Ok(self.src.peek()?.is_none())
    }

    /// Decodes the next complete value.
    pub fn decode_value(&mut self) -> Result<Value> {
        let start = self.position();
        self.depth = 0;
        let result = self.dispatch();
        match &result {
            Ok(_) => tracing::trace!(
                "decoded value: {} bytes at offset {start}",
                self.position() - start
            ),
            Err(Error::Decode { kind, offset }) => {
                tracing::debug!("bencode decode failed: {kind} at byte {offset}")
            }
            Err(e) => tracing::debug!("bencode decode failed: {e}"),
        }
        result
    }

    /// Routes on the leading byte of the next token.
    pub(crate) fn dispatch(&mut self) -> Result<Value> {
        match self.src.peek()? {
            Some(b'i') => self.decode_integer().map(Value::Integer),
            Some(b'l') => self.decode_list().map(Value::List),
            Some(b'd') => self.decode_dictionary().map(Value::Dictionary),
            Some(b'0'..=b'9') => self.decode_string().map(Value::String),
            Some(_) => Err(self.src.error(DecodeErrorKind::UnrecognizedTag)),
            None => Err(self.src.error(DecodeErrorKind::TruncatedStream)),
        }
    }

    /// Consumes `tag`, failing with `ExpectedIntroducer` on any other byte.
    pub(crate) fn expect_introducer(&mut self, tag: u8) -> Result<()> {
        match self.src.peek()? {
            Some(b) if b == tag => {
                self.src.next_byte()?;
                Ok(())
            }
            Some(_) => Err(self.src.error(DecodeErrorKind::ExpectedIntroducer)),
            None => Err(self.src.error(DecodeErrorKind::TruncatedStream)),
        }
    }

    /// Opens a container. Must be called before its introducer is consumed so
    /// that `NestingTooDeep` points at the offending byte.
    pub(crate) fn enter(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(self.src.error(DecodeErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// Decodes one value from `reader` with the default config.
///
/// The reader is wrapped in a [`BufReader`], which may read past the end of
/// the value. Use [`Decoder`] directly to keep the remaining bytes.
pub fn decode<R: Read>(reader: R) -> Result<Value> {
    decode_with_config(reader, DecodeConfig::default())
}

pub fn decode_with_config<R: Read>(reader: R, config: DecodeConfig) -> Result<Value> {
    Decoder::with_config(BufReader::new(reader), config).decode_value()
}

/// Decodes a buffer holding exactly one value.
pub fn from_bytes(bytes: &[u8]) -> Result<Value> {
    from_bytes_with_config(bytes, DecodeConfig::default())
}

pub fn from_bytes_with_config(bytes: &[u8], config: DecodeConfig) -> Result<Value> {
    let mut decoder = Decoder::with_config(bytes, config);
    let value = decoder.decode_value()?;
    if !decoder.is_at_end()? {
        return Err(decoder.src.error(DecodeErrorKind::TrailingBytes));
    }
    Ok(value)
}
