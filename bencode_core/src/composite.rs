//! Lists (`l...e`) and dictionaries (`d...e`).

use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{DecodeErrorKind, Error, Result};
use crate::value::Value;

impl<R: BufRead> Decoder<R> {
    /// Decodes a list token, recursing into each element.
    pub fn decode_list(&mut self) -> Result<Vec<Value>> {
        self.enter()?;
        let items = self.list_items();
        self.leave();
        items
    }

    fn list_items(&mut self) -> Result<Vec<Value>> {
        self.expect_introducer(b'l')?;
        let mut items = Vec::new();
        loop {
            match self.src.peek()? {
                Some(b'e') => {
                    self.src.next_byte()?;
                    break;
                }
                Some(_) => items.push(self.dispatch()?),
                None => return Err(self.src.error(DecodeErrorKind::UnterminatedList)),
            }
        }
        Ok(items)
    }

    /// Decodes a dictionary token.
    ///
    /// Keys must be unique. Out-of-order keys are accepted unless the decoder
    /// is in strict mode.
    pub fn decode_dictionary(&mut self) -> Result<BTreeMap<Bytes, Value>> {
        self.enter()?;
        let map = self.dictionary_entries();
        self.leave();
        map
    }

    fn dictionary_entries(&mut self) -> Result<BTreeMap<Bytes, Value>> {
        self.expect_introducer(b'd')?;
        let mut map = BTreeMap::new();
        let mut previous: Option<Bytes> = None;
        loop {
            match self.src.peek()? {
                Some(b'e') => {
                    self.src.next_byte()?;
                    break;
                }
                Some(_) => {}
                None => return Err(self.src.error(DecodeErrorKind::UnterminatedDictionary)),
            }

            let key_offset = self.src.position();
            let key = self.decode_string()?;
            if map.contains_key(&key) {
                return Err(Error::decode(DecodeErrorKind::DuplicateKey, key_offset));
            }
            if self.config.strict && previous.as_ref().is_some_and(|p| *p > key) {
                tracing::debug!("rejecting unsorted dictionary key at byte {key_offset}");
                return Err(Error::decode(DecodeErrorKind::UnsortedKeys, key_offset));
            }

            if self.src.peek()?.is_none() {
                return Err(self.src.error(DecodeErrorKind::UnterminatedDictionary));
            }
            let value = self.dispatch()?;
            map.insert(key.clone(), value);
            previous = Some(key);
        }
        Ok(map)
    }
}

impl<W: Write> Encoder<W> {
    pub fn encode_list(&mut self, items: &[Value]) -> Result<usize> {
        self.write(b"l")?;
        let mut written = 2;
        for item in items {
            written += self.encode_value(item)?;
        }
        self.write(b"e")?;
        Ok(written)
    }

    /// Writes a dictionary with its keys in ascending raw-byte order.
    pub fn encode_dictionary(&mut self, map: &BTreeMap<Bytes, Value>) -> Result<usize> {
        self.write(b"d")?;
        let mut written = 2;
        // BTreeMap iterates in key order, which is the canonical order.
        for (key, value) in map {
            written += self.encode_string(key)?;
            written += self.encode_value(value)?;
        }
        self.write(b"e")?;
        Ok(written)
    }
}
