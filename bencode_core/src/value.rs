//! The bencode value tree.

use bytes::Bytes;
use core::fmt;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A decoded or to-be-encoded bencode value.
///
/// Dictionaries are kept in a [`BTreeMap`], so iteration (and therefore
/// encoding) always visits keys in ascending raw-byte order.
///
/// Encoding, [`Value::encoded_len`] and drop all recurse once per nesting
/// level. The decoder bounds depth with [`crate::DecodeConfig::max_depth`];
/// trees built directly are only bounded by the caller's stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Opaque byte string. No text encoding is assumed.
    String(Bytes),
    Integer(i64),
    List(Vec<Value>),
    Dictionary(BTreeMap<Bytes, Value>),
}

/// The variant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    String,
    Integer,
    List,
    Dictionary,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::List => "list",
            ValueKind::Dictionary => "dictionary",
        })
    }
}

impl Value {
    pub fn string(bytes: impl Into<Bytes>) -> Self {
        Value::String(bytes.into())
    }

    pub fn integer(n: i64) -> Self {
        Value::Integer(n)
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Builds a dictionary. If a key repeats, the last value wins.
    pub fn dictionary<K: Into<Bytes>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Dictionary(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::List(_) => ValueKind::List,
            Value::Dictionary(_) => ValueKind::Dictionary,
        }
    }

    fn mismatch(&self, expected: ValueKind) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_string(&self) -> Result<&Bytes> {
        match self {
            Value::String(bytes) => Ok(bytes),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Value::Integer(n) => Ok(*n),
            other => Err(other.mismatch(ValueKind::Integer)),
        }
    }

    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::List)),
        }
    }

    pub fn as_dictionary(&self) -> Result<&BTreeMap<Bytes, Value>> {
        match self {
            Value::Dictionary(map) => Ok(map),
            other => Err(other.mismatch(ValueKind::Dictionary)),
        }
    }

    pub fn into_string(self) -> Result<Bytes> {
        match self {
            Value::String(bytes) => Ok(bytes),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    pub fn into_list(self) -> Result<Vec<Value>> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::List)),
        }
    }

    pub fn into_dictionary(self) -> Result<BTreeMap<Bytes, Value>> {
        match self {
            Value::Dictionary(map) => Ok(map),
            other => Err(other.mismatch(ValueKind::Dictionary)),
        }
    }

    /// Looks up `key` in a dictionary value.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Option<&Value>> {
        Ok(self.as_dictionary()?.get(key.as_ref()))
    }

    /// Exact number of bytes the canonical encoding of this value occupies.
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::String(bytes) => string_len(bytes),
            Value::Integer(n) => integer_len(*n),
            Value::List(items) => 2 + items.iter().map(Value::encoded_len).sum::<usize>(),
            Value::Dictionary(map) => {
                2 + map
                    .iter()
                    .map(|(k, v)| string_len(k) + v.encoded_len())
                    .sum::<usize>()
            }
        }
    }

    /// Canonical encoding of this value.
    pub fn to_bytes(&self) -> Bytes {
        crate::to_vec(self).into()
    }
}

fn decimal_len(mut n: u64) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

fn string_len(bytes: &[u8]) -> usize {
    decimal_len(bytes.len() as u64) + 1 + bytes.len()
}

fn integer_len(n: i64) -> usize {
    let sign = usize::from(n < 0);
    2 + sign + decimal_len(n.unsigned_abs())
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::String(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::String(b.into())
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::String(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(map: BTreeMap<Bytes, Value>) -> Self {
        Value::Dictionary(map)
    }
}

/// Single-line diagnostic notation.
///
/// - Integers are shown as in Rust.
/// - Strings made only of printable ASCII are shown in double quotes, with
///   `"` and `\` escaped.
/// - Any other string is shown hex-encoded in single quotes prefixed with `h`,
///   e.g. `h'01 02 ef'`.
/// - Lists are shown as `[a, b]` and dictionaries as `{"k": v}`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(bytes) => fmt_bytes(bytes, f),
            Value::Integer(n) => write!(f, "{}", n),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Dictionary(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt_bytes(k, f)?;
                    write!(f, ": {}", v)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn fmt_bytes(b: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if b.iter().all(|c| (0x20..0x7f).contains(c)) {
        f.write_str("\"")?;
        for &c in b {
            if c == b'"' || c == b'\\' {
                f.write_str("\\")?;
            }
            write!(f, "{}", c as char)?;
        }
        return f.write_str("\"");
    }
    f.write_str("h'")?;
    let mut i = b.len();
    for x in b {
        if i > 1 {
            write!(f, "{:02x} ", x)?
        } else {
            write!(f, "{:02x}", x)?
        }
        i -= 1;
    }
    f.write_str("'")
}
