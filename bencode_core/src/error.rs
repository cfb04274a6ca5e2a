use crate::value::ValueKind;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by encoding, decoding and the [`crate::Value`] accessors.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input is not well-formed bencode. `offset` is the number of bytes
    /// consumed from the stream when the problem was detected.
    #[error("{kind} at byte {offset}")]
    Decode { kind: DecodeErrorKind, offset: u64 },

    /// A [`crate::Value`] accessor was called on a different variant.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    /// The underlying reader or writer failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn decode(kind: DecodeErrorKind, offset: u64) -> Self {
        Error::Decode { kind, offset }
    }

    /// The decode error kind, if this is a decode error.
    pub fn decode_kind(&self) -> Option<DecodeErrorKind> {
        match self {
            Error::Decode { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Byte offset at which a decode error was detected.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Error::Decode { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }
}

/// What went wrong while decoding.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    // strings
    #[error("string length must start with a digit")]
    MalformedLength,
    #[error("expected ':' after string length")]
    MissingDelimiter,
    #[error("stream ended before the value was complete")]
    TruncatedStream,
    #[error("string length exceeds the configured limit")]
    StringTooLong,

    // integers
    #[error("expected introducer byte")]
    ExpectedIntroducer,
    #[error("expected terminator 'e'")]
    ExpectedTerminator,
    #[error("integer does not fit in 64 bits")]
    IntegerOverflow,
    #[error("misplaced or dangling '-' sign")]
    InvalidSign,
    #[error("number has leading zeros")]
    LeadingZero,
    #[error("integer has no digits")]
    MalformedInteger,

    // composites
    #[error("list is missing its terminator")]
    UnterminatedList,
    #[error("dictionary is missing its terminator")]
    UnterminatedDictionary,
    #[error("duplicate dictionary key")]
    DuplicateKey,
    #[error("dictionary keys are not in ascending order")]
    UnsortedKeys,

    // dispatch
    #[error("unrecognized value tag")]
    UnrecognizedTag,
    #[error("nesting depth limit exceeded")]
    NestingTooDeep,
    #[error("trailing bytes after value")]
    TrailingBytes,
}
