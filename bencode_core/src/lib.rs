//! Bencode encoding and decoding.
//!
//! Bencode is a self-delimiting format: every token carries either a length
//! prefix or a terminator, so a stream of bytes can be decoded without any
//! external schema.
//!
//! | Construct  | Encoding                           |
//! |------------|------------------------------------|
//! | String     | `<len>:<bytes>` e.g. `4:spam`      |
//! | Integer    | `i<decimal>e` e.g. `i-42e`         |
//! | List       | `l<items>e` e.g. `l4:spami1ee`     |
//! | Dictionary | `d<key><value>...e`, keys sorted   |
//!
//! ## Layers
//! 1. `value`  – the [`Value`] tree (owned, immutable once built).
//! 2. `decode` – [`Decoder`], which sniffs the leading byte of each token and
//!    dispatches to the string, integer and composite decoders. Input is
//!    treated as untrusted: nesting depth and string lengths are bounded by
//!    [`DecodeConfig`].
//! 3. `encode` – [`Encoder`], which always produces canonical output
//!    (dictionary keys in ascending byte order, no leading zeros).
//!
//! ```
//! use bencode_core::{Value, from_bytes, to_vec};
//!
//! let value = from_bytes(b"d3:cow3:moo4:spam4:eggse").unwrap();
//! assert_eq!(value.get(b"cow").unwrap(), Some(&Value::string("moo")));
//! assert_eq!(to_vec(&value), b"d3:cow3:moo4:spam4:eggse");
//! ```

mod composite;
pub mod config;
mod decode;
mod encode;
pub mod error;
mod integer;
mod reader;
mod string;
pub mod value;

pub use config::DecodeConfig;
pub use decode::{Decoder, decode, decode_with_config, from_bytes, from_bytes_with_config};
pub use encode::{Encoder, encode, to_vec};
pub use error::{DecodeErrorKind, Error, Result};
pub use value::{Value, ValueKind};
