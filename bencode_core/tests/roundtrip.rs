//! Encode/decode round trips over realistic value trees.
//!
//! It validates:
//! 1.  **Symmetry:** `decode(encode(v)) == v` for every variant, including
//!     zero, negative and extreme integers, and empty containers.
//! 2.  **Canonical output:** dictionary keys come out in ascending byte order
//!     regardless of how the dictionary was built, so equal values always
//!     encode to identical bytes.
//! 3.  **Depth:** values nested right up to the configured limit survive a
//!     round trip.
//! 4.  **Properties:** the above hold for arbitrary generated trees.

use bencode_core::{DecodeConfig, Decoder, Value, decode, encode, from_bytes, to_vec};
use bytes::Bytes;
use proptest::prelude::*;

fn roundtrip(value: &Value) -> Value {
    let mut buf: Vec<u8> = Vec::new();
    let written = encode(value, &mut buf).unwrap();
    assert_eq!(written, buf.len());
    assert_eq!(written, value.encoded_len());
    decode(&buf[..]).unwrap()
}

fn metainfo() -> Value {
    Value::dictionary([
        ("announce", Value::string("http://tracker.example:6969/announce")),
        (
            "announce-list",
            Value::list([
                Value::list([Value::string("http://a.example/announce")]),
                Value::list([Value::string("udp://b.example:80")]),
            ]),
        ),
        ("creation date", Value::integer(1_700_000_000)),
        (
            "info",
            Value::dictionary([
                ("length", Value::integer(1 << 40)),
                ("name", Value::string("debian.iso")),
                ("piece length", Value::integer(262_144)),
                ("pieces", Value::string(vec![0xabu8; 20 * 8])),
                ("private", Value::integer(0)),
            ]),
        ),
    ])
}

#[test]
fn test_roundtrip_scalars() {
    for n in [0, 1, -1, 42, -42, i64::MAX, i64::MIN] {
        let v = Value::integer(n);
        assert_eq!(roundtrip(&v), v);
    }
    let strings: [&[u8]; 5] = [b"", b"spam", b"with:colon", b"\x00\xff\x00", b"e"];
    for s in strings {
        let v = Value::string(Bytes::copy_from_slice(s));
        assert_eq!(roundtrip(&v), v);
    }
}

#[test]
fn test_roundtrip_empty_containers() {
    let v = Value::list([Value::list([]), Value::dictionary::<Bytes>([])]);
    assert_eq!(roundtrip(&v), v);
}

#[test]
fn test_roundtrip_metainfo() {
    let v = metainfo();
    assert_eq!(roundtrip(&v), v);
}

#[test]
fn test_reencoding_is_byte_identical() {
    let first = to_vec(&metainfo());
    let second = to_vec(&from_bytes(&first).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_dictionary_encoding_ignores_insertion_order() {
    let forward = Value::dictionary([
        ("a", Value::integer(1)),
        ("b", Value::integer(2)),
        ("c", Value::integer(3)),
    ]);
    let backward = Value::dictionary([
        ("c", Value::integer(3)),
        ("b", Value::integer(2)),
        ("a", Value::integer(1)),
    ]);
    assert_eq!(to_vec(&forward), b"d1:ai1e1:bi2e1:ci3ee");
    assert_eq!(to_vec(&forward), to_vec(&backward));
}

#[test]
fn test_unsorted_input_is_canonicalized_on_reencode() {
    let value = from_bytes(b"d1:bi2e1:ai1ee").unwrap();
    assert_eq!(to_vec(&value), b"d1:ai1e1:bi2ee");
}

#[test]
fn test_roundtrip_at_depth_limit() {
    let depth = 200;
    let mut v = Value::integer(7);
    for i in 0..depth {
        v = if i % 2 == 0 {
            Value::list([v])
        } else {
            Value::dictionary([("k", v)])
        };
    }
    assert_eq!(roundtrip(&v), v);

    let shallow = DecodeConfig::default().with_max_depth(depth - 1);
    let bytes = to_vec(&v);
    let err = Decoder::with_config(&bytes[..], shallow)
        .decode_value()
        .unwrap_err();
    assert_eq!(
        err.decode_kind(),
        Some(bencode_core::DecodeErrorKind::NestingTooDeep)
    );
}

#[test]
fn test_accessors_on_decoded_tree() -> anyhow::Result<()> {
    let value = from_bytes(&to_vec(&metainfo()))?;
    let info = value.get("info")?.expect("info present");
    assert_eq!(info.get("name")?.expect("name").as_string()?, "debian.iso");
    assert_eq!(info.get("length")?.expect("length").as_integer()?, 1 << 40);
    let tiers = value.get("announce-list")?.expect("tiers").as_list()?;
    assert_eq!(tiers.len(), 2);
    assert!(info.get("name")?.expect("name").as_integer().is_err());
    Ok(())
}

fn arb_key() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..8).prop_map(Bytes::from)
}

/// Arbitrary trees over all four variants, with raw binary keys and strings.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        prop::collection::vec(any::<u8>(), 0..32).prop_map(|bytes| Value::String(bytes.into())),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
            prop::collection::btree_map(arb_key(), inner, 0..8).prop_map(Value::Dictionary),
        ]
    })
}

/// Distinct dictionary entries, in a random order.
fn arb_shuffled_entries() -> impl Strategy<Value = Vec<(Bytes, Value)>> {
    prop::collection::btree_map(arb_key(), arb_value(), 0..8)
        .prop_flat_map(|map| Just(map.into_iter().collect::<Vec<_>>()).prop_shuffle())
}

proptest! {
    #[test]
    fn test_generated_trees_roundtrip(value in arb_value()) {
        let bytes = to_vec(&value);
        prop_assert_eq!(bytes.len(), value.encoded_len());
        prop_assert_eq!(from_bytes(&bytes).unwrap(), value);
    }

    #[test]
    fn test_generated_trees_are_canonical(value in arb_value()) {
        let bytes = to_vec(&value);
        let strict = bencode_core::from_bytes_with_config(&bytes, DecodeConfig::canonical());
        prop_assert_eq!(strict.unwrap(), value);
    }

    #[test]
    fn test_entry_order_does_not_change_encoding(entries in arb_shuffled_entries()) {
        let mut sorted = entries.clone();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        prop_assert_eq!(
            to_vec(&Value::dictionary(entries)),
            to_vec(&Value::dictionary(sorted))
        );
    }
}
