//! Codec Tests
//!
//! Tests for encoding and decoding of the CQi wire types.

use bytes::{Bytes, BytesMut};
use cqi::protocol::codec::{self, ByteSource};
use cqi::protocol::{DataType, IntTable, Opcode, Request, Value};
use cqi::{CqiError, Field, ProtocolError};

fn encoded(value: &Value) -> Bytes {
    let mut buf = BytesMut::new();
    codec::put_value(&mut buf, value).unwrap();
    buf.freeze()
}

fn decode(bytes: Bytes, data_type: DataType) -> cqi::Result<Value> {
    let mut src = bytes;
    let value = codec::get_value(&mut src, data_type)?;
    assert!(src.is_empty(), "{} bytes left after decoding", src.len());
    Ok(value)
}

fn roundtrip(value: Value) {
    let data_type = value.data_type();
    let decoded = decode(encoded(&value), data_type).unwrap();
    assert_eq!(decoded, value);
}

// =============================================================================
// Primitive Encoding Tests
// =============================================================================

#[test]
fn test_int_is_big_endian() {
    assert_eq!(&encoded(&Value::Int(1))[..], &[0x00, 0x00, 0x00, 0x01]);
    assert_eq!(&encoded(&Value::Int(-1))[..], &[0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(&encoded(&Value::Int(i32::MIN))[..], &[0x80, 0x00, 0x00, 0x00]);
}

#[test]
fn test_bool_encoding() {
    assert_eq!(&encoded(&Value::Bool(true))[..], &[0x01]);
    assert_eq!(&encoded(&Value::Bool(false))[..], &[0x00]);
}

#[test]
fn test_string_length_prefix_counts_bytes() {
    // 'ä' is two bytes in UTF-8
    let bytes = encoded(&Value::String("ä".to_string()));
    assert_eq!(&bytes[..], &[0x00, 0x02, 0xC3, 0xA4]);
}

#[test]
fn test_empty_string_encoding() {
    assert_eq!(&encoded(&Value::String(String::new()))[..], &[0x00, 0x00]);
}

#[test]
fn test_int_boundaries_roundtrip() {
    for v in [0, -1, 1, i32::MIN, i32::MAX] {
        roundtrip(Value::Int(v));
    }
}

#[test]
fn test_byte_and_bool_roundtrip() {
    for v in [0u8, 1, 0x7F, 0xFF] {
        roundtrip(Value::Byte(v));
    }
    roundtrip(Value::Bool(true));
    roundtrip(Value::Bool(false));
}

#[test]
fn test_string_roundtrip() {
    roundtrip(Value::String(String::new()));
    roundtrip(Value::String("Wort".to_string()));
    roundtrip(Value::String("Straße 日本語 🦀".to_string()));
}

#[test]
fn test_nonzero_bool_decodes_true() {
    let mut src = Bytes::from_static(&[0x02]);
    assert!(codec::get_bool(&mut src).unwrap());
}

#[test]
fn test_word_decoding() {
    let mut src = Bytes::from_static(&[0x03, 0x07]);
    assert_eq!(codec::get_word(&mut src).unwrap(), 0x0307);
}

// =============================================================================
// Composite Encoding Tests
// =============================================================================

#[test]
fn test_int_list_layout() {
    let bytes = encoded(&Value::IntList(vec![5, -1]));
    assert_eq!(
        &bytes[..],
        &[0, 0, 0, 2, 0, 0, 0, 5, 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn test_empty_lists() {
    assert_eq!(&encoded(&Value::IntList(vec![]))[..], &[0, 0, 0, 0]);
    roundtrip(Value::IntList(vec![]));
    roundtrip(Value::StringList(vec![]));
    roundtrip(Value::ByteList(vec![]));
    roundtrip(Value::BoolList(vec![]));
}

#[test]
fn test_list_order_and_count_preserved() {
    for n in [1usize, 2, 17, 1000, 5000] {
        let ints: Vec<i32> = (0..n as i32).map(|i| i * 7 - 3).collect();
        roundtrip(Value::IntList(ints));
    }
    roundtrip(Value::StringList(vec![
        "the".to_string(),
        String::new(),
        "Haus".to_string(),
        "the".to_string(),
    ]));
    roundtrip(Value::ByteList(vec![3, 1, 2]));
    roundtrip(Value::BoolList(vec![true, false, true]));
}

#[test]
fn test_tuples_have_no_count_prefix() {
    let bytes = encoded(&Value::IntInt(1, 2));
    assert_eq!(bytes.len(), 8);
    roundtrip(Value::IntInt(10, 20));

    let bytes = encoded(&Value::IntIntIntInt(1, 2, 3, 4));
    assert_eq!(bytes.len(), 16);
    roundtrip(Value::IntIntIntInt(0, -1, i32::MAX, i32::MIN));
}

#[test]
fn test_int_table_row_major() {
    let table = IntTable::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let bytes = encoded(&Value::IntTable(table.clone()));
    assert_eq!(bytes.len(), 8 + 6 * 4);

    let decoded = decode(bytes, DataType::IntTable).unwrap();
    match decoded {
        Value::IntTable(t) => {
            assert_eq!(t, table);
            assert_eq!(t.row(1), Some(&[4, 5, 6][..]));
            assert_eq!(t.get(0, 2), Some(3));
            assert_eq!(t.get(2, 0), None);
            let rows: Vec<&[i32]> = t.iter_rows().collect();
            assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
        }
        other => panic!("Expected table, got {:?}", other),
    }
}

#[test]
fn test_int_table_with_zero_columns() {
    let table = IntTable::new(3, 0, vec![]).unwrap();
    roundtrip(Value::IntTable(table));
}

#[test]
fn test_int_table_rejects_mismatched_cells() {
    assert!(IntTable::new(2, 2, vec![1, 2, 3]).is_none());
}

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_request_opcode_then_arguments() {
    let request = Request::new(Opcode::CqpDumpSubcorpus)
        .string("BNC:A")
        .unwrap()
        .field(Field::Match)
        .int(0)
        .int(9);

    let mut expected = vec![0x15, 0x05, 0x00, 0x05];
    expected.extend_from_slice(b"BNC:A");
    expected.push(0x10);
    expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 9]);
    assert_eq!(request.as_bytes(), &expected[..]);
}

#[test]
fn test_request_without_arguments_is_just_opcode() {
    let request = Request::new(Opcode::CtrlPing);
    assert_eq!(request.into_bytes().as_ref(), &[0x11, 0x04]);
}

#[test]
fn test_string_list_argument() {
    let request = Request::new(Opcode::ClStr2Id)
        .string("C.word")
        .unwrap()
        .string_list(&["a", "bc"])
        .unwrap();

    let mut expected = vec![0x14, 0x04, 0x00, 0x06];
    expected.extend_from_slice(b"C.word");
    expected.extend_from_slice(&[0, 0, 0, 2, 0, 1, b'a', 0, 2, b'b', b'c']);
    assert_eq!(request.as_bytes(), &expected[..]);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_string_too_long_is_rejected() {
    let long = "x".repeat(codec::MAX_STRING_LEN + 1);
    let result = Request::new(Opcode::CorpusCharset).string(&long);
    assert!(matches!(result, Err(CqiError::Encoding(_))));
}

#[test]
fn test_string_of_max_length_is_accepted() {
    let longest = "x".repeat(codec::MAX_STRING_LEN);
    roundtrip(Value::String(longest));
}

#[test]
fn test_invalid_utf8_fails_with_encoding_error() {
    let mut src = Bytes::from_static(&[0x00, 0x02, 0xC3, 0x28]);
    let result = codec::get_string(&mut src);
    assert!(matches!(result, Err(CqiError::Encoding(_))));
}

#[test]
fn test_negative_list_count() {
    let mut src = Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFE]);
    let result = codec::get_list(&mut src, codec::get_int);
    assert!(matches!(
        result,
        Err(CqiError::Protocol(ProtocolError::NegativeLength(-2)))
    ));
}

#[test]
fn test_list_never_returns_fewer_elements() {
    // Announces three ints, carries two
    let mut src = Bytes::from_static(&[0, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 2]);
    let result = codec::get_list(&mut src, codec::get_int);
    assert!(matches!(result, Err(CqiError::ConnectionClosed { .. })));
}

#[test]
fn test_oversized_table_is_protocol_error() {
    // 65536 x 65536 cells cannot be counted by a wire INT
    let mut src = Bytes::from_static(&[0, 1, 0, 0, 0, 1, 0, 0]);
    let result = codec::get_int_table(&mut src);
    assert!(matches!(
        result,
        Err(CqiError::Protocol(ProtocolError::MalformedTable {
            rows: 65536,
            columns: 65536
        }))
    ));
}

#[test]
fn test_negative_table_dimension() {
    let mut src = Bytes::from_static(&[0, 0, 0, 2, 0xFF, 0xFF, 0xFF, 0xFF]);
    let result = codec::get_int_table(&mut src);
    assert!(matches!(
        result,
        Err(CqiError::Protocol(ProtocolError::NegativeLength(-1)))
    ));
}

#[test]
fn test_truncated_string() {
    let mut src = Bytes::from_static(&[0x00, 0x05, b'a', b'b']);
    let result = codec::get_string(&mut src);
    assert!(matches!(
        result,
        Err(CqiError::ConnectionClosed {
            expected: 5,
            received: 2
        })
    ));
}

#[test]
fn test_zero_length_read_from_empty_source() {
    let mut src = Bytes::new();
    assert!(src.recv_exact(0).unwrap().is_empty());
}
