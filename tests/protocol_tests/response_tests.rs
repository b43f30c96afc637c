//! Response Classifier Tests
//!
//! Tests for classifying response codes into statuses, data and errors.

use bytes::{BufMut, Bytes, BytesMut};
use cqi::protocol::{
    encode_code, encode_data, encode_status, read_response, Category, DataType, IntTable,
    Opcode, Response,
};
use cqi::{CqiError, ErrorKind, ProtocolError, Status, Value};

fn classify(bytes: Bytes) -> cqi::Result<Response> {
    let mut src = bytes;
    read_response(&mut src)
}

fn server_error(code: u16) -> cqi::ServerError {
    match classify(encode_code(code)) {
        Err(CqiError::Server(e)) => e,
        other => panic!("Expected server error for 0x{:04x}, got {:?}", code, other),
    }
}

// =============================================================================
// Status Tests
// =============================================================================

#[test]
fn test_status_codes() {
    for status in [Status::Ok, Status::ConnectOk, Status::ByeOk, Status::PingOk] {
        let response = classify(encode_status(status)).unwrap();
        assert_eq!(response, Response::Status(status));
    }
}

#[test]
fn test_connect_ok_wire_value() {
    let response = classify(Bytes::from_static(&[0x02, 0x02])).unwrap();
    assert_eq!(response, Response::Status(Status::ConnectOk));
}

#[test]
fn test_unknown_status_code_is_fatal() {
    let result = classify(encode_code(0x0299));
    match result {
        Err(e @ CqiError::Protocol(ProtocolError::UnknownStatus(0x0299))) => assert!(e.is_fatal()),
        other => panic!("Expected unknown status, got {:?}", other),
    }
}

// =============================================================================
// Data Tests
// =============================================================================

#[test]
fn test_each_data_code_selects_its_decoder() {
    let values = vec![
        Value::Byte(7),
        Value::Bool(true),
        Value::Int(-42),
        Value::String("Wort".to_string()),
        Value::ByteList(vec![1, 2]),
        Value::BoolList(vec![false, true]),
        Value::IntList(vec![3, 2, 1]),
        Value::StringList(vec!["a".to_string(), "b".to_string()]),
        Value::IntInt(5, 9),
        Value::IntIntIntInt(1, 2, 3, 4),
        Value::IntTable(IntTable::new(1, 2, vec![8, 9]).unwrap()),
    ];
    for value in values {
        let response = classify(encode_data(&value).unwrap()).unwrap();
        assert_eq!(response, Response::Data(value));
    }
}

#[test]
fn test_shape_comes_from_code_not_payload() {
    // The same four bytes read as INT, or as an empty INT_LIST
    let mut buf = BytesMut::new();
    buf.put_u16(DataType::Int.code());
    buf.put_i32(0);
    assert_eq!(classify(buf.freeze()).unwrap(), Response::Data(Value::Int(0)));

    let mut buf = BytesMut::new();
    buf.put_u16(DataType::IntList.code());
    buf.put_i32(0);
    assert_eq!(
        classify(buf.freeze()).unwrap(),
        Response::Data(Value::IntList(vec![]))
    );
}

#[test]
fn test_unknown_data_type_is_fatal() {
    let result = classify(encode_code(0x03FF));
    assert!(matches!(
        result,
        Err(CqiError::Protocol(ProtocolError::UnknownDataType(0x03FF)))
    ));
}

#[test]
fn test_data_response_leaves_following_bytes_untouched() {
    let mut buf = BytesMut::new();
    buf.extend_from_slice(&encode_data(&Value::Int(1)).unwrap());
    buf.extend_from_slice(&encode_status(Status::PingOk));
    let mut src = buf.freeze();

    assert_eq!(read_response(&mut src).unwrap(), Response::Data(Value::Int(1)));
    assert_eq!(read_response(&mut src).unwrap(), Response::Status(Status::PingOk));
    assert!(src.is_empty());
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_registered_general_errors() {
    assert_eq!(server_error(0x0101).kind, ErrorKind::GeneralError);
    assert_eq!(server_error(0x0102).kind, ErrorKind::ConnectRefused);
    assert_eq!(server_error(0x0103).kind, ErrorKind::UserAbort);
    assert_eq!(server_error(0x0104).kind, ErrorKind::SyntaxError);
}

#[test]
fn test_registered_cl_errors() {
    let expected = [
        (0x0401, ErrorKind::NoSuchAttribute),
        (0x0402, ErrorKind::WrongAttributeType),
        (0x0403, ErrorKind::ClOutOfRange),
        (0x0404, ErrorKind::Regex),
        (0x0405, ErrorKind::CorpusAccess),
        (0x0406, ErrorKind::OutOfMemory),
        (0x0407, ErrorKind::Internal),
    ];
    for (code, kind) in expected {
        let error = server_error(code);
        assert_eq!(error.kind, kind);
        assert_eq!(error.code, code);
        assert_eq!(error.category(), Category::ClError);
    }
}

#[test]
fn test_registered_cqp_errors() {
    assert_eq!(server_error(0x0501).kind, ErrorKind::CqpGeneral);
    assert_eq!(server_error(0x0502).kind, ErrorKind::NoSuchCorpus);
    assert_eq!(server_error(0x0503).kind, ErrorKind::InvalidField);
    assert_eq!(server_error(0x0504).kind, ErrorKind::CqpOutOfRange);
}

#[test]
fn test_well_known_descriptions() {
    assert_eq!(
        server_error(0x0406).description,
        "CQi server has run out of memory; try discarding some other corpora and/or subcorpora"
    );
    assert_eq!(server_error(0x0504).description, "A number is out of range");
    assert_eq!(server_error(0x0401).description, "CQi server couldn't open attribute");
}

#[test]
fn test_unregistered_error_codes_are_generic() {
    let error = server_error(0x01AB);
    assert_eq!(error.kind, ErrorKind::Error);
    assert_eq!(error.code, 0x01AB);
    assert!(error.kind.is_generic());

    let error = server_error(0x0499);
    assert_eq!(error.kind, ErrorKind::ClError);
    assert_eq!(error.category(), Category::ClError);

    let error = server_error(0x0577);
    assert_eq!(error.kind, ErrorKind::CqpError);
    assert_eq!(error.category(), Category::CqpError);
}

#[test]
fn test_server_errors_are_not_fatal() {
    let result = classify(encode_code(0x0502));
    let error = result.unwrap_err();
    assert!(!error.is_fatal());
    assert_eq!(error.as_server_error().unwrap().kind, ErrorKind::NoSuchCorpus);
    assert!(error.to_string().contains("CQI_CQP_ERROR_NO_SUCH_CORPUS"));
}

#[test]
fn test_unknown_category() {
    for code in [0x0000, 0x0601, 0x1101, 0xFFFF] {
        let result = classify(encode_code(code));
        assert!(
            matches!(result, Err(CqiError::Protocol(ProtocolError::UnknownCategory(c))) if c == code),
            "code 0x{:04x}",
            code
        );
    }
}

#[test]
fn test_truncated_code() {
    let result = classify(Bytes::from_static(&[0x02]));
    assert!(matches!(result, Err(CqiError::ConnectionClosed { .. })));
}

// =============================================================================
// Expectation Tests
// =============================================================================

#[test]
fn test_expect_data_converts_matching_shape() {
    let response = Response::Data(Value::IntList(vec![1, 2]));
    let ids: Vec<i32> = response.expect_data(Opcode::ClStr2Id).unwrap();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_expect_data_rejects_other_shape() {
    let response = Response::Data(Value::Int(3));
    let result: cqi::Result<Vec<i32>> = response.expect_data(Opcode::ClStr2Id);
    match result {
        Err(CqiError::Protocol(ProtocolError::UnexpectedResponse { expected, actual, .. })) => {
            assert_eq!(expected, "CQI_DATA_INT_LIST");
            assert_eq!(actual, "CQI_DATA_INT");
        }
        other => panic!("Expected unexpected response, got {:?}", other),
    }
}

#[test]
fn test_expect_status_rejects_other_status() {
    let response = Response::Status(Status::Ok);
    let result = response.expect_status(Opcode::CtrlPing, Status::PingOk);
    assert!(matches!(
        result,
        Err(CqiError::Protocol(ProtocolError::UnexpectedResponse { .. }))
    ));
}
