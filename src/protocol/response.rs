//! Response classification
//!
//! Every response starts with a WORD response code. Its high byte names the
//! category; the full value picks the status, the payload shape, or the
//! server error. Classification is a function of the code alone:
//!
//! ```text
//! AwaitingCode ──► Classify ──┬─► STATUS ──► Status lookup ──────► Done
//!                             ├─► DATA ────► decode payload ─────► Done
//!                             ├─► *ERROR ──► ServerError ────────► Done
//!                             └─► other ───► ProtocolError
//! ```

use bytes::{Bytes, BytesMut};

use super::codec::{self, ByteSource};
use super::codes::{Category, DataType, ServerError, Status};
use super::opcode::Opcode;
use super::value::{FromValue, Value};
use crate::error::{ProtocolError, Result};

/// A successful response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Status(Status),
    Data(Value),
}

impl Response {
    /// Short description of the response shape, for error messages
    pub fn describe(&self) -> String {
        match self {
            Response::Status(status) => status.name().to_string(),
            Response::Data(value) => value.data_type().name().to_string(),
        }
    }

    /// Require a particular status
    pub fn expect_status(self, opcode: Opcode, expected: Status) -> Result<Status> {
        match self {
            Response::Status(status) if status == expected => Ok(status),
            other => Err(ProtocolError::UnexpectedResponse {
                opcode: opcode.name(),
                expected: expected.name(),
                actual: other.describe(),
            }
            .into()),
        }
    }

    /// Require a DATA response of the shape `T` is decoded from
    pub fn expect_data<T: FromValue>(self, opcode: Opcode) -> Result<T> {
        let unexpected = |actual: String| ProtocolError::UnexpectedResponse {
            opcode: opcode.name(),
            expected: T::DATA_TYPE.name(),
            actual,
        };
        match self {
            Response::Data(value) => {
                T::from_value(value).map_err(|v| unexpected(v.data_type().name().to_string()).into())
            }
            other => Err(unexpected(other.describe()).into()),
        }
    }
}

/// Read and classify one response.
///
/// Server-reported errors come back as `Err(CqiError::Server(_))`; the
/// response has then been consumed completely.
pub fn read_response<S: ByteSource>(src: &mut S) -> Result<Response> {
    let code = codec::get_word(src)?;
    tracing::trace!("Response code 0x{:04x}", code);

    match Category::of(code) {
        Some(Category::Status) => Status::from_code(code)
            .map(Response::Status)
            .ok_or_else(|| ProtocolError::UnknownStatus(code).into()),
        Some(Category::Data) => {
            let data_type =
                DataType::from_code(code).ok_or(ProtocolError::UnknownDataType(code))?;
            Ok(Response::Data(codec::get_value(src, data_type)?))
        }
        Some(Category::Error | Category::ClError | Category::CqpError) => {
            let error = ServerError::from_code(code).ok_or(ProtocolError::UnknownCategory(code))?;
            tracing::debug!("Server reported {}", error);
            Err(error.into())
        }
        None => Err(ProtocolError::UnknownCategory(code).into()),
    }
}

// =============================================================================
// Response encoding (server side, used by test doubles and tooling)
// =============================================================================

/// Encode a status response
pub fn encode_status(status: Status) -> Bytes {
    encode_code(status.code())
}

/// Encode a bare response code, e.g. an error
pub fn encode_code(code: u16) -> Bytes {
    let mut buf = BytesMut::with_capacity(2);
    codec::put_word(&mut buf, code);
    buf.freeze()
}

/// Encode a DATA response: the shape's code followed by the payload
pub fn encode_data(value: &Value) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(16);
    codec::put_word(&mut buf, value.data_type().code());
    codec::put_value(&mut buf, value)?;
    Ok(buf.freeze())
}
