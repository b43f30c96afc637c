//! Protocol Module
//!
//! Defines the CQi wire protocol: a strictly alternating exchange of one
//! request and one response over a TCP stream.
//!
//! ## Request Format
//! ```text
//! ┌──────────────┬──────────────────────────────────────┐
//! │ Opcode (2)   │ Arguments, in declared order          │
//! └──────────────┴──────────────────────────────────────┘
//! ```
//!
//! ## Response Format
//! ```text
//! ┌──────────────┬──────────────────────────────────────┐
//! │ Code (2)     │ Payload (DATA responses only)         │
//! └──────────────┴──────────────────────────────────────┘
//! ```
//!
//! ## Response Categories (high byte of the code)
//! - 0x01: ERROR      - general / control errors
//! - 0x02: STATUS     - OK, CONNECT_OK, BYE_OK, PING_OK
//! - 0x03: DATA       - payload shape given by the low byte
//! - 0x04: CL_ERROR   - corpus library errors
//! - 0x05: CQP_ERROR  - query processor errors

pub mod codec;
mod codes;
mod opcode;
mod request;
mod response;
mod value;

pub use codec::ByteSource;
pub use codes::{Category, DataType, ErrorKind, ServerError, Status};
pub use opcode::{Field, Opcode};
pub use request::Request;
pub use response::{encode_code, encode_data, encode_status, read_response, Response};
pub use value::{FromValue, IntTable, Value};
