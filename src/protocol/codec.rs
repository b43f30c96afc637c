//! Protocol codec
//!
//! Encoding and decoding of the primitive and composite wire types.
//!
//! ## Wire Format
//!
//! All integers are big-endian.
//!
//! ```text
//! BYTE    ┌────────┐           WORD  ┌────────────┐
//!         │ u8 (1) │                 │  u16 (2)   │
//!         └────────┘                 └────────────┘
//! BOOL    ┌────────┐           INT   ┌────────────────────────┐
//!         │ 0 / 1  │                 │       i32 (4)          │
//!         └────────┘                 └────────────────────────┘
//! STRING  ┌────────────┬──────────────────────────┐
//!         │ Len (WORD) │  UTF-8 bytes (Len)       │
//!         └────────────┴──────────────────────────┘
//! LIST<T> ┌────────────┬───────┬───────┬─────┐
//!         │ Count(INT) │  T_0  │  T_1  │ ... │
//!         └────────────┴───────┴───────┴─────┘
//! TABLE   ┌───────────┬───────────┬──────────────────────────┐
//!         │ Rows(INT) │ Cols(INT) │ Rows x Cols INT, row-major│
//!         └───────────┴───────────┴──────────────────────────┘
//! ```
//!
//! Tuples are their members concatenated without a count.
//!
//! Decoders pull bytes from a [`ByteSource`]; they never pick a shape on
//! their own, the response classifier tells them which one to read.

use bytes::{Buf, BufMut, Bytes};

use super::codes::DataType;
use super::value::{IntTable, Value};
use crate::error::{CqiError, ProtocolError, Result};

/// Maximum byte length of a STRING (its length prefix is a WORD)
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Upper bound on list capacity reserved before elements actually arrive
const PREALLOC_LIMIT: usize = 4096;

/// Something that hands out exactly the number of bytes asked for
pub trait ByteSource {
    /// Return exactly `n` bytes, or fail
    fn recv_exact(&mut self, n: usize) -> Result<Bytes>;
}

/// In-memory source, mostly useful for decoding captured responses
impl ByteSource for Bytes {
    fn recv_exact(&mut self, n: usize) -> Result<Bytes> {
        if self.len() < n {
            return Err(CqiError::ConnectionClosed {
                expected: n,
                received: self.len(),
            });
        }
        Ok(self.split_to(n))
    }
}

// =============================================================================
// Encoding
// =============================================================================

pub fn put_byte<B: BufMut>(buf: &mut B, value: u8) {
    buf.put_u8(value);
}

pub fn put_bool<B: BufMut>(buf: &mut B, value: bool) {
    buf.put_u8(value as u8);
}

pub fn put_word<B: BufMut>(buf: &mut B, value: u16) {
    buf.put_u16(value);
}

pub fn put_int<B: BufMut>(buf: &mut B, value: i32) {
    buf.put_i32(value);
}

/// Encode a STRING; fails if the UTF-8 form does not fit a WORD length
pub fn put_string<B: BufMut>(buf: &mut B, value: &str) -> Result<()> {
    let len = value.len();
    if len > MAX_STRING_LEN {
        return Err(CqiError::Encoding(format!(
            "string of {} bytes exceeds maximum of {} bytes",
            len, MAX_STRING_LEN
        )));
    }
    buf.put_u16(len as u16);
    buf.put_slice(value.as_bytes());
    Ok(())
}

/// Encode a list element count
fn put_count<B: BufMut>(buf: &mut B, count: usize) -> Result<()> {
    let count = i32::try_from(count)
        .map_err(|_| CqiError::Encoding(format!("list of {} elements is too long", count)))?;
    buf.put_i32(count);
    Ok(())
}

pub fn put_byte_list<B: BufMut>(buf: &mut B, values: &[u8]) -> Result<()> {
    put_count(buf, values.len())?;
    buf.put_slice(values);
    Ok(())
}

pub fn put_bool_list<B: BufMut>(buf: &mut B, values: &[bool]) -> Result<()> {
    put_count(buf, values.len())?;
    for &value in values {
        put_bool(buf, value);
    }
    Ok(())
}

pub fn put_int_list<B: BufMut>(buf: &mut B, values: &[i32]) -> Result<()> {
    put_count(buf, values.len())?;
    for &value in values {
        buf.put_i32(value);
    }
    Ok(())
}

pub fn put_string_list<B: BufMut, S: AsRef<str>>(buf: &mut B, values: &[S]) -> Result<()> {
    put_count(buf, values.len())?;
    for value in values {
        put_string(buf, value.as_ref())?;
    }
    Ok(())
}

pub fn put_int_table<B: BufMut>(buf: &mut B, table: &IntTable) -> Result<()> {
    put_count(buf, table.rows())?;
    put_count(buf, table.columns())?;
    for &cell in table.cells() {
        buf.put_i32(cell);
    }
    Ok(())
}

/// Encode the payload of a value (without any response code)
pub fn put_value<B: BufMut>(buf: &mut B, value: &Value) -> Result<()> {
    match value {
        Value::Byte(v) => put_byte(buf, *v),
        Value::Bool(v) => put_bool(buf, *v),
        Value::Int(v) => put_int(buf, *v),
        Value::String(v) => put_string(buf, v)?,
        Value::ByteList(v) => put_byte_list(buf, v)?,
        Value::BoolList(v) => put_bool_list(buf, v)?,
        Value::IntList(v) => put_int_list(buf, v)?,
        Value::StringList(v) => put_string_list(buf, v)?,
        Value::IntInt(a, b) => {
            put_int(buf, *a);
            put_int(buf, *b);
        }
        Value::IntIntIntInt(a, b, c, d) => {
            for v in [a, b, c, d] {
                put_int(buf, *v);
            }
        }
        Value::IntTable(table) => put_int_table(buf, table)?,
    }
    Ok(())
}

// =============================================================================
// Decoding
// =============================================================================

pub fn get_byte<S: ByteSource>(src: &mut S) -> Result<u8> {
    Ok(src.recv_exact(1)?.get_u8())
}

/// Decode a BOOL; any non-zero byte is `true`
pub fn get_bool<S: ByteSource>(src: &mut S) -> Result<bool> {
    Ok(get_byte(src)? != 0)
}

pub fn get_word<S: ByteSource>(src: &mut S) -> Result<u16> {
    Ok(src.recv_exact(2)?.get_u16())
}

pub fn get_int<S: ByteSource>(src: &mut S) -> Result<i32> {
    Ok(src.recv_exact(4)?.get_i32())
}

pub fn get_string<S: ByteSource>(src: &mut S) -> Result<String> {
    let len = get_word(src)? as usize;
    let bytes = src.recv_exact(len)?;
    String::from_utf8(bytes.to_vec())
        .map_err(|e| CqiError::Encoding(format!("invalid UTF-8 in string: {}", e)))
}

/// Decode a non-negative INT used as a count or dimension
fn get_count<S: ByteSource>(src: &mut S) -> Result<usize> {
    let count = get_int(src)?;
    usize::try_from(count).map_err(|_| ProtocolError::NegativeLength(count).into())
}

/// Decode a LIST<T>, reading exactly as many elements as announced
pub fn get_list<S, T, F>(src: &mut S, mut element: F) -> Result<Vec<T>>
where
    S: ByteSource,
    F: FnMut(&mut S) -> Result<T>,
{
    let count = get_count(src)?;
    let mut values = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        values.push(element(src)?);
    }
    Ok(values)
}

pub fn get_int_table<S: ByteSource>(src: &mut S) -> Result<IntTable> {
    let rows = get_count(src)?;
    let columns = get_count(src)?;
    let malformed = || ProtocolError::MalformedTable { rows, columns };

    // The cell count is bounded like any other wire count
    let len = rows
        .checked_mul(columns)
        .filter(|&len| len <= i32::MAX as usize)
        .ok_or_else(malformed)?;
    let mut cells = Vec::with_capacity(len.min(PREALLOC_LIMIT));
    for _ in 0..len {
        cells.push(get_int(src)?);
    }
    IntTable::new(rows, columns, cells).ok_or_else(|| malformed().into())
}

/// Decode a payload of the given shape
pub fn get_value<S: ByteSource>(src: &mut S, data_type: DataType) -> Result<Value> {
    let value = match data_type {
        DataType::Byte => Value::Byte(get_byte(src)?),
        DataType::Bool => Value::Bool(get_bool(src)?),
        DataType::Int => Value::Int(get_int(src)?),
        DataType::String => Value::String(get_string(src)?),
        DataType::ByteList => Value::ByteList(get_list(src, get_byte)?),
        DataType::BoolList => Value::BoolList(get_list(src, get_bool)?),
        DataType::IntList => Value::IntList(get_list(src, get_int)?),
        DataType::StringList => Value::StringList(get_list(src, get_string)?),
        DataType::IntInt => Value::IntInt(get_int(src)?, get_int(src)?),
        DataType::IntIntIntInt => {
            Value::IntIntIntInt(get_int(src)?, get_int(src)?, get_int(src)?, get_int(src)?)
        }
        DataType::IntTable => Value::IntTable(get_int_table(src)?),
    };
    Ok(value)
}
