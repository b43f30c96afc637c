//! Request encoding
//!
//! A request is an opcode WORD followed by the operation's arguments in
//! declared order, with no framing around them. Requests are assembled in
//! memory and sent with a single write.

use bytes::{Bytes, BytesMut};

use super::codec;
use super::opcode::{Field, Opcode};
use crate::error::Result;

/// An encoded request, built argument by argument
#[derive(Debug, Clone)]
pub struct Request {
    opcode: Opcode,
    buf: BytesMut,
}

impl Request {
    /// Start a request for the given operation
    pub fn new(opcode: Opcode) -> Self {
        let mut buf = BytesMut::with_capacity(64);
        codec::put_word(&mut buf, opcode.code());
        Self { opcode, buf }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn byte(mut self, value: u8) -> Self {
        codec::put_byte(&mut self.buf, value);
        self
    }

    pub fn field(self, field: Field) -> Self {
        self.byte(field.code())
    }

    pub fn bool(mut self, value: bool) -> Self {
        codec::put_bool(&mut self.buf, value);
        self
    }

    pub fn int(mut self, value: i32) -> Self {
        codec::put_int(&mut self.buf, value);
        self
    }

    pub fn string(mut self, value: &str) -> Result<Self> {
        codec::put_string(&mut self.buf, value)?;
        Ok(self)
    }

    pub fn int_list(mut self, values: &[i32]) -> Result<Self> {
        codec::put_int_list(&mut self.buf, values)?;
        Ok(self)
    }

    pub fn string_list<S: AsRef<str>>(mut self, values: &[S]) -> Result<Self> {
        codec::put_string_list(&mut self.buf, values)?;
        Ok(self)
    }

    /// The complete wire bytes
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}
