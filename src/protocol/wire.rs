//! Big-endian field encoding shared by every frame field
//!
//! All integers on the wire are 4-byte big-endian (network byte order).

use crate::error::ProtocolError;

/// Size of every integer field on the wire
pub const WORD_SIZE: usize = 4;

/// Encode a u32 in network byte order
#[inline]
pub fn encode_u32(value: u32) -> [u8; WORD_SIZE] {
    value.to_be_bytes()
}

/// Encode a byte length as a u32 length prefix
pub fn encode_len(field: &'static str, len: usize) -> Result<[u8; WORD_SIZE], ProtocolError> {
    u32::try_from(len)
        .map(encode_u32)
        .map_err(|_| ProtocolError::FieldTooLong { field, len })
}

/// Cursor over a received frame
pub struct WireReader<'a> {
    buf: &'a [u8],
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Read a big-endian u32
    pub fn read_u32(&mut self) -> Result<u32, ProtocolError> {
        let bytes = self.take(WORD_SIZE)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a u32 length prefix followed by that many bytes
    pub fn read_prefixed(&mut self) -> Result<&'a [u8], ProtocolError> {
        let len = self.read_u32()? as usize;
        self.take(len)
    }

    /// Bytes not consumed yet
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], ProtocolError> {
        if self.buf.len() < needed {
            return Err(ProtocolError::Truncated {
                needed,
                available: self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(needed);
        self.buf = tail;
        Ok(head)
    }
}
