//! Frame layout for location simulation commands
//!
//! A frame is built completely before transmission so that nothing is sent
//! for a command that cannot be encoded.

use super::command::Command;
use super::wire::{WORD_SIZE, encode_len, encode_u32};
use crate::error::ProtocolError;

/// Payload of a single frame field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldData<'a> {
    /// 4-byte big-endian integer
    Word([u8; WORD_SIZE]),
    /// Raw bytes, no terminator
    Bytes(&'a [u8]),
}

/// One field of a frame, sent as a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'static str,
    pub data: FieldData<'a>,
}

impl Field<'_> {
    pub fn as_bytes(&self) -> &[u8] {
        match self.data {
            FieldData::Word(ref word) => &word[..],
            FieldData::Bytes(bytes) => bytes,
        }
    }
}

/// Ordered field sequence for one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    fields: Vec<Field<'a>>,
}

impl<'a> Frame<'a> {
    /// Lay out the frame for a command
    pub fn from_command(command: &'a Command) -> Result<Self, ProtocolError> {
        let mut fields = vec![Field {
            name: "opcode",
            data: FieldData::Word(encode_u32(command.opcode())),
        }];

        if let Command::Start {
            latitude,
            longitude,
        } = command
        {
            fields.push(Field {
                name: "lat_len",
                data: FieldData::Word(encode_len("lat_bytes", latitude.len())?),
            });
            fields.push(Field {
                name: "lat_bytes",
                data: FieldData::Bytes(latitude.as_bytes()),
            });
            fields.push(Field {
                name: "lng_len",
                data: FieldData::Word(encode_len("lng_bytes", longitude.len())?),
            });
            fields.push(Field {
                name: "lng_bytes",
                data: FieldData::Bytes(longitude.as_bytes()),
            });
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    /// Total encoded length
    pub fn len(&self) -> usize {
        self.fields.iter().map(|f| f.as_bytes().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate all fields
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for field in &self.fields {
            out.extend_from_slice(field.as_bytes());
        }
        out
    }
}
