//! Error types for locsim

use std::io;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while encoding, decoding or transmitting a frame
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A write failed partway through a frame; the session is unusable
    #[error("Transport failure while sending {field} ({sent} frame bytes accepted): {source}")]
    TransportFailure {
        /// Frame field being written when the failure occurred
        field: &'static str,
        /// Frame bytes fully accepted before the failure
        sent: usize,
        /// Underlying transport error
        #[source]
        source: io::Error,
    },

    /// A length-prefixed field does not fit in a 32-bit length
    #[error("Field {field} is too long for the wire format ({len} bytes)")]
    FieldTooLong {
        /// Field name
        field: &'static str,
        /// Byte length of the field
        len: usize,
    },

    /// Frame ended before a complete field could be read
    #[error("Truncated frame: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required by the next field
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// Opcode is neither start nor stop
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(u32),

    /// Coordinate bytes are not valid UTF-8
    #[error("Invalid text in {field}")]
    InvalidText {
        /// Field name
        field: &'static str,
    },

    /// Bytes left over after a complete frame
    #[error("{0} trailing bytes after frame")]
    TrailingBytes(usize),
}

/// Errors raised while reaching the location simulation service
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// No configured device matches the requested identifier
    #[error("No device found with UDID {0}")]
    DeviceNotFound(String),

    /// No device requested and none configured
    #[error("No device configured, is it plugged in?")]
    NoDevice,

    /// Service address could not be resolved
    #[error("Invalid service address: {0}")]
    InvalidAddress(String),

    /// Service channel could not be opened
    #[error("Could not start {service} at {address}: {source}")]
    ServiceOpen {
        /// Logical service name
        service: String,
        /// Endpoint address
        address: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// locsim error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Protocol error
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Invalid caller-supplied value
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}
