//! Location simulation commands

use super::frame::Frame;
use super::wire::WireReader;
use super::{OP_START, OP_STOP};
use crate::error::ProtocolError;
use std::fmt;

/// Command understood by the location simulation service
///
/// Coordinates are carried as decimal text, exactly as supplied. This type
/// does not check their syntax or range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start reporting the given position
    Start { latitude: String, longitude: String },
    /// Stop simulating, device reverts to its real position
    Stop,
}

impl Command {
    /// Build a start command
    pub fn start(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Command::Start {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Wire opcode for this command
    pub fn opcode(&self) -> u32 {
        match self {
            Command::Start { .. } => OP_START,
            Command::Stop => OP_STOP,
        }
    }

    /// Encode the complete frame into one buffer
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(Frame::from_command(self)?.to_bytes())
    }

    /// Decode exactly one frame
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let (command, consumed) = Self::decode_prefix(bytes)?;
        match bytes.len() - consumed {
            0 => Ok(command),
            n => Err(ProtocolError::TrailingBytes(n)),
        }
    }

    /// Decode the frame at the start of `bytes`
    ///
    /// Returns the command and the number of bytes it occupied, so a stream
    /// holding several frames can be split.
    pub fn decode_prefix(bytes: &[u8]) -> Result<(Self, usize), ProtocolError> {
        let mut reader = WireReader::new(bytes);
        let command = match reader.read_u32()? {
            OP_START => {
                let latitude = read_text(&mut reader, "latitude")?;
                let longitude = read_text(&mut reader, "longitude")?;
                Command::Start {
                    latitude,
                    longitude,
                }
            }
            OP_STOP => Command::Stop,
            other => return Err(ProtocolError::UnknownOpcode(other)),
        };

        Ok((command, bytes.len() - reader.remaining()))
    }
}

fn read_text(reader: &mut WireReader<'_>, field: &'static str) -> Result<String, ProtocolError> {
    let bytes = reader.read_prefixed()?;
    String::from_utf8(bytes.to_vec()).map_err(|_| ProtocolError::InvalidText { field })
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start {
                latitude,
                longitude,
            } => write!(f, "start ({}, {})", latitude, longitude),
            Command::Stop => write!(f, "stop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_encoding() {
        assert_eq!(Command::Stop.encode().unwrap(), vec![0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_start_encoding() {
        let bytes = Command::start("37.3318", "-122.0312").encode().unwrap();

        let mut expected = vec![0, 0, 0, 0, 0, 0, 0, 7];
        expected.extend_from_slice(b"37.3318");
        expected.extend_from_slice(&[0, 0, 0, 9]);
        expected.extend_from_slice(b"-122.0312");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_start_length_counts_utf8_bytes() {
        // Arabic-Indic digits are two bytes each in UTF-8
        let lat = "٣٧.٥";
        let lng = "1.5";
        let bytes = Command::start(lat, lng).encode().unwrap();

        assert_eq!(bytes.len(), 12 + lat.len() + lng.len());
        assert_eq!(&bytes[4..8], &(lat.len() as u32).to_be_bytes());
        assert_eq!(&bytes[8..8 + lat.len()], lat.as_bytes());
    }

    #[test]
    fn test_decode_start() {
        let original = Command::start("48.8584", "2.2945");
        let bytes = original.encode().unwrap();
        assert_eq!(Command::decode(&bytes).unwrap(), original);
    }

    #[test]
    fn test_decode_stop() {
        assert_eq!(Command::decode(&[0, 0, 0, 1]).unwrap(), Command::Stop);
    }

    #[test]
    fn test_decode_unknown_opcode() {
        assert!(matches!(
            Command::decode(&[0, 0, 0, 2]),
            Err(ProtocolError::UnknownOpcode(2))
        ));
    }

    #[test]
    fn test_decode_truncated_start() {
        let bytes = Command::start("10.0", "20.0").encode().unwrap();
        let result = Command::decode(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(ProtocolError::Truncated { .. })));
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let result = Command::decode(&[0, 0, 0, 1, 0, 0]);
        assert!(matches!(result, Err(ProtocolError::TrailingBytes(2))));
    }

    #[test]
    fn test_decode_invalid_text() {
        let bytes = [0, 0, 0, 0, 0, 0, 0, 1, 0xFF, 0, 0, 0, 1, b'1'];
        assert!(matches!(
            Command::decode(&bytes),
            Err(ProtocolError::InvalidText { field: "latitude" })
        ));
    }

    #[test]
    fn test_decode_prefix_splits_stream() {
        let mut stream = Command::start("1.5", "2.5").encode().unwrap();
        stream.extend(Command::Stop.encode().unwrap());

        let (first, used) = Command::decode_prefix(&stream).unwrap();
        assert_eq!(first, Command::start("1.5", "2.5"));
        assert_eq!(used, 12 + 3 + 3);

        let (second, rest) = Command::decode_prefix(&stream[used..]).unwrap();
        assert_eq!(second, Command::Stop);
        assert_eq!(rest, 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::start("1.5", "-2.5").to_string(), "start (1.5, -2.5)");
        assert_eq!(Command::Stop.to_string(), "stop");
    }
}
