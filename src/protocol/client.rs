//! Location simulation protocol client
//!
//! Drives a [`Transport`] until a whole frame has been accepted. Each field is
//! written in order and must be fully accepted before the next one starts;
//! short writes are continued from where they stopped. The first transport
//! error aborts the command, since the service side has no way to
//! resynchronise after a partial frame.
//!
//! No response is read after sending.

use super::command::Command;
use super::frame::{Field, Frame};
use crate::error::ProtocolError;
use crate::transport::Transport;
use std::io;

/// Encode `command` and write it to `transport`
///
/// Returns `Ok(())` only when every byte of the frame was accepted. On error
/// the session must be torn down and reopened before another attempt.
pub fn send<T: Transport + ?Sized>(transport: &mut T, command: &Command) -> Result<(), ProtocolError> {
    let frame = Frame::from_command(command)?;

    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "Sending {} ({} bytes): {:02X?}",
            command,
            frame.len(),
            frame.to_bytes()
        );
    }

    let mut sent = 0;
    for field in frame.fields() {
        write_field(transport, field, &mut sent)?;
    }

    transport
        .flush()
        .map_err(|source| ProtocolError::TransportFailure {
            field: "flush",
            sent,
            source,
        })
}

fn write_field<T: Transport + ?Sized>(
    transport: &mut T,
    field: &Field<'_>,
    sent: &mut usize,
) -> Result<(), ProtocolError> {
    let bytes = field.as_bytes();
    let mut offset = 0;

    while offset < bytes.len() {
        let remaining = bytes.len() - offset;
        let accepted = match transport.write(&bytes[offset..]) {
            // Channel closed underneath us
            Ok(0) => Err(io::Error::from(io::ErrorKind::WriteZero)),
            Ok(n) => Ok(n.min(remaining)),
            Err(e) => Err(e),
        }
        .map_err(|source| ProtocolError::TransportFailure {
            field: field.name,
            sent: *sent,
            source,
        })?;

        if accepted < remaining {
            log::trace!(
                "Short write on {}: {} of {} bytes accepted",
                field.name,
                accepted,
                remaining
            );
        }

        offset += accepted;
        *sent += accepted;
    }

    Ok(())
}

/// Protocol client bound to one open service channel
///
/// Commands go out one at a time; `&mut self` keeps a second send from
/// starting while one is in flight. The transport is neither opened nor
/// closed here.
pub struct LocationSimClient<T: Transport> {
    transport: T,
}

impl<T: Transport> LocationSimClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send any command
    pub fn send(&mut self, command: &Command) -> Result<(), ProtocolError> {
        send(&mut self.transport, command)
    }

    /// Start simulating the given position
    pub fn start(&mut self, latitude: &str, longitude: &str) -> Result<(), ProtocolError> {
        self.send(&Command::start(latitude, longitude))
    }

    /// Stop simulating
    pub fn stop(&mut self) -> Result<(), ProtocolError> {
        self.send(&Command::Stop)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back to the caller for shutdown
    pub fn into_inner(self) -> T {
        self.transport
    }
}
