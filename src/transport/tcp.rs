//! TCP transport implementation

use super::Transport;
use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

/// TCP transport for a service channel exposed on a socket
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    /// Connect to a service endpoint
    ///
    /// # Arguments
    /// * `addr` - Endpoint address (e.g., 127.0.0.1:27015)
    /// * `connect_timeout` - Upper bound on connection setup
    /// * `write_timeout` - Per-write timeout, `None` blocks indefinitely
    pub fn connect(
        addr: &SocketAddr,
        connect_timeout: Duration,
        write_timeout: Option<Duration>,
    ) -> io::Result<Self> {
        let stream = TcpStream::connect_timeout(addr, connect_timeout)?;
        stream.set_write_timeout(write_timeout)?;
        stream.set_nodelay(true)?;

        log::debug!("Connected to {}", addr);

        Ok(TcpTransport { stream })
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream) -> Self {
        TcpTransport { stream }
    }

    /// Peer address of the channel
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.stream.peer_addr()
    }
}

impl Transport for TcpTransport {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        loop {
            match self.stream.write(data) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            // Peer already went away
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            result => result,
        }
    }
}
