//! Transport layer for I/O abstraction
//!
//! The protocol client only needs a blocking "write up to N bytes" primitive.
//! Opening and closing the channel belongs to whoever created the transport.

use std::io;

mod mock;
mod tcp;

pub use mock::MockTransport;
pub use tcp::TcpTransport;

/// Byte channel bound to the location simulation service
pub trait Transport {
    /// Write data from buffer, returns number of bytes accepted
    ///
    /// May accept fewer bytes than offered (short write).
    fn write(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Flush any pending writes (blocking until complete)
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Close the channel; called by the owner after the last command
    fn shutdown(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        (**self).write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        (**self).shutdown()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        (**self).write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        (**self).shutdown()
    }
}
