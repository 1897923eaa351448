//! Mock transport for testing

use super::Transport;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock transport for unit testing
///
/// Clones share the same state, so a test can keep a handle while the client
/// owns the transport.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

struct MockTransportInner {
    write_buffer: Vec<u8>,
    /// Maximum bytes accepted per write call
    max_chunk: Option<usize>,
    /// Total bytes accepted before every write fails
    fail_after: Option<usize>,
    /// Number of write calls, including failed ones
    write_calls: usize,
    /// Write calls made after a failure was reported
    writes_after_failure: usize,
    failed: bool,
    shut_down: bool,
}

impl MockTransport {
    /// Create a new mock transport that accepts everything
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(Mutex::new(MockTransportInner {
                write_buffer: Vec::new(),
                max_chunk: None,
                fail_after: None,
                write_calls: 0,
                writes_after_failure: 0,
                failed: false,
                shut_down: false,
            })),
        }
    }

    /// Accept at most `max_chunk` bytes per write call
    pub fn with_max_chunk(self, max_chunk: usize) -> Self {
        self.lock().max_chunk = Some(max_chunk);
        self
    }

    /// Fail every write once `limit` bytes have been accepted
    pub fn with_fail_after(self, limit: usize) -> Self {
        self.lock().fail_after = Some(limit);
        self
    }

    /// Get all written data
    pub fn get_written(&self) -> Vec<u8> {
        self.lock().write_buffer.clone()
    }

    /// Clear written data
    pub fn clear_written(&self) {
        self.lock().write_buffer.clear();
    }

    /// Number of write calls seen so far
    pub fn write_calls(&self) -> usize {
        self.lock().write_calls
    }

    /// Number of write calls made after a failure had been reported
    pub fn writes_after_failure(&self) -> usize {
        self.lock().writes_after_failure
    }

    /// Whether `shutdown` was called
    pub fn is_shut_down(&self) -> bool {
        self.lock().shut_down
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut inner = self.lock();
        inner.write_calls += 1;

        if inner.shut_down {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "mock transport shut down"));
        }
        if inner.failed {
            inner.writes_after_failure += 1;
        }

        let mut accept = data.len();
        if let Some(max_chunk) = inner.max_chunk {
            accept = accept.min(max_chunk);
        }
        if let Some(limit) = inner.fail_after {
            let remaining = limit.saturating_sub(inner.write_buffer.len());
            if remaining == 0 && !data.is_empty() {
                inner.failed = true;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock transport failure"));
            }
            accept = accept.min(remaining);
        }

        inner.write_buffer.extend_from_slice(&data[..accept]);
        Ok(accept)
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.lock().shut_down = true;
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}
