//! locsim - Location simulation client for mobile devices
//!
//! Sends start/stop position simulation commands to a device's location
//! simulation service over an already open byte channel.
//!
//! ## Modules
//!
//! - `protocol`: frame encoding and the send discipline
//! - `transport`: the byte channel abstraction, TCP and mock implementations
//! - `connection`: resolves a device to its service endpoint and opens it
//! - `config`: TOML configuration

pub mod config;
pub mod connection;
pub mod error;
pub mod protocol;
pub mod transport;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConnectionError, Error, ProtocolError, Result};
pub use protocol::{Command, LocationSimClient};
