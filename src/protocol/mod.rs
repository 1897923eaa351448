//! Location simulation wire protocol
//!
//! # Frame Layout
//!
//! ```text
//! ┌──────────────┬─────────────┬─────────────┬─────────────┬─────────────┐
//! │ Opcode (4)   │ Lat len (4) │ Lat bytes   │ Lng len (4) │ Lng bytes   │
//! │ Big-endian   │ Big-endian  │ UTF-8 text  │ Big-endian  │ UTF-8 text  │
//! └──────────────┴─────────────┴─────────────┴─────────────┴─────────────┘
//!                 └──────────────── start only ──────────────────────────┘
//! ```
//!
//! - **Opcode**: `0` = start, `1` = stop
//! - **Strings**: length prefix counts bytes; no terminator, no padding
//! - **Response**: none, the service is fire-and-forget
//!
//! # Example
//!
//! ```no_run
//! use locsim::protocol::{Command, send};
//! use locsim::transport::TcpTransport;
//! use std::time::Duration;
//!
//! let addr = "127.0.0.1:27015".parse()?;
//! let mut transport = TcpTransport::connect(&addr, Duration::from_secs(5), None)?;
//! send(&mut transport, &Command::start("37.3318", "-122.0312"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod command;
mod frame;
pub mod wire;

pub use client::{LocationSimClient, send};
pub use command::Command;
pub use frame::{Field, FieldData, Frame};

/// Start simulating a position
pub const OP_START: u32 = 0;
/// Stop simulating
pub const OP_STOP: u32 = 1;
