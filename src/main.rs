//! locsim - Set or clear the simulated location of a connected device
//!
//! # Usage
//!
//! ```bash
//! # Simulate a position on the first configured device
//! locsim --config locsim.toml 37.3318 -122.0312
//!
//! # Target a device by UDID
//! locsim -c locsim.toml -u 00008030-001A2C3E0E80802E 48.8584 2.2945
//!
//! # Talk to a service endpoint directly and stop simulating
//! locsim --address 127.0.0.1:27015 --stop
//! ```
//!
//! Exit status is 0 once the command has been written; no acknowledgment is
//! read from the device.

use clap::Parser;
use locsim::config::Config;
use locsim::connection;
use locsim::error::{Error, Result};
use locsim::protocol::{self, Command};
use locsim::transport::Transport;
use std::path::PathBuf;
use std::process::ExitCode;

/// Set geo location on a connected device
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target specific device by its UDID
    #[arg(short, long)]
    udid: Option<String>,

    /// Stop simulating and revert to the real location
    #[arg(short, long)]
    stop: bool,

    /// Service endpoint (host:port), bypasses the device table
    #[arg(short, long)]
    address: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable communication debugging
    #[arg(short, long)]
    debug: bool,

    /// Latitude in decimal degrees
    #[arg(
        allow_negative_numbers = true,
        required_unless_present = "stop",
        conflicts_with = "stop"
    )]
    latitude: Option<String>,

    /// Longitude in decimal degrees
    #[arg(
        allow_negative_numbers = true,
        required_unless_present = "stop",
        conflicts_with = "stop"
    )]
    longitude: Option<String>,
}

/// Everything one run needs, fixed at startup
#[derive(Debug)]
struct Invocation {
    udid: Option<String>,
    address: Option<String>,
    command: Command,
    config: Config,
}

impl Invocation {
    fn new(args: Args, config: Config) -> Result<Self> {
        let command = if args.stop {
            Command::Stop
        } else {
            match (args.latitude, args.longitude) {
                (Some(latitude), Some(longitude)) => {
                    validate_coordinate("latitude", &latitude)?;
                    validate_coordinate("longitude", &longitude)?;
                    Command::Start {
                        latitude,
                        longitude,
                    }
                }
                _ => {
                    return Err(Error::Validation(
                        "latitude and longitude are required".to_string(),
                    ));
                }
            }
        };

        Ok(Self {
            udid: args.udid,
            address: args.address,
            command,
            config,
        })
    }
}

/// Coordinates must be plain decimal numbers
fn validate_coordinate(name: &str, value: &str) -> Result<()> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(()),
        _ => Err(Error::Validation(format!(
            "{} must be a decimal number, got {:?}",
            name, value
        ))),
    }
}

fn run(invocation: &Invocation) -> Result<()> {
    let endpoint = connection::resolve(
        &invocation.config,
        invocation.udid.as_deref(),
        invocation.address.as_deref(),
    )?;
    let mut transport = connection::open(&invocation.config.service, &endpoint)?;

    let result = protocol::send(&mut transport, &invocation.command);

    if let Err(e) = transport.shutdown() {
        log::warn!("Failed to close service channel: {}", e);
    }

    result?;
    log::info!("Sent {} to {}", invocation.command, endpoint.address);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    };

    // --debug overrides the configured level
    let level = if args.debug {
        "debug"
    } else {
        config
            .as_ref()
            .map(|c| c.logging.level.as_str())
            .unwrap_or("info")
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = config
        .and_then(|config| Invocation::new(args, config))
        .and_then(|invocation| run(&invocation));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
