//! Service channel setup
//!
//! Resolves which endpoint serves the requested device and opens a
//! [`TcpTransport`] to it. Discovery and pairing happen elsewhere; by the
//! time an endpoint is listed here it is expected to speak the location
//! simulation protocol directly.

use crate::config::{Config, ServiceConfig};
use crate::error::ConnectionError;
use crate::transport::TcpTransport;
use std::net::{SocketAddr, ToSocketAddrs};

/// Where a device's service channel can be reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Device identifier, if the endpoint came from the device table
    pub udid: Option<String>,
    pub address: SocketAddr,
}

/// Pick the endpoint for a device
///
/// An explicit `address` wins. Otherwise `udid` must name a configured
/// device; with neither, the first configured device is used.
pub fn resolve(
    config: &Config,
    udid: Option<&str>,
    address: Option<&str>,
) -> Result<Endpoint, ConnectionError> {
    if let Some(address) = address {
        return Ok(Endpoint {
            udid: udid.map(str::to_string),
            address: parse_address(address)?,
        });
    }

    let device = match udid {
        Some(udid) => config
            .device(udid)
            .ok_or_else(|| ConnectionError::DeviceNotFound(udid.to_string()))?,
        None => config.devices.first().ok_or(ConnectionError::NoDevice)?,
    };

    Ok(Endpoint {
        udid: Some(device.udid.clone()),
        address: parse_address(&device.address)?,
    })
}

/// Open the service channel at `endpoint`
pub fn open(service: &ServiceConfig, endpoint: &Endpoint) -> Result<TcpTransport, ConnectionError> {
    let transport = TcpTransport::connect(
        &endpoint.address,
        service.connect_timeout(),
        service.write_timeout(),
    )
    .map_err(|source| ConnectionError::ServiceOpen {
        service: service.name.clone(),
        address: endpoint.address.to_string(),
        source,
    })?;

    log::info!(
        "Service {} opened at {} (device: {})",
        service.name,
        endpoint.address,
        endpoint.udid.as_deref().unwrap_or("unspecified")
    );

    Ok(transport)
}

fn parse_address(address: &str) -> Result<SocketAddr, ConnectionError> {
    address
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| ConnectionError::InvalidAddress(address.to_string()))
}
