//! End-to-end protocol session tests
//!
//! Drives the public API against the mock transport and against a loopback
//! TCP listener standing in for the device-side service. The listener decodes
//! whatever arrives with `Command::decode_prefix`, the same way the service
//! parses a byte stream with no out-of-band framing.
//!
//! Run with: `cargo test --test protocol_session`

use locsim::config::{Config, DeviceConfig};
use locsim::connection;
use locsim::protocol::{Command, LocationSimClient, send};
use locsim::transport::{MockTransport, Transport};
use locsim::{ConnectionError, ProtocolError};
use std::io::Read;
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

// ============================================================================
// Helpers
// ============================================================================

/// Accept one connection, read until EOF and decode every frame
fn spawn_device() -> (std::net::SocketAddr, JoinHandle<Vec<Command>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        stream.read_to_end(&mut received).unwrap();

        let mut commands = Vec::new();
        let mut offset = 0;
        while offset < received.len() {
            let (command, used) = Command::decode_prefix(&received[offset..]).unwrap();
            commands.push(command);
            offset += used;
        }
        commands
    });

    (addr, handle)
}

fn config_for(udid: &str, addr: std::net::SocketAddr) -> Config {
    let mut config = Config::default();
    config.devices.push(DeviceConfig {
        udid: udid.to_string(),
        address: addr.to_string(),
    });
    config
}

// ============================================================================
// Wire scenarios
// ============================================================================

#[test]
fn start_scenario_bytes() {
    let mut transport = MockTransport::new();
    send(&mut transport, &Command::start("37.3318", "-122.0312")).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x07]);
    expected.extend_from_slice(b"37.3318");
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x09]);
    expected.extend_from_slice(b"-122.0312");

    assert_eq!(transport.get_written(), expected);
    assert_eq!(expected.len(), 4 + 4 + 7 + 4 + 9);
}

#[test]
fn stop_scenario_bytes() {
    let mut transport = MockTransport::new();
    send(&mut transport, &Command::Stop).unwrap();
    assert_eq!(transport.get_written(), vec![0x00, 0x00, 0x00, 0x01]);
}

#[test]
fn frame_matches_encode_under_any_chunking() {
    let command = Command::start("-33.856784", "151.215297");
    let expected = command.encode().unwrap();

    for chunk in [1, 2, 3, 5, 7, 64] {
        let mut transport = MockTransport::new().with_max_chunk(chunk);
        send(&mut transport, &command).unwrap();
        assert_eq!(transport.get_written(), expected, "chunk size {}", chunk);
    }
}

#[test]
fn failure_after_n_bytes_is_not_retried() {
    let command = Command::start("35.6586", "139.7454");
    let expected = command.encode().unwrap();

    for limit in 0..expected.len() {
        let handle = MockTransport::new().with_fail_after(limit);
        let mut client = LocationSimClient::new(handle.clone());

        let err = client.send(&command).unwrap_err();
        match err {
            ProtocolError::TransportFailure { sent, .. } => assert_eq!(sent, limit),
            other => panic!("limit {}: unexpected error {:?}", limit, other),
        }

        // Delivered bytes are an exact prefix: nothing resent, nothing skipped
        assert_eq!(handle.get_written(), &expected[..limit]);
        assert_eq!(handle.writes_after_failure(), 0);
    }
}

#[test]
fn repeated_commands_on_one_transport() {
    let handle = MockTransport::new().with_max_chunk(2);
    let mut client = LocationSimClient::new(handle.clone());

    client.start("10.0", "20.0").unwrap();
    client.start("10.5", "20.5").unwrap();
    client.stop().unwrap();
    client.stop().unwrap();

    let mut expected = Command::start("10.0", "20.0").encode().unwrap();
    expected.extend(Command::start("10.5", "20.5").encode().unwrap());
    expected.extend(Command::Stop.encode().unwrap());
    expected.extend(Command::Stop.encode().unwrap());
    assert_eq!(handle.get_written(), expected);
}

// ============================================================================
// Loopback service
// ============================================================================

#[test]
fn loopback_session_delivers_frames_in_order() {
    let (addr, device) = spawn_device();
    let config = config_for("phone", addr);

    let endpoint = connection::resolve(&config, Some("phone"), None).unwrap();
    let mut transport = connection::open(&config.service, &endpoint).unwrap();

    send(&mut transport, &Command::start("37.3318", "-122.0312")).unwrap();
    send(&mut transport, &Command::Stop).unwrap();
    transport.shutdown().unwrap();

    assert_eq!(
        device.join().unwrap(),
        vec![Command::start("37.3318", "-122.0312"), Command::Stop]
    );
}

#[test]
fn unknown_device_is_a_connection_error() {
    let config = config_for("phone", "127.0.0.1:27015".parse().unwrap());
    let err = connection::resolve(&config, Some("tablet"), None).unwrap_err();
    assert!(matches!(err, ConnectionError::DeviceNotFound(_)));
}
