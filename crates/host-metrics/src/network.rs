// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Hostname and outbound IP discovery.
//!
//! The outbound address is found by "connecting" a UDP socket to a public
//! resolver and asking the kernel which local address it would route from.
//! `connect` on a UDP socket sends no packet and never blocks: it is a
//! kernel route lookup, so the probe returns in microseconds whether or
//! not a network is up.

use crate::thermal::read_sysfs_file;
use crate::MonitorError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::path::Path;

/// Kernel hostname file.
pub(crate) const HOSTNAME_PATH: &str = "/proc/sys/kernel/hostname";

/// Destination used only for route selection.
const PROBE_TARGET: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 80);

/// Reads the kernel hostname.
pub fn read_hostname() -> Result<String, MonitorError> {
    read_hostname_from(Path::new(HOSTNAME_PATH))
}

pub(crate) fn read_hostname_from(path: &Path) -> Result<String, MonitorError> {
    let name = read_sysfs_file(path)?;
    if name.is_empty() {
        return Err(MonitorError::ParseError {
            path: path.display().to_string(),
            detail: "hostname is empty".to_string(),
        });
    }
    Ok(name)
}

/// Returns the local address used for outbound traffic, if any.
///
/// `None` means "not connected yet": no route, socket failure, or an
/// address that is not usable (unspecified or loopback).
pub fn probe_outbound_ip() -> Option<IpAddr> {
    probe_route(PROBE_TARGET)
}

fn probe_route(target: SocketAddr) -> Option<IpAddr> {
    let result = (|| -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect(target)?;
        Ok(socket.local_addr()?.ip())
    })();

    match result {
        Ok(ip) if is_usable(ip) => Some(ip),
        Ok(ip) => {
            tracing::trace!(%ip, "route probe returned unusable address");
            None
        }
        Err(e) => {
            tracing::trace!(error = %e, "route probe failed");
            None
        }
    }
}

/// An address worth showing: not `0.0.0.0` and not loopback.
pub fn is_usable(ip: IpAddr) -> bool {
    !ip.is_unspecified() && !ip.is_loopback()
}
