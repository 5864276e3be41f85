// PathSim: Packet Forwarding Path Simulator written in Rust
// Copyright (C) 2023-2024 The PathSim developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Ping simulator
//!
//! A ping is two *independent* forwarding-path computations: origin to destination, and
//! destination back to origin. The return path is a fresh search, not a reversal of the
//! forward path; with asymmetric routing tables the two may legitimately differ, and one may
//! fail while the other succeeds.

use std::net::Ipv4Addr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    addressing::resolve_address,
    forwarding::find_path,
    topology::Topology,
    types::{NetworkError, NodeId, Path},
};

/// Outcome of a simulated ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PingOutcome {
    /// Both directions found a path.
    Reply {
        /// The hop sequence from origin to destination.
        forward: Path,
        /// The hop sequence from destination back to origin.
        back: Path,
        /// The destination address as seen by the last approaching hop (a multi-interface
        /// destination reports the interface actually facing the forward path).
        destination_address: Option<Ipv4Addr>,
    },
    /// The forward search found no route.
    ForwardUnreachable,
    /// The forward path exists, but the return search found no route.
    ReturnUnreachable {
        /// The hop sequence from origin to destination.
        forward: Path,
    },
}

/// Result record of a simulated ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingReport {
    /// The origin device.
    pub origin: NodeId,
    /// The destination device.
    pub destination: NodeId,
    /// The outcome, including the computed paths.
    pub outcome: PingOutcome,
}

impl PingReport {
    /// Returns `true` if and only if both directions found a path.
    pub fn success(&self) -> bool {
        matches!(self.outcome, PingOutcome::Reply { .. })
    }
}

/// Simulate a ping between two devices. Errors are raised only for node IDs missing from the
/// topology; an unreachable destination (in either direction) is a reported outcome.
pub fn ping(
    top: &Topology,
    origin: NodeId,
    destination: NodeId,
) -> Result<PingReport, NetworkError> {
    let report = |outcome| PingReport {
        origin,
        destination,
        outcome,
    };

    let forward = match find_path(top, origin, destination)? {
        Some(path) => path,
        None => {
            debug!(
                "ping {} -> {}: forward path failed",
                top.get_device_name(origin).unwrap_or("?"),
                top.get_device_name(destination).unwrap_or("?"),
            );
            return Ok(report(PingOutcome::ForwardUnreachable));
        }
    };
    let back = match find_path(top, destination, origin)? {
        Some(path) => path,
        None => {
            debug!(
                "ping {} -> {}: return path failed",
                top.get_device_name(origin).unwrap_or("?"),
                top.get_device_name(destination).unwrap_or("?"),
            );
            return Ok(report(PingOutcome::ReturnUnreachable { forward }));
        }
    };

    // report the interface facing the approaching hop
    let destination_address = if forward.len() >= 2 {
        resolve_address(top, destination, Some(forward[forward.len() - 2].node))
    } else {
        resolve_address(top, destination, None)
    };

    Ok(report(PingOutcome::Reply {
        forward,
        back,
        destination_address,
    }))
}
