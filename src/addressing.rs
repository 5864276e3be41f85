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

//! # Address resolution and subnet classification
//!
//! A device may carry a single address, or (typically for routers) several interfaces with one
//! address each. [`resolve_address`] answers the question "which address is this device seen as
//! using toward that neighbor?", and [`same_subnet`] / [`shortest_local_path`] decide whether
//! two endpoints can talk without crossing a router.

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use log::trace;

use crate::{
    topology::Topology,
    types::{Device, DeviceKind, Hop, NodeId, Path},
};

/// Resolve the address a device is seen as using toward an optional neighbor.
///
/// - A device with a single address always reports that address, independent of `neighbor`.
/// - A multi-interface device reports the interface sharing a subnet (under the topology's
///   local mask) with the neighbor's address, when a neighbor is given and such an interface
///   exists.
/// - Otherwise it falls back to its first interface, or `None` if it has no address at all.
///
/// The neighbor's own address is resolved without further neighbor context (address, else
/// first interface), so resolution is bounded at depth one by construction.
pub fn resolve_address(top: &Topology, node: NodeId, neighbor: Option<NodeId>) -> Option<Ipv4Addr> {
    let device = top.devices.get(&node)?;
    if let Some(addr) = device.address {
        return Some(addr);
    }
    if let Some(neighbor_addr) = neighbor
        .and_then(|n| top.devices.get(&n))
        .and_then(flat_address)
    {
        if let Some(iface) = device
            .interfaces
            .iter()
            .find(|i| same_subnet(i.addr, neighbor_addr, top.local_prefix_len))
        {
            return Some(iface.addr);
        }
    }
    device.interfaces.first().map(|i| i.addr)
}

/// The device's own address, without any neighbor context: its single address, else its first
/// interface.
fn flat_address(device: &Device) -> Option<Ipv4Addr> {
    device
        .address
        .or_else(|| device.interfaces.first().map(|i| i.addr))
}

/// Returns `true` if and only if both addresses fall into the same network under a mask of the
/// given prefix length. An invalid prefix length yields `false` rather than an error.
pub fn same_subnet(a: Ipv4Addr, b: Ipv4Addr, prefix_len: u8) -> bool {
    match (Ipv4Net::new(a, prefix_len), Ipv4Net::new(b, prefix_len)) {
        (Ok(net_a), Ok(net_b)) => net_a.network() == net_b.network(),
        _ => false,
    }
}

/// Find a shortest path (by hop count) between two same-subnet endpoints, restricted to hosts
/// and switches. Routers never appear on a local path; if either endpoint is a router, or the
/// two endpoints are disconnected in the restricted subgraph, the result is `None`.
///
/// The returned path excludes the origin, and every hop reports the address it is seen as
/// using toward its predecessor.
pub fn shortest_local_path(top: &Topology, origin: NodeId, destination: NodeId) -> Option<Path> {
    let local = |id: NodeId| {
        matches!(
            top.kind(id),
            Ok(DeviceKind::Host) | Ok(DeviceKind::Switch)
        )
    };
    if !local(origin) || !local(destination) {
        return None;
    }
    if origin == destination {
        return Some(Vec::new());
    }

    // breadth-first search over the host/switch subgraph
    let mut predecessor: HashMap<NodeId, NodeId> = HashMap::new();
    let mut seen: HashSet<NodeId> = HashSet::from([origin]);
    let mut queue: VecDeque<NodeId> = VecDeque::from([origin]);
    'search: while let Some(node) = queue.pop_front() {
        for neighbor in top.neighbors(node) {
            if !local(neighbor) || !seen.insert(neighbor) {
                continue;
            }
            predecessor.insert(neighbor, node);
            if neighbor == destination {
                break 'search;
            }
            queue.push_back(neighbor);
        }
    }
    if !predecessor.contains_key(&destination) {
        trace!(
            "no local path between {} and {}",
            top.get_device_name(origin).unwrap_or("?"),
            top.get_device_name(destination).unwrap_or("?"),
        );
        return None;
    }

    let mut sequence = vec![destination];
    let mut current = destination;
    while let Some(&prev) = predecessor.get(&current) {
        sequence.push(prev);
        current = prev;
    }
    sequence.reverse();

    Some(
        sequence
            .windows(2)
            .map(|w| Hop::new(w[1], resolve_address(top, w[1], Some(w[0]))))
            .collect(),
    )
}
