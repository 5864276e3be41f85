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

//! # Forwarding-path engine
//!
//! [`find_path`] computes the ordered hop sequence a packet traverses from an origin to a
//! destination. The traversal is a depth-first search with an explicit visited set, where each
//! device kind obeys its own forwarding rule: hosts hand the packet to any neighbor, switches
//! flood toward anything they are wired to, and routers consult their static routing table.
//!
//! This models *forwarding behavior*, not optimal routing: when several valid routes exist,
//! the one discovered first by the traversal order wins, and it need not be the shortest. The
//! search is deterministic for a fixed topology, and terminates after at most one expansion
//! per device.

use std::collections::HashSet;

use log::debug;

use crate::{
    addressing::resolve_address,
    topology::Topology,
    types::{DeviceKind, Hop, NetworkError, NodeId, Path},
};

/// Compute the forwarding path from `start` to `end`.
///
/// Returns `Ok(None)` if the search exhausts its frontier without reaching `end` (no route is
/// a result, not an error). Errors are raised only for node IDs missing from the topology.
///
/// The returned path excludes `start` itself; its last hop is always `end`. Each hop carries
/// the address resolved toward the device the packet entered it from. A destination that is a
/// direct neighbor of the current device is always delivered immediately ("same wire"),
/// regardless of the device kind.
pub fn find_path(
    top: &Topology,
    start: NodeId,
    end: NodeId,
) -> Result<Option<Path>, NetworkError> {
    top.get_device(start)?;
    top.get_device(end)?;

    // Routers forward by looking up the destination's address. An unresolvable destination
    // never matches any table entry.
    let destination_addr = resolve_address(top, end, None);

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut frontier: Vec<(NodeId, Path, Option<NodeId>)> = vec![(start, Vec::new(), None)];

    while let Some((node, mut hops, predecessor)) = frontier.pop() {
        if !visited.insert(node) {
            continue;
        }
        if predecessor.is_some() {
            hops.push(Hop::new(node, resolve_address(top, node, predecessor)));
        }
        if node == end {
            return Ok(Some(hops));
        }
        if top.is_adjacent(node, end) {
            hops.push(Hop::new(end, resolve_address(top, end, Some(node))));
            return Ok(Some(hops));
        }

        match top.kind(node)? {
            DeviceKind::Host => {
                // a host hands the packet to whatever it is wired to
                for neighbor in top.neighbors(node) {
                    if !visited.contains(&neighbor) {
                        frontier.push((neighbor, hops.clone(), Some(node)));
                    }
                }
            }
            DeviceKind::Switch => {
                // L2 flooding: explore toward every switch, router and host on the segment
                for neighbor in top.neighbors(node) {
                    if !visited.contains(&neighbor) {
                        frontier.push((neighbor, hops.clone(), Some(node)));
                    }
                }
            }
            DeviceKind::Router => {
                let next_hop = destination_addr
                    .and_then(|addr| top.routing_table(node).and_then(|t| t.lookup(addr)));
                match next_hop {
                    Some(nh) if !visited.contains(&nh) => {
                        frontier.push((nh, hops.clone(), Some(node)));
                    }
                    Some(_) => {}
                    None => {
                        // this branch of the search dead-ends here
                        debug!(
                            "router {} has no route toward {}",
                            top.get_device_name(node).unwrap_or("?"),
                            top.get_device_name(end).unwrap_or("?"),
                        );
                    }
                }
            }
        }
    }

    debug!(
        "no path from {} to {}",
        top.get_device_name(start).unwrap_or("?"),
        top.get_device_name(end).unwrap_or("?"),
    );
    Ok(None)
}
