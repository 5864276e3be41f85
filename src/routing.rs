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

//! Static per-router routing tables.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// One entry of a [`RoutingTable`]: a destination network and the device to forward to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// The destination network.
    pub network: Ipv4Net,
    /// The neighboring device to forward matching packets to.
    pub next_hop: NodeId,
}

/// A static routing table, mapping destination networks to next-hop devices.
///
/// Lookup returns the *first* entry (in insertion order) whose network contains the queried
/// address. There is no longest-prefix-match tie-breaking: tables are expected to hold at most
/// one matching entry per destination, and the behavior for overlapping entries is whatever
/// insertion order dictates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTable {
    entries: Vec<RouteEntry>,
}

impl RoutingTable {
    /// Create an empty routing table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route at the end of the table.
    pub fn add_route(&mut self, network: Ipv4Net, next_hop: NodeId) {
        self.entries.push(RouteEntry { network, next_hop });
    }

    /// Return the next hop for the first entry whose network contains `addr`, or `None` if no
    /// entry matches.
    pub fn lookup(&self, addr: Ipv4Addr) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|e| e.network.contains(&addr))
            .map(|e| e.next_hop)
    }

    /// Iterate over all entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Ipv4Net, NodeId)> for RoutingTable {
    fn from_iter<T: IntoIterator<Item = (Ipv4Net, NodeId)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(network, next_hop)| RouteEntry { network, next_hop })
                .collect(),
        }
    }
}
