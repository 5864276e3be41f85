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

//! # Topology module
//!
//! This module contains the [`Topology`]: the graph of devices and links, together with the
//! per-router routing tables. A topology is built once (by an external collaborator such as
//! [`crate::builder`]) and is read-only to the simulators: [`crate::forwarding`],
//! [`crate::ping`] and [`crate::traceroute`] only ever take `&Topology`.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::{
    routing::RoutingTable,
    types::{Device, DeviceKind, Interface, Link, LinkType, NetworkError, NodeId, TopologyGraph},
};

/// Prefix length of the default local mask, `255.255.255.224`.
pub const DEFAULT_LOCAL_PREFIX_LEN: u8 = 27;

/// # Topology struct
///
/// The struct contains all information about the physical network: the devices (hosts, L2
/// switches and L3 routers), the links connecting them, and the static routing table of each
/// router.
///
/// ```rust
/// use pathsim::prelude::*;
///
/// fn main() -> Result<(), NetworkError> {
///     let mut top = Topology::new();
///
///     let h1 = top.add_host("h1", "10.0.0.2".parse().unwrap());
///     let s1 = top.add_switch("s1", "10.0.0.1".parse().unwrap());
///     top.add_link(h1, s1, LinkType::Ethernet, None)?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub(crate) graph: TopologyGraph,
    pub(crate) devices: HashMap<NodeId, Device>,
    pub(crate) routing_tables: HashMap<NodeId, RoutingTable>,
    pub(crate) local_prefix_len: u8,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    /// Generate an empty topology.
    pub fn new() -> Self {
        Self {
            graph: TopologyGraph::default(),
            devices: HashMap::new(),
            routing_tables: HashMap::new(),
            local_prefix_len: DEFAULT_LOCAL_PREFIX_LEN,
        }
    }

    fn add_device(
        &mut self,
        name: impl Into<String>,
        kind: DeviceKind,
        address: Option<Ipv4Addr>,
        interfaces: Vec<Interface>,
    ) -> NodeId {
        let id = self.graph.add_node(());
        self.devices.insert(
            id,
            Device {
                name: name.into(),
                id,
                kind,
                address,
                interfaces,
            },
        );
        id
    }

    /// Add a new host with a single address. Returns the ID of the new device, which is used to
    /// reference it in all further calls.
    pub fn add_host(&mut self, name: impl Into<String>, address: Ipv4Addr) -> NodeId {
        self.add_device(name, DeviceKind::Host, Some(address), Vec::new())
    }

    /// Add a new switch with a single (management) address.
    pub fn add_switch(&mut self, name: impl Into<String>, address: Ipv4Addr) -> NodeId {
        self.add_device(name, DeviceKind::Switch, Some(address), Vec::new())
    }

    /// Add a new router with a set of named interfaces. Routers have no single address; the
    /// address they are seen as using depends on the neighboring subnet (see
    /// [`crate::addressing::resolve_address`]). Interface order is preserved, as the first
    /// interface acts as the fallback address.
    pub fn add_router<N: Into<String>>(
        &mut self,
        name: impl Into<String>,
        interfaces: impl IntoIterator<Item = (N, Ipv4Addr)>,
    ) -> NodeId {
        let interfaces = interfaces
            .into_iter()
            .map(|(name, addr)| Interface {
                name: name.into(),
                addr,
            })
            .collect();
        self.add_device(name, DeviceKind::Router, None, interfaces)
    }

    /// Create an undirected link between two devices. If the link already exists, this function
    /// does nothing. Self-loops are rejected.
    pub fn add_link(
        &mut self,
        a: NodeId,
        b: NodeId,
        link_type: LinkType,
        subnet: Option<Ipv4Net>,
    ) -> Result<(), NetworkError> {
        if a == b {
            return Err(NetworkError::SelfLoop(a));
        }
        self.get_device(a)?;
        self.get_device(b)?;
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, Link { link_type, subnet });
        }
        Ok(())
    }

    /// Assign the static routing table of a router, replacing any previous one.
    pub fn set_routing_table(
        &mut self,
        router: NodeId,
        table: RoutingTable,
    ) -> Result<(), NetworkError> {
        if !self.get_device(router)?.is_router() {
            return Err(NetworkError::NotARouter(router));
        }
        self.routing_tables.insert(router, table);
        Ok(())
    }

    /// Returns the routing table of a router, if one is assigned.
    pub fn routing_table(&self, router: NodeId) -> Option<&RoutingTable> {
        self.routing_tables.get(&router)
    }

    // ********************
    // * Helper Functions *
    // ********************

    /// Returns a reference to the topology graph (PetGraph struct).
    pub fn get_topology(&self) -> &TopologyGraph {
        &self.graph
    }

    /// Returns the number of devices in the topology.
    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    /// Returns a reference to the device record, or an error if the ID is unknown.
    pub fn get_device(&self, id: NodeId) -> Result<&Device, NetworkError> {
        self.devices.get(&id).ok_or(NetworkError::DeviceNotFound(id))
    }

    /// Get the NodeId with the given name. If the name was not found, an error is returned.
    pub fn get_node_id(&self, name: impl AsRef<str>) -> Result<NodeId, NetworkError> {
        self.devices
            .values()
            .find(|d| d.name == name.as_ref())
            .map(|d| d.id)
            .ok_or_else(|| NetworkError::DeviceNameNotFound(name.as_ref().to_string()))
    }

    /// Returns the name of the device, if the ID was found.
    pub fn get_device_name(&self, id: NodeId) -> Result<&str, NetworkError> {
        Ok(self.get_device(id)?.name.as_str())
    }

    /// Returns the kind of the device, if the ID was found.
    pub fn kind(&self, id: NodeId) -> Result<DeviceKind, NetworkError> {
        Ok(self.get_device(id)?.kind)
    }

    /// Iterate over the neighbors of a device.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors(id)
    }

    /// Returns `true` if and only if the two devices are connected by a link.
    pub fn is_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.graph.find_edge(a, b).is_some()
    }

    /// Get the attributes of a specific link. This function will raise a
    /// `NetworkError::LinkNotFound` if the link does not exist.
    pub fn get_link(&self, a: NodeId, b: NodeId) -> Result<&Link, NetworkError> {
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e))
            .ok_or(NetworkError::LinkNotFound(a, b))
    }

    /// Iterate over all devices in the topology, in no particular order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Returns all device IDs, ordered by their graph index. Use this for reproducible
    /// iteration (e.g., batch runs over all pairs).
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.devices.keys().copied().collect();
        ids.sort();
        ids
    }

    /// The prefix length of the mask under which two addresses count as local to each other
    /// (see [`crate::addressing::same_subnet`]).
    pub fn local_prefix_len(&self) -> u8 {
        self.local_prefix_len
    }

    /// Change the local-subnet mask. The default is `/27` (`255.255.255.224`).
    pub fn set_local_prefix_len(&mut self, prefix_len: u8) {
        self.local_prefix_len = prefix_len;
    }
}
