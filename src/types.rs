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

//! Module containing all type definitions

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use petgraph::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) type IndexType = u32;

/// Node identification (and index into the topology graph)
pub type NodeId = NodeIndex<IndexType>;

/// The topology graph. Nodes carry no weight (device records live in
/// [`crate::topology::Topology`]); edges carry the [`Link`] attributes.
pub type TopologyGraph = StableGraph<(), Link, Undirected, IndexType>;

/// Kind of a network device. Forwarding behavior is dispatched by matching on this enum, so
/// adding a new kind forces every forwarding rule to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Leaf endpoint device, normally single-interface.
    Host,
    /// L2 forwarding device; floods among its directly linked neighbors.
    Switch,
    /// L3 device holding a [`crate::routing::RoutingTable`].
    Router,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host => f.write_str("host"),
            Self::Switch => f.write_str("switch"),
            Self::Router => f.write_str("router"),
        }
    }
}

/// A named interface of a multi-interface device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface name, e.g., `"a1-c1"`.
    pub name: String,
    /// Address assigned to the interface.
    pub addr: Ipv4Addr,
}

/// A device in the topology.
///
/// Invariant: a device carries either a single `address`, or a non-empty `interfaces` list
/// (routers, occasionally switches). The resolver in [`crate::addressing`] always prefers the
/// single address if it is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Unique device name.
    pub name: String,
    /// Index of the device in the topology graph.
    pub id: NodeId,
    /// Device kind, determining its forwarding behavior.
    pub kind: DeviceKind,
    /// The single address of the device, if it has one.
    pub address: Option<Ipv4Addr>,
    /// The interfaces of the device, in insertion order.
    pub interfaces: Vec<Interface>,
}

impl Device {
    /// Returns `true` if and only if the device is a router.
    pub fn is_router(&self) -> bool {
        self.kind == DeviceKind::Router
    }
}

/// Physical kind of a link. Descriptive only; it does not affect forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkType {
    /// Ethernet segment.
    Ethernet,
    /// Serial (point-to-point) line.
    Serial,
}

/// Attributes of an undirected link between two devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Kind of the link.
    pub link_type: LinkType,
    /// CIDR network covering the link, where one is assigned (serial and router-to-switch
    /// links in the reference topology).
    pub subnet: Option<Ipv4Net>,
}

/// One entry of a computed forwarding path: the device, and the address it is seen as using
/// toward the hop it was entered from. `None` is the "unknown" address marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    /// The device of this hop.
    pub node: NodeId,
    /// The resolved address of this hop, or `None` if resolution failed.
    pub address: Option<Ipv4Addr>,
}

impl Hop {
    /// Create a new hop.
    pub fn new(node: NodeId, address: Option<Ipv4Addr>) -> Self {
        Self { node, address }
    }
}

/// An ordered sequence of hops, excluding the node the packet originates from.
pub type Path = Vec<Hop>;

/// Network Errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkError {
    /// Device is not present in the topology
    #[error("Network device was not found in topology: {0:?}")]
    DeviceNotFound(NodeId),
    /// Device name is not present in the topology
    #[error("Network device name was not found in topology: {0}")]
    DeviceNameNotFound(String),
    /// Link does not exist
    #[error("Link does not exist: {0:?} -- {1:?}")]
    LinkNotFound(NodeId, NodeId),
    /// A link was requested that would connect a device to itself
    #[error("Cannot create a self-loop on device {0:?}")]
    SelfLoop(NodeId),
    /// A routing table was assigned to a device that is not a router
    #[error("Device {0:?} is not a router and cannot hold a routing table")]
    NotARouter(NodeId),
}
