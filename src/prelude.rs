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

//! Convenience re-export of common members.

pub use crate::addressing::{resolve_address, same_subnet, shortest_local_path};
pub use crate::formatter::TopologyFormatter;
pub use crate::forwarding::find_path;
pub use crate::ping::{ping, PingOutcome, PingReport};
pub use crate::routing::RoutingTable;
pub use crate::topology::Topology;
pub use crate::traceroute::{traceroute, traceroute_with, TraceOutcome, TraceReport};
pub use crate::types::{DeviceKind, Hop, LinkType, NetworkError, NodeId, Path};
