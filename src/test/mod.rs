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

//! Shared fixtures and helpers for the test modules.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::{
    builder::campus_network,
    routing::RoutingTable,
    topology::Topology,
    types::{LinkType, NodeId, Path},
};

fn ip(addr: &str) -> Ipv4Addr {
    addr.parse().unwrap()
}

fn net(cidr: &str) -> Ipv4Net {
    cidr.parse().unwrap()
}

/// The reference campus topology (3 routers, 6 switches, 8 hosts).
fn campus() -> Topology {
    campus_network()
}

fn id(top: &Topology, name: &str) -> NodeId {
    top.get_node_id(name).unwrap()
}

fn names<'n>(top: &'n Topology, path: &Path) -> Vec<&'n str> {
    path.iter()
        .map(|h| top.get_device_name(h.node).unwrap())
        .collect()
}

/// A line topology `ha - sa - r1 - r2 - sb - hb` where only the forward direction is routed:
/// `r2` has no entry back toward `ha`'s subnet.
fn asymmetric_net() -> Topology {
    let mut top = Topology::new();
    let ha = top.add_host("ha", ip("192.168.0.2"));
    let sa = top.add_switch("sa", ip("192.168.0.3"));
    let r1 = top.add_router(
        "r1",
        [
            ("r1-sa", ip("192.168.0.1")),
            ("r1-r2", ip("192.168.2.1")),
        ],
    );
    let r2 = top.add_router(
        "r2",
        [
            ("r2-r1", ip("192.168.2.2")),
            ("r2-sb", ip("192.168.1.1")),
        ],
    );
    let sb = top.add_switch("sb", ip("192.168.1.3"));
    let hb = top.add_host("hb", ip("192.168.1.2"));

    top.add_link(ha, sa, LinkType::Ethernet, None).unwrap();
    top.add_link(sa, r1, LinkType::Ethernet, Some(net("192.168.0.0/27")))
        .unwrap();
    top.add_link(r1, r2, LinkType::Serial, Some(net("192.168.2.0/27")))
        .unwrap();
    top.add_link(r2, sb, LinkType::Ethernet, Some(net("192.168.1.0/27")))
        .unwrap();
    top.add_link(sb, hb, LinkType::Ethernet, None).unwrap();

    top.set_routing_table(
        r1,
        RoutingTable::from_iter([(net("192.168.1.0/27"), r2)]),
    )
    .unwrap();
    // r2 can reach hb's subnet but knows nothing about ha's
    top.set_routing_table(
        r2,
        RoutingTable::from_iter([(net("192.168.1.0/27"), sb)]),
    )
    .unwrap();
    top
}

/// A line topology `hx - sx - r1 - r2 - sy - hy` with a misconfiguration that bounces traffic
/// for `hy`'s subnet between the two routers.
fn loop_net() -> Topology {
    let mut top = Topology::new();
    let hx = top.add_host("hx", ip("10.0.0.2"));
    let sx = top.add_switch("sx", ip("10.0.0.3"));
    let r1 = top.add_router(
        "r1",
        [("r1-sx", ip("10.0.0.1")), ("r1-r2", ip("10.0.2.1"))],
    );
    let r2 = top.add_router(
        "r2",
        [("r2-r1", ip("10.0.2.2")), ("r2-sy", ip("10.0.1.1"))],
    );
    let sy = top.add_switch("sy", ip("10.0.1.3"));
    let hy = top.add_host("hy", ip("10.0.1.2"));

    top.add_link(hx, sx, LinkType::Ethernet, None).unwrap();
    top.add_link(sx, r1, LinkType::Ethernet, Some(net("10.0.0.0/27")))
        .unwrap();
    top.add_link(r1, r2, LinkType::Serial, Some(net("10.0.2.0/27")))
        .unwrap();
    top.add_link(r2, sy, LinkType::Ethernet, Some(net("10.0.1.0/27")))
        .unwrap();
    top.add_link(sy, hy, LinkType::Ethernet, None).unwrap();

    top.set_routing_table(r1, RoutingTable::from_iter([(net("10.0.1.0/27"), r2)]))
        .unwrap();
    top.set_routing_table(r2, RoutingTable::from_iter([(net("10.0.1.0/27"), r1)]))
        .unwrap();
    top
}

/// Same line topology, but `r1` has no routing table at all.
fn no_route_net() -> Topology {
    let mut top = loop_net();
    let r1 = id(&top, "r1");
    top.set_routing_table(r1, RoutingTable::new()).unwrap();
    top
}

mod test_addressing;
mod test_forwarding;
mod test_ping;
