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

//! Canned topologies. The simulators never construct topology themselves; they receive a
//! ready [`Topology`] from a builder like the one in this module.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::{routing::RoutingTable, topology::Topology, types::LinkType};

// literal parsing helpers; panics only on malformed literals in this module
fn ip(addr: &str) -> Ipv4Addr {
    addr.parse().unwrap()
}

fn net(cidr: &str) -> Ipv4Net {
    cidr.parse().unwrap()
}

/// Build the reference campus network: two distribution routers (`a1`, `a2`) joined by a core
/// router (`c1`) over serial lines, each serving two switch groups with two hosts per group
/// (`e1a`/`e1b` and `e2a`/`e2b` behind `a1`; `e3` and `e4` behind `a2`). Every router carries
/// a complete static routing table for all six subnets.
pub fn campus_network() -> Topology {
    let mut top = Topology::new();

    // hosts
    let h1 = top.add_host("h1", ip("172.16.0.3"));
    let h2 = top.add_host("h2", ip("172.16.0.19"));
    let h3 = top.add_host("h3", ip("172.16.0.67"));
    let h4 = top.add_host("h4", ip("172.16.0.83"));
    let h5 = top.add_host("h5", ip("172.16.1.131"));
    let h6 = top.add_host("h6", ip("172.16.1.132"));
    let h7 = top.add_host("h7", ip("172.16.1.163"));
    let h8 = top.add_host("h8", ip("172.16.1.164"));

    // switches
    let e1a = top.add_switch("e1a", ip("172.16.0.2"));
    let e1b = top.add_switch("e1b", ip("172.16.0.18"));
    let e2a = top.add_switch("e2a", ip("172.16.0.66"));
    let e2b = top.add_switch("e2b", ip("172.16.0.82"));
    let e3 = top.add_switch("e3", ip("172.16.1.130"));
    let e4 = top.add_switch("e4", ip("172.16.1.162"));

    // routers
    let a1 = top.add_router(
        "a1",
        [
            ("a1-c1", ip("172.16.2.65")),
            ("a1-e1a", ip("172.16.0.1")),
            ("a1-e2a", ip("172.16.0.65")),
        ],
    );
    let a2 = top.add_router(
        "a2",
        [
            ("a2-c1", ip("172.16.2.69")),
            ("a2-e3", ip("172.16.1.129")),
            ("a2-e4", ip("172.16.1.161")),
        ],
    );
    let c1 = top.add_router(
        "c1",
        [
            ("c1-a1", ip("172.16.2.66")),
            ("c1-a2", ip("172.16.2.70")),
        ],
    );

    // serial core links
    top.add_link(c1, a1, LinkType::Serial, Some(net("172.16.2.64/30")))
        .unwrap();
    top.add_link(c1, a2, LinkType::Serial, Some(net("172.16.2.68/30")))
        .unwrap();

    // router-to-switch links
    top.add_link(a1, e1a, LinkType::Ethernet, Some(net("172.16.0.0/26")))
        .unwrap();
    top.add_link(a1, e2a, LinkType::Ethernet, Some(net("172.16.0.64/26")))
        .unwrap();
    top.add_link(a2, e3, LinkType::Ethernet, Some(net("172.16.1.128/27")))
        .unwrap();
    top.add_link(a2, e4, LinkType::Ethernet, Some(net("172.16.1.160/27")))
        .unwrap();

    // host and switch links
    top.add_link(e1b, h1, LinkType::Ethernet, None).unwrap();
    top.add_link(e1b, e1a, LinkType::Ethernet, None).unwrap();
    top.add_link(e1a, h2, LinkType::Ethernet, None).unwrap();
    top.add_link(e2a, e2b, LinkType::Ethernet, None).unwrap();
    top.add_link(e2b, h3, LinkType::Ethernet, None).unwrap();
    top.add_link(e2a, h4, LinkType::Ethernet, None).unwrap();
    top.add_link(e3, h5, LinkType::Ethernet, None).unwrap();
    top.add_link(e3, h6, LinkType::Ethernet, None).unwrap();
    top.add_link(e4, h7, LinkType::Ethernet, None).unwrap();
    top.add_link(e4, h8, LinkType::Ethernet, None).unwrap();

    // routing tables
    top.set_routing_table(
        a1,
        RoutingTable::from_iter([
            (net("172.16.0.0/26"), e1a),
            (net("172.16.0.64/26"), e2a),
            (net("172.16.1.128/27"), c1),
            (net("172.16.1.160/27"), c1),
            (net("172.16.2.64/30"), c1),
            (net("172.16.2.68/30"), c1),
        ]),
    )
    .unwrap();
    top.set_routing_table(
        a2,
        RoutingTable::from_iter([
            (net("172.16.1.128/27"), e3),
            (net("172.16.1.160/27"), e4),
            (net("172.16.0.0/26"), c1),
            (net("172.16.0.64/26"), c1),
            (net("172.16.2.68/30"), c1),
            (net("172.16.2.64/30"), c1),
        ]),
    )
    .unwrap();
    top.set_routing_table(
        c1,
        RoutingTable::from_iter([
            (net("172.16.0.0/26"), a1),
            (net("172.16.0.64/26"), a1),
            (net("172.16.1.128/27"), a2),
            (net("172.16.1.160/27"), a2),
            (net("172.16.2.64/30"), a1),
            (net("172.16.2.68/30"), a2),
        ]),
    )
    .unwrap();

    top
}
