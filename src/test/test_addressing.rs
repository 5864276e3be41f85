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

//! Tests for address resolution, subnet classification and local paths.

use pretty_assertions::assert_eq;

use super::*;
use crate::addressing::{resolve_address, same_subnet, shortest_local_path};

#[test]
fn single_address_devices_ignore_the_neighbor() {
    let top = campus();
    let (h1, e1b, e1a) = (id(&top, "h1"), id(&top, "e1b"), id(&top, "e1a"));
    assert_eq!(resolve_address(&top, h1, None), Some(ip("172.16.0.3")));
    assert_eq!(resolve_address(&top, h1, Some(e1b)), Some(ip("172.16.0.3")));
    assert_eq!(resolve_address(&top, e1b, Some(e1a)), Some(ip("172.16.0.18")));
}

#[test]
fn routers_resolve_the_facing_interface() {
    let top = campus();
    let (a1, e1a, e2a, c1) = (
        id(&top, "a1"),
        id(&top, "e1a"),
        id(&top, "e2a"),
        id(&top, "c1"),
    );
    // the interface sharing a /27 with the neighbor wins
    assert_eq!(resolve_address(&top, a1, Some(e1a)), Some(ip("172.16.0.1")));
    assert_eq!(resolve_address(&top, a1, Some(e2a)), Some(ip("172.16.0.65")));
    // c1 itself resolves to its first interface (172.16.2.66), which shares
    // 172.16.2.64/27 with a1-c1
    assert_eq!(resolve_address(&top, a1, Some(c1)), Some(ip("172.16.2.65")));
    assert_eq!(resolve_address(&top, c1, Some(a1)), Some(ip("172.16.2.66")));
}

#[test]
fn routers_fall_back_to_the_first_interface() {
    let top = campus();
    let (a1, e3) = (id(&top, "a1"), id(&top, "e3"));
    // no neighbor context
    assert_eq!(resolve_address(&top, a1, None), Some(ip("172.16.2.65")));
    // e3's subnet matches none of a1's interfaces
    assert_eq!(resolve_address(&top, a1, Some(e3)), Some(ip("172.16.2.65")));
}

#[test]
fn addressless_devices_resolve_to_none() {
    let mut top = Topology::new();
    let r = top.add_router("r", std::iter::empty::<(&str, std::net::Ipv4Addr)>());
    assert_eq!(resolve_address(&top, r, None), None);
}

#[test]
fn same_subnet_classification() {
    // h1 and h2 share 172.16.0.0/27
    assert!(same_subnet(ip("172.16.0.3"), ip("172.16.0.19"), 27));
    // h1 and h3 differ already in the /27
    assert!(!same_subnet(ip("172.16.0.3"), ip("172.16.0.67"), 27));
    // all four serial addresses share 172.16.2.64/27
    assert!(same_subnet(ip("172.16.2.65"), ip("172.16.2.70"), 27));
    // degenerate masks
    assert!(same_subnet(ip("10.0.0.1"), ip("192.168.0.1"), 0));
    assert!(!same_subnet(ip("10.0.0.1"), ip("10.0.0.1"), 33));
}

#[test]
fn local_path_stays_on_the_switch_fabric() {
    let top = campus();
    let (h1, h2) = (id(&top, "h1"), id(&top, "h2"));
    let path = shortest_local_path(&top, h1, h2).unwrap();
    assert_eq!(names(&top, &path), vec!["e1b", "e1a", "h2"]);
    assert_eq!(
        path.iter().map(|h| h.address).collect::<Vec<_>>(),
        vec![
            Some(ip("172.16.0.18")),
            Some(ip("172.16.0.2")),
            Some(ip("172.16.0.19")),
        ]
    );
}

#[test]
fn local_path_never_crosses_a_router() {
    let top = campus();
    // h1 and h5 are only connected through the routed core
    assert_eq!(
        shortest_local_path(&top, id(&top, "h1"), id(&top, "h5")),
        None
    );
    // router endpoints are not local
    assert_eq!(
        shortest_local_path(&top, id(&top, "a1"), id(&top, "h1")),
        None
    );
    assert_eq!(
        shortest_local_path(&top, id(&top, "h1"), id(&top, "c1")),
        None
    );
}

#[test]
fn local_path_to_self_is_empty() {
    let top = campus();
    let h1 = id(&top, "h1");
    assert_eq!(shortest_local_path(&top, h1, h1), Some(Vec::new()));
}
