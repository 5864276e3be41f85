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

//! Tests for the forwarding-path engine.

use pretty_assertions::assert_eq;

use super::*;
use crate::{forwarding::find_path, types::NetworkError};

#[test]
fn cross_subnet_path() {
    let top = campus();
    let path = find_path(&top, id(&top, "h1"), id(&top, "h5"))
        .unwrap()
        .unwrap();
    assert_eq!(
        names(&top, &path),
        vec!["e1b", "e1a", "a1", "c1", "a2", "e3", "h5"]
    );
    assert_eq!(
        path.iter().map(|h| h.address).collect::<Vec<_>>(),
        vec![
            Some(ip("172.16.0.18")),
            Some(ip("172.16.0.2")),
            Some(ip("172.16.0.1")),
            Some(ip("172.16.2.66")),
            Some(ip("172.16.2.69")),
            Some(ip("172.16.1.130")),
            Some(ip("172.16.1.131")),
        ]
    );
}

#[test]
fn same_segment_path() {
    let top = campus();
    let path = find_path(&top, id(&top, "h1"), id(&top, "h2"))
        .unwrap()
        .unwrap();
    assert_eq!(names(&top, &path), vec!["e1b", "e1a", "h2"]);
}

#[test]
fn direct_neighbor_is_delivered_immediately() {
    let top = campus();
    let path = find_path(&top, id(&top, "h1"), id(&top, "e1b"))
        .unwrap()
        .unwrap();
    assert_eq!(names(&top, &path), vec!["e1b"]);
}

#[test]
fn path_to_self_is_empty() {
    let top = campus();
    let h1 = id(&top, "h1");
    assert_eq!(find_path(&top, h1, h1), Ok(Some(Vec::new())));
}

#[test]
fn router_origin_consults_its_table() {
    let top = campus();
    let path = find_path(&top, id(&top, "a1"), id(&top, "h5"))
        .unwrap()
        .unwrap();
    assert_eq!(names(&top, &path), vec!["c1", "a2", "e3", "h5"]);
}

#[test]
fn determinism() {
    let top = campus();
    let (h3, h8) = (id(&top, "h3"), id(&top, "h8"));
    let first = find_path(&top, h3, h8).unwrap();
    for _ in 0..10 {
        assert_eq!(find_path(&top, h3, h8).unwrap(), first);
    }
}

#[test]
fn routing_loop_exhausts_to_no_route() {
    let top = loop_net();
    // r1 and r2 bounce traffic for hy between each other; the visited set
    // keeps the search finite and the destination is never reached
    assert_eq!(find_path(&top, id(&top, "hx"), id(&top, "hy")), Ok(None));
}

#[test]
fn asymmetric_tables_break_one_direction() {
    let top = asymmetric_net();
    let (ha, hb) = (id(&top, "ha"), id(&top, "hb"));
    let forward = find_path(&top, ha, hb).unwrap().unwrap();
    assert_eq!(names(&top, &forward), vec!["sa", "r1", "r2", "sb", "hb"]);
    assert_eq!(find_path(&top, hb, ha), Ok(None));
}

#[test]
fn unknown_endpoints_are_errors() {
    let top = campus();
    let bogus = NodeId::new(9999);
    assert_eq!(
        find_path(&top, bogus, id(&top, "h1")),
        Err(NetworkError::DeviceNotFound(bogus))
    );
    assert_eq!(
        find_path(&top, id(&top, "h1"), bogus),
        Err(NetworkError::DeviceNotFound(bogus))
    );
}
