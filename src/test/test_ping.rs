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

//! Tests for the ping simulator.

use pretty_assertions::assert_eq;

use super::*;
use crate::ping::{ping, PingOutcome};

#[test]
fn cross_subnet_ping() {
    let top = campus();
    let report = ping(&top, id(&top, "h1"), id(&top, "h5")).unwrap();
    assert!(report.success());
    match &report.outcome {
        PingOutcome::Reply {
            forward,
            back,
            destination_address,
        } => {
            assert_eq!(
                names(&top, forward),
                vec!["e1b", "e1a", "a1", "c1", "a2", "e3", "h5"]
            );
            // the return path is a fresh search, not the forward path reversed
            assert_eq!(
                names(&top, back),
                vec!["e3", "a2", "c1", "a1", "e1a", "e1b", "h1"]
            );
            assert_eq!(*destination_address, Some(ip("172.16.1.131")));
        }
        other => panic!("expected a reply, got {other:?}"),
    }
}

#[test]
fn destination_reports_the_facing_interface() {
    let top = campus();
    let report = ping(&top, id(&top, "h1"), id(&top, "a1")).unwrap();
    match &report.outcome {
        PingOutcome::Reply {
            forward,
            destination_address,
            ..
        } => {
            assert_eq!(names(&top, forward), vec!["e1b", "e1a", "a1"]);
            // a1 is approached over e1a, so it answers as 172.16.0.1 rather
            // than its first interface 172.16.2.65
            assert_eq!(*destination_address, Some(ip("172.16.0.1")));
        }
        other => panic!("expected a reply, got {other:?}"),
    }
}

#[test]
fn direct_neighbor_ping() {
    let top = campus();
    let report = ping(&top, id(&top, "h1"), id(&top, "e1b")).unwrap();
    match &report.outcome {
        PingOutcome::Reply {
            forward,
            back,
            destination_address,
        } => {
            assert_eq!(names(&top, forward), vec!["e1b"]);
            assert_eq!(names(&top, back), vec!["h1"]);
            assert_eq!(*destination_address, Some(ip("172.16.0.18")));
        }
        other => panic!("expected a reply, got {other:?}"),
    }
}

#[test]
fn return_failure_keeps_the_forward_path() {
    let top = asymmetric_net();
    let report = ping(&top, id(&top, "ha"), id(&top, "hb")).unwrap();
    assert!(!report.success());
    match &report.outcome {
        PingOutcome::ReturnUnreachable { forward } => {
            assert_eq!(names(&top, forward), vec!["sa", "r1", "r2", "sb", "hb"]);
        }
        other => panic!("expected a return failure, got {other:?}"),
    }
}

#[test]
fn forward_failure_in_the_other_direction() {
    let top = asymmetric_net();
    let report = ping(&top, id(&top, "hb"), id(&top, "ha")).unwrap();
    assert!(!report.success());
    assert_eq!(report.outcome, PingOutcome::ForwardUnreachable);
}

#[test]
fn all_campus_pairs_reply() {
    let top = campus();
    let ids = top.node_ids();
    for &origin in &ids {
        for &destination in &ids {
            if origin == destination {
                continue;
            }
            let report = ping(&top, origin, destination).unwrap();
            assert!(
                report.success(),
                "ping {} -> {} failed",
                top.get_device_name(origin).unwrap(),
                top.get_device_name(destination).unwrap(),
            );
        }
    }
}
