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

//! Module that introduces a formatter to display all types containing `NodeId`.

use std::fmt::Write;
use std::net::Ipv4Addr;

use itertools::Itertools;

use crate::{
    addressing::resolve_address,
    ping::{PingOutcome, PingReport},
    topology::Topology,
    traceroute::{TraceOutcome, TraceReport},
    types::{Hop, NodeId, Path},
};

/// Trait to format a type that contains NodeIds
pub trait TopologyFormatter<'a, 'n> {
    /// Type that is returned, which implements `std::fmt::Display`.
    type Formatter;

    /// Return a struct that can be formatted and displayed.
    fn fmt(&'a self, top: &'n Topology) -> Self::Formatter;
}

fn addr_str(addr: Option<Ipv4Addr>) -> String {
    addr.map(|a| a.to_string()).unwrap_or_else(|| "?".to_string())
}

impl<'a, 'n> TopologyFormatter<'a, 'n> for NodeId {
    type Formatter = &'n str;

    fn fmt(&'a self, top: &'n Topology) -> Self::Formatter {
        top.get_device_name(*self).unwrap_or("?")
    }
}

impl<'a, 'n> TopologyFormatter<'a, 'n> for Hop {
    type Formatter = String;

    fn fmt(&'a self, top: &'n Topology) -> Self::Formatter {
        format!("{} ({})", self.node.fmt(top), addr_str(self.address))
    }
}

//
// Individual Path
//

impl<'a, 'n> TopologyFormatter<'a, 'n> for &'a [Hop] {
    type Formatter = String;

    fn fmt(&'a self, top: &'n Topology) -> Self::Formatter {
        self.iter().map(|h| h.fmt(top)).join(" -> ")
    }
}

impl<'a, 'n> TopologyFormatter<'a, 'n> for Path {
    type Formatter = String;

    fn fmt(&'a self, top: &'n Topology) -> Self::Formatter {
        self.as_slice().fmt(top)
    }
}

//
// Simulation reports
//

impl<'a, 'n> TopologyFormatter<'a, 'n> for PingReport {
    type Formatter = String;

    fn fmt(&'a self, top: &'n Topology) -> Self::Formatter {
        let origin_addr = addr_str(resolve_address(top, self.origin, None));
        let mut s = String::new();
        match &self.outcome {
            PingOutcome::Reply {
                forward,
                back,
                destination_address,
            } => {
                writeln!(
                    &mut s,
                    "ping {} ({}) -> {} ({}): success",
                    self.origin.fmt(top),
                    origin_addr,
                    self.destination.fmt(top),
                    addr_str(*destination_address),
                )
                .ok();
                writeln!(&mut s, "forward path:").ok();
                for hop in forward {
                    writeln!(&mut s, " -> {}", hop.fmt(top)).ok();
                }
                writeln!(&mut s, "return path:").ok();
                for hop in back {
                    writeln!(&mut s, " -> {}", hop.fmt(top)).ok();
                }
            }
            PingOutcome::ForwardUnreachable => {
                writeln!(
                    &mut s,
                    "ping {} -> {}: forward path failed",
                    self.origin.fmt(top),
                    self.destination.fmt(top),
                )
                .ok();
            }
            PingOutcome::ReturnUnreachable { forward } => {
                writeln!(
                    &mut s,
                    "ping {} -> {}: return path failed",
                    self.origin.fmt(top),
                    self.destination.fmt(top),
                )
                .ok();
                writeln!(&mut s, "forward path:").ok();
                for hop in forward {
                    writeln!(&mut s, " -> {}", hop.fmt(top)).ok();
                }
            }
        }
        s
    }
}

impl<'a, 'n> TopologyFormatter<'a, 'n> for TraceReport {
    type Formatter = String;

    fn fmt(&'a self, top: &'n Topology) -> Self::Formatter {
        let mut s = String::new();
        writeln!(
            &mut s,
            "traceroute {} ({}) -> {} ({})",
            self.origin.fmt(top),
            addr_str(self.origin_address),
            self.destination.fmt(top),
            addr_str(self.destination_address),
        )
        .ok();
        for hop in &self.hops {
            writeln!(
                &mut s,
                "{:>3}: {} ({})   {}",
                hop.hop,
                hop.node.fmt(top),
                addr_str(hop.address),
                hop.probes.iter().map(|p| format!("{p} ms")).join("   "),
            )
            .ok();
        }
        match self.outcome {
            TraceOutcome::Completed => writeln!(&mut s, "route completed").ok(),
            TraceOutcome::LoopDetected(node) => {
                writeln!(&mut s, "routing loop detected at {}", node.fmt(top)).ok()
            }
            TraceOutcome::NoRoute(node) => {
                writeln!(&mut s, "no route from {}", node.fmt(top)).ok()
            }
        };
        s
    }
}
