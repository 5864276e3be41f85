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

#![deny(missing_docs, missing_debug_implementations)]

//! # PathSim
//!
//! This is a library for simulating packet forwarding paths across small multi-layer network
//! topologies of hosts, L2 switches and L3 routers.
//!
//! ## Main Concepts
//!
//! The [`topology::Topology`] is the main datastructure to operate on. It holds all devices
//! and links on a graph (see
//! [Petgraph](https://docs.rs/petgraph/latest/petgraph/index.html)), together with the static
//! routing table of each router. A topology is built once and never mutated by a simulation.
//!
//! On top of it, [`forwarding::find_path`] resolves the hop sequence a packet takes, with
//! each device kind obeying its own forwarding rule (hosts hand off, switches flood, routers
//! look up their table). [`ping::ping`] runs two independent searches (forward and return,
//! which may differ under asymmetric tables), and [`traceroute::traceroute`] walks the
//! topology hop by hop, decorating every discovered hop with simulated probe latencies.
//!
//! Path discovery is deterministic; only the traceroute probe latencies are random, and they
//! can be driven by a caller-provided generator ([`traceroute::traceroute_with`]).
//!
//! ## Example usage
//!
//! ```
//! use pathsim::prelude::*;
//! use pathsim::builder::campus_network;
//!
//! fn main() -> Result<(), NetworkError> {
//!     let top = campus_network();
//!     let h1 = top.get_node_id("h1")?;
//!     let h5 = top.get_node_id("h5")?;
//!
//!     let report = ping(&top, h1, h5)?;
//!     assert!(report.success());
//!
//!     if let PingOutcome::Reply { forward, .. } = &report.outcome {
//!         println!("{}", forward.fmt(&top));
//!     }
//!     Ok(())
//! }
//! ```

pub mod addressing;
pub mod builder;
pub mod formatter;
pub mod forwarding;
pub mod ping;
pub mod prelude;
pub mod routing;
pub mod topology;
pub mod traceroute;
pub mod types;

#[cfg(test)]
mod test;
