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

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use itertools::Itertools;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use pathsim::{builder::campus_network, prelude::*};

/// Simulate ping and traceroute over a static multi-layer network topology. Without a
/// subcommand, an interactive shell is started.
#[derive(Debug, Parser)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate a ping between two devices.
    Ping {
        /// Name of the origin device (e.g., h1, e1a, a1).
        origin: String,
        /// Name of the destination device.
        destination: String,
    },
    /// Simulate a traceroute between two devices.
    Traceroute {
        /// Name of the origin device (e.g., h1, e1a, a1).
        origin: String,
        /// Name of the destination device.
        destination: String,
    },
    /// Print the topology: devices, addresses, links and routing tables.
    ShowGraph {
        /// Dump the serialized topology as JSON instead.
        #[clap(long)]
        json: bool,
    },
    /// Run a ping between every ordered pair of devices.
    RunAllPings,
    /// Run a traceroute between every ordered pair of devices.
    RunAllTraceroutes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let args = Cli::parse();
    let top = campus_network();

    match args.command {
        Some(command) => run_command(&top, command),
        None => shell(&top),
    }
}

fn run_command(top: &Topology, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Ping {
            origin,
            destination,
        } => run_ping(top, &origin, &destination)?,
        Command::Traceroute {
            origin,
            destination,
        } => run_traceroute(top, &origin, &destination)?,
        Command::ShowGraph { json } => show_graph(top, json)?,
        Command::RunAllPings => run_all_pings(top)?,
        Command::RunAllTraceroutes => run_all_traceroutes(top)?,
    }
    Ok(())
}

/// Resolve both endpoint names, reporting an invalid node on stdout instead of failing.
fn endpoints(top: &Topology, origin: &str, destination: &str) -> Option<(NodeId, NodeId)> {
    let origin = match top.get_node_id(origin) {
        Ok(id) => id,
        Err(e) => {
            println!("invalid node: {e}");
            return None;
        }
    };
    let destination = match top.get_node_id(destination) {
        Ok(id) => id,
        Err(e) => {
            println!("invalid node: {e}");
            return None;
        }
    };
    Some((origin, destination))
}

fn run_ping(top: &Topology, origin: &str, destination: &str) -> Result<(), NetworkError> {
    if let Some((origin, destination)) = endpoints(top, origin, destination) {
        let report = ping(top, origin, destination)?;
        print!("{}", report.fmt(top));
    }
    Ok(())
}

fn run_traceroute(top: &Topology, origin: &str, destination: &str) -> Result<(), NetworkError> {
    if let Some((origin, destination)) = endpoints(top, origin, destination) {
        let report = traceroute(top, origin, destination)?;
        print!("{}", report.fmt(top));
    }
    Ok(())
}

fn run_all_pings(top: &Topology) -> Result<(), NetworkError> {
    for (origin, destination) in device_pairs(top) {
        println!(
            "--- ping {} -> {} ---",
            origin.fmt(top),
            destination.fmt(top)
        );
        let report = ping(top, origin, destination)?;
        print!("{}", report.fmt(top));
    }
    Ok(())
}

fn run_all_traceroutes(top: &Topology) -> Result<(), NetworkError> {
    for (origin, destination) in device_pairs(top) {
        println!(
            "--- traceroute {} -> {} ---",
            origin.fmt(top),
            destination.fmt(top)
        );
        let report = traceroute(top, origin, destination)?;
        print!("{}", report.fmt(top));
    }
    Ok(())
}

/// All ordered pairs of distinct devices, in a reproducible order.
fn device_pairs(top: &Topology) -> Vec<(NodeId, NodeId)> {
    let ids = top.node_ids();
    ids.iter()
        .cartesian_product(ids.iter())
        .filter(|(a, b)| a != b)
        .map(|(a, b)| (*a, *b))
        .collect()
}

fn show_graph(top: &Topology, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(top)?);
        return Ok(());
    }

    println!("devices:");
    for id in top.node_ids() {
        let device = top.get_device(id)?;
        let addrs = if let Some(addr) = device.address {
            addr.to_string()
        } else {
            device
                .interfaces
                .iter()
                .map(|i| format!("{}={}", i.name, i.addr))
                .join(", ")
        };
        println!("  {:<4} [{}] {}", device.name, device.kind, addrs);
    }

    println!("links:");
    for edge in top.get_topology().edge_references() {
        let subnet = edge
            .weight()
            .subnet
            .map(|s| format!("  {s}"))
            .unwrap_or_default();
        println!(
            "  {} -- {}{}",
            edge.source().fmt(top),
            edge.target().fmt(top),
            subnet
        );
    }

    println!("routing tables:");
    for id in top.node_ids() {
        if let Some(table) = top.routing_table(id) {
            println!("  {}:", id.fmt(top));
            for entry in table.iter() {
                println!("    {} via {}", entry.network, entry.next_hop.fmt(top));
            }
        }
    }
    Ok(())
}

const HELP: &str = "\
commands:
  ping <origin> <destination>
  traceroute <origin> <destination>
  show-graph [json]
  run-all-pings
  run-all-traceroutes
  quit";

fn shell(top: &Topology) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("pathsim> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        let result: Result<(), Box<dyn std::error::Error>> = match words.as_slice() {
            [] => Ok(()),
            ["ping", origin, destination] => run_ping(top, origin, destination).map_err(Into::into),
            ["traceroute", origin, destination] => {
                run_traceroute(top, origin, destination).map_err(Into::into)
            }
            ["show-graph"] => show_graph(top, false),
            ["show-graph", "json"] => show_graph(top, true),
            ["run-all-pings"] => run_all_pings(top).map_err(Into::into),
            ["run-all-traceroutes"] => run_all_traceroutes(top).map_err(Into::into),
            ["quit"] | ["exit"] => break,
            ["help"] => {
                println!("{HELP}");
                Ok(())
            }
            _ => {
                println!("unknown command; type `help`");
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("{e}");
        }
    }
    Ok(())
}
