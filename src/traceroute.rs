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

//! # Traceroute simulator
//!
//! Where [`crate::forwarding::find_path`] only returns the final path, the traceroute walks
//! the topology hop by hop and emits a record for *every* intermediate device as it is
//! discovered, decorated with three simulated probe latencies.
//!
//! Path discovery itself is deterministic; all randomness lives in the probe decoration. Each
//! probe is the previous hop's latency floor (the maximum of its three probes) plus a random
//! increment: 2-6 simulated milliseconds for switch-layer hops, 5-15 for router traversals.
//! When origin and destination share a local subnet, the walk is bypassed entirely: the
//! shortest host/switch path is reported with independent 2-6 ms probes and no accumulated
//! floor.

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;

use log::debug;
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    addressing::{resolve_address, same_subnet, shortest_local_path},
    topology::Topology,
    types::{DeviceKind, NetworkError, NodeId},
};

/// Number of latency probes emitted per hop.
pub const PROBES_PER_HOP: usize = 3;

/// Latency increment range for switch-layer hops, in simulated milliseconds.
pub const SWITCH_LATENCY_RANGE: RangeInclusive<u64> = 2..=6;

/// Latency increment range for router traversals, in simulated milliseconds.
pub const ROUTER_LATENCY_RANGE: RangeInclusive<u64> = 5..=15;

/// One emitted traceroute record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceHop {
    /// Hop number, starting at 1.
    pub hop: usize,
    /// The device reached at this hop.
    pub node: NodeId,
    /// The address the device is seen as using toward the previous hop.
    pub address: Option<Ipv4Addr>,
    /// The three probe latencies, in simulated milliseconds.
    pub probes: [u64; PROBES_PER_HOP],
}

/// How a traceroute ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceOutcome {
    /// The destination was reached and its hop record emitted.
    Completed,
    /// A device was revisited beyond its tolerance; the topology or a routing table sends
    /// traffic in a circle.
    LoopDetected(NodeId),
    /// The named device could not forward the probe any further.
    NoRoute(NodeId),
}

/// Result record of a simulated traceroute. The emitted hops are preserved even when the
/// trace ends in a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceReport {
    /// The origin device.
    pub origin: NodeId,
    /// The destination device.
    pub destination: NodeId,
    /// The origin's resolved address.
    pub origin_address: Option<Ipv4Addr>,
    /// The destination's resolved address (default resolution, no neighbor context).
    pub destination_address: Option<Ipv4Addr>,
    /// The emitted hop records, in discovery order.
    pub hops: Vec<TraceHop>,
    /// How the trace ended.
    pub outcome: TraceOutcome,
}

impl TraceReport {
    /// Returns `true` if and only if the destination was reached.
    pub fn success(&self) -> bool {
        self.outcome == TraceOutcome::Completed
    }
}

/// Collects hop records, carrying the latency floor from one hop to the next.
struct ProbeRecorder<'a, R> {
    rng: &'a mut R,
    hops: Vec<TraceHop>,
    floor: u64,
}

impl<'a, R: Rng> ProbeRecorder<'a, R> {
    fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            hops: Vec::new(),
            floor: 0,
        }
    }

    /// Emit a hop whose probes build on the accumulated floor. The floor advances to the
    /// maximum of the three probes.
    fn record(&mut self, node: NodeId, address: Option<Ipv4Addr>, range: RangeInclusive<u64>) {
        let mut probes = [0u64; PROBES_PER_HOP];
        for probe in probes.iter_mut() {
            *probe = self.floor + self.rng.gen_range(range.clone());
        }
        self.floor = probes.iter().copied().max().unwrap_or(self.floor);
        self.push(node, address, probes);
    }

    /// Emit a hop with three independent samples. Local delivery does not accumulate a floor.
    fn record_local(&mut self, node: NodeId, address: Option<Ipv4Addr>) {
        let mut probes = [0u64; PROBES_PER_HOP];
        for probe in probes.iter_mut() {
            *probe = self.rng.gen_range(SWITCH_LATENCY_RANGE);
        }
        self.push(node, address, probes);
    }

    fn push(&mut self, node: NodeId, address: Option<Ipv4Addr>, probes: [u64; PROBES_PER_HOP]) {
        let hop = self.hops.len() + 1;
        self.hops.push(TraceHop {
            hop,
            node,
            address,
            probes,
        });
    }
}

/// What a switch-segment flood found: either the destination itself, or the first router to
/// hand the packet to, each with the chain of intermediate switches leading there.
enum FloodTarget {
    Destination { chain: Vec<NodeId> },
    Router { chain: Vec<NodeId>, router: NodeId },
}

/// Breadth-first search over the switch fabric starting at `from`. Neighboring hosts are
/// ignored unless they are the destination; routers already entered by the walk are not
/// flooded again.
fn flood_toward(
    top: &Topology,
    from: NodeId,
    destination: NodeId,
    visits: &HashMap<NodeId, usize>,
) -> Result<Option<FloodTarget>, NetworkError> {
    let mut queue: VecDeque<(NodeId, Vec<NodeId>)> = VecDeque::from([(from, vec![from])]);
    let mut seen: HashSet<NodeId> = HashSet::new();
    while let Some((node, path)) = queue.pop_front() {
        seen.insert(node);
        for neighbor in top.neighbors(node) {
            if seen.contains(&neighbor) {
                continue;
            }
            if neighbor == destination {
                return Ok(Some(FloodTarget::Destination {
                    chain: path[1..].to_vec(),
                }));
            }
            match top.kind(neighbor)? {
                DeviceKind::Switch => {
                    let mut next_path = path.clone();
                    next_path.push(neighbor);
                    queue.push_back((neighbor, next_path));
                }
                DeviceKind::Router if visits.get(&neighbor).copied().unwrap_or(0) == 0 => {
                    return Ok(Some(FloodTarget::Router {
                        chain: path[1..].to_vec(),
                        router: neighbor,
                    }));
                }
                _ => {}
            }
        }
    }
    Ok(None)
}

/// Simulate a traceroute between two devices, drawing probe latencies from the thread-local
/// random source. See [`traceroute_with`] to inject a deterministic source.
pub fn traceroute(
    top: &Topology,
    origin: NodeId,
    destination: NodeId,
) -> Result<TraceReport, NetworkError> {
    traceroute_with(top, origin, destination, &mut thread_rng())
}

/// Simulate a traceroute between two devices, drawing probe latencies from `rng`.
///
/// Errors are raised only for node IDs missing from the topology. A routing loop or a device
/// that cannot forward any further is reported in the [`TraceOutcome`], keeping the hops
/// emitted up to that point.
///
/// Loop tolerance is per kind: re-entering a non-router device ends the trace immediately,
/// while a router may be re-entered once (a next-hop lookup can legitimately target an
/// already-seen router in small topologies). The second re-entry of a router is declared a
/// loop, which bounds the walk.
pub fn traceroute_with<R: Rng>(
    top: &Topology,
    origin: NodeId,
    destination: NodeId,
    rng: &mut R,
) -> Result<TraceReport, NetworkError> {
    top.get_device(origin)?;
    top.get_device(destination)?;

    let origin_address = resolve_address(top, origin, None);
    let destination_address = resolve_address(top, destination, None);
    let finish = |hops: Vec<TraceHop>, outcome: TraceOutcome| TraceReport {
        origin,
        destination,
        origin_address,
        destination_address,
        hops,
        outcome,
    };

    if origin == destination {
        return Ok(finish(Vec::new(), TraceOutcome::Completed));
    }

    let mut rec = ProbeRecorder::new(rng);

    // same-subnet shortcut: deliver over the local host/switch fabric, no router lookup.
    // Serial interfaces of distinct routers may share a subnet, so the shortcut applies
    // only between host/switch endpoints.
    let local_endpoints =
        top.kind(origin)? != DeviceKind::Router && top.kind(destination)? != DeviceKind::Router;
    if let (true, Some(a), Some(b)) = (local_endpoints, origin_address, destination_address) {
        if same_subnet(a, b, top.local_prefix_len()) {
            return Ok(match shortest_local_path(top, origin, destination) {
                Some(path) => {
                    for hop in path {
                        rec.record_local(hop.node, hop.address);
                    }
                    finish(rec.hops, TraceOutcome::Completed)
                }
                None => finish(rec.hops, TraceOutcome::NoRoute(origin)),
            });
        }
    }

    // visit counters implement the per-kind loop tolerance
    let mut visits: HashMap<NodeId, usize> = HashMap::new();
    let mut current = origin;

    if top.kind(origin)? == DeviceKind::Host {
        let next = match top.neighbors(origin).next() {
            Some(n) => n,
            None => return Ok(finish(rec.hops, TraceOutcome::NoRoute(origin))),
        };
        rec.record(
            next,
            resolve_address(top, next, Some(origin)),
            SWITCH_LATENCY_RANGE,
        );
        *visits.entry(origin).or_default() += 1;
        current = next;
    }

    while current != destination {
        let seen = visits.get(&current).copied().unwrap_or(0);
        let kind = top.kind(current)?;
        let tolerance = if kind == DeviceKind::Router { 2 } else { 1 };
        if seen >= tolerance {
            debug!(
                "loop detected at {}",
                top.get_device_name(current).unwrap_or("?"),
            );
            return Ok(finish(rec.hops, TraceOutcome::LoopDetected(current)));
        }
        *visits.entry(current).or_default() += 1;

        match kind {
            DeviceKind::Switch => {
                if top.is_adjacent(current, destination) {
                    rec.record(
                        destination,
                        resolve_address(top, destination, Some(current)),
                        SWITCH_LATENCY_RANGE,
                    );
                    return Ok(finish(rec.hops, TraceOutcome::Completed));
                }
                match flood_toward(top, current, destination, &visits)? {
                    Some(FloodTarget::Destination { chain }) => {
                        let mut prev = current;
                        for switch in chain {
                            if visits.get(&switch).copied().unwrap_or(0) == 0 {
                                rec.record(
                                    switch,
                                    resolve_address(top, switch, Some(prev)),
                                    SWITCH_LATENCY_RANGE,
                                );
                                *visits.entry(switch).or_default() += 1;
                                prev = switch;
                            }
                        }
                        rec.record(
                            destination,
                            resolve_address(top, destination, Some(prev)),
                            SWITCH_LATENCY_RANGE,
                        );
                        return Ok(finish(rec.hops, TraceOutcome::Completed));
                    }
                    Some(FloodTarget::Router { chain, router }) => {
                        let mut prev = current;
                        for switch in chain {
                            if visits.get(&switch).copied().unwrap_or(0) == 0 {
                                rec.record(
                                    switch,
                                    resolve_address(top, switch, Some(prev)),
                                    SWITCH_LATENCY_RANGE,
                                );
                                *visits.entry(switch).or_default() += 1;
                                prev = switch;
                            }
                        }
                        rec.record(
                            router,
                            resolve_address(top, router, Some(prev)),
                            ROUTER_LATENCY_RANGE,
                        );
                        current = router;
                    }
                    None => {
                        debug!(
                            "switch {} found no route toward {}",
                            top.get_device_name(current).unwrap_or("?"),
                            top.get_device_name(destination).unwrap_or("?"),
                        );
                        return Ok(finish(rec.hops, TraceOutcome::NoRoute(current)));
                    }
                }
            }
            DeviceKind::Router => {
                let next_hop = destination_address
                    .and_then(|addr| top.routing_table(current).and_then(|t| t.lookup(addr)));
                match next_hop {
                    Some(nh) => {
                        rec.record(
                            nh,
                            resolve_address(top, nh, Some(current)),
                            ROUTER_LATENCY_RANGE,
                        );
                        current = nh;
                    }
                    None if top.is_adjacent(current, destination) => {
                        // same-wire delivery, not a router traversal
                        rec.record(
                            destination,
                            resolve_address(top, destination, Some(current)),
                            SWITCH_LATENCY_RANGE,
                        );
                        return Ok(finish(rec.hops, TraceOutcome::Completed));
                    }
                    None => {
                        debug!(
                            "router {} has no route toward {}",
                            top.get_device_name(current).unwrap_or("?"),
                            top.get_device_name(destination).unwrap_or("?"),
                        );
                        return Ok(finish(rec.hops, TraceOutcome::NoRoute(current)));
                    }
                }
            }
            DeviceKind::Host => {
                // a host cannot forward transit traffic
                return Ok(finish(rec.hops, TraceOutcome::NoRoute(current)));
            }
        }
    }

    Ok(finish(rec.hops, TraceOutcome::Completed))
}
