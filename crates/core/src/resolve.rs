// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Maps raw gem5 stat names onto the [`MetricSet`] catalogue.
//!
//! gem5 names the same counter differently depending on the CPU model and
//! how the system was wired. Generic metrics are therefore searched under
//! several candidate names; cache and memory-controller counters always live
//! at one fixed path and are looked up directly.

use crate::metrics::MetricSet;
use crate::value::{Number, StatStore};
use tracing::debug;

/// Instruction-count names, highest priority first. Different CPU models
/// report committed instructions under different counters.
pub const INST_COUNT_NAMES: &[&str] = &[
    "committedInsts",
    "numInsts",
    "exec_context.thread_0.numInsts",
];

/// `system.cpu` for core 0, `system.cpu<N>` otherwise.
pub fn cpu_scope(cpu_id: u32) -> String {
    if cpu_id == 0 {
        "system.cpu".to_string()
    } else {
        format!("system.cpu{}", cpu_id)
    }
}

/// Candidate keys for a generic metric, in lookup order: the bare name,
/// the CPU-scoped name, then the system-scoped name.
pub fn candidate_keys(name: &str, cpu_id: u32) -> Vec<String> {
    vec![
        name.to_string(),
        format!("{}.{}", cpu_scope(cpu_id), name),
        format!("system.{}", name),
    ]
}

/// First numeric value among the candidates of `name`.
pub fn lookup(store: &StatStore, name: &str, cpu_id: u32) -> Option<Number> {
    candidate_keys(name, cpu_id).iter().find_map(|key| {
        let value = store.get(key)?;
        let number = value.as_number();
        if number.is_none() {
            debug!("Skipping non-numeric stat {} = {}", key, value);
        }
        number
    })
}

/// Single fully-qualified lookup with no fallback.
fn lookup_exact(store: &StatStore, key: &str) -> Option<Number> {
    store.get(key).and_then(|v| v.as_number())
}

fn lookup_inst_count(store: &StatStore, cpu_id: u32) -> Option<Number> {
    INST_COUNT_NAMES
        .iter()
        .find_map(|name| lookup(store, name, cpu_id))
}

/// Hits, misses and accesses under one cache prefix.
fn cache_triple(store: &StatStore, prefix: &str) -> [Option<Number>; 3] {
    ["overallHits", "overallMisses", "overallAccesses"]
        .map(|counter| lookup_exact(store, &format!("{}.{}::total", prefix, counter)))
}

pub fn resolve_metrics(store: &StatStore, cpu_id: u32) -> MetricSet {
    let scope = cpu_scope(cpu_id);
    let [l1d_hits, l1d_misses, l1d_accesses] = cache_triple(store, &format!("{}.dcache", scope));
    let [l1i_hits, l1i_misses, l1i_accesses] = cache_triple(store, &format!("{}.icache", scope));
    let [l2_hits, l2_misses, l2_accesses] = cache_triple(store, "system.l2cache");

    MetricSet {
        sim_ticks: lookup(store, "simTicks", cpu_id),
        sim_seconds: lookup(store, "simSeconds", cpu_id),
        sim_insts: lookup(store, "simInsts", cpu_id),
        sim_ops: lookup(store, "simOps", cpu_id),
        host_seconds: lookup(store, "hostSeconds", cpu_id),

        num_cycles: lookup(store, "numCycles", cpu_id),
        num_insts: lookup_inst_count(store, cpu_id),
        cpi: lookup(store, "cpi", cpu_id),
        ipc: lookup(store, "ipc", cpu_id),

        l1d_hits,
        l1d_misses,
        l1d_accesses,
        l1d_hit_rate: None,

        l1i_hits,
        l1i_misses,
        l1i_accesses,
        l1i_hit_rate: None,

        l2_hits,
        l2_misses,
        l2_accesses,
        l2_hit_rate: None,

        mem_reads: lookup_exact(store, "system.mem_ctrl.readReqs"),
        mem_writes: lookup_exact(store, "system.mem_ctrl.writeReqs"),
    }
}
