// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::value::Number;

/// The logical metric catalogue. Every field is optional: an absent counter
/// stays `None` and is never treated as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    pub sim_ticks: Option<Number>,
    pub sim_seconds: Option<Number>,
    pub sim_insts: Option<Number>,
    pub sim_ops: Option<Number>,
    pub host_seconds: Option<Number>,

    pub num_cycles: Option<Number>,
    pub num_insts: Option<Number>,
    pub cpi: Option<Number>,
    pub ipc: Option<Number>,

    pub l1d_hits: Option<Number>,
    pub l1d_misses: Option<Number>,
    pub l1d_accesses: Option<Number>,
    pub l1d_hit_rate: Option<Number>,

    pub l1i_hits: Option<Number>,
    pub l1i_misses: Option<Number>,
    pub l1i_accesses: Option<Number>,
    pub l1i_hit_rate: Option<Number>,

    pub l2_hits: Option<Number>,
    pub l2_misses: Option<Number>,
    pub l2_accesses: Option<Number>,
    pub l2_hit_rate: Option<Number>,

    pub mem_reads: Option<Number>,
    pub mem_writes: Option<Number>,
}

/// Field names in catalogue order, as used for JSON keys and CSV columns.
pub const METRIC_NAMES: &[&str] = &[
    "sim_ticks",
    "sim_seconds",
    "sim_insts",
    "sim_ops",
    "host_seconds",
    "num_cycles",
    "num_insts",
    "cpi",
    "ipc",
    "l1d_hits",
    "l1d_misses",
    "l1d_accesses",
    "l1d_hit_rate",
    "l1i_hits",
    "l1i_misses",
    "l1i_accesses",
    "l1i_hit_rate",
    "l2_hits",
    "l2_misses",
    "l2_accesses",
    "l2_hit_rate",
    "mem_reads",
    "mem_writes",
];

impl MetricSet {
    /// Looks up a metric by its catalogue name.
    pub fn get(&self, name: &str) -> Option<Number> {
        match name {
            "sim_ticks" => self.sim_ticks,
            "sim_seconds" => self.sim_seconds,
            "sim_insts" => self.sim_insts,
            "sim_ops" => self.sim_ops,
            "host_seconds" => self.host_seconds,
            "num_cycles" => self.num_cycles,
            "num_insts" => self.num_insts,
            "cpi" => self.cpi,
            "ipc" => self.ipc,
            "l1d_hits" => self.l1d_hits,
            "l1d_misses" => self.l1d_misses,
            "l1d_accesses" => self.l1d_accesses,
            "l1d_hit_rate" => self.l1d_hit_rate,
            "l1i_hits" => self.l1i_hits,
            "l1i_misses" => self.l1i_misses,
            "l1i_accesses" => self.l1i_accesses,
            "l1i_hit_rate" => self.l1i_hit_rate,
            "l2_hits" => self.l2_hits,
            "l2_misses" => self.l2_misses,
            "l2_accesses" => self.l2_accesses,
            "l2_hit_rate" => self.l2_hit_rate,
            "mem_reads" => self.mem_reads,
            "mem_writes" => self.mem_writes,
            _ => None,
        }
    }

    /// Present metrics only, in catalogue order.
    pub fn present(&self) -> Vec<(&'static str, Number)> {
        METRIC_NAMES
            .iter()
            .filter_map(|&name| self.get(name).map(|v| (name, v)))
            .collect()
    }
}
