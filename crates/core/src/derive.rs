// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::metrics::MetricSet;
use crate::value::Number;

/// Fills in CPI/IPC and cache hit rates that can be computed from the
/// primary counters. Values that are already present are left alone.
pub fn enrich(metrics: &mut MetricSet) {
    if metrics.cpi.is_none() {
        if let Some((cpi, ipc)) = cpi_ipc(metrics.num_cycles, metrics.num_insts) {
            metrics.cpi = Some(Number::Float(cpi));
            metrics.ipc = Some(Number::Float(ipc));
        }
    }

    if metrics.l1d_hit_rate.is_none() {
        metrics.l1d_hit_rate = hit_rate(metrics.l1d_hits, metrics.l1d_accesses);
    }
    if metrics.l1i_hit_rate.is_none() {
        metrics.l1i_hit_rate = hit_rate(metrics.l1i_hits, metrics.l1i_accesses);
    }
    if metrics.l2_hit_rate.is_none() {
        metrics.l2_hit_rate = hit_rate(metrics.l2_hits, metrics.l2_accesses);
    }
}

/// CPI and IPC as one unit; both need a positive cycle and instruction count.
pub fn cpi_ipc(cycles: Option<Number>, insts: Option<Number>) -> Option<(f64, f64)> {
    let (cycles, insts) = (cycles?, insts?);
    if !insts.is_positive() || !cycles.is_positive() {
        return None;
    }
    let (c, i) = (cycles.as_f64(), insts.as_f64());
    Some((c / i, i / c))
}

/// Hit rate in percent, absent unless accesses is present and positive.
pub fn hit_rate(hits: Option<Number>, accesses: Option<Number>) -> Option<Number> {
    let accesses = accesses.filter(|a| a.is_positive())?;
    let hits = hits?;
    Some(Number::Float(hits.as_f64() / accesses.as_f64() * 100.0))
}
