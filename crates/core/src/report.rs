// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Report rendering. Every renderer is a pure function returning the full
//! text, so the caller decides where it goes.

use crate::metrics::MetricSet;
use crate::value::{Number, StatStore};
use crate::Result;
use num_format::{Locale, ToFormattedString};
use regex::{Regex, RegexBuilder};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::{debug, warn};

const TABLE_WIDTH: usize = 60;

/// Columns of the CSV report, `file` first.
pub const CSV_COLUMNS: &[&str] = &[
    "file",
    "sim_ticks",
    "sim_insts",
    "num_cycles",
    "cpi",
    "ipc",
    "l1d_hit_rate",
    "l1i_hit_rate",
    "l2_hit_rate",
];

/// How a metric value is printed in the human table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Thousands-separated integer (floats keep 2 decimals).
    Count,
    /// Two decimals.
    Seconds,
    /// Four decimals, for CPI/IPC.
    Ratio,
    /// Two decimals with a `%` suffix.
    Percent,
}

/// Thousands-separated count. Floats keep 2 decimals after the grouped
/// integer part.
pub fn format_count(value: Number) -> String {
    match value {
        Number::Int(v) => v.to_formatted_string(&Locale::en),
        Number::Float(v) => {
            let fixed = format!("{:.2}", v);
            let (sign, digits) = match fixed.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", fixed.as_str()),
            };
            let (int_part, frac_part) = digits.split_at(digits.find('.').unwrap_or(digits.len()));
            match int_part.parse::<u128>() {
                Ok(whole) => format!(
                    "{}{}{}",
                    sign,
                    whole.to_formatted_string(&Locale::en),
                    frac_part
                ),
                Err(_) => fixed,
            }
        }
    }
}

pub fn format_value(value: Number, kind: ValueKind) -> String {
    match kind {
        ValueKind::Count => format_count(value),
        ValueKind::Seconds => format!("{:.2}", value.as_f64()),
        ValueKind::Ratio => format!("{:.4}", value.as_f64()),
        ValueKind::Percent => format!("{:.2}", value.as_f64()),
    }
}

struct Section {
    heading: &'static str,
    always: bool,
    rows: Vec<(&'static str, Option<Number>, ValueKind)>,
}

fn table_sections(m: &MetricSet) -> Vec<Section> {
    use ValueKind::*;
    let cache = |heading, accesses, hits, misses, rate| Section {
        heading,
        always: false,
        rows: vec![
            ("Accesses", accesses, Count),
            ("Hits", hits, Count),
            ("Misses", misses, Count),
            ("Hit Rate", rate, Percent),
        ],
    };

    vec![
        Section {
            heading: "Simulation Overview",
            always: true,
            rows: vec![
                ("Sim Ticks", m.sim_ticks, Count),
                ("Sim Seconds", m.sim_seconds, Seconds),
                ("Instructions", m.sim_insts, Count),
                ("Ops", m.sim_ops, Count),
                ("Host Seconds", m.host_seconds, Seconds),
            ],
        },
        Section {
            heading: "CPU Performance",
            always: true,
            rows: vec![
                ("Cycles", m.num_cycles, Count),
                ("Instructions", m.num_insts, Count),
                ("CPI", m.cpi, Ratio),
                ("IPC", m.ipc, Ratio),
            ],
        },
        cache(
            "L1 Data Cache",
            m.l1d_accesses,
            m.l1d_hits,
            m.l1d_misses,
            m.l1d_hit_rate,
        ),
        cache(
            "L1 Instruction Cache",
            m.l1i_accesses,
            m.l1i_hits,
            m.l1i_misses,
            m.l1i_hit_rate,
        ),
        cache(
            "L2 Cache",
            m.l2_accesses,
            m.l2_hits,
            m.l2_misses,
            m.l2_hit_rate,
        ),
        Section {
            heading: "Memory Controller",
            always: false,
            rows: vec![
                ("Read Reqs", m.mem_reads, Count),
                ("Write Reqs", m.mem_writes, Count),
            ],
        },
    ]
}

/// Human-readable table for one metric set.
pub fn render_table(metrics: &MetricSet, title: &str) -> String {
    let rule = "=".repeat(TABLE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "{}", rule);

    for section in table_sections(metrics) {
        let any_present = section.rows.iter().any(|(_, v, _)| v.is_some());
        if !section.always && !any_present {
            continue;
        }
        let _ = writeln!(out, "\n  {}:", section.heading);
        for (label, value, kind) in section.rows {
            let Some(value) = value else { continue };
            let label = format!("{}:", label);
            let text = format_value(value, kind);
            if kind == ValueKind::Percent {
                let _ = writeln!(out, "    {:<15}{:>14}%", label, text);
            } else {
                let _ = writeln!(out, "    {:<15}{:>15}", label, text);
            }
        }
    }

    let _ = writeln!(out, "\n{}\n", rule);
    out
}

/// Present metrics of one file as a JSON object. Non-finite floats have no
/// JSON form and are left out along with absent metrics.
struct PresentMetrics<'a>(&'a MetricSet);

impl Serialize for PresentMetrics<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let present: Vec<_> = self
            .0
            .present()
            .into_iter()
            .filter(|(name, v)| {
                if !v.is_finite() {
                    debug!("Omitting non-finite metric {} from JSON", name);
                }
                v.is_finite()
            })
            .collect();
        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (name, value) in present {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

struct JsonReport<'a>(&'a [(String, MetricSet)]);

impl Serialize for JsonReport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // A repeated path keeps its first position and its last metrics.
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut unique: Vec<(&str, &MetricSet)> = Vec::with_capacity(self.0.len());
        for (path, metrics) in self.0 {
            match slots.get(path.as_str()) {
                Some(&slot) => unique[slot].1 = metrics,
                None => {
                    slots.insert(path.as_str(), unique.len());
                    unique.push((path.as_str(), metrics));
                }
            }
        }

        let mut map = serializer.serialize_map(Some(unique.len()))?;
        for (path, metrics) in unique {
            map.serialize_entry(path, &PresentMetrics(metrics))?;
        }
        map.end()
    }
}

/// One JSON object keyed by input path, in input order. A path given
/// twice appears once, with the metrics of its last occurrence.
pub fn render_json(entries: &[(String, MetricSet)]) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&JsonReport(entries))?;
    text.push('\n');
    Ok(text)
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Header plus one row per entry. Absent metrics become empty fields.
pub fn render_csv(entries: &[(String, MetricSet)]) -> String {
    let mut out = CSV_COLUMNS.join(",");
    out.push('\n');
    for (path, metrics) in entries {
        let mut row = vec![csv_field(path)];
        row.extend(
            CSV_COLUMNS[1..]
                .iter()
                .map(|name| metrics.get(name).map(|v| v.to_string()).unwrap_or_default()),
        );
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Case-insensitive stat-name filter for the verbose dump.
#[derive(Debug, Clone)]
pub enum StatFilter {
    Pattern(Regex),
    /// Lowercased literal, used when the pattern is not valid regex syntax.
    Substring(String),
}

impl StatFilter {
    pub fn new(pattern: &str) -> Self {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => StatFilter::Pattern(re),
            Err(e) => {
                warn!(
                    "Filter '{}' is not a valid regex ({}); matching it literally",
                    pattern, e
                );
                StatFilter::Substring(pattern.to_lowercase())
            }
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            StatFilter::Pattern(re) => re.is_match(name),
            StatFilter::Substring(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Every raw stat, sorted by name, optionally filtered.
pub fn render_verbose(path: &str, store: &StatStore, filter: Option<&StatFilter>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n--- All stats from {} ---", path);
    for (name, value) in store.sorted() {
        if filter.is_some_and(|f| !f.matches(name)) {
            continue;
        }
        let _ = writeln!(out, "  {}: {}", name, value);
    }
    out
}
