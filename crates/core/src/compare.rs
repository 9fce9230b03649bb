// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::metrics::MetricSet;
use crate::report::format_count;
use crate::value::Number;
use crate::{Result, StatsError};
use std::fmt::Write as _;
use std::path::{Component, Path};

const TABLE_WIDTH: usize = 75;

/// Metrics shown in a comparison: label, catalogue name, and whether the
/// value is a float-valued rate or ratio.
const COMPARED_METRICS: &[(&str, &str, bool)] = &[
    ("Sim Ticks", "sim_ticks", false),
    ("Instructions", "sim_insts", false),
    ("Cycles", "num_cycles", false),
    ("CPI", "cpi", true),
    ("IPC", "ipc", true),
    ("L1D Hit Rate %", "l1d_hit_rate", true),
    ("L1I Hit Rate %", "l1i_hit_rate", true),
    ("L2 Hit Rate %", "l2_hit_rate", true),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub left: Option<Number>,
    pub right: Option<Number>,
    /// `left / right`; `None` when not applicable.
    pub ratio: Option<f64>,
    pub is_float: bool,
}

impl ComparisonRow {
    pub fn ratio_text(&self) -> String {
        match self.ratio {
            Some(r) => format!("{:.2}x", r),
            None => "N/A".to_string(),
        }
    }
}

/// Fails unless exactly two inputs were given.
pub fn check_pair(count: usize) -> Result<()> {
    if count != 2 {
        return Err(StatsError::Usage(format!(
            "--compare requires exactly 2 stats files, got {}",
            count
        )));
    }
    Ok(())
}

pub fn ratio(left: Option<Number>, right: Option<Number>) -> Option<f64> {
    let (left, right) = (left?, right?);
    if right.is_zero() {
        return None;
    }
    Some(left.as_f64() / right.as_f64())
}

pub fn compare(left: &MetricSet, right: &MetricSet) -> Vec<ComparisonRow> {
    COMPARED_METRICS
        .iter()
        .map(|&(label, name, is_float)| {
            let (l, r) = (left.get(name), right.get(name));
            ComparisonRow {
                label,
                left: l,
                right: r,
                ratio: ratio(l, r),
                is_float,
            }
        })
        .collect()
}

/// Column label for a stats file: the last component of its parent
/// directory, so `m5out/atomic/stats.txt` becomes `atomic` and
/// `./stats.txt` becomes `.`. Falls back to the whole path when there is
/// no parent directory.
pub fn display_label(path: &Path) -> String {
    let last = path.parent().and_then(|p| p.components().next_back());
    match last {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        Some(Component::CurDir) => ".".to_string(),
        Some(Component::ParentDir) => "..".to_string(),
        _ => path.display().to_string(),
    }
}

fn format_cell(value: Option<Number>, is_float: bool) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) if is_float => format!("{:.4}", v.as_f64()),
        Some(Number::Float(v)) => format!("{:.2}", v),
        Some(v @ Number::Int(_)) => format_count(v),
    }
}

pub fn render_comparison(rows: &[ComparisonRow], left_label: &str, right_label: &str) -> String {
    let rule = "=".repeat(TABLE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(
        out,
        "  Performance Comparison: {} vs {}",
        left_label, right_label
    );
    let _ = writeln!(out, "{}", rule);

    let _ = writeln!(
        out,
        "\n  {:<25} {:>15} {:>15} {:>10}",
        "Metric", left_label, right_label, "Ratio"
    );
    let _ = writeln!(
        out,
        "  {} {} {} {}",
        "-".repeat(25),
        "-".repeat(15),
        "-".repeat(15),
        "-".repeat(10)
    );
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<25} {:>15} {:>15} {:>10}",
            row.label,
            format_cell(row.left, row.is_float),
            format_cell(row.right, row.is_float),
            row.ratio_text()
        );
    }

    let _ = writeln!(out, "\n{}\n", rule);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetricSet {
        MetricSet {
            sim_ticks: Some(Number::Int(1000)),
            sim_insts: Some(Number::Int(500)),
            num_cycles: Some(Number::Int(0)),
            cpi: Some(Number::Float(0.5)),
            l1d_hit_rate: Some(Number::Float(95.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_pair() {
        assert!(check_pair(2).is_ok());
        assert!(matches!(check_pair(1), Err(StatsError::Usage(_))));
        assert!(matches!(check_pair(3), Err(StatsError::Usage(_))));
    }

    #[test]
    fn test_rows_follow_fixed_catalogue() {
        let rows = compare(&sample(), &MetricSet::default());
        let labels: Vec<_> = rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                "Sim Ticks",
                "Instructions",
                "Cycles",
                "CPI",
                "IPC",
                "L1D Hit Rate %",
                "L1I Hit Rate %",
                "L2 Hit Rate %"
            ]
        );
        assert!(rows.iter().all(|r| r.ratio.is_none()));
    }

    #[test]
    fn test_identical_sets_ratio_one() {
        let rows = compare(&sample(), &sample());
        for row in &rows {
            match (row.left, row.right) {
                (Some(_), Some(r)) if !r.is_zero() => assert_eq!(row.ratio_text(), "1.00x"),
                _ => assert_eq!(row.ratio_text(), "N/A"),
            }
        }
        // Zero cycles on the right side is not applicable.
        assert_eq!(rows[2].ratio, None);
    }

    #[test]
    fn test_cpi_ratio() {
        let a = MetricSet {
            cpi: Some(Number::Float(0.5)),
            ..Default::default()
        };
        let b = MetricSet {
            cpi: Some(Number::Float(1.0)),
            ..Default::default()
        };
        let rows = compare(&a, &b);
        assert_eq!(rows[3].ratio_text(), "0.50x");
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label(Path::new("m5out/atomic/stats.txt")), "atomic");
        assert_eq!(display_label(Path::new("stats.txt")), "stats.txt");
        assert_eq!(display_label(Path::new("./stats.txt")), ".");
        assert_eq!(display_label(Path::new("../stats.txt")), "..");
        assert_eq!(display_label(Path::new("/stats.txt")), "/stats.txt");
    }

    #[test]
    fn test_render_comparison_layout() {
        let rows = compare(&sample(), &sample());
        let out = render_comparison(&rows, "atomic", "timing");
        assert!(out.contains("  Performance Comparison: atomic vs timing\n"));
        assert!(out.contains(&format!("{}\n", "=".repeat(75))));
        assert!(out.contains(
            "  Sim Ticks                           1,000           1,000      1.00x\n"
        ));
        assert!(out.contains(
            "  CPI                                0.5000          0.5000      1.00x\n"
        ));
        assert!(out.contains(
            "  IPC                                   N/A             N/A        N/A\n"
        ));
    }
}
