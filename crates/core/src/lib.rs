// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Statistics analysis engine for gem5 `stats.txt` dumps.
//!
//! The pipeline is: [`parser`] turns a dump into a [`StatStore`], [`resolve`]
//! maps it onto a [`MetricSet`], [`derive`] fills in CPI/IPC and hit rates,
//! and [`report`] / [`compare`] render the result.

pub mod compare;
pub mod derive;
pub mod metrics;
pub mod parser;
pub mod report;
pub mod resolve;
pub mod value;

pub use compare::{compare, ComparisonRow};
pub use derive::enrich;
pub use metrics::MetricSet;
pub use parser::{parse_file, parse_str};
pub use resolve::resolve_metrics;
pub use value::{Number, StatStore, StatValue};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Usage error: {0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;

/// Resolves and enriches the metrics of one parsed stats dump.
pub fn analyze(store: &StatStore, cpu_id: u32) -> MetricSet {
    let mut metrics = resolve_metrics(store, cpu_id);
    enrich(&mut metrics);
    metrics
}
