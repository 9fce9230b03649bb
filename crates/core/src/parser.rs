// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Permissive parser for gem5 `stats.txt` dumps.
//!
//! Only lines of the shape `<name> <number>[%] [# comment]` are kept. Every
//! other line (section banners, distribution rows with several columns,
//! free text) is skipped without error.

use crate::value::{StatStore, StatValue};
use crate::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

lazy_static::lazy_static! {
    static ref STAT_LINE: Regex = Regex::new(r"^(\S+)\s+([\d.eE+-]+%?)\s*(?:#.*)?$")
        .expect("stat line grammar must compile");
}

/// Reads and parses a stats dump, failing on I/O errors.
pub fn read_file(path: &Path) -> Result<StatStore> {
    let text = fs::read_to_string(path)?;
    let store = parse_str(&text);
    debug!("Parsed {} stats from {:?}", store.len(), path);
    Ok(store)
}

/// Reads and parses a stats dump. A missing or unreadable file yields an
/// empty store; the caller decides whether that is fatal.
pub fn parse_file(path: &Path) -> StatStore {
    match read_file(path) {
        Ok(store) => store,
        Err(e) => {
            warn!("Stats file not readable {:?}: {}", path, e);
            StatStore::new()
        }
    }
}

pub fn parse_str(text: &str) -> StatStore {
    let mut store = StatStore::new();
    for line in text.lines() {
        if let Some((name, value)) = parse_line(line) {
            store.insert(name, value);
        }
    }
    store
}

/// Parses one dump line, returning `None` for anything outside the grammar.
pub fn parse_line(line: &str) -> Option<(&str, StatValue)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("---") || line.starts_with("===") {
        return None;
    }
    if line.starts_with('#') {
        return None;
    }

    let caps = STAT_LINE.captures(line)?;
    let name = caps.get(1)?.as_str();
    let token = caps.get(2)?.as_str();
    Some((name, coerce_value(token)))
}

/// Three-tier coercion: float, then integer, then the raw token.
pub fn coerce_value(token: &str) -> StatValue {
    let looks_float = token.contains('.') || token.contains('e') || token.contains('E');
    if looks_float {
        let digits = token.strip_suffix('%').unwrap_or(token);
        if let Ok(v) = digits.parse::<f64>() {
            return StatValue::Float(v);
        }
    } else if let Ok(v) = token.parse::<i64>() {
        return StatValue::Int(v);
    }
    StatValue::Text(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_line_with_comment() {
        let (name, value) =
            parse_line("system.cpu.dcache.overallAccesses::total  1000000  # accesses").unwrap();
        assert_eq!(name, "system.cpu.dcache.overallAccesses::total");
        assert_eq!(value, StatValue::Int(1000000));
    }

    #[test]
    fn test_float_and_exponent_tokens() {
        assert_eq!(coerce_value("0.000500"), StatValue::Float(0.0005));
        assert_eq!(coerce_value("1e5"), StatValue::Float(100000.0));
        assert_eq!(coerce_value("2.5E-3"), StatValue::Float(0.0025));
        assert_eq!(coerce_value("45.50%"), StatValue::Float(45.5));
        assert_eq!(coerce_value("-12"), StatValue::Int(-12));
    }

    #[test]
    fn test_failed_coercion_keeps_token() {
        assert_eq!(coerce_value("50%"), StatValue::Text("50%".into()));
        assert_eq!(coerce_value("1.2.3"), StatValue::Text("1.2.3".into()));
        assert_eq!(coerce_value("-"), StatValue::Text("-".into()));
        assert_eq!(
            coerce_value("99999999999999999999"),
            StatValue::Text("99999999999999999999".into())
        );
    }

    #[test]
    fn test_skipped_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("---------- Begin Simulation Statistics ----------").is_none());
        assert!(parse_line("==========").is_none());
        assert!(parse_line("# 123").is_none());
        assert!(parse_line("system.cpu.numCycles").is_none());
        assert!(parse_line("system.cpu.status Running").is_none());
        // Distribution rows carry several value columns.
        assert!(parse_line("system.cpu.op_class::IntAlu  1200  60.00%  60.00%  # x").is_none());
    }

    #[test]
    fn test_parse_str_preserves_file_order() {
        let text = "\
---------- Begin Simulation Statistics ----------
simSeconds                                   0.000500                       # Number of seconds simulated (Second)
simTicks                                    500000000                       # Number of ticks simulated (Tick)
garbage line here
hostSeconds                                      1.25                       # Real time elapsed on the host (Second)

---------- End Simulation Statistics   ----------
";
        let store = parse_str(text);
        let names: Vec<_> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["simSeconds", "simTicks", "hostSeconds"]);
        assert_eq!(store.get("simTicks"), Some(&StatValue::Int(500000000)));
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let store = parse_file(Path::new("/nonexistent/simstat/stats.txt"));
        assert!(store.is_empty());
        assert!(read_file(Path::new("/nonexistent/simstat/stats.txt")).is_err());
    }
}
