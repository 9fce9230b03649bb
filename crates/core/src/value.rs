// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Numeric metric value. Integers stay integers so counters keep their
/// exact value and render with thousands separators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_positive(self) -> bool {
        match self {
            Number::Int(v) => v > 0,
            Number::Float(v) => v > 0.0,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(v) => v == 0,
            Number::Float(v) => v == 0.0,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(v) => v.is_finite(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            // Debug keeps the trailing ".0" on whole floats.
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// A single parsed counter value.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    /// Token matched the stat grammar but failed numeric coercion.
    Text(String),
}

impl StatValue {
    pub fn as_number(&self) -> Option<Number> {
        match self {
            StatValue::Int(v) => Some(Number::Int(*v)),
            StatValue::Float(v) => Some(Number::Float(*v)),
            StatValue::Text(_) => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{}", v),
            StatValue::Float(v) => write!(f, "{:?}", v),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

/// Ordered mapping of stat name to value, in file order.
///
/// Keys are unique. Re-inserting a key keeps its original position and
/// replaces the value.
#[derive(Debug, Clone, Default)]
pub struct StatStore {
    entries: Vec<(String, StatValue)>,
    index: HashMap<String, usize>,
}

impl StatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: StatValue) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&StatValue> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in insertion (file) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries sorted lexicographically by name.
    pub fn sorted(&self) -> Vec<(&str, &StatValue)> {
        let mut out: Vec<_> = self.iter().collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut store = StatStore::new();
        store.insert("b", StatValue::Int(1));
        store.insert("a", StatValue::Int(2));
        store.insert("b", StatValue::Int(3));

        let names: Vec<_> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(store.get("b"), Some(&StatValue::Int(3)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_sorted_is_lexicographic() {
        let mut store = StatStore::new();
        store.insert("system.cpu.numCycles", StatValue::Int(10));
        store.insert("simTicks", StatValue::Int(5));
        store.insert("hostSeconds", StatValue::Float(0.5));

        let names: Vec<_> = store.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["hostSeconds", "simTicks", "system.cpu.numCycles"]);
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(StatValue::Int(42).to_string(), "42");
        assert_eq!(StatValue::Float(90.0).to_string(), "90.0");
        assert_eq!(StatValue::Float(0.25).to_string(), "0.25");
        assert_eq!(StatValue::Text("50%".into()).to_string(), "50%");
        assert_eq!(Number::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_text_is_not_a_number() {
        assert_eq!(StatValue::Text("1.2.3".into()).as_number(), None);
        assert_eq!(StatValue::Int(7).as_number(), Some(Number::Int(7)));
    }
}
