//! Keyword-match counters used to rank files in the listing.

use super::rules::KeywordDetector;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub good: usize,
    pub bad: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
/// Per-detector tallies keyed by detector label.
pub struct Stats(BTreeMap<String, Tally>);

impl Stats {
    /// Zeroed stats with one entry per detector label.
    pub fn new(detectors: &[KeywordDetector]) -> Self {
        let map = detectors
            .iter()
            .map(|d| (d.label.clone(), Tally::default()))
            .collect();
        Stats(map)
    }

    /// Fold one message into the counters. Every matching keyword counts once.
    pub fn add(&mut self, message: &str, detectors: &[KeywordDetector]) {
        for d in detectors {
            let good = d.good.iter().filter(|k| message.contains(k.as_str())).count();
            let bad = d.bad.iter().filter(|k| message.contains(k.as_str())).count();
            let t = self.0.entry(d.label.clone()).or_default();
            t.good += good;
            t.bad += bad;
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, label: &str) -> Option<Tally> {
        self.0.get(label).copied()
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (label, t) in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}={}/{}", label, t.good, t.bad)?;
        }
        Ok(())
    }
}
