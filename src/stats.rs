//! Per-question answer history.

use std::collections::HashMap;

use log::warn;

use crate::quiz::Category;

/// Weight given to the newest response time in the moving average.
pub const AVG_TIME_NEW_WEIGHT: f64 = 0.25;

/// History for one question id. Missing fields read as zero.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionStats {
    pub seen: u32,
    pub correct: u32,
    pub wrong: u32,
    pub avg_time_sec: f64,
    /// Milliseconds since the Unix epoch, 0 = never.
    pub last_seen: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl QuestionStats {
    /// Apply one answer.
    pub fn record(&mut self, is_correct: bool, time_sec: f64, now_ms: i64, category: Category) {
        // The first sample seeds the average instead of blending with 0.
        self.avg_time_sec = if self.seen == 0 {
            time_sec
        } else {
            AVG_TIME_NEW_WEIGHT * time_sec + (1.0 - AVG_TIME_NEW_WEIGHT) * self.avg_time_sec
        };
        // Loaded records may already sit at the ceiling.
        self.seen = self.seen.saturating_add(1);
        if is_correct {
            self.correct = self.correct.saturating_add(1);
        } else {
            self.wrong = self.wrong.saturating_add(1);
        }
        self.last_seen = now_ms;
        if self.category.is_none() {
            self.category = Some(category);
        }
    }

    pub fn accuracy(&self) -> Option<f64> {
        if self.seen == 0 {
            return None;
        }
        Some(self.correct as f64 / self.seen as f64)
    }
}

/// All question stats keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StatsBook {
    entries: HashMap<String, QuestionStats>,
}

impl StatsBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse persisted stats. Anything unparseable is logged and treated as empty.
    pub fn from_json_lossy(value: Option<serde_json::Value>) -> Self {
        match value {
            None => Self::default(),
            Some(v) => match serde_json::from_value(v) {
                Ok(book) => book,
                Err(e) => {
                    warn!("ignoring malformed question stats: {}", e);
                    Self::default()
                }
            },
        }
    }

    pub fn get(&self, id: &str) -> Option<&QuestionStats> {
        self.entries.get(id)
    }

    /// Stats for `id` with defaults filled in for a missing record.
    pub fn resolved(&self, id: &str) -> QuestionStats {
        self.entries.get(id).cloned().unwrap_or_default()
    }

    pub fn insert(&mut self, id: String, stats: QuestionStats) {
        self.entries.insert(id, stats);
    }

    /// Record an answer, creating the record on first use.
    pub fn record(
        &mut self,
        id: &str,
        category: Category,
        is_correct: bool,
        time_sec: f64,
        now_ms: i64,
    ) -> &QuestionStats {
        let entry = self.entries.entry(id.to_string()).or_default();
        entry.record(is_correct, time_sec, now_ms, category);
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &QuestionStats)> {
        self.entries.iter()
    }
}

/// Ids the learner has answered at least once, in first-answer order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SeenList {
    ids: Vec<String>,
}

impl SeenList {
    pub fn from_json_lossy(value: Option<serde_json::Value>) -> Self {
        match value {
            None => Self::default(),
            Some(v) => match serde_json::from_value(v) {
                Ok(list) => list,
                Err(e) => {
                    warn!("ignoring malformed seen list: {}", e);
                    Self::default()
                }
            },
        }
    }

    /// Returns true if the id was new.
    pub fn mark(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_creates_and_updates() {
        let mut book = StatsBook::new();
        let st = book.record("V2-0001", Category::Logic, true, 3.0, 1000);
        assert_eq!(st.seen, 1);
        assert_eq!(st.correct, 1);
        assert_eq!(st.avg_time_sec, 3.0);
        assert_eq!(st.last_seen, 1000);
        assert_eq!(st.category, Some(Category::Logic));

        // Category is never overwritten.
        let st = book.record("V2-0001", Category::Geometry, false, 7.0, 2000);
        assert_eq!(st.seen, 2);
        assert_eq!(st.wrong, 1);
        assert_eq!(st.avg_time_sec, 4.0);
        assert_eq!(st.category, Some(Category::Logic));
        assert_eq!(st.correct + st.wrong, st.seen);
    }

    #[test]
    fn test_counters_saturate() {
        let mut book = StatsBook::from_json_lossy(Some(json!({
            "V2-0001": { "seen": u32::MAX, "correct": u32::MAX, "wrong": u32::MAX }
        })));
        let st = book.record("V2-0001", Category::Logic, true, 1.0, 10);
        assert_eq!(st.seen, u32::MAX);
        assert_eq!(st.correct, u32::MAX);
        let st = book.record("V2-0001", Category::Logic, false, 1.0, 20);
        assert_eq!(st.wrong, u32::MAX);
        assert_eq!(st.last_seen, 20);
    }

    #[test]
    fn test_missing_fields_default() {
        let book = StatsBook::from_json_lossy(Some(json!({ "V2-0001": { "seen": 2, "wrong": 2 } })));
        let st = book.resolved("V2-0001");
        assert_eq!(st.seen, 2);
        assert_eq!(st.correct, 0);
        assert_eq!(st.last_seen, 0);
        assert_eq!(book.resolved("nope"), QuestionStats::default());
    }

    #[test]
    fn test_malformed_stats_are_empty() {
        assert!(StatsBook::from_json_lossy(Some(json!("garbage"))).is_empty());
        assert!(StatsBook::from_json_lossy(Some(json!({ "V2-0001": { "seen": "many" } }))).is_empty());
        assert!(StatsBook::from_json_lossy(None).is_empty());
    }

    #[test]
    fn test_serde_camel_case() {
        let mut book = StatsBook::new();
        book.record("A", Category::Patterns, true, 2.0, 5);
        let v = serde_json::to_value(&book).unwrap();
        assert_eq!(v["A"]["avgTimeSec"], 2.0);
        assert_eq!(v["A"]["lastSeen"], 5);
        assert_eq!(v["A"]["category"], "Patterns");
    }

    #[test]
    fn test_seen_list() {
        let mut seen = SeenList::default();
        assert!(seen.mark("a"));
        assert!(!seen.mark("a"));
        assert!(seen.mark("b"));
        assert_eq!(seen.as_slice(), &["a".to_string(), "b".to_string()]);
        assert!(SeenList::from_json_lossy(Some(json!(42))).as_slice().is_empty());
    }
}
