//! Adaptive selection of the next session's questions.
//!
//! Every bank item gets a score; higher means "show sooner". The weights put
//! unseen items far above everything else, then weak items, then stale ones,
//! with mastery as a discount and a small seeded jitter to break ties.

use std::collections::HashSet;

use log::debug;

use crate::quiz::bank::Bank;
use crate::quiz::rng::Mulberry32;
use crate::quiz::QuestionItem;
use crate::stats::StatsBook;

pub const DAY_MS: i64 = 24 * 3600 * 1000;

/// Scoring weights. Only their relative sizes matter for ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionWeights {
    pub unseen_boost: i64,
    pub wrong_rate_weight: f64,
    pub wrong_count_step: i64,
    pub wrong_count_cap: i64,
    pub recency_window_ms: i64,
    pub recency_weight: f64,
    pub mastery_cap: i64,
    pub explicit_seen_penalty: i64,
    /// Jitter is drawn from `0..jitter_span`.
    pub jitter_span: i64,
}

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            unseen_boost: 1_000_000,
            wrong_rate_weight: 50_000.0,
            wrong_count_step: 6_000,
            wrong_count_cap: 20_000,
            recency_window_ms: 30 * DAY_MS,
            recency_weight: 25_000.0,
            mastery_cap: 18_000,
            explicit_seen_penalty: 12_000,
            jitter_span: 5_000,
        }
    }
}

/// The individual terms that make up one item's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub unseen_boost: i64,
    pub weakness_boost: i64,
    pub recency_boost: i64,
    pub mastery_penalty: i64,
    pub explicit_penalty: i64,
    pub jitter: i64,
}

impl ScoreBreakdown {
    /// Signed total; not floored at zero.
    pub fn total(&self) -> i64 {
        self.unseen_boost + self.weakness_boost + self.recency_boost
            - self.mastery_penalty
            - self.explicit_penalty
            + self.jitter
    }
}

/// Inputs the selector needs from the host for one session.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRequest<'a> {
    pub count: usize,
    pub seen_ids: &'a [String],
    pub stats: &'a StatsBook,
    pub session_seed: u32,
    pub now_ms: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Selector {
    pub weights: SelectionWeights,
}

impl Selector {
    pub fn new(weights: SelectionWeights) -> Self {
        Self { weights }
    }

    /// Score one item. `jitter` is supplied by the caller so the session
    /// stream stays in bank order.
    pub fn score_item(
        &self,
        id: &str,
        stats: &StatsBook,
        explicitly_seen: bool,
        now_ms: i64,
        jitter: i64,
    ) -> ScoreBreakdown {
        let w = &self.weights;
        let st = stats.resolved(id);
        let seen = st.seen;

        let unseen_boost = if seen == 0 { w.unseen_boost } else { 0 };

        let wrong_rate = if seen > 0 {
            st.wrong as f64 / seen as f64
        } else {
            0.0
        };
        let weakness_boost = (wrong_rate * w.wrong_rate_weight).round() as i64
            + (st.wrong as i64 * w.wrong_count_step).min(w.wrong_count_cap);

        let recency_ms = if st.last_seen != 0 {
            now_ms
                .saturating_sub(st.last_seen)
                .clamp(0, w.recency_window_ms)
        } else {
            w.recency_window_ms
        };
        let recency_boost =
            (recency_ms as f64 / w.recency_window_ms as f64 * w.recency_weight).round() as i64;

        let mastery_penalty = if seen > 0 {
            ((st.correct as f64 / seen as f64 * w.mastery_cap as f64).round() as i64)
                .min(w.mastery_cap)
        } else {
            0
        };

        let explicit_penalty = if explicitly_seen && seen == 0 {
            w.explicit_seen_penalty
        } else {
            0
        };

        ScoreBreakdown {
            unseen_boost,
            weakness_boost,
            recency_boost,
            mastery_penalty,
            explicit_penalty,
            jitter,
        }
    }

    /// Pick `min(count, bank size)` distinct items, favouring unseen, weak and
    /// stale ones, then shuffle them. Same request, same output.
    pub fn select<'b>(&self, bank: &'b Bank, req: &SelectionRequest<'_>) -> Vec<&'b QuestionItem> {
        let mut rng = Mulberry32::new(req.session_seed);
        let seen_ids: HashSet<&str> = req.seen_ids.iter().map(String::as_str).collect();

        let mut scored: Vec<(&QuestionItem, i64)> = bank
            .items
            .iter()
            .map(|q| {
                let jitter = (rng.next_f64() * self.weights.jitter_span as f64).floor() as i64;
                let explicitly_seen = seen_ids.contains(q.id.as_str());
                let breakdown =
                    self.score_item(&q.id, req.stats, explicitly_seen, req.now_ms, jitter);
                (q, breakdown.total())
            })
            .collect();

        // Stable: equal scores keep bank order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let mut used = HashSet::new();
        let mut picked = Vec::with_capacity(req.count.min(bank.len()));
        for (q, _) in scored {
            if picked.len() >= req.count {
                break;
            }
            if used.insert(q.id.as_str()) {
                picked.push(q);
            }
        }

        rng.shuffle(&mut picked);
        debug!(
            "selected {} of {} questions (seed {})",
            picked.len(),
            bank.len(),
            req.session_seed
        );
        picked
    }
}

/// Select with the default weights.
pub fn select_questions<'b>(
    bank: &'b Bank,
    count: usize,
    seen_ids: &[String],
    stats: &StatsBook,
    session_seed: u32,
    now_ms: i64,
) -> Vec<&'b QuestionItem> {
    let req = SelectionRequest {
        count,
        seen_ids,
        stats,
        session_seed,
        now_ms,
    };
    Selector::default().select(bank, &req)
}
