//! Learner-level totals: daily sets, streak, best score and session history.

use chrono::NaiveDate;
use log::{info, warn};

use crate::session::{QuizMode, SessionSummary};

/// Training sets per day that count as reaching the daily goal.
pub const DAILY_SET_GOAL: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub mode: QuizMode,
    pub score: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LearnerProgress {
    pub daily_sets_completed: u32,
    pub total_solved: u64,
    pub correct_answers: u64,
    pub best_score: usize,
    pub streak: u32,
    /// Day of the last finished session.
    pub last_date: Option<NaiveDate>,
    pub history: Vec<SessionRecord>,
}

impl LearnerProgress {
    pub fn from_json_lossy(value: Option<serde_json::Value>) -> Self {
        match value {
            None => Self::default(),
            Some(v) => match serde_json::from_value(v) {
                Ok(p) => p,
                Err(e) => {
                    warn!("ignoring malformed learner progress: {}", e);
                    Self::default()
                }
            },
        }
    }

    /// Zero the daily set counter when `today` is a new day.
    pub fn roll_over(&mut self, today: NaiveDate) {
        if self.last_date != Some(today) {
            self.daily_sets_completed = 0;
        }
    }

    /// Count one answered question.
    pub fn record_answer(&mut self, correct: bool) {
        self.total_solved = self.total_solved.saturating_add(1);
        if correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
        }
    }

    /// Fold a finished session in. Flags `summary.goal_reached` and returns it
    /// when this session reached the daily goal.
    pub fn finish_session(&mut self, summary: &mut SessionSummary, today: NaiveDate) -> bool {
        self.roll_over(today);

        self.streak = match self.last_date {
            Some(last) if last == today => self.streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.streak.saturating_add(1),
            _ => 1,
        };
        self.last_date = Some(today);

        let mut goal_reached = false;
        if summary.mode == QuizMode::Training {
            self.daily_sets_completed = self.daily_sets_completed.saturating_add(1);
            goal_reached = self.daily_sets_completed == DAILY_SET_GOAL;
        }
        summary.goal_reached = goal_reached;
        if summary.score > self.best_score {
            self.best_score = summary.score;
        }
        self.history.push(SessionRecord {
            date: today,
            mode: summary.mode,
            score: summary.score,
            total: summary.total,
        });

        info!(
            "session finished: {}/{} ({} sets today, streak {})",
            summary.score, summary.total, self.daily_sets_completed, self.streak
        );
        goal_reached
    }

    /// Whole-percent accuracy across every answered question.
    pub fn accuracy_percent(&self) -> u32 {
        if self.total_solved == 0 {
            return 0;
        }
        (self.correct_answers as f64 / self.total_solved as f64 * 100.0).round() as u32
    }

    pub fn daily_progress_percent(&self) -> u32 {
        (self.daily_sets_completed.saturating_mul(100) / DAILY_SET_GOAL).min(100)
    }
}
