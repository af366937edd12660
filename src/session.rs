use log::debug;

use crate::progress::LearnerProgress;
use crate::quiz::{QuestionItem, CHOICE_COUNT, LETTERS};
use crate::stats::{SeenList, StatsBook};

/// Questions per session, for both modes.
pub const DEFAULT_SESSION_SIZE: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizMode {
    Training,
    MockTest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Perfect,
    Great,
    KeepGoing,
}

impl Verdict {
    pub fn from_score(score: usize, total: usize) -> Self {
        if total == 0 {
            return Verdict::KeepGoing;
        }
        let percentage = score as f64 / total as f64 * 100.0;
        if percentage >= 100.0 {
            Verdict::Perfect
        } else if percentage >= 80.0 {
            Verdict::Great
        } else {
            Verdict::KeepGoing
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Verdict::Perfect => "Perfect Score!",
            Verdict::Great => "Great Job!",
            Verdict::KeepGoing => "Keep Going!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Perfect => "You're a Math Wizard! Labubu is so proud of you!",
            Verdict::Great => "Almost perfect! You're getting really strong at math.",
            Verdict::KeepGoing => "Every practice makes your brain grow bigger. Let's try again!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub mode: QuizMode,
    pub score: usize,
    pub total: usize,
    pub verdict: Verdict,
    pub elapsed_secs: i64,
    /// Set by `LearnerProgress::finish_session` when this session hit the daily goal.
    pub goal_reached: bool,
}

/// Everything that changes when the learner answers one question.
pub struct AnswerSink<'a> {
    pub stats: &'a mut StatsBook,
    pub seen: &'a mut SeenList,
    pub progress: &'a mut LearnerProgress,
}

/// One pass through a selected list of questions.
#[derive(Debug, Clone)]
pub struct QuizSession<'b> {
    pub mode: QuizMode,
    questions: Vec<&'b QuestionItem>,
    index: usize,
    score: usize,
    started_at_ms: i64,
}

impl<'b> QuizSession<'b> {
    pub fn new(mode: QuizMode, questions: Vec<&'b QuestionItem>, now_ms: i64) -> Self {
        Self {
            mode,
            questions,
            index: 0,
            score: 0,
            started_at_ms: now_ms,
        }
    }

    pub fn current(&self) -> Option<&'b QuestionItem> {
        self.questions.get(self.index).copied()
    }

    /// 1-based position of the current question.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// Answer the current question and move on. Returns `None` once the
    /// session is over. An out-of-range choice counts as wrong.
    pub fn answer(
        &mut self,
        choice: usize,
        time_sec: f64,
        now_ms: i64,
        sink: AnswerSink<'_>,
    ) -> Option<AnswerOutcome> {
        let q = self.current()?;
        let correct = q.is_correct(choice);
        if correct {
            self.score += 1;
        }

        sink.stats.record(&q.id, q.category, correct, time_sec, now_ms);
        sink.seen.mark(&q.id);
        sink.progress.record_answer(correct);
        debug!("{} answered {} ({})", q.id, choice, if correct { "ok" } else { "wrong" });

        self.index += 1;
        Some(AnswerOutcome {
            correct,
            correct_index: q.answer_index,
        })
    }

    pub fn elapsed_secs(&self, now_ms: i64) -> i64 {
        (now_ms.saturating_sub(self.started_at_ms) / 1000).max(0)
    }

    pub fn summary(&self, now_ms: i64) -> SessionSummary {
        SessionSummary {
            mode: self.mode,
            score: self.score,
            total: self.questions.len(),
            verdict: Verdict::from_score(self.score, self.questions.len()),
            elapsed_secs: self.elapsed_secs(now_ms),
            goal_reached: false,
        }
    }
}

/// Read a typed answer: `1`-`4` or a letter `A`-`D` (any case).
pub fn parse_choice(input: &str) -> Option<usize> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return (1..=CHOICE_COUNT).contains(&n).then(|| n - 1);
    }
    LETTERS.iter().position(|l| l.eq_ignore_ascii_case(input))
}

/// `mm:ss` timer text.
pub fn format_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Archetype, Category};

    fn item(id: &str, answer_index: usize) -> QuestionItem {
        QuestionItem {
            id: id.to_string(),
            level: 1,
            category: Category::Patterns,
            points: 3,
            archetype: Archetype::Pattern,
            prompt: "?".to_string(),
            diagram_markup: None,
            choices: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            answer_index,
        }
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(Verdict::from_score(24, 24), Verdict::Perfect);
        assert_eq!(Verdict::from_score(20, 24), Verdict::Great);
        assert_eq!(Verdict::from_score(19, 24), Verdict::KeepGoing);
        assert_eq!(Verdict::from_score(0, 0), Verdict::KeepGoing);
        assert_eq!(Verdict::Great.title(), "Great Job!");
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1"), Some(0));
        assert_eq!(parse_choice(" 4\n"), Some(3));
        assert_eq!(parse_choice("c"), Some(2));
        assert_eq!(parse_choice("D"), Some(3));
        assert_eq!(parse_choice("5"), None);
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice("banana"), None);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(75), "01:15");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(-4), "00:00");
    }

    #[test]
    fn test_session_flow_records_everything() {
        let a = item("A", 0);
        let b = item("B", 2);
        let mut stats = StatsBook::new();
        let mut seen = SeenList::default();
        let mut progress = LearnerProgress::default();
        let mut session = QuizSession::new(QuizMode::Training, vec![&a, &b], 0);

        assert_eq!(session.position(), 1);
        let out = session
            .answer(
                0,
                2.0,
                1_000,
                AnswerSink {
                    stats: &mut stats,
                    seen: &mut seen,
                    progress: &mut progress,
                },
            )
            .unwrap();
        assert!(out.correct);

        let out = session
            .answer(
                7,
                3.0,
                2_000,
                AnswerSink {
                    stats: &mut stats,
                    seen: &mut seen,
                    progress: &mut progress,
                },
            )
            .unwrap();
        assert!(!out.correct);
        assert_eq!(out.correct_index, 2);

        assert!(session.is_finished());
        assert!(session
            .answer(
                0,
                1.0,
                3_000,
                AnswerSink {
                    stats: &mut stats,
                    seen: &mut seen,
                    progress: &mut progress,
                },
            )
            .is_none());

        assert_eq!(stats.resolved("A").correct, 1);
        assert_eq!(stats.resolved("B").wrong, 1);
        assert!(seen.contains("A") && seen.contains("B"));
        assert_eq!(progress.total_solved, 2);
        assert_eq!(progress.correct_answers, 1);

        let s = session.summary(65_000);
        assert_eq!((s.score, s.total), (1, 2));
        assert_eq!(s.elapsed_secs, 65);
        assert_eq!(s.verdict, Verdict::KeepGoing);
    }
}
