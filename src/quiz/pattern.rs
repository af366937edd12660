use crate::error::GenerateError;
use crate::quiz::choices::make_four_choices;
use crate::quiz::rng::Mulberry32;
use crate::quiz::{Archetype, Category, QuestionItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Each difference is one more than the last.
    GrowingStep,
    /// a, b, a, b, a
    Repeat,
    /// Every term is the sum of the previous two.
    RunningSum,
}

const KINDS: [PatternKind; 3] = [
    PatternKind::GrowingStep,
    PatternKind::Repeat,
    PatternKind::RunningSum,
];

/// Five visible terms and the term that comes next.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub kind: PatternKind,
    pub terms: Vec<i64>,
    pub next: i64,
}

impl Sequence {
    pub fn generate(rng: &mut Mulberry32) -> Result<Self, GenerateError> {
        let kind = *rng
            .pick(&KINDS)
            .ok_or(GenerateError::EmptyCandidates("pattern kinds"))?;

        let seq = match kind {
            PatternKind::Repeat => {
                let a = rng.range(1, 6);
                let b = rng.range(1, 6);
                Sequence {
                    kind,
                    terms: vec![a, b, a, b, a],
                    next: b,
                }
            }
            PatternKind::GrowingStep => {
                let start = rng.range(1, 6);
                let first_step = rng.range(1, 4);
                let mut terms = vec![start];
                let mut step = first_step;
                for _ in 0..4 {
                    let last = terms[terms.len() - 1];
                    terms.push(last + step);
                    step += 1;
                }
                // `step` is now one past the last difference used.
                let next = terms[4] + step;
                Sequence { kind, terms, next }
            }
            PatternKind::RunningSum => {
                let a = rng.range(1, 9);
                let b = rng.range(1, 9);
                let mut terms = vec![a, b];
                while terms.len() < 5 {
                    let n = terms.len();
                    terms.push(terms[n - 2] + terms[n - 1]);
                }
                let next = terms[3] + terms[4];
                Sequence { kind, terms, next }
            }
        };
        Ok(seq)
    }

    pub fn prompt(&self) -> String {
        let shown = self
            .terms
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("What comes next? {}, ...", shown)
    }
}

pub fn pattern_question(rng: &mut Mulberry32, id: String) -> Result<QuestionItem, GenerateError> {
    let seq = Sequence::generate(rng)?;
    let next = seq.next;

    let (ch, level, points) = match seq.kind {
        PatternKind::Repeat => (make_four_choices(rng, next, |r| r.range(0, 12))?, 1, 3),
        PatternKind::GrowingStep => (make_four_choices(rng, next, |r| next + r.range(-3, 3))?, 2, 4),
        PatternKind::RunningSum => (make_four_choices(rng, next, |r| next + r.range(-6, 6))?, 2, 4),
    };

    Ok(QuestionItem {
        id,
        level,
        category: Category::Patterns,
        points,
        archetype: Archetype::Pattern,
        prompt: seq.prompt(),
        diagram_markup: None,
        choices: ch.choices,
        answer_index: ch.answer_index,
    })
}
