use log::debug;

use crate::error::GenerateError;
use crate::quiz::rng::Mulberry32;
use crate::quiz::CHOICE_COUNT;

/// Consecutive duplicate draws tolerated before the distractor spread widens.
pub const STALL_LIMIT: u32 = 32;
/// Hard cap on distractor draws for a single question.
pub const MAX_DRAWS: usize = 10_000;

/// Shuffled options plus the position of the correct one.
#[derive(Debug, Clone, PartialEq)]
pub struct Choices {
    pub choices: Vec<String>,
    pub answer_index: usize,
}

/// Build 4 distinct numeric options around `correct`.
///
/// `make_wrong` is called until three new strings are found. Draws that repeat
/// an existing option are discarded; after `STALL_LIMIT` repeats in a row an
/// extra `-spread..=spread` offset is added to every further draw so a narrow
/// generator cannot spin forever.
pub fn make_four_choices<F>(
    rng: &mut Mulberry32,
    correct: i64,
    mut make_wrong: F,
) -> Result<Choices, GenerateError>
where
    F: FnMut(&mut Mulberry32) -> i64,
{
    let correct_text = correct.to_string();
    let mut choices = vec![correct_text.clone()];
    let mut stalled = 0;
    let mut spread = 0;
    let mut draws = 0;

    while choices.len() < CHOICE_COUNT {
        if draws >= MAX_DRAWS {
            return Err(GenerateError::ChoicesExhausted {
                correct: correct_text,
                draws,
                found: choices.len(),
            });
        }
        draws += 1;

        let mut wrong = make_wrong(rng);
        if spread > 0 {
            wrong += rng.range(-spread, spread);
        }
        let text = wrong.to_string();
        if choices.contains(&text) {
            stalled += 1;
            if stalled >= STALL_LIMIT {
                spread += 1;
                stalled = 0;
                debug!("widening distractor spread to {} around {}", spread, correct);
            }
            continue;
        }
        stalled = 0;
        choices.push(text);
    }

    rng.shuffle(&mut choices);
    let answer_index = choices
        .iter()
        .position(|c| *c == correct_text)
        .ok_or(GenerateError::MissingAnswer(correct_text))?;

    Ok(Choices {
        choices,
        answer_index,
    })
}

/// Shuffle a fixed set of lettered candidates and report which letter
/// ends up on the one flagged as correct.
pub fn shuffle_lettered<T>(
    rng: &mut Mulberry32,
    candidates: &mut [T],
    is_correct: impl Fn(&T) -> bool,
) -> Result<usize, GenerateError> {
    rng.shuffle(candidates);
    candidates
        .iter()
        .position(is_correct)
        .ok_or(GenerateError::EmptyCandidates("no correct candidate after shuffle"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_valid(ch: &Choices, correct: i64) {
        assert_eq!(ch.choices.len(), CHOICE_COUNT);
        let unique: HashSet<_> = ch.choices.iter().collect();
        assert_eq!(unique.len(), CHOICE_COUNT, "duplicates in {:?}", ch.choices);
        assert_eq!(ch.choices[ch.answer_index], correct.to_string());
    }

    #[test]
    fn test_small_delta_distractors() {
        let mut rng = Mulberry32::new(5);
        for correct in 0..50 {
            let ch = make_four_choices(&mut rng, correct, |r| correct + r.range(-3, 3)).unwrap();
            assert_valid(&ch, correct);
        }
    }

    #[test]
    fn test_constant_wrong_generator_widens() {
        // A generator that only ever returns the correct value would hang
        // without the widening step.
        let mut rng = Mulberry32::new(77);
        let ch = make_four_choices(&mut rng, 9, |_| 9).unwrap();
        assert_valid(&ch, 9);
    }

    #[test]
    fn test_two_value_generator_widens() {
        let mut rng = Mulberry32::new(78);
        let ch = make_four_choices(&mut rng, 4, |r| if r.next_f64() < 0.5 { 4 } else { 5 }).unwrap();
        assert_valid(&ch, 4);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let build = || {
            let mut rng = Mulberry32::new(1234);
            make_four_choices(&mut rng, 12, |r| 12 + r.range(-6, 6)).unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_shuffle_lettered() {
        let mut rng = Mulberry32::new(3);
        let mut cands = vec![(0, true), (1, false), (2, false), (3, false)];
        let idx = shuffle_lettered(&mut rng, &mut cands, |c| c.1).unwrap();
        assert!(cands[idx].1);
        assert_eq!(cands.iter().filter(|c| c.1).count(), 1);
    }

    #[test]
    fn test_shuffle_lettered_without_correct() {
        let mut rng = Mulberry32::new(3);
        let mut cands = vec![1, 2, 3, 4];
        assert!(shuffle_lettered(&mut rng, &mut cands, |c| *c == 9).is_err());
    }
}
