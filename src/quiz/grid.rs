use std::fmt;

use crate::error::GenerateError;
use crate::quiz::choices::shuffle_lettered;
use crate::quiz::diagram::{svg_label, svg_letter, svg_line, svg_wrap, BROWN, PINK, TEAL};
use crate::quiz::rng::Mulberry32;
use crate::quiz::{Archetype, Category, QuestionItem, CHOICE_COUNT, LETTERS};

pub const GRID_SIZE: i64 = 4;
const CELL: i64 = 42;
const ORIGIN_X: i64 = 80;
const ORIGIN_Y: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

const MOVES: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "U",
            Move::Down => "D",
            Move::Left => "L",
            Move::Right => "R",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    /// One step; moves past an edge leave the cell where it is.
    pub fn step(self, m: Move) -> Cell {
        let max = GRID_SIZE - 1;
        match m {
            Move::Up => Cell { x: self.x, y: (self.y - 1).max(0) },
            Move::Down => Cell { x: self.x, y: (self.y + 1).min(max) },
            Move::Left => Cell { x: (self.x - 1).max(0), y: self.y },
            Move::Right => Cell { x: (self.x + 1).min(max), y: self.y },
        }
    }

    fn random(rng: &mut Mulberry32) -> Cell {
        let x = rng.range(0, GRID_SIZE - 1);
        let y = rng.range(0, GRID_SIZE - 1);
        Cell { x, y }
    }
}

/// Replay a move list from `start`.
pub fn walk(start: Cell, moves: &[Move]) -> Cell {
    moves.iter().fold(start, |cur, &m| cur.step(m))
}

/// A start cell, the moves to follow and four lettered candidate cells.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPuzzle {
    pub start: Cell,
    pub moves: Vec<Move>,
    /// Candidate cells in label order (A, B, C, D).
    pub cells: Vec<Cell>,
    pub answer_index: usize,
}

impl GridPuzzle {
    pub fn generate(rng: &mut Mulberry32) -> Result<Self, GenerateError> {
        let start = Cell::random(rng);
        let move_count = rng.range(4, 7);
        let mut moves = Vec::with_capacity(move_count as usize);
        for _ in 0..move_count {
            let m = rng
                .pick(&MOVES)
                .copied()
                .ok_or(GenerateError::EmptyCandidates("grid moves"))?;
            moves.push(m);
        }
        let end = walk(start, &moves);

        // Decoys: distinct random cells, none equal to the end cell.
        let mut cells = vec![end];
        while cells.len() < CHOICE_COUNT {
            let c = Cell::random(rng);
            if !cells.contains(&c) {
                cells.push(c);
            }
        }
        let answer_index = shuffle_lettered(rng, &mut cells, |c| *c == end)?;

        Ok(Self {
            start,
            moves,
            cells,
            answer_index,
        })
    }

    pub fn end(&self) -> Cell {
        walk(self.start, &self.moves)
    }

    pub fn move_legend(&self) -> String {
        self.moves
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn diagram(&self) -> String {
        let span = GRID_SIZE * CELL;
        let mut inner = format!(
            "\n  {}\n  <g stroke=\"{}\" stroke-width=\"3\" fill=\"none\">",
            svg_label(24, 40, "Follow the arrows"),
            BROWN
        );
        for i in 0..=GRID_SIZE {
            let yy = ORIGIN_Y + i * CELL;
            let xx = ORIGIN_X + i * CELL;
            inner.push_str("\n    ");
            inner.push_str(&svg_line(ORIGIN_X, yy, ORIGIN_X + span, yy));
            inner.push_str("\n    ");
            inner.push_str(&svg_line(xx, ORIGIN_Y, xx, ORIGIN_Y + span));
        }
        inner.push_str("\n  </g>");

        let sx = ORIGIN_X + self.start.x * CELL + CELL / 2;
        let sy = ORIGIN_Y + self.start.y * CELL + CELL / 2;
        inner.push_str(&format!(
            "\n  <circle cx=\"{}\" cy=\"{}\" r=\"10\" fill=\"{}\" stroke=\"{}\" stroke-width=\"3\"/>\n  {}",
            sx,
            sy,
            PINK,
            BROWN,
            svg_label(sx - 20, sy - 14, "Start")
        ));

        inner.push_str("\n  <g>");
        for (cell, letter) in self.cells.iter().zip(LETTERS) {
            let cx = ORIGIN_X + cell.x * CELL + 8;
            let cy = ORIGIN_Y + cell.y * CELL + 24;
            inner.push_str("\n    ");
            inner.push_str(&svg_letter(cx, cy, letter));
        }
        inner.push_str("\n  </g>");

        inner.push_str(&format!(
            "\n  <g>\n    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"42\" rx=\"12\" fill=\"#ffffff\" stroke=\"{}\" stroke-width=\"3\"/>\n    <text x=\"{}\" y=\"{}\" font-family=\"Quicksand, system-ui\" font-size=\"18\" font-weight=\"700\" fill=\"#0f766e\">{}</text>\n  </g>",
            ORIGIN_X,
            ORIGIN_Y + span + 14,
            span,
            TEAL,
            ORIGIN_X + 12,
            ORIGIN_Y + span + 44,
            self.move_legend()
        ));

        svg_wrap(&inner, 520, 260)
    }
}

pub fn grid_question(rng: &mut Mulberry32, id: String) -> Result<QuestionItem, GenerateError> {
    let puzzle = GridPuzzle::generate(rng)?;

    Ok(QuestionItem {
        id,
        level: 2,
        category: Category::Logic,
        points: 4,
        archetype: Archetype::Grid,
        prompt: "Where do you end up?".to_string(),
        diagram_markup: Some(puzzle.diagram()),
        choices: LETTERS.iter().map(|l| l.to_string()).collect(),
        answer_index: puzzle.answer_index,
    })
}
