use crate::error::GenerateError;
use crate::quiz::choices::shuffle_lettered;
use crate::quiz::diagram::{svg_label, svg_wrap, BROWN, PINK, TEAL};
use crate::quiz::rng::Mulberry32;
use crate::quiz::{Archetype, Category, QuestionItem, LETTERS};

/// Polylines drawn inside a 0..100 box.
pub const SHAPES: [&str; 4] = [
    "10,80 10,20 55,20 55,45 35,45 35,80",
    "20,80 20,30 45,30 45,20 80,20 80,80",
    "15,75 15,25 40,25 40,55 70,55 70,75",
    "25,80 25,20 55,20 55,35 40,35 40,80",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Mirror,
    Identity,
    Shift,
    Squash,
}

type Point = (i64, i64);

fn parse_points(points: &str) -> Vec<Point> {
    points
        .split_whitespace()
        .filter_map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some((x.parse().ok()?, y.parse().ok()?))
        })
        .collect()
}

fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{},{}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Transform {
    pub fn apply(self, points: &str) -> String {
        let moved: Vec<Point> = parse_points(points)
            .into_iter()
            .map(|(x, y)| match self {
                Transform::Mirror => (100 - x, y),
                Transform::Identity => (x, y),
                Transform::Shift => ((x + 8).min(95), y),
                Transform::Squash => {
                    let squashed = (y as f64 * 0.85 + 8.0).round() as i64;
                    (x, squashed.clamp(5, 95))
                }
            })
            .collect();
        format_points(&moved)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MirrorOption {
    pub transform: Transform,
    pub points: String,
}

/// A base shape and four transformed candidates in label order.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorPuzzle {
    pub base: String,
    pub options: Vec<MirrorOption>,
    pub answer_index: usize,
}

impl MirrorPuzzle {
    pub fn generate(rng: &mut Mulberry32) -> Result<Self, GenerateError> {
        let base = rng
            .pick(&SHAPES)
            .ok_or(GenerateError::EmptyCandidates("mirror shapes"))?
            .to_string();

        let mut options: Vec<MirrorOption> = [
            Transform::Mirror,
            Transform::Identity,
            Transform::Shift,
            Transform::Squash,
        ]
        .into_iter()
        .map(|transform| MirrorOption {
            transform,
            points: transform.apply(&base),
        })
        .collect();
        let answer_index =
            shuffle_lettered(rng, &mut options, |o| o.transform == Transform::Mirror)?;

        Ok(Self {
            base,
            options,
            answer_index,
        })
    }

    fn option_box(x: i64, y: i64, label: &str, points: &str) -> String {
        format!(
            r#"
    <g transform="translate({x},{y})">
      <rect x="0" y="0" width="110" height="110" rx="16" fill="white" stroke="{brown}" stroke-width="3"/>
      <polyline points="{points}" fill="none" stroke="{teal}" stroke-width="8" stroke-linecap="round" stroke-linejoin="round" transform="translate(5,5) scale(1.0)"/>
      <text x="10" y="28" font-family="Fredoka One, system-ui" font-size="22" fill="{pink}" stroke="{brown}" stroke-width="1">{label}</text>
    </g>"#,
            x = x,
            y = y,
            brown = BROWN,
            teal = TEAL,
            pink = PINK,
            points = points,
            label = label
        )
    }

    pub fn diagram(&self) -> String {
        let mut inner = format!(
            r#"
  {label}
  <g transform="translate(50,55)">
    <rect x="0" y="0" width="140" height="140" rx="18" fill="white" stroke="{brown}" stroke-width="3"/>
    <polyline points="{base}" fill="none" stroke="{teal}" stroke-width="9" stroke-linecap="round" stroke-linejoin="round" transform="translate(15,15) scale(1.1)"/>
  </g>
  <line x1="220" y1="62" x2="220" y2="197" stroke="{brown}" stroke-width="4" stroke-dasharray="8 8"/>
  <text x="205" y="210" font-family="Quicksand, system-ui" font-size="14" font-weight="700" fill="{brown}">mirror line</text>
"#,
            label = svg_label(24, 40, "Mirror"),
            brown = BROWN,
            teal = TEAL,
            base = self.base
        );

        let (ox, oy) = (260, 60);
        let offsets = [(0, 0), (120, 0), (0, 120), (120, 120)];
        for ((option, (dx, dy)), letter) in self.options.iter().zip(offsets).zip(LETTERS) {
            inner.push_str(&Self::option_box(ox + dx, oy + dy, letter, &option.points));
        }
        svg_wrap(&inner, 520, 260)
    }
}

pub fn mirror_question(rng: &mut Mulberry32, id: String) -> Result<QuestionItem, GenerateError> {
    let puzzle = MirrorPuzzle::generate(rng)?;

    Ok(QuestionItem {
        id,
        level: 2,
        category: Category::Geometry,
        points: 5,
        archetype: Archetype::Mirror,
        prompt: "Which option is the mirror image?".to_string(),
        diagram_markup: Some(puzzle.diagram()),
        choices: LETTERS.iter().map(|l| l.to_string()).collect(),
        answer_index: puzzle.answer_index,
    })
}
