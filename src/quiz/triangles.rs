use crate::error::GenerateError;
use crate::quiz::choices::make_four_choices;
use crate::quiz::diagram::{svg_label, svg_wrap};
use crate::quiz::rng::Mulberry32;
use crate::quiz::{Archetype, Category, QuestionItem};

/// A figure whose triangle count is known by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleFigure {
    pub name: &'static str,
    pub markup: &'static str,
    pub triangles: i64,
    pub points: u8,
}

pub const FIGURES: [TriangleFigure; 3] = [
    TriangleFigure {
        name: "square with one diagonal",
        markup: r##"
        <g transform="translate(155,45)">
          <rect x="0" y="0" width="200" height="200" fill="#ffffff" stroke="#8B5E3C" stroke-width="4"/>
          <line x1="0" y1="0" x2="200" y2="200" stroke="#4FB0AC" stroke-width="6"/>
        </g>"##,
        triangles: 2,
        points: 4,
    },
    TriangleFigure {
        name: "triangle split to the base midpoint",
        markup: r##"
        <g transform="translate(150,40)">
          <polygon points="100,0 0,190 200,190" fill="#ffffff" stroke="#8B5E3C" stroke-width="4"/>
          <line x1="100" y1="0" x2="100" y2="190" stroke="#4FB0AC" stroke-width="6"/>
        </g>"##,
        triangles: 2,
        points: 4,
    },
    TriangleFigure {
        // 4 small + 4 made of two halves
        name: "square with both diagonals",
        markup: r##"
        <g transform="translate(155,45)">
          <rect x="0" y="0" width="200" height="200" fill="#ffffff" stroke="#8B5E3C" stroke-width="4"/>
          <line x1="0" y1="0" x2="200" y2="200" stroke="#4FB0AC" stroke-width="6"/>
          <line x1="200" y1="0" x2="0" y2="200" stroke="#4FB0AC" stroke-width="6"/>
        </g>"##,
        triangles: 8,
        points: 5,
    },
];

impl TriangleFigure {
    pub fn generate(rng: &mut Mulberry32) -> Result<Self, GenerateError> {
        rng.pick(&FIGURES)
            .copied()
            .ok_or(GenerateError::EmptyCandidates("triangle figures"))
    }

    pub fn diagram(&self) -> String {
        let inner = format!(
            "\n    {}\n    {}\n  ",
            svg_label(24, 40, "Count the triangles"),
            self.markup
        );
        svg_wrap(&inner, 520, 260)
    }
}

pub fn triangles_question(rng: &mut Mulberry32, id: String) -> Result<QuestionItem, GenerateError> {
    let figure = TriangleFigure::generate(rng)?;
    let answer = figure.triangles;
    let ch = make_four_choices(rng, answer, |r| answer + r.range(-3, 4))?;

    Ok(QuestionItem {
        id,
        level: 2,
        category: Category::Geometry,
        points: figure.points,
        archetype: Archetype::Triangles,
        prompt: "How many triangles are in the picture?".to_string(),
        diagram_markup: Some(figure.diagram()),
        choices: ch.choices,
        answer_index: ch.answer_index,
    })
}
