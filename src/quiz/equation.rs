use crate::error::GenerateError;
use crate::quiz::choices::make_four_choices;
use crate::quiz::diagram::{svg_label, svg_wrap, BROWN, PINK, TEAL};
use crate::quiz::rng::Mulberry32;
use crate::quiz::{Archetype, Category, QuestionItem};

/// Hidden values behind the three shape symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeValues {
    pub circle: i64,
    pub square: i64,
    pub triangle: i64,
}

impl ShapeValues {
    pub fn generate(rng: &mut Mulberry32) -> Self {
        let circle = rng.range(1, 5);
        let square = rng.range(2, 7);
        let triangle = rng.range(1, 6);
        Self {
            circle,
            square,
            triangle,
        }
    }

    /// circle + circle + square
    pub fn first_line(&self) -> i64 {
        self.circle + self.circle + self.square
    }

    /// triangle + square
    pub fn second_line(&self) -> i64 {
        self.triangle + self.square
    }

    /// circle + triangle, taken straight from the hidden values.
    pub fn answer(&self) -> i64 {
        self.circle + self.triangle
    }

    pub fn diagram(&self) -> String {
        let circle = |cx: i64| {
            format!(
                r#"<circle cx="{}" cy="18" r="14" fill="white" stroke="{}" stroke-width="4"/>"#,
                cx, TEAL
            )
        };
        let square = |x: i64| {
            format!(
                r#"<rect x="{}" y="4" width="28" height="28" rx="6" fill="white" stroke="{}" stroke-width="4"/>"#,
                x, PINK
            )
        };
        let triangle = |x: i64| {
            format!(
                r#"<polygon points="{},30 {},4 {},4" fill="white" stroke="{}" stroke-width="4"/>"#,
                x + 20,
                x + 5,
                x + 35,
                BROWN
            )
        };
        let text = |x: i64, t: &str| format!(r#"<text x="{}" y="26">{}</text>"#, x, t);

        let rows = [
            vec![
                circle(20),
                text(45, "+"),
                circle(85),
                text(110, "+"),
                square(140),
                text(180, &format!("= {}", self.first_line())),
            ],
            vec![
                triangle(0),
                text(45, "+"),
                square(70),
                text(110, &format!("= {}", self.second_line())),
            ],
            vec![circle(20), text(45, "+"), triangle(65), text(120, "= ?")],
        ];

        let mut inner = format!(
            "\n  {}\n  <g transform=\"translate(50,70)\" font-family=\"Quicksand, system-ui\" font-size=\"26\" font-weight=\"800\" fill=\"{}\">",
            svg_label(24, 40, "Find the value"),
            BROWN
        );
        for (i, row) in rows.iter().enumerate() {
            inner.push_str(&format!("\n    <g transform=\"translate(0,{})\">", i * 60));
            for part in row {
                inner.push_str("\n      ");
                inner.push_str(part);
            }
            inner.push_str("\n    </g>");
        }
        inner.push_str("\n  </g>");
        svg_wrap(&inner, 520, 260)
    }
}

pub fn equation_question(rng: &mut Mulberry32, id: String) -> Result<QuestionItem, GenerateError> {
    let values = ShapeValues::generate(rng);
    let answer = values.answer();
    let ch = make_four_choices(rng, answer, |r| answer + r.range(-3, 4))?;

    Ok(QuestionItem {
        id,
        level: 2,
        category: Category::Logic,
        points: 5,
        archetype: Archetype::Equation,
        prompt: "What number should replace ?".to_string(),
        diagram_markup: Some(values.diagram()),
        choices: ch.choices,
        answer_index: ch.answer_index,
    })
}
