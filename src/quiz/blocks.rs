use crate::error::GenerateError;
use crate::quiz::choices::make_four_choices;
use crate::quiz::diagram::{svg_block, svg_label, svg_wrap};
use crate::quiz::rng::Mulberry32;
use crate::quiz::{Archetype, Category, QuestionItem};

const BLOCK_SIZE: i64 = 26;
const BLOCK_GAP: i64 = 10;
const BASE_X: i64 = 50;
const BASE_Y: i64 = 190;

/// Columns of stacked blocks, 3-5 columns of height 1-4.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStacks {
    pub heights: Vec<i64>,
}

impl BlockStacks {
    pub fn generate(rng: &mut Mulberry32) -> Self {
        let cols = rng.range(3, 5);
        let heights = (0..cols).map(|_| rng.range(1, 4)).collect();
        Self { heights }
    }

    pub fn total(&self) -> i64 {
        self.heights.iter().sum()
    }

    pub fn diagram(&self) -> String {
        let mut inner = format!(
            "\n  <g>\n    {}\n  </g>\n  <g>",
            svg_label(24, 40, "Count the blocks")
        );
        for (c, &height) in self.heights.iter().enumerate() {
            let x = BASE_X + c as i64 * (BLOCK_SIZE + BLOCK_GAP);
            for r in 0..height {
                let y = BASE_Y - (r + 1) * BLOCK_SIZE;
                inner.push_str("\n      ");
                inner.push_str(&svg_block(x, y, BLOCK_SIZE));
            }
        }
        inner.push_str("\n  </g>");
        svg_wrap(&inner, 520, 220)
    }
}

pub fn blocks_question(rng: &mut Mulberry32, id: String) -> Result<QuestionItem, GenerateError> {
    let stacks = BlockStacks::generate(rng);
    let total = stacks.total();
    let ch = make_four_choices(rng, total, |r| total + r.range(-3, 3))?;
    let hard = total > 10;

    Ok(QuestionItem {
        id,
        level: if hard { 2 } else { 1 },
        category: Category::Geometry,
        points: if hard { 5 } else { 4 },
        archetype: Archetype::Blocks,
        prompt: "How many blocks are there?".to_string(),
        diagram_markup: Some(stacks.diagram()),
        choices: ch.choices,
        answer_index: ch.answer_index,
    })
}
