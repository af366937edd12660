pub mod bank;
pub mod blocks;
pub mod choices;
pub mod diagram;
pub mod equation;
pub mod grid;
pub mod mirror;
pub mod pattern;
pub mod rng;
pub mod selector;
pub mod triangles;

use std::fmt;

/// Number of options every question offers.
pub const CHOICE_COUNT: usize = 4;

/// Labels used by the lettered question types.
pub const LETTERS: [&str; CHOICE_COUNT] = ["A", "B", "C", "D"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Category {
    Arithmetic,
    Logic,
    Geometry,
    Patterns,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Arithmetic => "Arithmetic",
            Category::Logic => "Logic",
            Category::Geometry => "Geometry",
            Category::Patterns => "Patterns",
        };
        f.write_str(name)
    }
}

/// Which generator produced an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Archetype {
    Blocks,
    Mirror,
    Grid,
    Equation,
    Pattern,
    Triangles,
}

/// One multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionItem {
    pub id: String,
    pub level: u8,
    pub category: Category,
    pub points: u8,
    pub archetype: Archetype,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram_markup: Option<String>,
    pub choices: Vec<String>,
    pub answer_index: usize,
}

impl QuestionItem {
    pub fn correct_choice(&self) -> &str {
        &self.choices[self.answer_index]
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer_index
    }

    pub fn has_diagram(&self) -> bool {
        self.diagram_markup.is_some()
    }
}
