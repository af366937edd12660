//! The fixed question catalog.
//!
//! One seeded stream drives both the choice of generator for each slot and
//! every draw inside that generator, so `(version, size, seed)` fully
//! determines the bank. It is built once and only read afterwards.

use std::sync::OnceLock;

use log::{debug, info};

use crate::error::GenerateError;
use crate::quiz::blocks::blocks_question;
use crate::quiz::equation::equation_question;
use crate::quiz::grid::grid_question;
use crate::quiz::mirror::mirror_question;
use crate::quiz::pattern::pattern_question;
use crate::quiz::rng::Mulberry32;
use crate::quiz::triangles::triangles_question;
use crate::quiz::QuestionItem;

pub const BANK_VERSION: u32 = 2;
pub const BANK_SIZE: usize = 1000;
pub const BANK_SEED: u32 = 0xC0FF_EE11;

pub type Generator = fn(&mut Mulberry32, String) -> Result<QuestionItem, GenerateError>;

/// Generators in draw order. The order is part of the bank's identity.
pub const GENERATORS: [Generator; 6] = [
    blocks_question,
    mirror_question,
    grid_question,
    equation_question,
    pattern_question,
    triangles_question,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankConfig {
    pub version: u32,
    pub size: usize,
    pub seed: u32,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            version: BANK_VERSION,
            size: BANK_SIZE,
            seed: BANK_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bank {
    pub version: u32,
    pub size: usize,
    pub items: Vec<QuestionItem>,
}

impl Bank {
    pub fn build(config: BankConfig) -> Result<Self, GenerateError> {
        let mut rng = Mulberry32::new(config.seed);
        let mut items = Vec::with_capacity(config.size);

        for i in 0..config.size {
            let generator = rng
                .pick(&GENERATORS)
                .copied()
                .ok_or(GenerateError::EmptyCandidates("bank generators"))?;
            let id = question_id(config.version, i + 1);
            let item = generator(&mut rng, id)?;
            debug!("generated {} ({:?})", item.id, item.archetype);
            items.push(item);
        }

        info!(
            "built question bank v{} with {} items (seed {:#x})",
            config.version,
            items.len(),
            config.seed
        );
        Ok(Self {
            version: config.version,
            size: config.size,
            items,
        })
    }

    pub fn get(&self, id: &str) -> Option<&QuestionItem> {
        self.items.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `V<version>-<4-digit sequence>`, sequence starting at 1.
pub fn question_id(version: u32, sequence: usize) -> String {
    format!("V{}-{:04}", version, sequence)
}

/// Build the default bank.
pub fn build_bank() -> Result<Bank, GenerateError> {
    Bank::build(BankConfig::default())
}

static SHARED_BANK: OnceLock<Bank> = OnceLock::new();

/// The default bank, built on first call and kept for the rest of the process.
/// A failed build is returned to the caller and nothing is cached.
pub fn shared_bank() -> Result<&'static Bank, GenerateError> {
    if let Some(bank) = SHARED_BANK.get() {
        return Ok(bank);
    }
    let bank = build_bank()?;
    Ok(SHARED_BANK.get_or_init(|| bank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_format() {
        assert_eq!(question_id(2, 1), "V2-0001");
        assert_eq!(question_id(2, 1000), "V2-1000");
        assert_eq!(question_id(3, 42), "V3-0042");
    }

    #[test]
    fn test_small_bank_deterministic() {
        let config = BankConfig {
            version: 9,
            size: 40,
            seed: 7,
        };
        let a = Bank::build(config).unwrap();
        let b = Bank::build(config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert_eq!(a.items[0].id, "V9-0001");
        assert_eq!(a.items[39].id, "V9-0040");
    }

    #[test]
    fn test_different_seed_different_bank() {
        let a = Bank::build(BankConfig { version: 1, size: 30, seed: 1 }).unwrap();
        let b = Bank::build(BankConfig { version: 1, size: 30, seed: 2 }).unwrap();
        assert_ne!(a.items, b.items);
    }

    #[test]
    fn test_get_by_id() {
        let bank = Bank::build(BankConfig { version: 2, size: 5, seed: 3 }).unwrap();
        assert_eq!(bank.get("V2-0003").map(|q| q.id.as_str()), Some("V2-0003"));
        assert!(bank.get("V2-0006").is_none());
    }

    #[test]
    fn test_empty_bank() {
        let bank = Bank::build(BankConfig { version: 2, size: 0, seed: 3 }).unwrap();
        assert!(bank.is_empty());
    }

    #[test]
    fn test_shared_bank_is_cached() {
        let a = shared_bank().unwrap();
        let b = shared_bank().unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.len(), BANK_SIZE);
    }
}
