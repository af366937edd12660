//! Host configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::warn;

use crate::session::DEFAULT_SESSION_SIZE;

pub const DATA_DIR_VAR: &str = "QUIZ_DATA_DIR";
pub const SESSION_SIZE_VAR: &str = "QUIZ_SESSION_SIZE";
pub const SESSION_SEED_VAR: &str = "QUIZ_SESSION_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub session_size: usize,
    /// Fixed session seed; `None` means a fresh one per session.
    pub session_seed: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            session_size: DEFAULT_SESSION_SIZE,
            session_seed: None,
        }
    }
}

impl Config {
    /// Read the process environment. Call `dotenv::dotenv()` first to pick up a `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Bad numbers fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let session_size = parse_var(&lookup, SESSION_SIZE_VAR)
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.session_size);
        let session_seed = parse_var(&lookup, SESSION_SEED_VAR);

        Self {
            data_dir,
            session_size,
            session_seed,
        }
    }

    /// The configured seed, or a fresh random one.
    pub fn next_session_seed(&self) -> u32 {
        self.session_seed.unwrap_or_else(rand::random::<u32>)
    }
}

fn parse_var<T: FromStr, F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("{}={:?} is not valid, using the default", key, raw);
            None
        }
    }
}
