//! Symbol ramps used to quantize intensity.
//!
//! Index 0 is the darkest (densest) symbol, the last index the lightest.

use crate::{PiicsaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered, non-empty symbol alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ramp {
    symbols: Vec<char>,
}

impl Ramp {
    pub const STANDARD: &'static str = "@%#*+=-:. ";
    pub const SIMPLE: &'static str = "@#+-. ";
    pub const BINARY: &'static str = "# ";

    pub fn new(symbols: &str) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(PiicsaError::InvalidParameter("ramp must not be empty".into()));
        }
        Ok(Self { symbols })
    }

    /// Ten-step ramp, dark to light.
    pub fn standard() -> Self {
        Self { symbols: Self::STANDARD.chars().collect() }
    }

    /// Short ramp of the reduced configuration.
    pub fn simple() -> Self {
        Self { symbols: Self::SIMPLE.chars().collect() }
    }

    pub fn binary() -> Self {
        Self { symbols: Self::BINARY.chars().collect() }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed ramp.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Largest valid index, `len - 1`.
    pub fn max_index(&self) -> usize {
        self.symbols.len() - 1
    }

    pub fn symbol(&self, index: usize) -> char {
        self.symbols[index.min(self.max_index())]
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Default for Ramp {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Ramp {
    type Err = PiicsaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ramp {
    type Error = PiicsaError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl From<Ramp> for String {
    fn from(ramp: Ramp) -> Self {
        ramp.symbols.into_iter().collect()
    }
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
