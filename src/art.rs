//! Final text output.

use std::fmt;

/// One line of symbols per grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArt {
    lines: Vec<String>,
}

impl RenderedArt {
    pub(crate) fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Symbols per line (lines are all the same length).
    pub fn width(&self) -> usize {
        self.lines.first().map_or(0, |l| l.chars().count())
    }

    /// Lines joined with `\n`, each row terminated.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RenderedArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
