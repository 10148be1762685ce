//! Append-only transcript of everything said and typed during a session.

use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Ordered record of every prompt, input, and output line
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write the accumulated transcript to `path`, one line per entry,
    /// overwriting any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;

        tracing::debug!("Saved {} transcript lines to {:?}", self.lines.len(), path);
        Ok(())
    }
}
