//! Per-level elimination history

use crate::error::{Result, StepdownError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One elimination level: the error measured for a surviving feature set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureLevelEntry {
    /// Error recorded for this level
    pub error: f64,
    /// Feature columns included at this level, in enumeration order
    pub features: Vec<String>,
}

impl FeatureLevelEntry {
    /// Create an entry for one level
    pub fn new(error: f64, features: Vec<String>) -> Self {
        Self { error, features }
    }

    /// Size of the feature set at this level
    pub fn size(&self) -> usize {
        self.features.len()
    }
}

/// Append-only history of (error, feature set) pairs, one per level.
///
/// Levels run from the full feature set down to the smallest surviving
/// set; sizes are strictly decreasing. Owned by the loop controller during
/// a run, then handed off as an immutable artifact for downstream
/// selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureLevelTrace {
    target: String,
    levels: Vec<FeatureLevelEntry>,
}

impl FeatureLevelTrace {
    /// Create an empty trace for the given target column
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            levels: Vec::new(),
        }
    }

    /// The target column the trainer predicted
    pub fn target(&self) -> &str {
        &self.target
    }

    /// All recorded levels, largest feature set first
    pub fn levels(&self) -> &[FeatureLevelEntry] {
        &self.levels
    }

    /// Number of recorded levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether no level has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Append one level; its set must be strictly smaller than the last
    pub fn push(&mut self, entry: FeatureLevelEntry) -> Result<()> {
        if let Some(last) = self.levels.last() {
            if entry.size() >= last.size() {
                return Err(StepdownError::MalformedTrace(format!(
                    "level of size {} must be smaller than preceding level of size {}",
                    entry.size(),
                    last.size()
                )));
            }
        }
        self.levels.push(entry);
        Ok(())
    }

    /// The level whose feature set has exactly the given size
    pub fn level_of_size(&self, size: usize) -> Option<&FeatureLevelEntry> {
        self.levels.iter().find(|entry| entry.size() == size)
    }

    /// Write the line-oriented interop format: the target column name, then
    /// for each level its feature count, its error, and the feature names
    /// one per line.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", self.target)?;
        for level in &self.levels {
            writeln!(writer, "{}", level.size())?;
            writeln!(writer, "{}", level.error)?;
            for name in &level.features {
                writeln!(writer, "{name}")?;
            }
        }
        Ok(())
    }

    /// Parse the line-oriented interop format
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let target = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(StepdownError::MalformedTrace(
                    "empty input, expected a target column name".to_string(),
                ))
            }
        };

        let mut trace = Self::new(target);
        while let Some(line) = lines.next() {
            let line = line?;
            let count: usize = line.trim().parse().map_err(|_| {
                StepdownError::MalformedTrace(format!("expected a feature count, found '{line}'"))
            })?;

            let error_line = lines
                .next()
                .ok_or_else(|| StepdownError::MalformedTrace("missing error value".to_string()))??;
            let error: f64 = error_line.trim().parse().map_err(|_| {
                StepdownError::MalformedTrace(format!(
                    "expected an error value, found '{error_line}'"
                ))
            })?;

            let mut features = Vec::with_capacity(count);
            for _ in 0..count {
                let name = lines.next().ok_or_else(|| {
                    StepdownError::MalformedTrace(format!(
                        "level of size {count} ended after {} feature names",
                        features.len()
                    ))
                })??;
                features.push(name);
            }

            trace.push(FeatureLevelEntry::new(error, features))?;
        }
        Ok(trace)
    }

    /// Write the interop format to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)
    }

    /// Read the interop format from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::read_from(BufReader::new(File::open(path)?))
    }
}
