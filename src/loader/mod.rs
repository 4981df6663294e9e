//! Vocabulary loader.
//!
//! Reads a term list and feeds it into any [`TextFiller`]. The format is one
//! entry per line:
//!
//! ```text
//! # comment
//! new york<TAB>120
//! newark<TAB>15
//! new
//! ```
//!
//! A line without a priority column gets the configured default priority.
//! Blank lines and comment lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::data_structures::TextFiller;
use crate::error::load::LoadError;

/// Outcome of a load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Terms newly stored in the index
    pub inserted: usize,

    /// Valid entries whose term was already stored
    pub duplicates: usize,

    /// Malformed lines skipped because `skip_invalid` is set
    pub skipped: usize,
}

/// One parsed vocabulary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Raw term text, normalized later by the index
    pub term: &'a str,

    /// Priority for the term
    pub priority: u32,
}

/// Parses term lists according to a [`LoaderConfig`].
#[derive(Debug, Clone, Default)]
pub struct TermLoader {
    config: LoaderConfig,
}

impl TermLoader {
    /// Creates a loader with the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Returns the loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parses a single line.
    ///
    /// # Arguments
    ///
    /// * `line_no` - 1-based line number used in errors
    /// * `line` - The raw line without its terminator
    ///
    /// # Returns
    ///
    /// * `Ok(Some(entry))` - The line holds an entry.
    /// * `Ok(None)` - The line is blank or a comment.
    /// * `Err(LoadError)` - The line is malformed.
    pub fn parse_line<'a>(&self, line_no: usize, line: &'a str) -> Result<Option<Entry<'a>>, LoadError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if !self.config.comment_prefix.is_empty() && trimmed.starts_with(&self.config.comment_prefix) {
            return Ok(None);
        }

        let (term, priority) = match line.rsplit_once(self.config.delimiter) {
            Some((term, raw)) => {
                let raw = raw.trim();
                let priority = if raw.is_empty() {
                    self.config.default_priority
                } else {
                    raw.parse::<u32>().map_err(|_| LoadError::InvalidPriority {
                        line: line_no,
                        value: raw.to_string(),
                    })?
                };
                (term, priority)
            }
            None => (line, self.config.default_priority),
        };

        let max = self.config.max_term_length;
        let length = term.trim().chars().count();
        if max > 0 && length > max {
            return Err(LoadError::TermTooLong {
                line: line_no,
                length,
                max,
            });
        }

        Ok(Some(Entry { term, priority }))
    }

    /// Loads every entry from `reader` into `filler`.
    ///
    /// With `skip_invalid` set, malformed lines are counted and logged;
    /// otherwise the first one aborts the load. Entries inserted before the
    /// failure stay in the index.
    pub fn load_reader<R, F>(&self, reader: R, filler: &mut F) -> Result<LoadReport, LoadError>
    where
        R: BufRead,
        F: TextFiller + ?Sized,
    {
        let mut report = LoadReport::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            match self.insert_line(line_no, &line, filler) {
                Ok(Some(true)) => report.inserted += 1,
                Ok(Some(false)) => report.duplicates += 1,
                Ok(None) => {}
                Err(err) if self.config.skip_invalid => {
                    warn!(line = line_no, error = %err, "skipping vocabulary line");
                    report.skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            skipped = report.skipped,
            "vocabulary loaded"
        );
        Ok(report)
    }

    /// Opens `path` and loads it with [`TermLoader::load_reader`].
    pub fn load_path<P, F>(&self, path: P, filler: &mut F) -> Result<LoadReport, LoadError>
    where
        P: AsRef<Path>,
        F: TextFiller + ?Sized,
    {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening vocabulary");
        let file = File::open(path)?;
        self.load_reader(BufReader::new(file), filler)
    }

    fn insert_line<F>(&self, line_no: usize, line: &str, filler: &mut F) -> Result<Option<bool>, LoadError>
    where
        F: TextFiller + ?Sized,
    {
        let Some(entry) = self.parse_line(line_no, line)? else {
            return Ok(None);
        };

        filler
            .insert_with_priority(entry.term, entry.priority)
            .map(Some)
            .map_err(|source| LoadError::InvalidTerm {
                line: line_no,
                source,
            })
    }
}
