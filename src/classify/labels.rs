//! Label table loading.
//!
//! The label table is a newline-delimited ordered list of label strings;
//! line `i` corresponds to the model's output score index `i`.

use crate::error::{Result, SigntypeError};
use std::fs;
use std::path::Path;

/// Ordered label table loaded at classifier initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Loads the table from a newline-delimited file.
    ///
    /// # Errors
    /// `LabelTableNotFound` if the file is missing, `LabelTableEmpty` if it
    /// contains no labels.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SigntypeError::LabelTableNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }
        let contents = fs::read_to_string(path)?;
        let table = Self::parse(&contents);
        if table.is_empty() {
            return Err(SigntypeError::LabelTableEmpty {
                path: path.to_string_lossy().to_string(),
            });
        }
        Ok(table)
    }

    /// Parses newline-delimited label text.
    ///
    /// Lines are kept verbatim apart from a trailing `\r`; only trailing
    /// blank lines are dropped, so index positions stay aligned with the
    /// model's output scores.
    pub fn parse(contents: &str) -> Self {
        let mut labels: Vec<String> = contents
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        while labels.last().is_some_and(|l| l.is_empty()) {
            labels.pop();
        }
        Self { labels }
    }

    /// Label at score index `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
