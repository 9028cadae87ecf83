//! The integer sequence whose terms replace incoming pitches.
//!
//! Terms are arbitrary precision: OEIS entries routinely run past 64 bits, and
//! only their residues matter once they reach the pitch mapper.

use std::fs;
use std::ops::Index;
use std::path::Path;

use num::BigInt;

use crate::error::{ConfigError, SequenceError};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SequenceSource {
    terms: Vec<BigInt>,
}

impl SequenceSource {
    pub fn new<T: Into<BigInt>>(terms: impl IntoIterator<Item = T>) -> Result<Self, ConfigError> {
        let terms: Vec<BigInt> = terms.into_iter().map(Into::into).collect();
        if terms.is_empty() {
            Err(ConfigError::EmptySequence)
        } else {
            Ok(SequenceSource { terms })
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Never true for a sequence built through `new`.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The first `n` terms, for diagnostics.
    pub fn head(&self, n: usize) -> &[BigInt] {
        &self.terms[..n.min(self.terms.len())]
    }
}

impl Index<usize> for SequenceSource {
    type Output = BigInt;

    fn index(&self, i: usize) -> &BigInt {
        &self.terms[i]
    }
}

/// Parses OEIS b-file text: one `n a(n)` pair per line, `#` starts a comment line.
pub fn parse_b_file(text: &str) -> Result<SequenceSource, SequenceError> {
    let mut terms = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let term = match (parts.next(), parts.next()) {
            (Some(_n), Some(value)) => value.parse::<BigInt>().ok(),
            _ => None,
        };
        match term {
            Some(term) => terms.push(term),
            None => {
                return Err(SequenceError::Parse {
                    line: i + 1,
                    text: line.to_owned(),
                })
            }
        }
    }
    Ok(SequenceSource::new(terms)?)
}

pub fn load_b_file(path: &Path) -> Result<SequenceSource, SequenceError> {
    let text = fs::read_to_string(path)?;
    parse_b_file(&text)
}

/// Parses an inline list such as `"1, 1, 2, 3, -5"`.
pub fn parse_value_list(s: &str) -> Result<SequenceSource, SequenceError> {
    let mut terms = Vec::new();
    for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let term = item.parse::<BigInt>().map_err(|_| SequenceError::Parse {
            line: 1,
            text: item.to_owned(),
        })?;
        terms.push(term);
    }
    Ok(SequenceSource::new(terms)?)
}

/// The number of an OEIS entry id: `A000045`, `a45` and `45` all give 45.
pub fn entry_number(entry: &str) -> Option<u32> {
    let digits = entry
        .strip_prefix('A')
        .or_else(|| entry.strip_prefix('a'))
        .unwrap_or(entry);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Maps an OEIS entry id to its b-file name, `b000045.txt`.
pub fn b_file_name(entry: &str) -> Option<String> {
    entry_number(entry).map(|number| format!("b{number:06}.txt"))
}
