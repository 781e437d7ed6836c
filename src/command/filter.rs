//! Trailing pipe stage of a command line (`| grep`, `| egrep`, `| less`, `| more`).

use crate::{Error, Result};
use regex::Regex;
use std::fmt;

/// External pager a command's output may be handed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerProgram {
    Less,
    More,
}

impl fmt::Display for PagerProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagerProgram::Less => write!(f, "less"),
            PagerProgram::More => write!(f, "more"),
        }
    }
}

/// Parsed filter stage
#[derive(Debug, Clone)]
pub enum FilterSpec {
    /// Hand every line, unfiltered, to a pager
    Pager(PagerProgram),
    /// Keep lines containing the literal term
    Substring(String),
    /// Keep lines where the pattern matches anywhere
    Regex(Regex),
}

impl PartialEq for FilterSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FilterSpec::Pager(a), FilterSpec::Pager(b)) => a == b,
            (FilterSpec::Substring(a), FilterSpec::Substring(b)) => a == b,
            (FilterSpec::Regex(a), FilterSpec::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl FilterSpec {
    /// Classify the text after the pipe.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (keyword, argument) = match text.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (text, ""),
        };

        let unsupported = || Error::UnsupportedFilter {
            filter: text.to_string(),
        };

        match keyword {
            "grep" if !argument.is_empty() => Ok(FilterSpec::Substring(argument.to_string())),
            "egrep" if !argument.is_empty() => {
                let regex = Regex::new(argument).map_err(|source| Error::InvalidPattern {
                    pattern: argument.to_string(),
                    source,
                })?;
                Ok(FilterSpec::Regex(regex))
            }
            "less" if argument.is_empty() => Ok(FilterSpec::Pager(PagerProgram::Less)),
            "more" if argument.is_empty() => Ok(FilterSpec::Pager(PagerProgram::More)),
            _ => Err(unsupported()),
        }
    }

    /// Pager to delegate to, if this stage is a pager
    pub fn pager(&self) -> Option<PagerProgram> {
        match self {
            FilterSpec::Pager(program) => Some(*program),
            _ => None,
        }
    }

    /// Whether `line` survives this stage. Pagers keep every line.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            FilterSpec::Pager(_) => true,
            FilterSpec::Substring(term) => line.contains(term.as_str()),
            FilterSpec::Regex(regex) => regex.is_match(line),
        }
    }
}

/// Split `line` on its first unescaped `|`.
///
/// Returns the command part, with any `\|` unescaped, and the raw filter text.
pub fn split_pipe(line: &str) -> (String, Option<&str>) {
    let bytes = line.as_bytes();
    let split_at = bytes
        .iter()
        .enumerate()
        .position(|(i, &b)| b == b'|' && (i == 0 || bytes[i - 1] != b'\\'));

    match split_at {
        Some(i) => (line[..i].replace("\\|", "|"), Some(&line[i + 1..])),
        None => (line.replace("\\|", "|"), None),
    }
}
