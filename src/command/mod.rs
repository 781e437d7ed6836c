//! Command resolution: turns a typed line into a target plus its modifiers.
//!
//! Resolution runs in a fixed order:
//! 1. split off and classify the filter stage on the first unescaped `|`
//! 2. tokenize the remainder on whitespace
//! 3. strip every `-j` token
//! 4. pull out the first all-digit token as the numeric identifier
//! 5. rejoin the rest with single spaces and look it up verbatim

pub mod alias;
pub mod filter;

pub use alias::{AliasTable, ArtifactRef, Category, Target, VOLUMES_ARTIFACT};
pub use filter::{split_pipe, FilterSpec, PagerProgram};

use crate::{Error, Result};
use tracing::debug;

/// Flag requesting structured output
pub const JSON_FLAG: &str = "-j";

/// A command line taken apart, before alias lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub base: String,
    pub json_requested: bool,
    pub numeric_arg: Option<String>,
    pub filter: Option<FilterSpec>,
}

/// A parsed command together with the alias entry it names
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCommand {
    pub parsed: ParsedCommand,
    pub target: Target,
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

impl ParsedCommand {
    /// Parse a raw line. Returns `Ok(None)` for blank input.
    pub fn parse(raw_line: &str) -> Result<Option<Self>> {
        let line = raw_line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (left, filter_text) = split_pipe(line);
        let filter = filter_text.map(FilterSpec::parse).transpose()?;

        let mut tokens: Vec<&str> = left.split_whitespace().collect();

        let json_requested = tokens.contains(&JSON_FLAG);
        tokens.retain(|token| *token != JSON_FLAG);

        let numeric_arg = tokens
            .iter()
            .position(|token| is_numeric(token))
            .map(|i| tokens.remove(i).to_string());

        Ok(Some(Self {
            base: tokens.join(" "),
            json_requested,
            numeric_arg,
            filter,
        }))
    }
}

/// Resolves raw lines against the alias table
#[derive(Debug, Clone, Default)]
pub struct CommandResolver {
    table: AliasTable,
}

impl CommandResolver {
    pub fn new(table: AliasTable) -> Self {
        Self { table }
    }

    /// Resolve a raw line. Blank input is a no-op (`Ok(None)`).
    pub fn resolve(&self, raw_line: &str) -> Result<Option<ResolvedCommand>> {
        let parsed = match ParsedCommand::parse(raw_line)? {
            Some(parsed) => parsed,
            None => return Ok(None),
        };

        let target = self.table.lookup(&parsed.base).ok_or(Error::UnknownCommand)?;
        debug!(
            base = %parsed.base,
            json = parsed.json_requested,
            id = ?parsed.numeric_arg,
            "Resolved command to {:?}",
            target
        );

        Ok(Some(ResolvedCommand { parsed, target }))
    }
}
