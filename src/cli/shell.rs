//! Interactive session: read a line, resolve it, print the result, repeat.
//!
//! Command failures are printed as a single line and never end the session.

use crate::bundle::Bundle;
use crate::cli::help;
use crate::command::{CommandResolver, FilterSpec, ParsedCommand, ResolvedCommand, Target};
use crate::stream::{self, Pager};
use crate::volume::render::{render_inspect, render_json, render_list};
use crate::volume::VolumeRegistry;
use crate::{Error, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Session over one bundle
pub struct Shell<'a, P: Pager> {
    bundle: &'a Bundle,
    resolver: CommandResolver,
    pager: P,
    prompt: String,
}

impl<'a, P: Pager> Shell<'a, P> {
    pub fn new(bundle: &'a Bundle, resolver: CommandResolver, pager: P, prompt: String) -> Self {
        Self {
            bundle,
            resolver,
            pager,
            prompt,
        }
    }

    pub fn pager(&self) -> &P {
        &self.pager
    }

    /// Run until `exit`/`quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(out, "{}", self.prompt)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                info!("End of input");
                writeln!(out)?;
                break;
            }

            if self.execute(&line, out)? == Control::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Handle one input line. Only failures writing to `out` are returned.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<Control> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Control::Continue);
        }
        if help::is_exit(line) {
            return Ok(Control::Exit);
        }
        if help::is_help(line) {
            writeln!(out, "{}", help::HELP_TEXT)?;
            return Ok(Control::Continue);
        }

        debug!("Executing '{}'", line);
        let result = match self.resolver.resolve(line) {
            Ok(Some(resolved)) => self.dispatch(&resolved, out),
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            warn!("Command '{}' failed: {}", line, e);
            writeln!(out, "{}", e)?;
        }
        Ok(Control::Continue)
    }

    fn dispatch(&mut self, resolved: &ResolvedCommand, out: &mut dyn Write) -> Result<()> {
        let parsed = &resolved.parsed;
        match resolved.target {
            Target::VolumeList => self.volume_list(parsed, out),
            Target::VolumeInspect => self.volume_inspect(parsed, out),
            Target::Artifact(artifact) => {
                let path = self.bundle.artifact_path(&artifact, parsed.json_requested)?;
                stream::stream_artifact(&path, parsed.filter.as_ref(), &mut self.pager, out)
            }
        }
    }

    fn volume_list(&mut self, parsed: &ParsedCommand, out: &mut dyn Write) -> Result<()> {
        let dataset = VolumeRegistry::load(self.bundle.misc_root())?;

        let text = if parsed.json_requested {
            render_json(&dataset.select_raw(parsed.numeric_arg.as_deref()))?
        } else {
            render_list(dataset.records())
        };

        self.emit(&text, parsed.filter.as_ref(), out)
    }

    fn volume_inspect(&mut self, parsed: &ParsedCommand, out: &mut dyn Write) -> Result<()> {
        let id = parsed.numeric_arg.as_deref().ok_or(Error::MissingVolumeId)?;
        let dataset = VolumeRegistry::load(self.bundle.misc_root())?;
        let not_found = || Error::VolumeNotFound { id: id.to_string() };

        // Raw mode emits the captured record, not the typed view
        let text = if parsed.json_requested {
            render_json(dataset.find_raw(id).ok_or_else(not_found)?)?
        } else {
            render_inspect(dataset.find(id).ok_or_else(not_found)?)
        };

        self.emit(&text, parsed.filter.as_ref(), out)
    }

    fn emit(&mut self, text: &str, filter: Option<&FilterSpec>, out: &mut dyn Write) -> Result<()> {
        stream::emit_text(text, filter, &mut self.pager, out)
    }
}
