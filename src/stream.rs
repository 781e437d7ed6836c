//! Streaming captured text to the session output, through an optional filter stage.

use crate::command::{FilterSpec, PagerProgram};
use crate::config::PagerConfig;
use crate::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Receives the full, unfiltered output of a command piped to `less`/`more`
pub trait Pager {
    /// Feed every line from `source` to the pager, then block until it exits.
    fn page(&mut self, program: PagerProgram, source: &mut dyn BufRead) -> Result<()>;
}

/// Pager that spawns an external program and writes to its stdin
#[derive(Debug, Clone)]
pub struct ProcessPager {
    config: PagerConfig,
}

impl ProcessPager {
    pub fn new(config: PagerConfig) -> Self {
        Self { config }
    }

    fn command_line(&self, program: PagerProgram) -> &str {
        match program {
            PagerProgram::Less => self.config.less.as_str(),
            PagerProgram::More => self.config.more.as_str(),
        }
    }
}

impl Pager for ProcessPager {
    fn page(&mut self, program: PagerProgram, source: &mut dyn BufRead) -> Result<()> {
        let command_line = self.command_line(program).to_string();
        let mut parts = command_line.split_whitespace();
        let executable = parts.next().unwrap_or("less");

        let pager_error = |source: io::Error| Error::Pager {
            program: command_line.clone(),
            source,
        };

        debug!("Spawning pager '{}'", command_line);
        let mut child = Command::new(executable)
            .args(parts)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(pager_error)?;

        // stdin is dropped at the end of the arm so the pager sees end of input
        let fed = match child.stdin.take() {
            Some(mut stdin) => feed(source, &mut stdin).map_err(|e| match e {
                FeedError::Read(e) => Error::Io(e),
                FeedError::Write(e) => pager_error(e),
            }),
            None => Ok(()),
        };

        // Reap the pager before reporting a feed failure
        let status = child.wait().map_err(pager_error);
        fed?;
        let status = status?;
        if !status.success() {
            warn!("Pager '{}' exited with {}", command_line, status);
        }
        Ok(())
    }
}

enum FeedError {
    Read(io::Error),
    Write(io::Error),
}

/// Copy `source` into the pager line by line. A pager that quits early is not an error.
fn feed(source: &mut dyn BufRead, sink: &mut dyn Write) -> std::result::Result<(), FeedError> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if source.read_until(b'\n', &mut line).map_err(FeedError::Read)? == 0 {
            return Ok(());
        }
        if let Err(e) = sink.write_all(&line) {
            if e.kind() == io::ErrorKind::BrokenPipe {
                debug!("Pager closed its input early");
                return Ok(());
            }
            return Err(FeedError::Write(e));
        }
    }
}

/// Read one line without its trailing newline. Invalid UTF-8 is replaced, not rejected.
fn next_line(reader: &mut dyn BufRead, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let text = String::from_utf8_lossy(buf);
    Ok(Some(text.trim_end_matches(['\n', '\r']).to_string()))
}

/// Emit every line of `source` that passes `filter`, or hand it all to the pager.
pub fn emit(
    source: &mut dyn BufRead,
    filter: Option<&FilterSpec>,
    pager: &mut dyn Pager,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(program) = filter.and_then(FilterSpec::pager) {
        out.flush()?;
        return pager.page(program, source);
    }

    let mut buf = Vec::new();
    let mut emitted = 0usize;
    while let Some(line) = next_line(source, &mut buf)? {
        if filter.map_or(true, |f| f.matches(&line)) {
            writeln!(out, "{}", line)?;
            emitted += 1;
        }
    }
    debug!("Emitted {} lines", emitted);
    Ok(())
}

/// Emit already-rendered text through the same filter stage as artifacts.
pub fn emit_text(
    text: &str,
    filter: Option<&FilterSpec>,
    pager: &mut dyn Pager,
    out: &mut dyn Write,
) -> Result<()> {
    emit(&mut text.as_bytes(), filter, pager, out)
}

/// Stream a captured artifact file.
pub fn stream_artifact(
    path: &Path,
    filter: Option<&FilterSpec>,
    pager: &mut dyn Pager,
    out: &mut dyn Write,
) -> Result<()> {
    let file = File::open(path).map_err(|e| {
        debug!("Cannot open {}: {}", path.display(), e);
        Error::ArtifactNotFound {
            path: path.display().to_string(),
        }
    })?;
    if file.metadata().map(|m| m.is_dir()).unwrap_or(false) {
        return Err(Error::ArtifactNotFound {
            path: path.display().to_string(),
        });
    }

    debug!("Streaming {}", path.display());
    let mut reader = BufReader::new(file);
    emit(&mut reader, filter, pager, out)
}
