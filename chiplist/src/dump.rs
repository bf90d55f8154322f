//! Flat-text dump of the catalog.
//!
//! Each record is written as a block of nine lines, fields in declaration
//! order, followed by a separator:
//!
//! ```text
//! Model 1: Ryzen 5 5600X
//!   Cores: 6
//!   Threads: 12
//!   Lithography: 7 nm
//!   Base clock: 3.70
//!   Boost clock: 4.60
//!   TDP: 65W
//!   Integrated graphics: n
//! - - - - - - - - - - - - - - -
//! ```
//!
//! Clocks are written with two decimals, so [`parse_dump`] only recovers
//! them to that precision.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::iter::{Enumerate, Peekable};
use std::path::Path;
use std::str::{FromStr, Lines};

use tracing::{debug, info};

use crate::error::{DumpError, Result};
use crate::record::{Processor, parse_graphics_flag};

/// Line written after every record block.
pub const SEPARATOR: &str = "- - - - - - - - - - - - - - -";

/// Writes `records` to `path`, replacing any existing file.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`DumpError::Write`] if the file cannot be created or written.
pub fn write_dump<'a, P, I>(path: P, records: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Processor>,
{
    let path = path.as_ref();
    let write_err = |e: std::io::Error| DumpError::Write {
        path: path.to_path_buf(),
        source: e,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    let mut written = 0;
    for record in records {
        written += 1;
        write_block(&mut out, written, record).map_err(write_err)?;
    }
    out.flush().map_err(write_err)?;

    info!(path = %path.display(), records = written, "saved dump");
    Ok(written)
}

fn write_block<W: Write>(out: &mut W, position: usize, record: &Processor) -> std::io::Result<()> {
    writeln!(out, "Model {position}: {}", record.name)?;
    writeln!(out, "  Cores: {}", record.cores)?;
    writeln!(out, "  Threads: {}", record.threads)?;
    writeln!(out, "  Lithography: {} nm", record.node_nm)?;
    writeln!(out, "  Base clock: {:.2}", record.base_clock_ghz)?;
    writeln!(out, "  Boost clock: {:.2}", record.boost_clock_ghz)?;
    writeln!(out, "  TDP: {}W", record.tdp_watts)?;
    writeln!(out, "  Integrated graphics: {}", record.graphics_flag())?;
    writeln!(out, "{SEPARATOR}")
}

/// Reads the dump file verbatim, for echoing to the console.
///
/// # Errors
///
/// Returns [`DumpError::Read`] if the file is missing or unreadable.
pub fn read_dump<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| DumpError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), bytes = text.len(), "read dump");
    Ok(text)
}

/// Rebuilds records from dump text.
///
/// Blank lines between blocks are ignored. The model numbers in the file
/// are checked for shape but not for sequence; records come back in file
/// order.
///
/// # Errors
///
/// - [`DumpError::Malformed`] if a block does not follow the layout
/// - [`RecordError`](crate::error::RecordError) if a parsed record is invalid
pub fn parse_dump(text: &str) -> Result<Vec<Processor>> {
    let mut reader = BlockReader::new(text);
    let mut records = Vec::new();

    while reader.skip_blank_lines() {
        let record = reader.read_block()?;
        record.validate()?;
        records.push(record);
    }

    Ok(records)
}

/// Line cursor over dump text that tracks the current line number.
struct BlockReader<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
    line_no: usize,
}

impl<'a> BlockReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
            line_no: 0,
        }
    }

    /// Advances past blank lines. Returns `false` at end of input.
    fn skip_blank_lines(&mut self) -> bool {
        while let Some((_, line)) = self.lines.peek() {
            if !line.trim().is_empty() {
                return true;
            }
            self.lines.next();
        }
        false
    }

    fn read_block(&mut self) -> Result<Processor> {
        let header = self.next_line("a model header")?;
        let (number, name) = header
            .strip_prefix("Model ")
            .and_then(|rest| rest.split_once(": "))
            .ok_or_else(|| self.malformed("expected 'Model <n>: <name>'"))?;
        number
            .parse::<usize>()
            .map_err(|_| self.malformed(format!("invalid model number '{number}'")))?;

        let record = Processor {
            name: name.to_string(),
            cores: self.field("Cores", "")?,
            threads: self.field("Threads", "")?,
            node_nm: self.field("Lithography", " nm")?,
            base_clock_ghz: self.field("Base clock", "")?,
            boost_clock_ghz: self.field("Boost clock", "")?,
            tdp_watts: self.field("TDP", "W")?,
            integrated_graphics: {
                let flag = self.field_text("Integrated graphics", "")?;
                parse_graphics_flag(flag).map_err(|_| self.malformed(format!("invalid flag '{flag}'")))?
            },
        };

        let separator = self.next_line("a separator")?;
        if separator.trim_end() != SEPARATOR {
            return Err(self.malformed("expected record separator").into());
        }

        Ok(record)
    }

    fn next_line(&mut self, expected: &str) -> Result<&'a str> {
        match self.lines.next() {
            Some((index, line)) => {
                self.line_no = index + 1;
                Ok(line)
            }
            None => {
                self.line_no += 1;
                Err(self.malformed(format!("unexpected end of input, expected {expected}")).into())
            }
        }
    }

    /// Reads `  <label>: <value><suffix>` and returns `<value>`.
    fn field_text(&mut self, label: &str, suffix: &str) -> Result<&'a str> {
        let line = self.next_line(label)?;
        line.trim_start()
            .strip_prefix(label)
            .and_then(|rest| rest.strip_prefix(':'))
            .and_then(|rest| rest.trim_end().strip_suffix(suffix))
            .map(str::trim)
            .ok_or_else(|| self.malformed(format!("expected '{label}: <value>{suffix}'")).into())
    }

    fn field<T: FromStr>(&mut self, label: &str, suffix: &str) -> Result<T> {
        let text = self.field_text(label, suffix)?;
        text.parse()
            .map_err(|_| self.malformed(format!("invalid {label} value '{text}'")).into())
    }

    fn malformed(&self, reason: impl Into<String>) -> DumpError {
        DumpError::Malformed {
            line: self.line_no,
            reason: reason.into(),
        }
    }
}
