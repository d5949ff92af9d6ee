use std::io::{BufRead, Write};
use anyhow::{Context, Result};
use crate::highlighter::highlight;
use crate::link_formatter::format_links;
use crate::speaker_table::SpeakerTable;

// @module: Per-line pipeline (highlight, then link formatting)

/// Process one line. Blank lines come back empty and skip both stages.
pub fn process_line(line: &str, table: &SpeakerTable) -> String {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    format_links(&highlight(trimmed, table))
}

/// Lazily process a sequence of lines, preserving order and count
pub fn process_lines<I, S>(lines: I, table: &SpeakerTable) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().map(move |line| process_line(line.as_ref(), table))
}

/// Stream a script from `reader` to `writer`, one `\n` terminated line per input line.
///
/// Returns the number of lines processed. The first read or write error aborts the
/// stream; lines written before it are not a complete output.
pub fn process_stream<R: BufRead, W: Write>(reader: R, mut writer: W, table: &SpeakerTable) -> Result<usize> {
    let mut line_count = 0;
    for line in reader.lines() {
        line_count += 1;
        let line = line.with_context(|| format!("Failed to read input line {}", line_count))?;
        writeln!(writer, "{}", process_line(&line, table))
            .with_context(|| format!("Failed to write output line {}", line_count))?;
    }
    writer.flush().context("Failed to flush output")?;
    Ok(line_count)
}
