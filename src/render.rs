//! Output formats for the CLI.

use std::io::{self, Write};

use crossterm::style::Stylize;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::document::CaretPosition;
use crate::formatter::StyledRun;

#[derive(Serialize)]
struct JsonCaret {
    line: usize,
    offset: usize,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    lines: &'a [Vec<StyledRun>],
    caret: Option<JsonCaret>,
}

/// Write styled paragraphs in `format`.
///
/// The caret is embedded in JSON output; the other formats leave reporting it
/// to the caller.
///
/// # Errors
///
/// Fails on write or serialization errors.
pub fn render(
    out: &mut impl Write,
    format: OutputFormat,
    paragraphs: &[Vec<StyledRun>],
    caret: Option<CaretPosition>,
    color: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Ansi => render_ansi(out, paragraphs, color),
        OutputFormat::Spans => render_spans(out, paragraphs),
        OutputFormat::Json => render_json(out, paragraphs, caret),
    }
}

fn render_ansi(out: &mut impl Write, paragraphs: &[Vec<StyledRun>], color: bool) -> io::Result<()> {
    for runs in paragraphs {
        for run in runs {
            if color && run.highlighted {
                write!(out, "{}", run.text.as_str().red())?;
            } else {
                out.write_all(run.text.as_bytes())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_spans(out: &mut impl Write, paragraphs: &[Vec<StyledRun>]) -> io::Result<()> {
    for (line, runs) in paragraphs.iter().enumerate() {
        for run in runs {
            writeln!(out, "{line}\t{}\t{:?}", run.kind, run.text)?;
        }
    }
    Ok(())
}

fn render_json(
    out: &mut impl Write,
    paragraphs: &[Vec<StyledRun>],
    caret: Option<CaretPosition>,
) -> io::Result<()> {
    let output = JsonOutput {
        lines: paragraphs,
        caret: caret.map(|c| JsonCaret {
            line: c.line,
            offset: c.offset,
        }),
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)
}
