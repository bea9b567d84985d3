//! tagline - highlight hashtags and usernames in text.
//!
//! # Usage
//!
//! ```bash
//! tagline notes.txt
//! echo "hi @you #rust" | tagline --format spans
//! tagline notes.txt --caret 0:28 --format json
//! ```

use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use tagline::config::{
    ConfigFlags, OutputFormat, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use tagline::document::{CaretPosition, Line};
use tagline::highlighter::{EditOutcome, Highlighter, MemoryHost};
use tagline::{perf, render};

/// Highlight hashtags and usernames in text
#[derive(Parser, Debug)]
#[command(name = "tagline", version, about, long_about = None)]
struct Cli {
    /// Text file to read ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Plain caret position to remap, as LINE:OFFSET (zero-based)
    #[arg(long, value_name = "LINE:OFFSET", value_parser = parse_caret)]
    caret: Option<CaretPosition>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Never color highlighted spans
    #[arg(long)]
    no_color: bool,

    /// Report timings on stderr
    #[arg(long)]
    perf: bool,

    /// Write debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn parse_caret(s: &str) -> std::result::Result<CaretPosition, String> {
    let (line, offset) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:OFFSET, got {s:?}"))?;
    let line = line
        .trim()
        .parse()
        .map_err(|e| format!("invalid line {line:?}: {e}"))?;
    let offset = offset
        .trim()
        .parse()
        .map_err(|e| format!("invalid offset {offset:?}: {e}"))?;
    Ok(CaretPosition::new(line, offset))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    if let Err(err) = perf::set_debug_log_path(effective.debug_log.as_deref()) {
        tracing::warn!(%err, "failed to open debug log");
    }

    let source = {
        let _scope = perf::scope("read_input");
        read_input(cli.file.as_deref())?
    };

    let mut host = MemoryHost::from_text(&source);
    if let Some(caret) = cli.caret {
        if caret.line >= host.paragraph_count() {
            anyhow::bail!(
                "caret line {} is past the last line ({} lines)",
                caret.line,
                host.paragraph_count()
            );
        }
        host.set_plain_caret(caret.line, caret.offset);
    }

    let mut highlighter = Highlighter::new(host);
    let outcome = {
        let _scope = perf::scope("highlight");
        highlighter.on_text_changed().context("Segmentation failed")?
    };
    let caret = match outcome {
        EditOutcome::Applied { caret } => caret,
        EditOutcome::Suppressed => None,
    };
    let tags: usize = highlighter
        .formatter()
        .document()
        .lines()
        .iter()
        .map(Line::highlighted_count)
        .sum();
    perf::log_event(
        "highlight",
        format!(
            "{} lines, {tags} tags, caret {:?}",
            highlighter.host().paragraph_count(),
            caret
        ),
    );

    let host = highlighter.into_host();
    let paragraphs = (0..host.paragraph_count())
        .map(|i| host.runs(i).to_vec())
        .collect::<Vec<_>>();

    let format = effective.format.unwrap_or(OutputFormat::Ansi);
    let stdout = std::io::stdout();
    let color = !effective.no_color && stdout.is_terminal();
    let mut out = stdout.lock();
    {
        let _scope = perf::scope("render");
        render::render(&mut out, format, &paragraphs, caret, color)
            .context("Failed to write output")?;
    }
    out.flush().context("Failed to flush output")?;

    if format != OutputFormat::Json {
        if let Some(caret) = caret {
            eprintln!("caret {}:{}", caret.line, caret.offset);
        }
    }
    Ok(())
}
