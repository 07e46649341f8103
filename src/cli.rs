//! Command-line interface for hermes
//!
//! Every subcommand reads judge output from files (or stdin for `-`) and
//! prints the rendered HTML fragment to stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::RenderResult;
use crate::render::{self, interactive_log, judge_diff, run_diff};

/// hermes - render judge output as HTML
#[derive(Debug, Parser)]
#[command(name = "hermes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render an interactive validator/submission log
    InteractiveLog {
        /// Log file, `-` for stdin
        file: PathBuf,

        /// Print the parsed frames as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Diff team output against the reference output
    RunDiff {
        /// Team output, `-` for stdin
        actual: PathBuf,

        /// Reference output
        reference: PathBuf,

        /// Print the diff window as JSON instead of HTML
        #[arg(long)]
        json: bool,

        /// Lines of context around the differences (overrides configuration)
        #[arg(long, value_name = "LINES")]
        context: Option<usize>,
    },

    /// Style a unified diff between two submission sources
    SourceDiff {
        /// Unified diff, `-` for stdin
        file: PathBuf,
    },

    /// Render a diff report written by the output comparator
    JudgeDiff {
        /// Report file, `-` for stdin
        file: PathBuf,
    },
}

/// Read a whole input file as raw bytes; `-` reads stdin
pub fn read_input_bytes(path: &Path) -> RenderResult<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read(path)?)
    }
}

/// Read a whole input file as (lossy) UTF-8; `-` reads stdin
pub fn read_input(path: &Path) -> RenderResult<String> {
    let bytes = read_input_bytes(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Produce the output of a subcommand
pub fn execute(command: &Commands, config: &Config) -> RenderResult<String> {
    match command {
        Commands::InteractiveLog { file, json } => {
            let log = interactive_log::parse_bytes(&read_input_bytes(file)?);
            tracing::info!(
                frames = log.entries.len(),
                truncated = log.is_truncated(),
                "parsed interactive log"
            );
            if *json {
                Ok(serde_json::to_string_pretty(&log).map_err(anyhow::Error::from)?)
            } else {
                Ok(interactive_log::render(&log))
            }
        }
        Commands::RunDiff {
            actual,
            reference,
            json,
            context,
        } => {
            let context = context.unwrap_or(config.diff.context_lines);
            let window =
                run_diff::diff_with_context(&read_input(actual)?, &read_input(reference)?, context);
            tracing::info!(
                compared = window.compared_lines,
                differing = window.differing_lines(),
                "compared run output"
            );
            if *json {
                Ok(serde_json::to_string_pretty(&window).map_err(anyhow::Error::from)?)
            } else {
                Ok(run_diff::render(&window))
            }
        }
        Commands::SourceDiff { file } => Ok(render::render_source_diff(&read_input(file)?)),
        Commands::JudgeDiff { file } => Ok(judge_diff::parse_judge_diff(&read_input(file)?)),
    }
}

/// Run a subcommand and write its output to stdout
pub fn run(cli: &Cli, config: &Config) -> RenderResult<()> {
    let output = execute(&cli.command, config)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}
