// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskgraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskgraph",
    version,
    about = "Lay out a task list as a layered dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task file (TOML, or JSON array of tasks).
    ///
    /// Default: `Taskgraph.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Taskgraph.toml")]
    pub tasks: String,

    /// Output format for the computed layout.
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Keep running and re-print the layout whenever the task file changes.
    #[arg(long)]
    pub watch: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKGRAPH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse the task file and list tasks, but don't compute a layout.
    #[arg(long)]
    pub dry_run: bool,
}

/// Layout output format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Dot,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["taskgraph"]).unwrap();
        assert_eq!(args.tasks, "Taskgraph.toml");
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.watch);
        assert!(!args.dry_run);
    }

    #[test]
    fn parses_format_and_flags() {
        let args = CliArgs::try_parse_from([
            "taskgraph", "--tasks", "tasks.json", "--format", "dot", "--watch", "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(args.tasks, "tasks.json");
        assert_eq!(args.format, OutputFormat::Dot);
        assert!(args.watch);
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
