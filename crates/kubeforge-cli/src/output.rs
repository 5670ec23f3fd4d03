//! Output management and formatting.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use kubeforge_core::application::{FileAction, ScaffoldReport};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag wins over the config file; Auto resolves on the TTY.
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or_default()
            }
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// One line per attempted file, or a single JSON document.
    ///
    /// JSON is printed even in quiet mode; it is the only thing on stdout.
    pub fn report(&self, report: &ScaffoldReport) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            let json = serde_json::to_string_pretty(&ReportView::from(report))
                .map_err(io::Error::other)?;
            return self.term.write_line(&json);
        }
        if self.quiet {
            return Ok(());
        }

        for outcome in report.outcomes() {
            let path = outcome.path.display().to_string();
            let line = match &outcome.result {
                Ok(action) => format!("  {} {path}", self.paint_action(*action)),
                Err(e) if self.no_color => format!("  {:<11} {path}: {e}", "failed"),
                Err(e) => format!("  {} {path}: {}", format!("{:<11}", "failed").red().bold(), e.red()),
            };
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    fn paint_action(&self, action: FileAction) -> String {
        let label = format!("{:<11}", action.to_string());
        if self.no_color {
            return label;
        }
        match action {
            FileAction::Created => label.green().to_string(),
            FileAction::Updated => label.cyan().to_string(),
            FileAction::Overwritten => label.yellow().to_string(),
            FileAction::Skipped | FileAction::Unchanged => label.dimmed().to_string(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    /// Prompts and spinners belong on a human terminal only.
    pub fn is_interactive(&self) -> bool {
        self.resolved_format == OutputFormat::Human && !self.quiet && self.term.is_term()
    }

    fn is_silent(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }
}

// ── JSON view ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    run_id: String,
    success: bool,
    generated_at: String,
    files: Vec<FileView<'a>>,
}

#[derive(Debug, Serialize)]
struct FileView<'a> {
    path: String,
    builder: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<FileAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a ScaffoldReport> for ReportView<'a> {
    fn from(report: &'a ScaffoldReport) -> Self {
        let files = report
            .outcomes()
            .iter()
            .map(|o| FileView {
                path: o.path.display().to_string(),
                builder: &o.builder,
                action: o.result.as_ref().ok().copied(),
                error: o.result.as_ref().err().map(ToString::to_string),
            })
            .collect();

        Self {
            run_id: report.run_id().to_string(),
            success: report.is_success(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            files,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
