//! Terminal output for command results.
//!
//! Human-oriented lines go through [`OutputManager::print`] and the status
//! helpers, which respect `--quiet`. Anything a script may consume (template
//! names, JSON) goes through [`OutputManager::data`] and is always written.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

#[derive(Clone, Copy)]
enum Status {
    Success,
    Warning,
    Info,
}

impl Status {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Info => Style::new().blue(),
        }
    }
}

impl OutputManager {
    /// Colours are off when asked for by flag or config, and whenever stdout
    /// is redirected.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn data(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Info, msg)
    }

    /// Section title, e.g. a template source name in `stencil list`.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    /// Spinner on stderr; `None` when quiet or when stderr is not a terminal.
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.quiet || !io::stderr().is_terminal() {
            return None;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner());
        bar.set_message(message.to_owned());
        bar.enable_steady_tick(Duration::from_millis(100));
        Some(bar)
    }

    fn status(&self, status: Status, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{} {msg}", status.symbol())
        } else {
            let style = status.style();
            format!(
                "{} {}",
                status.symbol().style(style.bold()),
                msg.style(style)
            )
        };
        self.term.write_line(&line)
    }
}
