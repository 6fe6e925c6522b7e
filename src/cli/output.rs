//! Terminal output for drafting runs.
//!
//! Step progress goes to stdout and honours `--quiet`. Errors and recovery
//! suggestions go to stderr and are never suppressed. Command results (the
//! version, the changelog, the rendered notes) are printed uncoloured so
//! they can be piped.

use crate::pipeline::{DraftReporter, DraftStep};
use std::io::{self, Write};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Coloured, step-numbered terminal reporter
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    stderr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            stderr: BufferWriter::stderr(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Informational line
    pub fn note(&self, message: &str) {
        if !self.quiet {
            self.emit(&self.stdout, "ℹ", Color::Cyan, message);
        }
    }

    /// Indented sub-item under the previous line
    pub fn item(&self, message: &str) {
        if !self.quiet {
            self.emit(&self.stdout, "   •", Color::White, message);
        }
    }

    /// Only shown with `--verbose`
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.emit(&self.stdout, "→", Color::Blue, message);
        }
    }

    /// Error line on stderr
    pub fn error(&self, message: &str) {
        self.emit(&self.stderr, "✗", Color::Red, message);
    }

    /// Recovery suggestions on stderr, after an error
    pub fn suggestions(&self, suggestions: &[String]) {
        if suggestions.is_empty() {
            return;
        }
        self.emit(&self.stderr, "\n💡", Color::Yellow, "Recovery suggestions:");
        for suggestion in suggestions {
            self.emit(&self.stderr, "   •", Color::Yellow, suggestion);
        }
    }

    /// Command result on stdout, never suppressed
    pub fn result(&self, message: &str) -> io::Result<()> {
        let mut buffer = self.stdout.buffer();
        writeln!(&mut buffer, "{}", message)?;
        self.stdout.print(&buffer)
    }

    fn emit(&self, writer: &BufferWriter, marker: &str, color: Color, message: &str) {
        let mut buffer = writer.buffer();
        let written =
            write_marked(&mut buffer, marker, color, message).and_then(|()| writer.print(&buffer));
        if let Err(e) = written {
            log::debug!("Terminal write failed: {}", e);
        }
    }

    fn step(&self, step: DraftStep, marker: &str, color: Color, message: &str) {
        if !self.quiet {
            let line = format!("[{}/{}] {}", step.number(), DraftStep::ALL.len(), message);
            self.emit(&self.stdout, marker, color, &line);
        }
    }
}

/// Coloured marker followed by the plain message
fn write_marked<W: WriteColor>(out: &mut W, marker: &str, color: Color, message: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", marker)?;
    out.reset()?;
    writeln!(out, " {}", message)
}

impl DraftReporter for OutputManager {
    fn started(&self, step: DraftStep) {
        self.step(step, "⋯", Color::Magenta, &format!("{}...", step));
    }

    fn finished(&self, step: DraftStep, summary: &str) {
        self.step(step, "✓", Color::Green, summary);
    }

    fn skipped(&self, step: DraftStep, reason: &str) {
        self.step(step, "–", Color::Yellow, &format!("{} skipped: {}", step, reason));
    }

    fn detail(&self, message: &str) {
        self.verbose(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    #[test]
    fn marked_line_is_marker_then_message() {
        let mut out = NoColor::new(Vec::new());
        write_marked(&mut out, "✓", Color::Green, "[2/7] History already complete").expect("write");
        assert_eq!(
            String::from_utf8(out.into_inner()).expect("utf8"),
            "✓ [2/7] History already complete\n"
        );
    }
}
