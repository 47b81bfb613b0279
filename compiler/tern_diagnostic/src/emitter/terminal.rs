//! Plain-text rendering for terminals.
//!
//! With source attached, every label becomes a `path:line:col` pointer,
//! the line it falls on, and an underline (`^` primary, `-` secondary).

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Clone, Copy)]
enum Style {
    Error,
    Strong,
    Related,
}

impl Style {
    fn ansi(self) -> &'static str {
        match self {
            Style::Error => "\x1b[1;31m",
            Style::Strong => "\x1b[1m",
            Style::Related => "\x1b[1;34m",
        }
    }

    fn for_label(label: &Label) -> Self {
        if label.is_primary {
            Style::Error
        } else {
            Style::Related
        }
    }
}

const RESET: &str = "\x1b[0m";

struct AttachedSource {
    path: String,
    text: String,
    lines: LineOffsetTable,
}

impl AttachedSource {
    /// Text of the 1-based `line`, without its newline.
    fn line(&self, line: u32) -> &str {
        self.lines.line_text(&self.text, line).unwrap_or_default()
    }

    /// Characters covered by `label`, clipped to the rest of its first line.
    fn underline_width(&self, label: &Label, column: usize, line_len: usize) -> usize {
        let covered = self
            .text
            .get(label.span.to_range())
            .map_or(1, |text| text.chars().count());
        covered.clamp(1, line_len.saturating_sub(column).max(1))
    }
}

/// Writes diagnostics to any [`Write`], ignoring I/O failures.
pub struct TerminalEmitter<W: Write> {
    out: W,
    colored: bool,
    source: Option<AttachedSource>,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(out: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            out,
            colored: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Resolve spans against `text`; without it labels print raw byte ranges.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        self.source = Some(AttachedSource {
            path: path.into(),
            text,
            lines,
        });
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&mut self, text: &str, style: Style) {
        let _ = if self.colored {
            write!(self.out, "{}{text}{RESET}", style.ansi())
        } else {
            write!(self.out, "{text}")
        };
    }

    fn label(&mut self, label: &Label) {
        let style = Style::for_label(label);
        let arrow = if label.is_primary { "-->" } else { "   " };

        let Some(source) = self.source.take() else {
            let _ = write!(self.out, "  {arrow} {}: ", label.span);
            self.styled(&label.message, style);
            let _ = writeln!(self.out);
            return;
        };

        let (line, col) = source.lines.offset_to_line_col(&source.text, label.span.start);
        let text = source.line(line);
        let column = (col as usize).saturating_sub(1);
        let width = source.underline_width(label, column, text.chars().count());
        let gutter = line.to_string();
        let blank = " ".repeat(gutter.len());

        let _ = writeln!(self.out, "  {arrow} {}:{line}:{col}", source.path);
        let _ = writeln!(self.out, "  {blank} |");
        let _ = writeln!(self.out, "  {gutter} | {text}");
        let _ = write!(self.out, "  {blank} | {}", " ".repeat(column));
        let mark = if label.is_primary { "^" } else { "-" };
        self.styled(&mark.repeat(width), style);
        if !label.message.is_empty() {
            let _ = write!(self.out, " ");
            self.styled(&label.message, style);
        }
        let _ = writeln!(self.out);

        self.source = Some(source);
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.styled("error", Style::Error);
        let code = format!("[{}]", diagnostic.code);
        self.styled(&code, Style::Strong);
        let _ = writeln!(self.out, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.label(label);
        }
        for note in &diagnostic.notes {
            let _ = write!(self.out, "  = ");
            self.styled("note", Style::Strong);
            let _ = writeln!(self.out, ": {note}");
        }
        let _ = writeln!(self.out);
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        let reason = match error_count {
            0 => return,
            1 => "previous error".to_string(),
            n => format!("{n} previous errors"),
        };
        self.styled("error", Style::Error);
        let _ = writeln!(self.out, ": aborting due to {reason}");
    }
}

#[cfg(test)]
mod tests;
