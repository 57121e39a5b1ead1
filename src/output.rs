//! Terminal output formatting for the retint CLI.
//!
//! Cargo-style status lines with right-aligned coloured verbs go to stderr;
//! stdout is reserved for palette listings and JSON.

use std::io::{self, IsTerminal, Write};

use crate::engine::{Metrics, PaletteEntry};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when the stream it styles is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
    swatch_color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            swatch_color: io::stdout().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color: false,
            swatch_color: false,
        }
    }

    /// e.g. "     Scanned 42 nodes"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Report skipped and failed counts, if any.
    pub fn metrics(&self, metrics: &Metrics) {
        if metrics.skipped > 0 {
            self.warning(
                "Skipped",
                &format!(
                    "{} with mixed values",
                    plural(metrics.skipped, "attribute", "attributes")
                ),
            );
        }
        if metrics.failed > 0 {
            self.error("Failed", &self.failed_summary(metrics.failed));
        }
    }

    /// The failed-node count, pointing at the per-node warnings logged on stderr.
    pub fn failed_summary(&self, failed: usize) -> String {
        format!(
            "{} {}",
            plural(failed, "node", "nodes"),
            self.dim("(see warnings above)")
        )
    }

    /// One palette line for stdout: swatch block, hex, key, count, sources.
    pub fn palette_line(&self, entry: &PaletteEntry) -> String {
        let sources: Vec<&str> = entry.sources.iter().map(|s| s.as_str()).collect();
        let block = if self.swatch_color {
            let k = entry.key;
            format!("\x1b[48;2;{};{};{}m    {RESET} ", k.r, k.g, k.b)
        } else {
            String::new()
        };
        format!(
            "{}{}  {:<15}  {:>6}  {}",
            block,
            entry.hex,
            entry.key.to_string(),
            entry.count,
            sources.join(", ")
        )
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "node", "nodes")` -> "1 node".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Rgba;
    use crate::engine::ColourSource;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "colour", "colours"), "1 colour");
        assert_eq!(plural(0, "colour", "colours"), "0 colours");
        assert_eq!(plural(5, "node", "nodes"), "5 nodes");
    }

    #[test]
    fn test_display_path_absolute() {
        use std::path::Path;
        let p = Path::new("/nonexistent/path/to/doc.json");
        assert_eq!(display_path(p), "/nonexistent/path/to/doc.json");
    }

    #[test]
    fn test_palette_line_plain() {
        let colour = Rgba::opaque(1.0, 0.0, 0.0);
        let entry = PaletteEntry {
            key: colour.key(),
            rgba: colour,
            hex: colour.hex(),
            count: 3,
            sources: vec![ColourSource::Fill, ColourSource::GradientStop],
        };
        let line = Printer::plain().palette_line(&entry);
        assert_eq!(line, "#FF0000  255,0,0,255           3  fill, gradient-stop");
    }

    #[test]
    fn test_failed_summary_plain() {
        let printer = Printer::plain();
        assert_eq!(printer.failed_summary(1), "1 node (see warnings above)");
        assert_eq!(printer.failed_summary(3), "3 nodes (see warnings above)");
    }

    #[test]
    fn test_dim_plain() {
        assert_eq!(Printer::plain().dim("x"), "x");
    }
}
