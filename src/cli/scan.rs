use std::path::PathBuf;

use clap::Args;

use crate::engine::{scan, ScanOptions, ScanResult};
use crate::error::{Result, RetintError};
use crate::output::{display_path, plural, Printer};
use crate::protocol::EMPTY_SELECTION;
use crate::scene::Document;
use crate::swatch::write_swatches;

/// List the colours used by a document's selection
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Scene document (JSON)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Ignore fills
    #[arg(long)]
    pub no_fills: bool,

    /// Ignore strokes
    #[arg(long)]
    pub no_strokes: bool,

    /// Ignore effects
    #[arg(long)]
    pub no_effects: bool,

    /// Maximum number of colours to list
    #[arg(long)]
    pub max: Option<usize>,

    /// Print the scan result as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write a PNG swatch sheet
    #[arg(long, value_name = "PNG")]
    pub swatches: Option<PathBuf>,

    /// Swatch cell size in pixels
    #[arg(long, default_value_t = 32)]
    pub cell: u32,
}

impl ScanArgs {
    pub fn options(&self) -> ScanOptions {
        ScanOptions {
            include_fills: !self.no_fills,
            include_strokes: !self.no_strokes,
            include_effects: !self.no_effects,
        }
    }
}

/// Load the document and scan its selection.
pub fn scan_file(args: &ScanArgs) -> Result<ScanResult> {
    let document = Document::load(&args.file)?;
    if document.selection.is_empty() {
        return Err(RetintError::Selection {
            message: EMPTY_SELECTION.to_string(),
            help: Some("The document's \"selection\" array is empty".to_string()),
        });
    }

    let mut result = scan(&document.selection, &args.options());
    if let Some(max) = args.max {
        result.palette.truncate(max);
    }
    Ok(result)
}

pub fn run(args: ScanArgs, printer: &Printer) -> Result<()> {
    let result = scan_file(&args)?;

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| RetintError::Parse {
            message: format!("Failed to serialize scan result: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        printer.status(
            "Scanned",
            &format!(
                "{} in {}, {}",
                plural(result.metrics.visited_nodes, "node", "nodes"),
                display_path(&args.file),
                plural(result.palette.len(), "colour", "colours")
            ),
        );
        for entry in &result.palette {
            println!("{}", printer.palette_line(entry));
        }
    }
    printer.metrics(&result.metrics);

    if let Some(path) = &args.swatches {
        write_swatches(&result.palette, path, args.cell)?;
        printer.status("Wrote", &display_path(path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::{Rgb, Rgba};
    use crate::scene::{Effect, Node, Paint};

    fn args(file: PathBuf) -> ScanArgs {
        ScanArgs {
            file,
            no_fills: false,
            no_strokes: false,
            no_effects: false,
            max: None,
            json: false,
            swatches: None,
            cell: 32,
        }
    }

    fn write_document(dir: &std::path::Path, document: &Document) -> PathBuf {
        let path = dir.join("doc.json");
        document.save(&path).unwrap();
        path
    }

    #[test]
    fn test_scan_file() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new(vec![Node::group("Frame")
            .with_child(Node::new("A").with_fills(vec![Paint::solid(Rgb::new(1.0, 0.0, 0.0))]))
            .with_child(Node::new("B").with_fills(vec![Paint::solid(Rgb::new(1.0, 0.0, 0.0))]))
            .with_child(Node::new("C").with_effects(vec![Effect::drop_shadow(Rgba::new(0.0, 0.0, 0.0, 0.25))]))]);
        let path = write_document(dir.path(), &document);

        let result = scan_file(&args(path.clone())).unwrap();
        assert_eq!(result.metrics.visited_nodes, 4);
        assert_eq!(result.palette.len(), 2);
        assert_eq!(result.palette[0].hex, "#FF0000");
        assert_eq!(result.palette[0].count, 2);

        let mut no_effects = args(path);
        no_effects.no_effects = true;
        assert_eq!(scan_file(&no_effects).unwrap().palette.len(), 1);
    }

    #[test]
    fn test_scan_max() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new(vec![Node::new("Rect").with_fills(vec![
            Paint::solid(Rgb::new(1.0, 0.0, 0.0)),
            Paint::solid(Rgb::new(0.0, 1.0, 0.0)),
            Paint::solid(Rgb::new(0.0, 0.0, 1.0)),
        ])]);
        let mut scan_args = args(write_document(dir.path(), &document));
        scan_args.max = Some(2);

        assert_eq!(scan_file(&scan_args).unwrap().palette.len(), 2);
    }

    #[test]
    fn test_scan_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path(), &Document::default());

        let err = scan_file(&args(path)).unwrap_err();
        assert!(matches!(err, RetintError::Selection { .. }));
    }

    #[test]
    fn test_scan_missing_file() {
        let err = scan_file(&args(PathBuf::from("/nonexistent/doc.json"))).unwrap_err();
        assert!(matches!(err, RetintError::Io { .. }));
    }
}
