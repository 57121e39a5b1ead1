use std::path::{Path, PathBuf};

use clap::Args;

use crate::colour::ColourKey;
use crate::engine::{apply, ApplyRequest, Metrics};
use crate::error::{Result, RetintError};
use crate::output::{display_path, plural, Printer};
use crate::preset::Preset;
use crate::protocol::EMPTY_SELECTION;
use crate::scene::Document;

/// Recolour a document's selection in HSL space
#[derive(Args, Debug, Default)]
pub struct ApplyArgs {
    /// Scene document (JSON)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Saturation delta, -1 to 1
    #[arg(short, long, allow_negative_numbers = true)]
    pub saturation: Option<f64>,

    /// Lightness delta, -1 to 1
    #[arg(short, long, allow_negative_numbers = true)]
    pub lightness: Option<f64>,

    /// Hue rotation in degrees
    #[arg(short = 'u', long, allow_negative_numbers = true)]
    pub hue: Option<f64>,

    /// Give one colour its own hue rotation, e.g. "#FF0000=90" or "255,0,0,255=-30"
    #[arg(long = "override", value_name = "KEY=DEG", value_parser = parse_override)]
    pub overrides: Vec<(ColourKey, f64)>,

    /// Leave near-white colours untouched
    #[arg(long)]
    pub keep_white: bool,

    /// Leave near-black colours untouched
    #[arg(long)]
    pub keep_black: bool,

    /// Leave near-gray colours untouched
    #[arg(long)]
    pub keep_gray: bool,

    /// Do not touch fills
    #[arg(long)]
    pub no_fills: bool,

    /// Do not touch strokes
    #[arg(long)]
    pub no_strokes: bool,

    /// Do not touch effects
    #[arg(long)]
    pub no_effects: bool,

    /// Do not touch inner shadows
    #[arg(long)]
    pub no_inner_shadows: bool,

    /// Do not touch drop shadows
    #[arg(long)]
    pub no_drop_shadows: bool,

    /// Preset file (defaults to retint.yaml beside the document)
    #[arg(long, value_name = "YAML")]
    pub preset: Option<PathBuf>,

    /// Write the result here instead of overwriting the input
    #[arg(short, long, value_name = "JSON")]
    pub output: Option<PathBuf>,
}

impl ApplyArgs {
    /// Load the explicit preset, or discover one next to the document.
    pub fn load_preset(&self) -> Result<Option<Preset>> {
        match &self.preset {
            Some(path) => Preset::load(path).map(Some),
            None => Preset::discover(document_dir(&self.file)),
        }
    }

    /// Merge flags over `preset` into a single request.
    pub fn request(&self, preset: Option<Preset>) -> Result<ApplyRequest> {
        let preset = preset.unwrap_or_default();

        let saturation = self.saturation.unwrap_or(preset.saturation);
        let lightness = self.lightness.unwrap_or(preset.lightness);
        let hue = self.hue.unwrap_or(preset.hue);
        for (flag, value) in [("--saturation", saturation), ("--lightness", lightness), ("--hue", hue)] {
            if !value.is_finite() {
                return Err(RetintError::Parse {
                    message: format!("{} must be a finite number, got {}", flag, value),
                    help: None,
                });
            }
        }

        let mut options = preset.options;
        if self.no_fills {
            options.include_fills = false;
        }
        if self.no_strokes {
            options.include_strokes = false;
        }
        if self.no_effects {
            options.include_effects = false;
        }
        if self.no_inner_shadows {
            options.include_inner_shadows = Some(false);
        }
        if self.no_drop_shadows {
            options.include_drop_shadows = Some(false);
        }
        options.preserve.keep_white |= self.keep_white;
        options.preserve.keep_black |= self.keep_black;
        options.preserve.keep_gray |= self.keep_gray;

        let mut overrides = preset.overrides;
        for &(key, degrees) in &self.overrides {
            overrides.unlink(key, degrees);
        }

        let mut request = ApplyRequest::new(Default::default(), options).with_overrides(overrides);
        request.sat_delta = saturation;
        request.light_delta = lightness;
        request.hue_delta = hue;
        Ok(request)
    }
}

/// Apply to the document on disk and return the metrics and written path.
pub fn apply_file(args: &ApplyArgs) -> Result<(Metrics, PathBuf)> {
    let request = args.request(args.load_preset()?)?;

    let mut document = Document::load(&args.file)?;
    if document.selection.is_empty() {
        return Err(RetintError::Selection {
            message: EMPTY_SELECTION.to_string(),
            help: Some("The document's \"selection\" array is empty".to_string()),
        });
    }

    let metrics = apply(&mut document.selection, &request, |progress| {
        tracing::info!(processed = progress.processed, total = progress.total, "progress");
    });

    let output = args.output.clone().unwrap_or_else(|| args.file.clone());
    document.save(&output)?;
    Ok((metrics, output))
}

pub fn run(args: ApplyArgs, printer: &Printer) -> Result<()> {
    let (metrics, output) = apply_file(&args)?;

    printer.status(
        "Recoloured",
        &format!(
            "{} and {} across {}",
            plural(metrics.modified_paints, "paint", "paints"),
            plural(metrics.modified_effects, "effect", "effects"),
            plural(metrics.visited_nodes, "node", "nodes")
        ),
    );
    printer.metrics(&metrics);
    printer.status("Wrote", &display_path(&output));

    Ok(())
}

fn document_dir(file: &Path) -> &Path {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Parse `KEY=DEG`. The key may itself contain commas but never `=`.
fn parse_override(s: &str) -> std::result::Result<(ColourKey, f64), String> {
    let (key, degrees) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected KEY=DEG, got '{}'", s))?;
    let key = ColourKey::parse(key).map_err(|e| e.to_string())?;
    let degrees: f64 = degrees
        .trim()
        .parse()
        .map_err(|_| format!("invalid hue '{}'", degrees))?;
    if !degrees.is_finite() {
        return Err(format!("hue must be finite, got '{}'", degrees));
    }
    Ok((key, degrees))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Rgb;
    use crate::preset::PRESET_FILE;
    use crate::scene::{Node, Paint};
    use pretty_assertions::assert_eq;

    const RED: ColourKey = ColourKey::new(255, 0, 0, 255);

    fn args(file: PathBuf) -> ApplyArgs {
        ApplyArgs {
            file,
            ..Default::default()
        }
    }

    fn red_document(dir: &Path) -> PathBuf {
        let path = dir.join("doc.json");
        Document::new(vec![Node::group("Frame")
            .with_child(Node::new("Rect").with_fills(vec![Paint::solid(Rgb::new(1.0, 0.0, 0.0))]))])
        .save(&path)
        .unwrap();
        path
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override("#FF0000=90").unwrap(), (RED, 90.0));
        assert_eq!(parse_override("255,0,0,255=-30").unwrap(), (RED, -30.0));
        assert!(parse_override("#FF0000").is_err());
        assert!(parse_override("#FF0000=abc").is_err());
        assert!(parse_override("red=10").is_err());
        assert!(parse_override("#FF0000=inf").is_err());
    }

    #[test]
    fn test_flags_override_preset() {
        let preset = Preset::parse(
            "saturation: 0.5\nhue: 30\noverrides:\n  \"#FF0000\": 10\noptions:\n  keep_black: true\n",
        )
        .unwrap();

        let mut apply_args = args(PathBuf::from("doc.json"));
        apply_args.hue = Some(60.0);
        apply_args.keep_white = true;
        apply_args.no_drop_shadows = true;
        apply_args.overrides = vec![(RED, 45.0)];

        let request = apply_args.request(Some(preset)).unwrap();
        assert_eq!(request.sat_delta, 0.5);
        assert_eq!(request.light_delta, 0.0);
        assert_eq!(request.hue_delta, 60.0);
        assert_eq!(request.hue_overrides.get(RED), Some(45.0));
        assert!(request.options.preserve.keep_white);
        assert!(request.options.preserve.keep_black);
        assert!(!request.options.includes_drop_shadows());
        assert!(request.options.includes_inner_shadows());
    }

    #[test]
    fn test_non_finite_delta_rejected() {
        let mut apply_args = args(PathBuf::from("doc.json"));
        apply_args.saturation = Some(f64::NAN);
        assert!(matches!(apply_args.request(None), Err(RetintError::Parse { .. })));
    }

    #[test]
    fn test_apply_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = red_document(dir.path());

        let mut apply_args = args(path.clone());
        apply_args.hue = Some(120.0);
        let (metrics, written) = apply_file(&apply_args).unwrap();

        assert_eq!(written, path);
        assert_eq!(metrics.visited_nodes, 2);
        assert_eq!(metrics.modified_paints, 1);

        let document = Document::load(&path).unwrap();
        let fills = document.selection[0].children.as_ref().unwrap()[0].fills.as_ref();
        match fills {
            crate::scene::Attr::Concrete(paints) => {
                assert_eq!(paints[0], Paint::solid(Rgb::new(0.0, 1.0, 0.0)));
            }
            other => panic!("Expected concrete fills, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_file_uses_discovered_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = red_document(dir.path());
        std::fs::write(dir.path().join(PRESET_FILE), "hue: 120\n").unwrap();

        let mut apply_args = args(path);
        apply_args.output = Some(dir.path().join("out.json"));
        let (metrics, written) = apply_file(&apply_args).unwrap();

        assert_eq!(written, dir.path().join("out.json"));
        assert_eq!(metrics.modified_paints, 1);
    }

    #[test]
    fn test_apply_file_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        Document::default().save(&path).unwrap();

        let err = apply_file(&args(path)).unwrap_err();
        assert!(matches!(err, RetintError::Selection { .. }));
    }

    #[test]
    fn test_document_dir() {
        assert_eq!(document_dir(Path::new("doc.json")), Path::new("."));
        assert_eq!(document_dir(Path::new("a/doc.json")), Path::new("a"));
    }
}
