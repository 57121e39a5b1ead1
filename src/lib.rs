//! retint - HSL recolouring for design documents
//!
//! Scans a selected subtree for the colours it uses (solid paints,
//! gradient stops, shadow effects) and rewrites them with hue, saturation
//! and lightness deltas, optionally per colour.

pub mod cli;
pub mod colour;
pub mod engine;
pub mod error;
pub mod output;
pub mod preset;
pub mod protocol;
pub mod scene;
pub mod swatch;

pub use colour::{adjust, Adjustment, ColourKey, PreserveOptions, Rgb, Rgba};
pub use engine::{apply, scan, ApplyOptions, ApplyRequest, HueOverrides, Metrics, ScanOptions, ScanResult};
pub use error::{NodeError, Result, RetintError};
pub use preset::Preset;
pub use protocol::{PluginMessage, Session, UiMessage};
pub use scene::{Document, Node, SceneNode};
pub use swatch::write_swatches;
