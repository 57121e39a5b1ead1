//! The scene tree the engines walk.
//!
//! The host document is reached only through the `SceneNode` capability
//! trait. `Node` is the JSON-backed implementation the CLI uses.

mod node;
mod paint;
mod traverse;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::ColourSource;
use crate::error::NodeError;

pub use node::{Document, Node};
pub use paint::{
    BlurEffect, Effect, GradientPaint, GradientStop, ImagePaint, Paint, ShadowEffect, SolidPaint,
};
pub use traverse::{collect_nodes, count_nodes, traverse, traverse_mut};

/// Marker used on the wire for an indeterminate attribute.
pub const MIXED: &str = "mixed";

/// A colour-bearing attribute as read from the host.
///
/// `Mixed` means the value differs across an underlying multi-value
/// context and cannot be read as a list. It is an expected input shape,
/// not an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Attr<T> {
    /// The node has no such attribute.
    #[default]
    Absent,
    /// The value is indeterminate.
    Mixed,
    /// A concrete value.
    Concrete(T),
}

impl<T> Attr<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Attr::Absent)
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Attr::Mixed)
    }

    pub fn as_ref(&self) -> Attr<&T> {
        match self {
            Attr::Absent => Attr::Absent,
            Attr::Mixed => Attr::Mixed,
            Attr::Concrete(v) => Attr::Concrete(v),
        }
    }

    pub fn concrete(self) -> Option<T> {
        match self {
            Attr::Concrete(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> Attr<Vec<T>> {
    /// Borrow a list attribute as a slice.
    pub fn as_slice(&self) -> Attr<&[T]> {
        match self {
            Attr::Absent => Attr::Absent,
            Attr::Mixed => Attr::Mixed,
            Attr::Concrete(v) => Attr::Concrete(v.as_slice()),
        }
    }
}

impl<T: Serialize> Serialize for Attr<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Attr::Absent => serializer.serialize_none(),
            Attr::Mixed => serializer.serialize_str(MIXED),
            Attr::Concrete(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Attr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(Attr::Absent),
            Some(Value::String(marker)) if marker == MIXED => Ok(Attr::Mixed),
            Some(Value::String(marker)) => Err(de::Error::custom(format!(
                "expected a list or \"{}\", found \"{}\"",
                MIXED, marker
            ))),
            Some(value) => T::deserialize(value).map(Attr::Concrete).map_err(de::Error::custom),
        }
    }
}

/// Which paint list of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintSlot {
    Fills,
    Strokes,
}

impl PaintSlot {
    pub const ALL: [PaintSlot; 2] = [PaintSlot::Fills, PaintSlot::Strokes];

    /// Attribute name, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            PaintSlot::Fills => "fills",
            PaintSlot::Strokes => "strokes",
        }
    }

    /// Palette source tag for solid paints in this slot.
    pub fn solid_source(self) -> ColourSource {
        match self {
            PaintSlot::Fills => ColourSource::Fill,
            PaintSlot::Strokes => ColourSource::Stroke,
        }
    }
}

/// Capabilities the engines need from a host node.
///
/// Accessors may fail; the engines treat a failure as a per-node error,
/// count it, and keep walking. Writes replace a whole list at once.
pub trait SceneNode: Sized {
    /// Human-readable identity used in diagnostics.
    fn name(&self) -> &str;

    /// Child nodes in document order, or `None` for leaf kinds.
    fn children(&self) -> Option<&[Self]>;

    fn children_mut(&mut self) -> Option<&mut [Self]>;

    fn paints(&self, slot: PaintSlot) -> Result<Attr<&[Paint]>, NodeError>;

    fn set_paints(&mut self, slot: PaintSlot, paints: Vec<Paint>) -> Result<(), NodeError>;

    fn effects(&self) -> Result<Attr<&[Effect]>, NodeError>;

    fn set_effects(&mut self, effects: Vec<Effect>) -> Result<(), NodeError>;
}
