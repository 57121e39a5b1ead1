//! JSON-backed scene document.
//!
//! A document is either a bare node or `{ "selection": [node, ...] }`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Attr, Effect, Paint, PaintSlot, SceneNode};
use crate::error::{NodeError, Result, RetintError};

fn is_false(v: &bool) -> bool {
    !*v
}

/// A node of a scene document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    /// Host node type (e.g. `FRAME`, `RECTANGLE`); informational only.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Locked nodes reject writes.
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,

    /// Deleted from the host document; every attribute access fails.
    #[serde(default, skip_serializing_if = "is_false")]
    pub removed: bool,

    #[serde(default, skip_serializing_if = "Attr::is_absent")]
    pub fills: Attr<Vec<Paint>>,

    #[serde(default, skip_serializing_if = "Attr::is_absent")]
    pub strokes: Attr<Vec<Paint>>,

    #[serde(default, skip_serializing_if = "Attr::is_absent")]
    pub effects: Attr<Vec<Effect>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A node that can hold children, starting empty.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            children: Some(Vec::new()),
            ..Self::new(name)
        }
    }

    pub fn with_fills(mut self, fills: Vec<Paint>) -> Self {
        self.fills = Attr::Concrete(fills);
        self
    }

    pub fn with_strokes(mut self, strokes: Vec<Paint>) -> Self {
        self.strokes = Attr::Concrete(strokes);
        self
    }

    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = Attr::Concrete(effects);
        self
    }

    pub fn with_mixed_fills(mut self) -> Self {
        self.fills = Attr::Mixed;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn removed(mut self) -> Self {
        self.removed = true;
        self
    }

    fn slot(&self, slot: PaintSlot) -> &Attr<Vec<Paint>> {
        match slot {
            PaintSlot::Fills => &self.fills,
            PaintSlot::Strokes => &self.strokes,
        }
    }

    fn check_readable(&self) -> std::result::Result<(), NodeError> {
        if self.removed {
            Err(NodeError::Removed)
        } else {
            Ok(())
        }
    }

    fn check_writable(&self) -> std::result::Result<(), NodeError> {
        self.check_readable()?;
        if self.locked {
            Err(NodeError::Locked)
        } else {
            Ok(())
        }
    }
}

impl SceneNode for Node {
    fn name(&self) -> &str {
        self.id
            .as_deref()
            .filter(|_| self.name.is_empty())
            .unwrap_or(self.name.as_str())
    }

    fn children(&self) -> Option<&[Self]> {
        self.children.as_deref()
    }

    fn children_mut(&mut self) -> Option<&mut [Self]> {
        self.children.as_deref_mut()
    }

    fn paints(&self, slot: PaintSlot) -> std::result::Result<Attr<&[Paint]>, NodeError> {
        self.check_readable()?;
        Ok(self.slot(slot).as_slice())
    }

    fn set_paints(&mut self, slot: PaintSlot, paints: Vec<Paint>) -> std::result::Result<(), NodeError> {
        self.check_writable()?;
        let target = match slot {
            PaintSlot::Fills => &mut self.fills,
            PaintSlot::Strokes => &mut self.strokes,
        };
        *target = Attr::Concrete(paints);
        Ok(())
    }

    fn effects(&self) -> std::result::Result<Attr<&[Effect]>, NodeError> {
        self.check_readable()?;
        Ok(self.effects.as_slice())
    }

    fn set_effects(&mut self, effects: Vec<Effect>) -> std::result::Result<(), NodeError> {
        self.check_writable()?;
        self.effects = Attr::Concrete(effects);
        Ok(())
    }
}

/// A scene document and its current selection.
///
/// Only the first selected node is walked by the engines.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub selection: Vec<Node>,
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use serde::de::Error;

        let mut object = Map::<String, Value>::deserialize(deserializer)?;
        let selection = match object.remove("selection") {
            Some(selection) => Vec::<Node>::deserialize(selection),
            None => Node::deserialize(Value::Object(object)).map(|node| vec![node]),
        }
        .map_err(D::Error::custom)?;

        Ok(Document { selection })
    }
}

impl Document {
    pub fn new(selection: Vec<Node>) -> Self {
        Self { selection }
    }

    /// Load a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RetintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read document: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a document from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| RetintError::Parse {
            message: format!("Invalid document: {}", e),
            help: Some("Expected a node object or {\"selection\": [...]}".to_string()),
        })
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RetintError::Parse {
            message: format!("Failed to serialize document: {}", e),
            help: None,
        })
    }

    /// Write the document to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json + "\n").map_err(|e| RetintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write document: {}", e),
        })
    }

    /// The node the engines walk.
    pub fn root(&self) -> Option<&Node> {
        self.selection.first()
    }
}
