//! Declarative description of an entity-relationship diagram.
//!
//! All coordinates are canvas pixels with the origin at the top-left corner
//! and y growing downward. Text positions are baselines.

use crate::graphics::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: Color,
    /// Centred lines drawn before anything else
    #[serde(default)]
    pub title: Vec<Caption>,
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    /// Boxed text blocks such as a legend or statistics summary
    #[serde(default)]
    pub panels: Vec<Panel>,
    /// Centred lines drawn last
    #[serde(default)]
    pub captions: Vec<Caption>,
}

fn default_background() -> Color {
    Color::white()
}

impl Diagram {
    /// An empty white canvas of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: default_background(),
            title: Vec::new(),
            entities: Vec::new(),
            relationships: Vec::new(),
            panels: Vec::new(),
            captions: Vec::new(),
        }
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Parses a diagram from its JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Primary entities get the blue header, others purple
    #[serde(default)]
    pub primary: bool,
    pub attributes: Vec<Attribute>,
}

impl Entity {
    pub fn new(name: impl Into<String>, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            primary: false,
            attributes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    PrimaryKey,
    ForeignKey,
    #[default]
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub text: String,
    #[serde(default)]
    pub kind: AttributeKind,
}

impl Attribute {
    pub fn primary_key(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AttributeKind::PrimaryKey,
        }
    }

    pub fn foreign_key(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AttributeKind::ForeignKey,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AttributeKind::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A directed connector; the arrowhead sits at `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub from: Anchor,
    pub to: Anchor,
    pub label: String,
    pub cardinality: String,
}

/// Glyph size class for raster text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSize {
    Small,
    #[default]
    Normal,
    Large,
    Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Color,
    #[serde(default)]
    pub size: TextSize,
    #[serde(default)]
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub fill: Color,
    pub border: Color,
    pub lines: Vec<TextLine>,
}

/// A line of text centred horizontally on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub text: String,
    pub y: i32,
    pub color: Color,
    #[serde(default)]
    pub size: TextSize,
    #[serde(default)]
    pub bold: bool,
}
