//! Spatial layer entities and slot-matrix columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geometry::Rect;

/// Unique identifier of a spatial entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id with a readable prefix, e.g. `box_mid_bg_1f0c...`.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}_{}", prefix, uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique `(column, row role)` address derived by the slot matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotKey(pub String);

impl SlotKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Row of the slot matrix. Determines stacking offset and region policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowRole {
    Effect,
    Text,
    Background,
}

impl RowRole {
    pub const ALL: [RowRole; 3] = [RowRole::Effect, RowRole::Text, RowRole::Background];

    /// Token used inside slot keys.
    pub fn slot_name(&self) -> &'static str {
        match self {
            Self::Effect => "effect",
            Self::Text => "text",
            Self::Background => "bg",
        }
    }
}

impl fmt::Display for RowRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effect => write!(f, "effect"),
            Self::Text => write!(f, "text"),
            Self::Background => write!(f, "background"),
        }
    }
}

impl FromStr for RowRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "effect" | "eff" => Ok(Self::Effect),
            "text" | "txt" => Ok(Self::Text),
            "background" | "bg" => Ok(Self::Background),
            _ => Err(format!("Unknown row role: {}", s)),
        }
    }
}

/// Semantic role of a slot-matrix column.
///
/// The first four columns carry the background vertical partition; columns
/// beyond them synthesize a `col{n}` token and are only canvas-bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColRole {
    Full,
    High,
    Mid,
    Low,
    #[serde(rename = "col")]
    Extra(usize),
}

impl ColRole {
    /// Fixed ordered role list indexed by column.
    pub const ORDERED: [ColRole; 4] = [ColRole::Full, ColRole::High, ColRole::Mid, ColRole::Low];

    pub fn from_index(col_index: usize) -> Self {
        Self::ORDERED
            .get(col_index)
            .copied()
            .unwrap_or(ColRole::Extra(col_index))
    }

    /// Index of the horizontal third this role is confined to, if any.
    pub fn third_index(&self) -> Option<usize> {
        match self {
            Self::High => Some(0),
            Self::Mid => Some(1),
            Self::Low => Some(2),
            Self::Full | Self::Extra(_) => None,
        }
    }

    pub fn token(&self) -> String {
        match self {
            Self::Full => "full".to_string(),
            Self::High => "high".to_string(),
            Self::Mid => "mid".to_string(),
            Self::Low => "low".to_string(),
            Self::Extra(n) => format!("col{}", n),
        }
    }
}

impl Default for ColRole {
    fn default() -> Self {
        Self::Full
    }
}

impl fmt::Display for ColRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// A slot-matrix column. Only its index matters to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A positioned, sized layer on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub z_index: i32,
    pub row_role: RowRole,
    #[serde(default)]
    pub col_role: ColRole,
    #[serde(default)]
    pub slot_key: Option<SlotKey>,
    #[serde(default)]
    pub hidden: bool,
    /// Text/media references. Opaque to the engine.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, rect: Rect, row_role: RowRole) -> Self {
        Self {
            id: id.into(),
            rect,
            z_index: 0,
            row_role,
            col_role: ColRole::Full,
            slot_key: None,
            hidden: false,
            content: serde_json::Value::Null,
        }
    }

    pub fn with_col_role(mut self, col_role: ColRole) -> Self {
        self.col_role = col_role;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_slot(mut self, slot_key: SlotKey) -> Self {
        self.slot_key = Some(slot_key);
        self
    }

    /// Background entities outside the full column are confined to a third.
    pub fn is_region_bound(&self) -> bool {
        self.row_role == RowRole::Background && self.col_role.third_index().is_some()
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
