//! Tagged-union wire format for path edges.
//!
//! Every edge is a JSON object with a `type` discriminator and the variant's
//! own fields in snake_case. Tags are fixed literals owned by the server;
//! renaming a variant here must never change them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProtocolError;
use crate::json::token_kind;
use crate::models::Tile;

pub const TAG_FIELD: &str = "type";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Edge {
    #[serde(rename = "Step")]
    Step { position: Tile },
    #[serde(rename = "Door")]
    Door { position: Tile, id: i32, action: String },
    #[serde(rename = "GameObject")]
    GameObjectEdge { position: Tile, id: i32, action: String },
    #[serde(rename = "SpellTeleport")]
    SpellTeleport { spell: String },
    #[serde(rename = "ItemTeleport")]
    ItemTeleport { item: String, action: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Step,
    Door,
    GameObject,
    SpellTeleport,
    ItemTeleport,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 5] =
        [EdgeKind::Step, EdgeKind::Door, EdgeKind::GameObject, EdgeKind::SpellTeleport, EdgeKind::ItemTeleport];

    /// Discriminator value written to `type`.
    pub fn tag(self) -> &'static str {
        match self {
            EdgeKind::Step => "Step",
            EdgeKind::Door => "Door",
            EdgeKind::GameObject => "GameObject",
            EdgeKind::SpellTeleport => "SpellTeleport",
            EdgeKind::ItemTeleport => "ItemTeleport",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        EdgeKind::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

impl Edge {
    pub fn kind(&self) -> EdgeKind {
        match self {
            Edge::Step { .. } => EdgeKind::Step,
            Edge::Door { .. } => EdgeKind::Door,
            Edge::GameObjectEdge { .. } => EdgeKind::GameObject,
            Edge::SpellTeleport { .. } => EdgeKind::SpellTeleport,
            Edge::ItemTeleport { .. } => EdgeKind::ItemTeleport,
        }
    }

    /// World position for edges bound to a tile; teleports have none.
    pub fn position(&self) -> Option<Tile> {
        match self {
            Edge::Step { position } | Edge::Door { position, .. } | Edge::GameObjectEdge { position, .. } => {
                Some(*position)
            }
            Edge::SpellTeleport { .. } | Edge::ItemTeleport { .. } => None,
        }
    }
}

pub fn encode_path(edges: &[Edge]) -> serde_json::Result<String> {
    serde_json::to_string(edges)
}

/// Decodes a `/path` response body. Any bad element fails the whole path.
pub fn decode_path(body: &[u8]) -> Result<Vec<Edge>, ProtocolError> {
    let root: Value = serde_json::from_slice(body).map_err(|e| ProtocolError::malformed(None, e))?;
    let Value::Array(items) = root else {
        return Err(ProtocolError::malformed(None, format!("expected array of edges, got {}", token_kind(&root))));
    };
    items.into_iter().enumerate().map(|(i, item)| decode_edge(i, item)).collect()
}

fn decode_edge(index: usize, item: Value) -> Result<Edge, ProtocolError> {
    let tag = match item.get(TAG_FIELD) {
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(ProtocolError::malformed(Some(index), format!("discriminator is {}", token_kind(other))))
        }
        None => return Err(ProtocolError::malformed(Some(index), "missing discriminator `type`")),
    };
    if EdgeKind::from_tag(tag).is_none() {
        return Err(ProtocolError::malformed(Some(index), format!("unknown edge type {tag:?}")));
    }
    serde_json::from_value(item).map_err(|e| ProtocolError::malformed(Some(index), e))
}
