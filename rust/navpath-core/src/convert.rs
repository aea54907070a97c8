//! Maps decoded edges onto the automation host's web-path vertices.

use serde::Serialize;

use crate::edge::Edge;
use crate::errors::ConvertError;
use crate::models::Tile;

/// Teleports are not anchored to a tile; the host expects the origin.
pub const TELEPORT_ORIGIN: Tile = Tile::new(0, 0, 0);

/// Host lookups needed to build native vertices.
pub trait NativeLookup {
    type Spell;

    fn object_name(&self, object_id: i32) -> Option<String>;

    /// Resolves a spell constant such as `VARROCK_TELEPORT`.
    fn spell(&self, constant: &str) -> Option<Self::Spell>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOrigin {
    Inventory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "vertex", rename_all = "snake_case")]
pub enum WebVertex<S> {
    Coordinate { position: Tile },
    Object { position: Tile, name: Option<String>, action: String },
    ItemTeleport { destination: Tile, origin: ItemOrigin, item: String, action: String },
    TeleportSpell { spell: S, destination: Tile },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebPath<S> {
    pub vertices: Vec<WebVertex<S>>,
    pub cost: f64,
}

/// `Varrock Teleport` -> `VARROCK_TELEPORT`.
pub fn spell_constant(spell: &str) -> String {
    spell.to_uppercase().replace(' ', "_")
}

/// Converts every edge in order. A spell the host does not know fails the
/// whole conversion rather than dropping the step.
pub fn convert<L: NativeLookup>(path: &[Edge], lookup: &L) -> Result<WebPath<L::Spell>, ConvertError> {
    let mut vertices = Vec::with_capacity(path.len());
    for (index, edge) in path.iter().enumerate() {
        let vertex = match edge {
            Edge::Step { position } => WebVertex::Coordinate { position: *position },
            Edge::Door { position, id, action } | Edge::GameObjectEdge { position, id, action } => WebVertex::Object {
                position: *position,
                name: lookup.object_name(*id),
                action: action.clone(),
            },
            Edge::ItemTeleport { item, action } => WebVertex::ItemTeleport {
                destination: TELEPORT_ORIGIN,
                origin: ItemOrigin::Inventory,
                item: item.clone(),
                action: action.clone(),
            },
            Edge::SpellTeleport { spell } => {
                let constant = spell_constant(spell);
                let resolved = lookup
                    .spell(&constant)
                    .ok_or_else(|| ConvertError::UnknownSpell { index, spell: spell.clone() })?;
                WebVertex::TeleportSpell { spell: resolved, destination: TELEPORT_ORIGIN }
            }
        };
        vertices.push(vertex);
    }
    Ok(WebPath { vertices, cost: path.len() as f64 })
}
