//! Builds [`GameState`] snapshots from a live game.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SnapshotError;
use crate::models::{DataSelection, GameState};
use crate::skill::Skill;

/// Name reported for items whose definition has no name.
pub const UNNAMED_ITEM: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItem {
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: i32,
}

impl HeldItem {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_ITEM)
    }
}

/// Read access to the game client's state.
///
/// Implementations must only be called from the context that owns the game
/// client; the builder never mutates anything through it.
pub trait GameStateSource {
    fn varp(&self, id: i32) -> i32;

    /// `None` when the varbit cannot be loaded.
    fn varbit(&self, id: i32) -> Option<i32>;

    fn inventory(&self) -> Vec<HeldItem>;

    fn equipment(&self) -> Vec<HeldItem>;

    /// Current (boosted) level; negative when unavailable.
    fn skill_level(&self, skill: Skill) -> i32;

    /// Varp ids reported when the server sent no selection.
    fn known_varps(&self) -> Vec<i32> {
        Vec::new()
    }

    /// Varbit ids reported when the server sent no selection.
    fn known_varbits(&self) -> Vec<i32> {
        Vec::new()
    }
}

/// How to fold an item name seen in both inventory and equipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemMerge {
    /// Equipment entry replaces the inventory entry.
    #[default]
    Overwrite,
    Sum,
}

impl FromStr for ItemMerge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(ItemMerge::Overwrite),
            "sum" => Ok(ItemMerge::Sum),
            other => Err(format!("unknown item merge policy {other:?} (expected overwrite or sum)")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder {
    pub item_merge: ItemMerge,
}

impl SnapshotBuilder {
    pub fn new(item_merge: ItemMerge) -> Self {
        Self { item_merge }
    }

    /// Without a selection every discoverable value is reported; with one,
    /// each category is restricted to exactly the requested keys.
    pub fn build(&self, selection: Option<&DataSelection>, source: &dyn GameStateSource) -> Result<GameState, SnapshotError> {
        let varp_ids = selection.map(|s| s.varps.clone()).unwrap_or_else(|| source.known_varps());
        let varps: BTreeMap<i32, i32> = varp_ids.into_iter().map(|id| (id, source.varp(id))).collect();

        let varbit_ids = selection.map(|s| s.varbits.clone()).unwrap_or_else(|| source.known_varbits());
        let mut varbits = BTreeMap::new();
        for id in varbit_ids {
            match source.varbit(id) {
                Some(value) => {
                    varbits.insert(id, value);
                }
                None => debug!(varbit = id, "varbit not loadable; skipped"),
            }
        }

        let mut held = source.inventory();
        held.extend(source.equipment());
        if let Some(sel) = selection {
            // unnamed items never match a selection pattern
            held.retain(|item| {
                item.name
                    .as_deref()
                    .is_some_and(|name| sel.items.iter().any(|p| p.matches(name)))
            });
        }
        let items = self.merge_items(held);

        let mut skills = BTreeMap::new();
        match selection {
            Some(sel) => {
                for name in &sel.skills {
                    let skill = Skill::from_str(name)?;
                    skills.insert(name.clone(), source.skill_level(skill));
                }
            }
            None => {
                for skill in Skill::ALL {
                    let level = source.skill_level(skill);
                    if level >= 0 {
                        skills.insert(skill.name().to_string(), level);
                    }
                }
            }
        }

        debug!(
            varps = varps.len(),
            varbits = varbits.len(),
            items = items.len(),
            skills = skills.len(),
            restricted = selection.is_some(),
            "built game state"
        );
        Ok(GameState { varps, varbits, items, skills })
    }

    fn merge_items(&self, held: Vec<HeldItem>) -> BTreeMap<String, i32> {
        let mut items = BTreeMap::new();
        for item in held {
            let name = item.display_name().to_string();
            match self.item_merge {
                ItemMerge::Overwrite => {
                    items.insert(name, item.quantity);
                }
                ItemMerge::Sum => {
                    let q = items.entry(name).or_insert(0);
                    *q = q.saturating_add(item.quantity);
                }
            }
        }
        items
    }
}
