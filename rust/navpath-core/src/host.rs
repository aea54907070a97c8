//! An in-memory game host loaded from a JSON dump.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::convert::NativeLookup;
use crate::skill::Skill;
use crate::state::{GameStateSource, HeldItem};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticGame {
    pub varps: BTreeMap<i32, i32>,
    pub varbits: BTreeMap<i32, i32>,
    pub inventory: Vec<HeldItem>,
    pub equipment: Vec<HeldItem>,
    /// Keyed by skill constant name.
    pub skills: BTreeMap<String, i32>,
    pub objects: BTreeMap<i32, String>,
    pub spells: BTreeSet<String>,
}

impl StaticGame {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

impl GameStateSource for StaticGame {
    fn varp(&self, id: i32) -> i32 {
        self.varps.get(&id).copied().unwrap_or(0)
    }

    fn varbit(&self, id: i32) -> Option<i32> {
        self.varbits.get(&id).copied()
    }

    fn inventory(&self) -> Vec<HeldItem> {
        self.inventory.clone()
    }

    fn equipment(&self) -> Vec<HeldItem> {
        self.equipment.clone()
    }

    fn skill_level(&self, skill: Skill) -> i32 {
        self.skills.get(skill.name()).copied().unwrap_or(-1)
    }

    fn known_varps(&self) -> Vec<i32> {
        self.varps.keys().copied().collect()
    }

    fn known_varbits(&self) -> Vec<i32> {
        self.varbits.keys().copied().collect()
    }
}

impl NativeLookup for StaticGame {
    type Spell = String;

    fn object_name(&self, object_id: i32) -> Option<String> {
        self.objects.get(&object_id).cloned()
    }

    fn spell(&self, constant: &str) -> Option<String> {
        self.spells.get(constant).cloned()
    }
}
