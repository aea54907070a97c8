use std::fmt;
use std::str::FromStr;

use crate::errors::SnapshotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Skill {
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecraft,
    Hunter,
    Construction,
}

impl Skill {
    pub const ALL: [Skill; 23] = [
        Skill::Attack,
        Skill::Defence,
        Skill::Strength,
        Skill::Hitpoints,
        Skill::Ranged,
        Skill::Prayer,
        Skill::Magic,
        Skill::Cooking,
        Skill::Woodcutting,
        Skill::Fletching,
        Skill::Fishing,
        Skill::Firemaking,
        Skill::Crafting,
        Skill::Smithing,
        Skill::Mining,
        Skill::Herblore,
        Skill::Agility,
        Skill::Thieving,
        Skill::Slayer,
        Skill::Farming,
        Skill::Runecraft,
        Skill::Hunter,
        Skill::Construction,
    ];

    /// Constant name used on the wire, e.g. `WOODCUTTING`.
    pub fn name(self) -> &'static str {
        match self {
            Skill::Attack => "ATTACK",
            Skill::Defence => "DEFENCE",
            Skill::Strength => "STRENGTH",
            Skill::Hitpoints => "HITPOINTS",
            Skill::Ranged => "RANGED",
            Skill::Prayer => "PRAYER",
            Skill::Magic => "MAGIC",
            Skill::Cooking => "COOKING",
            Skill::Woodcutting => "WOODCUTTING",
            Skill::Fletching => "FLETCHING",
            Skill::Fishing => "FISHING",
            Skill::Firemaking => "FIREMAKING",
            Skill::Crafting => "CRAFTING",
            Skill::Smithing => "SMITHING",
            Skill::Mining => "MINING",
            Skill::Herblore => "HERBLORE",
            Skill::Agility => "AGILITY",
            Skill::Thieving => "THIEVING",
            Skill::Slayer => "SLAYER",
            Skill::Farming => "FARMING",
            Skill::Runecraft => "RUNECRAFT",
            Skill::Hunter => "HUNTER",
            Skill::Construction => "CONSTRUCTION",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exact constant-name lookup; anything else is `UnknownSkill`.
impl FromStr for Skill {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| SnapshotError::UnknownSkill(s.to_string()))
    }
}
