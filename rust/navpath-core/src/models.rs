use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProtocolError;
use crate::pattern::{self, ItemPattern};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.plane)
    }
}

/// Parses `x,y,plane`.
impl FromStr for Tile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, plane] = parts.as_slice() else {
            return Err(format!("expected x,y,plane but got {s:?}"));
        };
        let num = |p: &str| p.parse::<i32>().map_err(|e| format!("bad coordinate {p:?}: {e}"));
        Ok(Tile { x: num(*x)?, y: num(*y)?, plane: num(*plane)? })
    }
}

/// The subset of game state the navigation server wants reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataSelection {
    pub varps: Vec<i32>,
    pub varbits: Vec<i32>,
    pub items: Vec<ItemPattern>,
    pub skills: Vec<String>,
}

#[derive(Deserialize)]
struct RawSelection {
    #[serde(default)]
    varps: Vec<i32>,
    #[serde(default)]
    varbits: Vec<i32>,
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    skills: Vec<String>,
}

impl DataSelection {
    /// Decodes a `/select` response body. Item entries go through the
    /// pattern codec; `null` entries are dropped.
    pub fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        let raw: RawSelection =
            serde_json::from_slice(body).map_err(|e| ProtocolError::MalformedSelection(e.to_string()))?;
        let mut items = Vec::with_capacity(raw.items.len());
        for token in &raw.items {
            if let Some(p) = pattern::decode(token)? {
                items.push(p);
            }
        }
        Ok(Self { varps: raw.varps, varbits: raw.varbits, items, skills: raw.skills })
    }
}

/// Point-in-time snapshot of flags, item quantities and skill levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub varps: BTreeMap<i32, i32>,
    pub varbits: BTreeMap<i32, i32>,
    pub items: BTreeMap<String, i32>,
    pub skills: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathGenerationRequest {
    pub start: Tile,
    pub end: Tile,
    pub game_state: GameState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tile_parses_and_displays() {
        let t: Tile = "3222, 3218,0".parse().unwrap();
        assert_eq!(t, Tile::new(3222, 3218, 0));
        assert_eq!(t.to_string(), "3222,3218,0");
        assert!("1,2".parse::<Tile>().is_err());
        assert!("1,2,x".parse::<Tile>().is_err());
    }

    #[test]
    fn selection_decodes_patterns() {
        let body = json!({
            "varps": [281, 29],
            "varbits": [4070],
            "items": ["Games necklace.*", null, "Coins"],
            "skills": ["AGILITY"]
        })
        .to_string();
        let sel = DataSelection::decode(body.as_bytes()).unwrap();
        assert_eq!(sel.varps, vec![281, 29]);
        assert_eq!(sel.varbits, vec![4070]);
        let items: Vec<&str> = sel.items.iter().map(|p| p.as_str()).collect();
        assert_eq!(items, vec!["Games necklace.*", "Coins"]);
        assert_eq!(sel.skills, vec!["AGILITY".to_string()]);
    }

    #[test]
    fn selection_rejects_non_string_item() {
        let body = br#"{"varps":[],"varbits":[],"items":[12],"skills":[]}"#;
        assert_eq!(DataSelection::decode(body), Err(ProtocolError::UnsupportedEncoding { token: "NUMBER" }));
    }

    #[test]
    fn selection_rejects_garbage() {
        assert!(matches!(DataSelection::decode(b"not json"), Err(ProtocolError::MalformedSelection(_))));
    }

    #[test]
    fn request_wire_shape() {
        let mut state = GameState::default();
        state.varps.insert(281, 1000);
        state.varbits.insert(4070, 2);
        state.items.insert("Coins".into(), 25);
        state.skills.insert("MAGIC".into(), 55);
        let req = PathGenerationRequest { start: Tile::new(1, 2, 0), end: Tile::new(3, 4, 1), game_state: state };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "start": {"x": 1, "y": 2, "plane": 0},
                "end": {"x": 3, "y": 4, "plane": 1},
                "game_state": {
                    "varps": {"281": 1000},
                    "varbits": {"4070": 2},
                    "items": {"Coins": 25},
                    "skills": {"MAGIC": 55}
                }
            })
        );
        let back: PathGenerationRequest = serde_json::from_str(&v.to_string()).unwrap();
        assert_eq!(back, req);
    }
}
