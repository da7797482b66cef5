//! Level catalog: the static, ordered list of hand-authored levels.
//!
//! The built-in levels live in `levels.json`, embedded at compile time. The
//! catalog is read-only: sessions clone what they need out of it, so restarts
//! and replays always see the authored data.

use serde::Deserialize;
use thiserror::Error;

use super::state::{Door, Enemy, Item, Npc, NpcKind, Pos, Switch, Teleporter};

const BUILTIN_LEVELS: &str = include_str!("levels.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("level catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level catalog contains no levels")]
    Empty,
}

/// One level as authored. Coordinates are `[x, y]`; the border ring is
/// implied and never listed in `walls`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LevelSpec {
    pub name: String,
    /// Grids are square: `grid_size` × `grid_size`.
    pub grid_size: usize,
    pub objective: String,
    pub player_start: Pos,
    #[serde(default)]
    pub walls: Vec<Pos>,
    #[serde(default)]
    pub npcs: Vec<Npc>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub teleporters: Vec<Teleporter>,
    #[serde(default)]
    pub switches: Vec<Switch>,
}

/// Non-empty ordered list of levels.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    levels: Vec<LevelSpec>,
}

impl Catalog {
    pub fn new(levels: Vec<LevelSpec>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { levels })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let levels: Vec<LevelSpec> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// The three levels that ship with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Level by 0-based index. Callers keep the index below `level_count()`.
    pub fn level(&self, index: usize) -> &LevelSpec {
        &self.levels[index]
    }

    #[cfg(test)]
    pub fn levels(&self) -> &[LevelSpec] {
        &self.levels
    }
}

/// Fixed dialogue lines per NPC category.
pub fn dialogue(kind: NpcKind) -> &'static [&'static str] {
    match kind {
        NpcKind::Merchant => &[
            "Welcome, traveler! I have potions for sale.",
            "Beware the enemies ahead, they're dangerous!",
            "I've heard rumors of great treasure beyond the doors.",
            "Keys are precious here, guard them well!",
        ],
        NpcKind::Guard => &[
            "Halt! This area is dangerous.",
            "The enemies grow stronger each level.",
            "Find the switches to unlock new areas.",
            "Combat tip: Attack enemies by walking into them!",
        ],
        NpcKind::Sage => &[
            "The teleporters will aid your journey.",
            "Some doors require special keys to open.",
            "Collect potions to restore your health.",
            "The treasure is well guarded...",
        ],
        NpcKind::Stranger => &["Hello there!"],
    }
}
