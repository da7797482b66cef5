//! Dungeon game state — data structures and read-only views, no transitions.
//!
//! The grid stores one occupant tag per cell for collision. Items, enemies,
//! doors, teleporters, switches and NPCs are tracked in their own collections
//! and projected onto the grid; `Board::underlying` recomputes a cell from
//! them whenever the player walks off it.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Deserializer};

use super::catalog::{Catalog, LevelSpec};
use super::level::build_level;
use super::rng::GameRng;

/// Starting and maximum player health.
pub const MAX_HEALTH: i32 = 10;

/// Ticks an enemy waits between two moves (one second at 10 ticks/sec).
pub const ENEMY_MOVE_COOLDOWN: u64 = 10;

// ── Geometry ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Delta (dx, dy) for this direction.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Grid coordinate. Catalog JSON writes it as `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "(usize, usize)")]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Position offset by (dx, dy); `None` if it would leave `0..size` on either axis.
    pub fn offset(self, dx: i64, dy: i64, size: usize) -> Option<Pos> {
        let x = self.x as i64 + dx;
        let y = self.y as i64 + dy;
        let size = size as i64;
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some(Pos::new(x as usize, y as usize))
    }

    pub fn step(self, dir: Direction, size: usize) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy, size)
    }
}

impl From<(usize, usize)> for Pos {
    fn from((x, y): (usize, usize)) -> Self {
        Pos::new(x, y)
    }
}

/// Door key requirement. Both `null` and the literal `"none"` mean keyless.
fn door_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let key = Option::<String>::deserialize(deserializer)?;
    Ok(key.filter(|k| k != "none"))
}

// ── Occupants ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Generic,
    Key,
    Potion,
    Weapon,
    Treasure,
}

/// What a grid cell shows for collision purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Player,
    Npc,
    Enemy,
    Door,
    Teleporter,
    Switch,
    Item(ItemKind),
}

// ── Entities ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Item {
    pub pos: Pos,
    pub kind: ItemKind,
    /// Inventory key for keys, weapon name for weapons, label otherwise.
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePattern {
    /// One of the four directions, uniformly at random.
    Random,
    /// Cycles through absolute positions; `index` is the current stop.
    Patrol {
        path: Vec<Pos>,
        #[serde(default)]
        index: usize,
    },
    /// Greedy single-axis pursuit of the player.
    Chase,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Enemy {
    pub pos: Pos,
    /// Always > 0 while the enemy is in the collection.
    pub health: i32,
    pub movement: MovePattern,
    /// Tick of the last scheduler decision for this enemy.
    #[serde(default)]
    pub last_move: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Door {
    pub pos: Pos,
    /// Inventory id consumed on unlock. `None` opens freely.
    #[serde(default, deserialize_with = "door_key")]
    pub key: Option<String>,
    /// Never goes back to false once set.
    #[serde(default)]
    pub open: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Teleporter {
    pub pos: Pos,
    pub target: Pos,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Switch {
    pub pos: Pos,
    #[serde(default)]
    pub active: bool,
    /// Name of the system this switch is wired to. Informational only.
    pub affects: String,
}

/// Dialogue category. Unknown names fall back to `Stranger`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum NpcKind {
    Merchant,
    Guard,
    Sage,
    Stranger,
}

impl From<String> for NpcKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "merchant" => NpcKind::Merchant,
            "guard" => NpcKind::Guard,
            "sage" => NpcKind::Sage,
            _ => NpcKind::Stranger,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Npc {
    pub pos: Pos,
    pub kind: NpcKind,
}

// ── Board ─────────────────────────────────────────────────────

/// Everything that belongs to the active level. Replaced wholesale on level
/// transition and restart.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub size: usize,
    /// 2D grid [y][x].
    pub grid: Vec<Vec<Cell>>,
    pub player: Pos,
    pub items: Vec<Item>,
    pub enemies: Vec<Enemy>,
    pub doors: Vec<Door>,
    pub teleporters: Vec<Teleporter>,
    pub switches: Vec<Switch>,
    pub npcs: Vec<Npc>,
}

impl Board {
    pub fn cell(&self, pos: Pos) -> Cell {
        self.grid[pos.y][pos.x]
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.grid[pos.y][pos.x] = cell;
    }

    /// Strictly inside the border ring.
    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x > 0 && pos.y > 0 && pos.x < self.size - 1 && pos.y < self.size - 1
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<usize> {
        self.enemies.iter().position(|e| e.pos == pos)
    }

    pub fn item_at(&self, pos: Pos) -> Option<usize> {
        self.items.iter().position(|i| i.pos == pos)
    }

    pub fn door_at(&self, pos: Pos) -> Option<usize> {
        self.doors.iter().position(|d| d.pos == pos)
    }

    pub fn teleporter_at(&self, pos: Pos) -> Option<usize> {
        self.teleporters.iter().position(|t| t.pos == pos)
    }

    pub fn switch_at(&self, pos: Pos) -> Option<usize> {
        self.switches.iter().position(|s| s.pos == pos)
    }

    pub fn npc_at(&self, pos: Pos) -> Option<usize> {
        self.npcs.iter().position(|n| n.pos == pos)
    }

    /// The non-moving occupant at `pos`: NPC, item, closed door, teleporter,
    /// switch, or Empty. Walls never host anything else and are not recomputed.
    pub fn fixture(&self, pos: Pos) -> Cell {
        if self.npc_at(pos).is_some() {
            Cell::Npc
        } else if let Some(i) = self.item_at(pos) {
            Cell::Item(self.items[i].kind)
        } else if self.doors.iter().any(|d| d.pos == pos && !d.open) {
            Cell::Door
        } else if self.teleporter_at(pos).is_some() {
            Cell::Teleporter
        } else if self.switch_at(pos).is_some() {
            Cell::Switch
        } else {
            Cell::Empty
        }
    }

    /// What a cell shows once the player is no longer on it.
    pub fn underlying(&self, pos: Pos) -> Cell {
        if self.enemy_at(pos).is_some() {
            Cell::Enemy
        } else {
            self.fixture(pos)
        }
    }

    pub fn treasures_remaining(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.kind == ItemKind::Treasure)
            .count()
    }
}

// ── Game State ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Health hit zero. Only a restart leaves this phase.
    Dead,
    /// Last level cleared.
    Victory,
}

#[derive(Clone, Debug)]
pub struct DungeonState {
    pub catalog: Rc<Catalog>,
    pub board: Board,
    /// 1-based index into the catalog.
    pub level: usize,
    pub health: i32,
    pub max_health: i32,
    /// Item id → count. Entries are removed when they reach zero.
    pub inventory: BTreeMap<String, u32>,
    pub score: u32,
    /// Last weapon picked up wins.
    pub weapon: Option<String>,
    /// Ticks since the session started; carried across levels.
    pub ticks: u64,
    pub message: String,
    pub phase: GamePhase,
    pub rng: GameRng,
}

impl DungeonState {
    /// Fresh session on the catalog's first level.
    pub fn new(catalog: Rc<Catalog>, seed: u64) -> Self {
        let first = catalog.level(0);
        let board = build_level(first);
        let message = format!("Level 1: {} - {}", first.name, first.objective);
        Self {
            board,
            level: 1,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            inventory: BTreeMap::new(),
            score: 0,
            weapon: None,
            ticks: 0,
            message,
            phase: GamePhase::Playing,
            rng: GameRng::new(seed),
            catalog,
        }
    }

    pub fn max_level(&self) -> usize {
        self.catalog.level_count()
    }

    pub fn level_spec(&self) -> &LevelSpec {
        self.catalog.level(self.level - 1)
    }

    pub fn enemies_remaining(&self) -> usize {
        self.board.enemies.len()
    }

    pub fn treasures_remaining(&self) -> usize {
        self.board.treasures_remaining()
    }

    pub fn other_items_remaining(&self) -> usize {
        self.board.items.len() - self.board.treasures_remaining()
    }

    pub fn is_dead(&self) -> bool {
        self.phase == GamePhase::Dead
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.ticks / crate::time::TICKS_PER_SEC as u64
    }
}
