//! Dungeon — pure game logic (no rendering / IO).
//!
//! Every transition takes the one exclusively borrowed [`DungeonState`] and
//! returns whether anything changed. Player moves are resolved here; enemy
//! movement lives in [`super::enemies`] and only runs from [`tick`].

use std::rc::Rc;

use super::catalog::dialogue;
use super::enemies::advance_enemies;
use super::level::build_level;
use super::state::{Cell, Direction, DungeonState, GamePhase, ItemKind, Pos};

const WEAPON_DAMAGE: i32 = 3;
const BARE_DAMAGE: i32 = 1;
/// Damage an enemy deals back when it survives a hit.
const COUNTER_DAMAGE: i32 = 2;

const DEFEAT_SCORE: u32 = 20;
const KEY_SCORE: u32 = 5;
const POTION_SCORE: u32 = 5;
const POTION_HEAL: i32 = 5;
const WEAPON_SCORE: u32 = 15;
const TREASURE_SCORE: u32 = 50;
const GENERIC_SCORE: u32 = 10;

const LEVEL_BONUS: u32 = 100;
const LEVEL_HEAL: i32 = 5;

/// Everything the player can ask the core to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
}

pub fn apply(state: &mut DungeonState, command: Command) -> bool {
    match command {
        Command::Move(dir) => move_player(state, dir),
        Command::Restart => {
            restart(state);
            true
        }
    }
}

// ── Tick ──────────────────────────────────────────────────────

/// Advance the clock and let enemies act. The clock keeps running after
/// death; enemies do not.
pub fn tick(state: &mut DungeonState, delta_ticks: u32) {
    for _ in 0..delta_ticks {
        state.ticks += 1;
        advance_enemies(state);
    }
}

// ── Restart ───────────────────────────────────────────────────

/// Throw the session away and start over on the first level.
pub fn restart(state: &mut DungeonState) {
    let seed = state.rng.next_seed();
    *state = DungeonState::new(Rc::clone(&state.catalog), seed);
    log_event("Dungeon: restarted");
}

// ── Movement ──────────────────────────────────────────────────

pub fn move_player(state: &mut DungeonState, dir: Direction) -> bool {
    if state.phase == GamePhase::Dead {
        return false;
    }
    let target = match state.board.player.step(dir, state.board.size) {
        Some(p) => p,
        None => return false,
    };

    match state.board.cell(target) {
        Cell::Wall => {
            state.message = "You can't walk through walls!".into();
            return true;
        }
        Cell::Door => match state.board.door_at(target) {
            Some(i) if !state.board.doors[i].open => {
                open_door(state, i);
                return true;
            }
            _ => {
                step_to(state, target);
                state.message.clear();
            }
        },
        Cell::Teleporter => {
            let destination = state
                .board
                .teleporter_at(target)
                .map(|i| state.board.teleporters[i].target)
                .unwrap_or(target);
            step_to(state, destination);
            state.message = "Teleported!".into();
            return true;
        }
        Cell::Enemy => match state.board.enemy_at(target) {
            Some(i) => attack(state, i),
            None => {
                step_to(state, target);
                state.message.clear();
            }
        },
        Cell::Item(_) => {
            if let Some(i) = state.board.item_at(target) {
                pick_up(state, i);
            } else {
                state.message.clear();
            }
            step_to(state, target);
        }
        Cell::Switch => {
            if let Some(i) = state.board.switch_at(target) {
                let switch = &mut state.board.switches[i];
                switch.active = !switch.active;
                state.message = if switch.active {
                    "Switch activated!".into()
                } else {
                    "Switch deactivated!".into()
                };
            }
            step_to(state, target);
        }
        Cell::Npc => {
            // The player stays put; only the message changes.
            if let Some(i) = state.board.npc_at(target) {
                let lines = dialogue(state.board.npcs[i].kind);
                if let Some(line) = state.rng.pick(lines) {
                    state.message = (*line).to_string();
                }
            }
        }
        Cell::Empty | Cell::Player => {
            step_to(state, target);
            state.message.clear();
        }
    }

    if check_death(state) {
        return true;
    }
    check_level_complete(state);
    true
}

/// Move the player glyph, restoring whatever the origin cell still hosts.
fn step_to(state: &mut DungeonState, target: Pos) {
    let from = state.board.player;
    state.board.player = target;
    let left_behind = state.board.underlying(from);
    state.board.set(from, left_behind);
    state.board.set(target, Cell::Player);
}

fn open_door(state: &mut DungeonState, index: usize) {
    let pos = state.board.doors[index].pos;
    let key = state.board.doors[index].key.clone();

    match key {
        None => state.message = "Door opened!".into(),
        Some(key) => {
            let held = state.inventory.get(&key).copied().unwrap_or(0);
            if held == 0 {
                state.message = format!("You need a {} to open this door!", key);
                return;
            }
            if held == 1 {
                state.inventory.remove(&key);
            } else {
                state.inventory.insert(key, held - 1);
            }
            state.message = "Door unlocked!".into();
        }
    }

    state.board.doors[index].open = true;
    state.board.set(pos, Cell::Empty);
}

fn attack(state: &mut DungeonState, index: usize) {
    let damage = if state.weapon.is_some() {
        WEAPON_DAMAGE
    } else {
        BARE_DAMAGE
    };
    let enemy = &mut state.board.enemies[index];
    enemy.health -= damage;
    let (pos, remaining) = (enemy.pos, enemy.health);

    if remaining <= 0 {
        state.board.enemies.remove(index);
        state.score += DEFEAT_SCORE;
        let cell = state.board.underlying(pos);
        state.board.set(pos, cell);
        state.message = format!("Enemy defeated! +{} points", DEFEAT_SCORE);
    } else {
        state.health -= COUNTER_DAMAGE;
        state.message = format!(
            "You attack the enemy! Enemy health: {}. You take {} damage!",
            remaining, COUNTER_DAMAGE
        );
    }
}

fn pick_up(state: &mut DungeonState, index: usize) {
    let item = state.board.items.remove(index);
    match item.kind {
        ItemKind::Key => {
            state.message = format!("Found {}!", item.id);
            *state.inventory.entry(item.id).or_insert(0) += 1;
            state.score += KEY_SCORE;
        }
        ItemKind::Potion => {
            state.health = (state.health + POTION_HEAL).min(state.max_health);
            state.score += POTION_SCORE;
            state.message = format!("Health restored! +{} HP", POTION_HEAL);
        }
        ItemKind::Weapon => {
            state.message = format!("Weapon acquired: {}!", item.id);
            state.weapon = Some(item.id);
            state.score += WEAPON_SCORE;
        }
        ItemKind::Treasure => {
            state.score += TREASURE_SCORE;
            state.message = format!("Treasure found! +{} points", TREASURE_SCORE);
        }
        ItemKind::Generic => {
            state.score += GENERIC_SCORE;
            state.message = format!("Item collected! +{} points", GENERIC_SCORE);
        }
    }
}

// ── Outcome checks ────────────────────────────────────────────

fn check_death(state: &mut DungeonState) -> bool {
    if state.health > 0 {
        return false;
    }
    state.health = 0;
    state.phase = GamePhase::Dead;
    state.message = "Game Over! Press R to restart.".into();
    log_event(&format!(
        "Dungeon: player died on level {} with score {}",
        state.level, state.score
    ));
    true
}

fn check_level_complete(state: &mut DungeonState) {
    if state.treasures_remaining() > 0 || state.enemies_remaining() > 0 {
        return;
    }
    if state.level < state.max_level() {
        advance_level(state);
    } else {
        if state.phase != GamePhase::Victory {
            log_event(&format!("Dungeon: victory with score {}", state.score));
        }
        state.phase = GamePhase::Victory;
        state.message = "Victory! You completed all levels!".into();
    }
}

/// Swap in the next level's board. Inventory, weapon, score and the clock
/// carry over.
fn advance_level(state: &mut DungeonState) {
    let catalog = Rc::clone(&state.catalog);
    let next = catalog.level(state.level);
    state.level += 1;
    state.board = build_level(next);
    state.health = (state.health + LEVEL_HEAL).min(state.max_health);
    state.score += LEVEL_BONUS;
    state.message = format!(
        "Level Complete! Advancing to Level {}: {}",
        state.level, next.name
    );
    log_event(&format!(
        "Dungeon: entered level {} ({}) with score {}",
        state.level, next.name, state.score
    ));
}

#[cfg(target_arch = "wasm32")]
fn log_event(text: &str) {
    web_sys::console::log_1(&text.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn log_event(_text: &str) {}
