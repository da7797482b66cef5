//! Turns a catalog entry into a fresh, playable board.

use super::catalog::LevelSpec;
use super::state::{Board, Cell, Pos};

/// Build the board for `spec`.
///
/// Paint order decides which tag wins where the authored data overlaps:
/// border, walls, doors, teleporters, switches, NPCs, items, enemies, player.
/// Every entity collection is a deep copy, so play never mutates the catalog.
pub fn build_level(spec: &LevelSpec) -> Board {
    let size = spec.grid_size;
    let mut grid = vec![vec![Cell::Empty; size]; size];

    for y in 0..size {
        for x in 0..size {
            if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                grid[y][x] = Cell::Wall;
            }
        }
    }

    let mut paint = |pos: Pos, cell: Cell| {
        if let Some(row) = grid.get_mut(pos.y) {
            if let Some(slot) = row.get_mut(pos.x) {
                *slot = cell;
            }
        }
    };

    for &wall in &spec.walls {
        paint(wall, Cell::Wall);
    }
    // Doors that start open still show as doors until first vacated.
    for door in &spec.doors {
        paint(door.pos, Cell::Door);
    }
    for tp in &spec.teleporters {
        paint(tp.pos, Cell::Teleporter);
    }
    for sw in &spec.switches {
        paint(sw.pos, Cell::Switch);
    }
    for npc in &spec.npcs {
        paint(npc.pos, Cell::Npc);
    }
    for item in &spec.items {
        paint(item.pos, Cell::Item(item.kind));
    }
    for enemy in &spec.enemies {
        paint(enemy.pos, Cell::Enemy);
    }
    paint(spec.player_start, Cell::Player);

    let enemies = spec
        .enemies
        .iter()
        .cloned()
        .map(|mut e| {
            e.last_move = 0;
            e
        })
        .collect();

    Board {
        size,
        grid,
        player: spec.player_start,
        items: spec.items.clone(),
        enemies,
        doors: spec.doors.clone(),
        teleporters: spec.teleporters.clone(),
        switches: spec.switches.clone(),
        npcs: spec.npcs.clone(),
    }
}
