//! Enemy scheduler: moves enemies on their own cooldown, independent of
//! player input. Combat is never triggered from here.

use super::rng::GameRng;
use super::state::{
    Cell, Direction, DungeonState, Enemy, GamePhase, MovePattern, Pos, ENEMY_MOVE_COOLDOWN,
};

/// Give every enemy whose cooldown has elapsed one move decision.
///
/// Destinations are checked against the grid as it was before this call, so
/// the order of the enemy list never matters. Afterwards the grid is rebuilt:
/// vacated enemy cells fall back to their fixture, new positions are marked
/// only where the cell is Empty, and the player glyph is painted last.
pub fn advance_enemies(state: &mut DungeonState) {
    if state.phase == GamePhase::Dead || state.board.enemies.is_empty() {
        return;
    }
    let now = state.ticks;
    let player = state.board.player;
    let previous: Vec<Pos> = state.board.enemies.iter().map(|e| e.pos).collect();
    let mut moved = false;

    for i in 0..state.board.enemies.len() {
        let enemy = &state.board.enemies[i];
        if now.saturating_sub(enemy.last_move) < ENEMY_MOVE_COOLDOWN {
            continue;
        }

        let size = state.board.size;
        let candidate = next_position(&mut state.board.enemies[i], player, &mut state.rng, size);
        let enemy_pos = state.board.enemies[i].pos;
        if let Some(dest) = candidate {
            if dest != enemy_pos
                && state.board.is_interior(dest)
                && matches!(state.board.cell(dest), Cell::Empty | Cell::Player)
            {
                state.board.enemies[i].pos = dest;
                moved = true;
            }
        }
        state.board.enemies[i].last_move = now;
    }

    if !moved {
        return;
    }

    for pos in previous {
        if state.board.cell(pos) == Cell::Enemy {
            let cell = state.board.fixture(pos);
            state.board.set(pos, cell);
        }
    }
    let current: Vec<Pos> = state.board.enemies.iter().map(|e| e.pos).collect();
    for pos in current {
        if state.board.cell(pos) == Cell::Empty {
            state.board.set(pos, Cell::Enemy);
        }
    }
    state.board.set(player, Cell::Player);
}

/// Where this enemy wants to go. Advances patrol progress as a side effect,
/// whether or not the move is later allowed.
fn next_position(
    enemy: &mut Enemy,
    player: Pos,
    rng: &mut GameRng,
    size: usize,
) -> Option<Pos> {
    match &mut enemy.movement {
        MovePattern::Random => {
            let dir = Direction::ALL[rng.below(Direction::ALL.len())];
            enemy.pos.step(dir, size)
        }
        MovePattern::Patrol { path, index } => {
            if path.is_empty() {
                return None;
            }
            *index = (*index + 1) % path.len();
            Some(path[*index])
        }
        MovePattern::Chase => {
            let dx = player.x as i64 - enemy.pos.x as i64;
            let dy = player.y as i64 - enemy.pos.y as i64;
            // Ties go to the Y axis.
            if dx.abs() > dy.abs() {
                enemy.pos.offset(dx.signum(), 0, size)
            } else {
                enemy.pos.offset(0, dy.signum(), size)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::dungeon::catalog::Catalog;
    use crate::games::dungeon::state::{ItemKind, Switch};
    use std::rc::Rc;

    fn session(json: &str) -> DungeonState {
        let catalog = Catalog::from_json(json).expect("test catalog");
        DungeonState::new(Rc::new(catalog), 3)
    }

    /// Run one full cooldown worth of ticks.
    fn wait_one_move(state: &mut DungeonState) {
        for _ in 0..ENEMY_MOVE_COOLDOWN {
            state.ticks += 1;
            advance_enemies(state);
        }
    }

    const PATROL: &str = r#"[{"name": "Loop", "grid_size": 10, "objective": "x",
        "player_start": [1, 1],
        "enemies": [{"pos": [4, 4], "health": 2, "movement":
            {"patrol": {"path": [[4, 4], [5, 4], [5, 5], [4, 5]]}}}]}]"#;

    #[test]
    fn patrol_cycles_back_after_four_moves() {
        let mut s = session(PATROL);
        let expected = [
            Pos::new(5, 4),
            Pos::new(5, 5),
            Pos::new(4, 5),
            Pos::new(4, 4),
        ];
        for want in expected {
            wait_one_move(&mut s);
            assert_eq!(s.board.enemies[0].pos, want);
            assert_eq!(s.board.cell(want), Cell::Enemy);
        }
        // Only the current position shows an enemy.
        let marked = s
            .board
            .grid
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Enemy)
            .count();
        assert_eq!(marked, 1);
    }

    #[test]
    fn nothing_moves_before_the_cooldown() {
        let mut s = session(PATROL);
        for _ in 1..ENEMY_MOVE_COOLDOWN {
            s.ticks += 1;
            advance_enemies(&mut s);
        }
        assert_eq!(s.board.enemies[0].pos, Pos::new(4, 4));
        s.ticks += 1;
        advance_enemies(&mut s);
        assert_eq!(s.board.enemies[0].pos, Pos::new(5, 4));
        assert_eq!(s.board.enemies[0].last_move, ENEMY_MOVE_COOLDOWN);
    }

    #[test]
    fn blocked_patrol_stays_but_keeps_counting() {
        let mut s = session(PATROL);
        s.board.set(Pos::new(5, 4), Cell::Wall);
        wait_one_move(&mut s);
        assert_eq!(s.board.enemies[0].pos, Pos::new(4, 4));
        assert_eq!(s.board.enemies[0].last_move, ENEMY_MOVE_COOLDOWN);
        // The next stop is attempted on the following move.
        wait_one_move(&mut s);
        assert_eq!(s.board.enemies[0].pos, Pos::new(5, 5));
    }

    #[test]
    fn chase_closes_the_larger_gap() {
        let mut s = session(
            r#"[{"name": "Hunt", "grid_size": 10, "objective": "x",
                "player_start": [5, 2],
                "enemies": [{"pos": [5, 5], "health": 2, "movement": "chase"}]}]"#,
        );
        wait_one_move(&mut s);
        assert_eq!(s.board.enemies[0].pos, Pos::new(5, 4));

        s.board.enemies[0].pos = Pos::new(2, 4);
        s.board.set(Pos::new(5, 4), Cell::Empty);
        s.board.set(Pos::new(2, 4), Cell::Enemy);
        wait_one_move(&mut s);
        assert_eq!(s.board.enemies[0].pos, Pos::new(3, 4));
    }

    #[test]
    fn chase_ties_step_along_y() {
        let mut s = session(
            r#"[{"name": "Hunt", "grid_size": 10, "objective": "x",
                "player_start": [3, 3],
                "enemies": [{"pos": [5, 5], "health": 2, "movement": "chase"}]}]"#,
        );
        wait_one_move(&mut s);
        assert_eq!(s.board.enemies[0].pos, Pos::new(5, 4));
    }

    #[test]
    fn enemy_may_share_the_player_cell_without_hiding_it() {
        let mut s = session(
            r#"[{"name": "Hunt", "grid_size": 10, "objective": "x",
                "player_start": [5, 4],
                "enemies": [{"pos": [5, 5], "health": 2, "movement": "chase"}]}]"#,
        );
        let health = s.health;
        wait_one_move(&mut s);
        assert_eq!(s.board.enemies[0].pos, Pos::new(5, 4));
        assert_eq!(s.board.cell(Pos::new(5, 4)), Cell::Player);
        assert_eq!(s.board.cell(Pos::new(5, 5)), Cell::Empty);
        assert_eq!(s.health, health);
    }

    #[test]
    fn enemies_respect_walls_and_fixtures() {
        let mut s = session(
            r#"[{"name": "Hunt", "grid_size": 10, "objective": "x",
                "player_start": [5, 1],
                "items": [{"pos": [5, 4], "kind": "generic", "id": "coin"}],
                "enemies": [{"pos": [5, 5], "health": 2, "movement": "chase"}]}]"#,
        );
        wait_one_move(&mut s);
        assert_eq!(s.board.enemies[0].pos, Pos::new(5, 5));
        assert_eq!(
            s.board.cell(Pos::new(5, 4)),
            Cell::Item(ItemKind::Generic)
        );
    }

    #[test]
    fn enemies_never_leave_the_interior() {
        let mut s = session(
            r#"[{"name": "Pen", "grid_size": 4, "objective": "x",
                "player_start": [1, 1],
                "enemies": [{"pos": [2, 2], "health": 1, "movement": "random"}]}]"#,
        );
        for _ in 0..50 {
            wait_one_move(&mut s);
            assert!(s.board.is_interior(s.board.enemies[0].pos));
        }
    }

    #[test]
    fn vacated_switch_reappears() {
        let mut s = session(PATROL);
        s.board.switches.push(Switch {
            pos: Pos::new(4, 4),
            active: false,
            affects: "gate".into(),
        });
        wait_one_move(&mut s);
        assert_eq!(s.board.cell(Pos::new(4, 4)), Cell::Switch);
    }

    #[test]
    fn dead_players_freeze_the_dungeon() {
        let mut s = session(PATROL);
        s.phase = GamePhase::Dead;
        wait_one_move(&mut s);
        assert_eq!(s.board.enemies[0].pos, Pos::new(4, 4));
        assert_eq!(s.board.enemies[0].last_move, 0);
    }

    #[test]
    fn random_walk_is_reproducible() {
        let catalog = Rc::new(Catalog::builtin().expect("builtin catalog"));
        let mut a = DungeonState::new(Rc::clone(&catalog), 11);
        let mut b = DungeonState::new(catalog, 11);
        for _ in 0..5 {
            wait_one_move(&mut a);
            wait_one_move(&mut b);
        }
        assert_eq!(a.board.enemies, b.board.enemies);
    }
}
