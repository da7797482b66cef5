/// ASCII Dungeon — a multi-level grid crawler with keys, doors, teleporters
/// and enemies that move on their own clock.

pub mod actions;
pub mod catalog;
pub mod enemies;
pub mod level;
pub mod logic;
pub mod render;
pub mod rng;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ArrowKey, ClickState, InputEvent};

use actions::*;
use catalog::Catalog;
use logic::Command;
use state::{Direction, DungeonState};

pub struct DungeonGame {
    pub state: DungeonState,
}

impl DungeonGame {
    pub fn new(catalog: Rc<Catalog>, seed: u64) -> Self {
        Self {
            state: DungeonState::new(catalog, seed),
        }
    }
}

fn command_for(event: &InputEvent) -> Option<Command> {
    let command = match event {
        InputEvent::Key('w' | 'k') | InputEvent::Arrow(ArrowKey::Up) => {
            Command::Move(Direction::Up)
        }
        InputEvent::Key('s' | 'j') | InputEvent::Arrow(ArrowKey::Down) => {
            Command::Move(Direction::Down)
        }
        InputEvent::Key('a' | 'h') | InputEvent::Arrow(ArrowKey::Left) => {
            Command::Move(Direction::Left)
        }
        InputEvent::Key('d' | 'l') | InputEvent::Arrow(ArrowKey::Right) => {
            Command::Move(Direction::Right)
        }
        InputEvent::Key('r' | 'R') => Command::Restart,
        InputEvent::Click(id) => match *id {
            MOVE_UP => Command::Move(Direction::Up),
            MOVE_DOWN => Command::Move(Direction::Down),
            MOVE_LEFT => Command::Move(Direction::Left),
            MOVE_RIGHT => Command::Move(Direction::Right),
            RESTART => Command::Restart,
            _ => return None,
        },
        InputEvent::Key(_) => return None,
    };
    Some(command)
}

impl Game for DungeonGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match command_for(event) {
            Some(command) => logic::apply(&mut self.state, command),
            None => false,
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::{GamePhase, Pos};

    fn new_game() -> DungeonGame {
        let catalog = Rc::new(Catalog::builtin().expect("builtin catalog"));
        DungeonGame::new(catalog, 5)
    }

    #[test]
    fn every_movement_binding_moves() {
        // Training Grounds starts at (1,1) with open floor to the right and below.
        for event in [
            InputEvent::Key('d'),
            InputEvent::Key('l'),
            InputEvent::Arrow(ArrowKey::Right),
            InputEvent::Click(MOVE_RIGHT),
        ] {
            let mut game = new_game();
            assert!(game.handle_input(&event));
            assert_eq!(game.state.board.player, Pos::new(2, 1), "{:?}", event);
        }
        for event in [
            InputEvent::Key('s'),
            InputEvent::Key('j'),
            InputEvent::Arrow(ArrowKey::Down),
            InputEvent::Click(MOVE_DOWN),
        ] {
            let mut game = new_game();
            assert!(game.handle_input(&event));
            assert_eq!(game.state.board.player, Pos::new(1, 2), "{:?}", event);
        }
    }

    #[test]
    fn up_and_left_bump_the_border() {
        for event in [
            InputEvent::Key('w'),
            InputEvent::Key('k'),
            InputEvent::Arrow(ArrowKey::Up),
            InputEvent::Click(MOVE_UP),
            InputEvent::Key('a'),
            InputEvent::Key('h'),
            InputEvent::Arrow(ArrowKey::Left),
            InputEvent::Click(MOVE_LEFT),
        ] {
            let mut game = new_game();
            game.handle_input(&event);
            assert_eq!(game.state.board.player, Pos::new(1, 1));
            assert_eq!(game.state.message, "You can't walk through walls!");
        }
    }

    #[test]
    fn unbound_input_is_not_consumed() {
        let mut game = new_game();
        assert!(!game.handle_input(&InputEvent::Key('x')));
        assert!(!game.handle_input(&InputEvent::Click(999)));
    }

    #[test]
    fn restart_works_from_game_over() {
        let mut game = new_game();
        game.state.phase = GamePhase::Dead;
        game.state.health = 0;
        assert!(!game.handle_input(&InputEvent::Key('d')));
        assert!(game.handle_input(&InputEvent::Key('R')));
        assert_eq!(game.state.phase, GamePhase::Playing);
        game.state.phase = GamePhase::Dead;
        assert!(game.handle_input(&InputEvent::Click(RESTART)));
        assert!(!game.state.is_dead());
    }

    #[test]
    fn tick_advances_the_clock() {
        let mut game = new_game();
        game.tick(25);
        assert_eq!(game.state.ticks, 25);
        assert_eq!(game.state.elapsed_secs(), 2);
    }
}
