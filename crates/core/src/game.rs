//! Game module - the turn-based state machine
//!
//! Ties together the grid, the piece supply and scoring. A game moves
//! `NotStarted -> Running -> GameOver`. While running, every turn ends either
//! with a successful placement or with the turn timer running out, which costs
//! a life and discards the current piece.
//!
//! The game itself owns no clock: [`crate::Game::expire_turn`] is called by
//! whoever runs the turn timer (see `tetrecs-engine`), and
//! [`Game::timer_delay_ms`] tells it how long the next turn lasts.

use std::fmt;

use crate::config::GameConfig;
use crate::events::{Listeners, Stats};
use crate::grid::{ClearedBlocks, Grid};
use crate::pieces::GamePiece;
use crate::scoring::{calculate_clear_score, calculate_level, get_timer_delay_ms};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::supply::PieceSupply;
use crate::types::{Cell, Coord, GamePhase};

/// Why a placement was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// Target cell out of bounds or occupied
    Blocked,
    /// Game not started yet, or already over
    NotRunning,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::Blocked => "blocked",
            PlaceError::NotRunning => "not_running",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::Blocked => "piece does not fit at the target cell",
            PlaceError::NotRunning => "game is not running",
        }
    }
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Why a rotate/swap intent was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentError {
    GameOver,
}

impl IntentError {
    pub fn code(self) -> &'static str {
        match self {
            IntentError::GameOver => "game_over",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            IntentError::GameOver => "no active piece: game is over",
        }
    }
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for IntentError {}

/// Outcome of a successful placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub lines_cleared: u32,
    pub blocks_cleared: u32,
    pub score_delta: u32,
    pub level_up: bool,
}

/// Outcome of a turn timer expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnExpiry {
    pub lives: u32,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug)]
pub struct Game {
    grid: Grid,
    supply: PieceSupply,
    listeners: Listeners,
    phase: GamePhase,
    aim: Coord,
    score: u32,
    level: u32,
    lives: u32,
    /// Always a whole number, so stored as one
    multiplier: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let config = config.normalized();
        Self {
            grid: Grid::new(config.cols, config.rows),
            supply: PieceSupply::new(config.seed),
            listeners: Listeners::default(),
            phase: GamePhase::NotStarted,
            aim: Coord::new((config.cols / 2) as i32, (config.rows / 2) as i32),
            score: 0,
            level: 0,
            lives: config.lives,
            multiplier: 1,
        }
    }

    /// Register listeners; each setter replaces the previous listener
    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    /// Start the game. Returns false if it was already started.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        log::info!(
            "Starting game on a {}x{} grid with {} lives",
            self.grid.cols(),
            self.grid.rows(),
            self.lives
        );
        self.phase = GamePhase::Running;

        let (current, following) = (*self.supply.current(), *self.supply.following());
        self.listeners.piece_advanced(&current, &following);
        self.emit_stats();
        self.listeners.game_loop_started(self.timer_delay_ms());
        true
    }

    /// Place the current piece with its pivot on (x, y).
    ///
    /// A refused placement changes nothing, including the turn timer.
    pub fn place_at(&mut self, x: i32, y: i32) -> Result<Placement, PlaceError> {
        if self.phase != GamePhase::Running {
            return Err(PlaceError::NotRunning);
        }

        let piece = *self.supply.current();
        if !self.grid.play_piece(&piece, x, y) {
            log::info!("Cannot place {} at ({}, {})", piece, x, y);
            return Err(PlaceError::Blocked);
        }
        log::info!("Placed {} at ({}, {})", piece, x, y);

        let score_before = self.score;
        let level_before = self.level;
        let cleared = self.after_piece();

        self.advance_piece();
        self.emit_stats();
        self.listeners.game_loop_started(self.timer_delay_ms());

        Ok(Placement {
            x,
            y,
            lines_cleared: cleared.lines,
            blocks_cleared: cleared.block_count(),
            score_delta: self.score - score_before,
            level_up: self.level > level_before,
        })
    }

    /// Place the current piece at the aim cursor
    pub fn drop_piece_at_aim(&mut self) -> Result<Placement, PlaceError> {
        let Coord { x, y } = self.aim;
        self.place_at(x, y)
    }

    /// Clear full rows and columns, then score them.
    ///
    /// Runs once per placement. A turn that clears anything raises the
    /// multiplier by one (after scoring); a turn that clears nothing resets it.
    pub fn after_piece(&mut self) -> ClearedBlocks {
        let cleared = self.grid.clear_full_lines();

        if cleared.is_empty() {
            self.multiplier = 1;
            log::debug!("No lines cleared. Multiplier reset.");
            return cleared;
        }

        self.update_score(cleared.lines, cleared.block_count());
        log::info!(
            "Lines cleared: {}, Blocks cleared: {}, Score: {}",
            cleared.lines,
            cleared.block_count(),
            self.score
        );
        self.listeners.lines_cleared(&cleared);
        self.multiplier += 1;
        log::info!("Multiplier increased to {}", self.multiplier);

        cleared
    }

    /// Add the points for a clear and recompute the level.
    /// Returns the points added.
    pub fn update_score(&mut self, lines: u32, blocks: u32) -> u32 {
        let points = calculate_clear_score(lines, blocks, self.multiplier);
        if points == 0 {
            return 0;
        }

        self.score = self.score.saturating_add(points);
        let level = calculate_level(self.score);
        if level > self.level {
            self.level = level;
            log::info!("Level up! New level: {}", level);
            self.listeners.level_up(level);
        }
        points
    }

    /// Rotate the current piece clockwise.
    /// Returns the (current, following) pair afterwards.
    pub fn rotate_current_piece(&mut self) -> Result<(GamePiece, GamePiece), IntentError> {
        if self.phase == GamePhase::GameOver {
            log::warn!("No current piece to rotate: game is over");
            return Err(IntentError::GameOver);
        }
        self.supply.rotate();
        log::info!("Current piece rotated: {}", self.supply.current());
        Ok((*self.supply.current(), *self.supply.following()))
    }

    /// Exchange the current and following piece.
    /// Returns the (current, following) pair afterwards.
    pub fn swap_current_piece(&mut self) -> Result<(GamePiece, GamePiece), IntentError> {
        if self.phase == GamePhase::GameOver {
            log::warn!("Attempted to swap pieces after the game ended");
            return Err(IntentError::GameOver);
        }
        self.supply.swap();
        log::info!(
            "Swapped pieces. Current: {}, Following: {}",
            self.supply.current(),
            self.supply.following()
        );
        Ok((*self.supply.current(), *self.supply.following()))
    }

    /// Move the aim cursor, clamped to the grid. Returns the new position.
    pub fn move_aim(&mut self, dx: i32, dy: i32) -> Coord {
        let max_x = self.grid.cols() as i32 - 1;
        let max_y = self.grid.rows() as i32 - 1;
        self.aim = Coord::new(
            self.aim.x.saturating_add(dx).clamp(0, max_x),
            self.aim.y.saturating_add(dy).clamp(0, max_y),
        );
        self.aim
    }

    /// The turn timer ran out: lose a life, reset the multiplier and
    /// discard the current piece. Returns None unless the game is running.
    pub fn expire_turn(&mut self) -> Option<TurnExpiry> {
        if self.phase != GamePhase::Running {
            return None;
        }

        self.listeners.game_loop_ended();
        self.lives = self.lives.saturating_sub(1);
        self.multiplier = 1;
        log::info!("Turn timer expired. Lives left: {}", self.lives);

        self.advance_piece();
        self.emit_stats();

        if self.lives == 0 {
            self.end_game();
        } else {
            self.listeners.game_loop_started(self.timer_delay_ms());
        }

        Some(TurnExpiry {
            lives: self.lives,
            game_over: self.phase == GamePhase::GameOver,
        })
    }

    /// Abandon the game. No game-over notification is sent.
    /// Returns false if the game was already over.
    pub fn stop(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game stopped");
        true
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        log::info!("Game Over. Final score: {}", self.score);
        self.listeners.game_over(self.score);
    }

    fn advance_piece(&mut self) {
        let (current, following) = self.supply.advance();
        self.listeners.piece_advanced(&current, &following);
    }

    fn emit_stats(&mut self) {
        let stats = self.stats();
        self.listeners.stats_changed(&stats);
    }

    /// Delay of the current turn (ms), from the current level
    pub fn timer_delay_ms(&self) -> u32 {
        get_timer_delay_ms(self.level)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn multiplier(&self) -> f64 {
        f64::from(self.multiplier)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            score: self.score,
            level: self.level,
            lives: self.lives,
            multiplier: self.multiplier,
        }
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Cell value at (x, y); None when out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.get(x, y)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> &GamePiece {
        self.supply.current()
    }

    pub fn following_piece(&self) -> &GamePiece {
        self.supply.following()
    }

    pub fn aim(&self) -> Coord {
        self.aim
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            cells: self.grid.cells().to_vec(),
            current: PieceSnapshot::from(*self.supply.current()),
            following: PieceSnapshot::from(*self.supply.following()),
            aim: self.aim,
            phase: self.phase,
            score: self.score,
            level: self.level,
            lives: self.lives,
            multiplier: self.multiplier(),
            timer_delay_ms: self.timer_delay_ms(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GameEvent;
    use crate::types::{PieceKind, EMPTY};
    use std::sync::{Arc, Mutex};

    fn running_game(cols: usize, rows: usize) -> Game {
        let mut game = Game::new(GameConfig::default().with_size(cols, rows).with_seed(1));
        game.start();
        game
    }

    fn place_dot(game: &mut Game, x: i32, y: i32) -> Result<Placement, PlaceError> {
        game.supply.set_current(GamePiece::new(PieceKind::Dot));
        game.place_at(x, y)
    }

    fn record(game: &mut Game) -> Arc<Mutex<Vec<GameEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let e = Arc::clone(&events);
        game.listeners_mut()
            .forward_to(move |event| e.lock().unwrap().push(event));
        events
    }

    #[test]
    fn test_single_blocks_clear_a_row() {
        let mut game = running_game(5, 5);
        let events = record(&mut game);

        for x in 0..4 {
            let placed = place_dot(&mut game, x, 2).unwrap();
            assert_eq!(placed.lines_cleared, 0);
        }
        let placed = place_dot(&mut game, 4, 2).unwrap();

        assert_eq!(placed.lines_cleared, 1);
        assert_eq!(placed.blocks_cleared, 5);
        assert_eq!(placed.score_delta, 50);
        assert!(game.grid.is_empty());

        let cleared: Vec<_> = events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                GameEvent::LinesCleared { blocks, .. } => Some(blocks.clone()),
                _ => None,
            })
            .collect();
        let expected: Vec<Coord> = (0..5).map(|x| Coord::new(x, 2)).collect();
        assert_eq!(cleared, vec![expected]);
    }

    #[test]
    fn test_multiplier_grows_then_resets() {
        let mut game = running_game(3, 3);

        // Row 0, then row 1, each completed by a dot
        game.grid.set(0, 0, 1);
        game.grid.set(1, 0, 1);
        let first = place_dot(&mut game, 2, 0).unwrap();
        assert_eq!(first.score_delta, 30);
        assert_eq!(game.multiplier(), 2.0);

        game.grid.set(0, 1, 1);
        game.grid.set(1, 1, 1);
        let second = place_dot(&mut game, 2, 1).unwrap();
        assert_eq!(second.score_delta, 60);
        assert_eq!(game.multiplier(), 3.0);

        let third = place_dot(&mut game, 0, 0).unwrap();
        assert_eq!(third.score_delta, 0);
        assert_eq!(game.multiplier(), 1.0);
        assert_eq!(game.score(), 90);
    }

    #[test]
    fn test_row_and_column_in_one_turn() {
        let mut game = running_game(3, 3);
        // Cross with the centre missing
        for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            game.grid.set(x, y, 2);
        }

        let placed = place_dot(&mut game, 1, 1).unwrap();
        assert_eq!(placed.lines_cleared, 2);
        assert_eq!(placed.blocks_cleared, 5);
        assert_eq!(placed.score_delta, 2 * 5 * 10);
        assert!(game.grid.is_empty());
    }

    #[test]
    fn test_level_up_is_reported() {
        let mut game = running_game(3, 3);
        let events = record(&mut game);
        game.score = 990;

        game.grid.set(0, 0, 1);
        game.grid.set(1, 0, 1);
        let placed = place_dot(&mut game, 2, 0).unwrap();

        assert!(placed.level_up);
        assert_eq!(game.level(), 1);
        assert_eq!(game.timer_delay_ms(), 11_500);
        assert!(events
            .lock()
            .unwrap()
            .contains(&GameEvent::LevelUp { level: 1 }));
        assert!(events
            .lock()
            .unwrap()
            .contains(&GameEvent::GameLoopStarted { delay_ms: 11_500 }));
    }

    #[test]
    fn test_blocked_placement_changes_nothing() {
        let mut game = running_game(5, 5);
        game.grid.set(2, 2, 3);
        let before = game.snapshot();

        assert_eq!(place_dot(&mut game, 2, 2), Err(PlaceError::Blocked));
        assert_eq!(place_dot(&mut game, -1, 0), Err(PlaceError::Blocked));

        let after = game.snapshot();
        assert_eq!(after.cells, before.cells);
        assert_eq!(after.following, before.following);
        assert_eq!(after.score, before.score);
    }

    #[test]
    fn test_place_requires_running() {
        let mut game = Game::new(GameConfig::default().with_seed(5));
        assert_eq!(game.place_at(2, 2), Err(PlaceError::NotRunning));

        game.start();
        game.stop();
        assert_eq!(game.place_at(2, 2), Err(PlaceError::NotRunning));
        assert_eq!(game.cell(2, 2), Some(EMPTY));
    }

    #[test]
    fn test_expiry_costs_a_life_and_one_piece() {
        let mut game = running_game(5, 5);
        game.multiplier = 4;
        let following = *game.following_piece();

        let expiry = game.expire_turn().unwrap();
        assert_eq!(expiry, TurnExpiry { lives: 2, game_over: false });
        assert_eq!(game.multiplier(), 1.0);
        assert_eq!(*game.current_piece(), following);
    }

    #[test]
    fn test_expiries_end_the_game() {
        let mut game = running_game(5, 5);
        let events = record(&mut game);

        game.expire_turn();
        game.expire_turn();
        let last = game.expire_turn().unwrap();

        assert!(last.game_over);
        assert_eq!(game.lives(), 0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.expire_turn(), None);

        let events = events.lock().unwrap();
        let ended = events.iter().filter(|e| **e == GameEvent::GameLoopEnded).count();
        assert_eq!(ended, 3);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 0 }));
    }

    #[test]
    fn test_swap_twice_is_identity() {
        let mut game = running_game(5, 5);
        let current = *game.current_piece();
        let following = *game.following_piece();

        let (c, f) = game.swap_current_piece().unwrap();
        assert_eq!((c, f), (following, current));
        game.swap_current_piece().unwrap();
        assert_eq!(*game.current_piece(), current);
        assert_eq!(*game.following_piece(), following);
    }

    #[test]
    fn test_rotate_and_swap_after_game_over() {
        let mut game = running_game(5, 5);
        game.stop();
        let current = *game.current_piece();

        assert_eq!(game.rotate_current_piece(), Err(IntentError::GameOver));
        assert_eq!(game.swap_current_piece(), Err(IntentError::GameOver));
        assert_eq!(*game.current_piece(), current);
    }

    #[test]
    fn test_aim_clamps_to_grid() {
        let mut game = running_game(5, 4);
        assert_eq!(game.aim(), Coord::new(2, 2));

        assert_eq!(game.move_aim(-10, 0), Coord::new(0, 2));
        assert_eq!(game.move_aim(0, 1), Coord::new(0, 3));
        assert_eq!(game.move_aim(0, 1), Coord::new(0, 3));
        assert_eq!(game.move_aim(i32::MAX, i32::MIN), Coord::new(4, 0));
    }

    #[test]
    fn test_drop_at_aim_uses_cursor() {
        let mut game = running_game(5, 5);
        game.move_aim(1, -1);
        let placed = {
            game.supply.set_current(GamePiece::new(PieceKind::Dot));
            game.drop_piece_at_aim().unwrap()
        };
        assert_eq!((placed.x, placed.y), (3, 1));
        assert_eq!(game.cell(3, 1), Some(PieceKind::Dot.value()));
    }

    #[test]
    fn test_start_only_once() {
        let mut game = Game::new(GameConfig::default().with_seed(2));
        assert!(game.start());
        assert!(!game.start());
        assert!(game.is_running());
    }
}
