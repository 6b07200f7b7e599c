//! Game events and listener slots
//!
//! Each event type has exactly one listener slot; registering a listener
//! replaces the previous one. [`GameEvent`] is the serializable form used
//! when listener calls are forwarded over a channel.

use std::fmt;

use serde::Serialize;

use crate::grid::ClearedBlocks;
use crate::pieces::GamePiece;
use crate::snapshot::PieceSnapshot;
use crate::types::Coord;

/// Score, level, lives and multiplier at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Stats {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub multiplier: u32,
}

/// Everything a game reports to its presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    PieceAdvanced {
        current: PieceSnapshot,
        following: PieceSnapshot,
    },
    LinesCleared {
        lines: u32,
        blocks: Vec<Coord>,
    },
    GameLoopStarted {
        delay_ms: u32,
    },
    GameLoopEnded,
    StatsChanged {
        stats: Stats,
    },
    LevelUp {
        level: u32,
    },
    GameOver {
        final_score: u32,
    },
}

type PieceAdvancedFn = Box<dyn FnMut(&GamePiece, &GamePiece) + Send>;
type LinesClearedFn = Box<dyn FnMut(&ClearedBlocks) + Send>;
type DelayFn = Box<dyn FnMut(u32) + Send>;
type UnitFn = Box<dyn FnMut() + Send>;
type StatsFn = Box<dyn FnMut(&Stats) + Send>;

/// One optional listener per event type
#[derive(Default)]
pub struct Listeners {
    piece_advanced: Option<PieceAdvancedFn>,
    lines_cleared: Option<LinesClearedFn>,
    game_loop_started: Option<DelayFn>,
    game_loop_ended: Option<UnitFn>,
    stats_changed: Option<StatsFn>,
    level_up: Option<DelayFn>,
    game_over: Option<DelayFn>,
}

impl Listeners {
    pub fn set_piece_advanced(&mut self, f: impl FnMut(&GamePiece, &GamePiece) + Send + 'static) {
        self.piece_advanced = Some(Box::new(f));
    }

    pub fn set_lines_cleared(&mut self, f: impl FnMut(&ClearedBlocks) + Send + 'static) {
        self.lines_cleared = Some(Box::new(f));
    }

    /// Called with the turn delay (ms) whenever a new turn countdown begins
    pub fn set_game_loop_started(&mut self, f: impl FnMut(u32) + Send + 'static) {
        self.game_loop_started = Some(Box::new(f));
    }

    /// Called when a turn countdown runs out
    pub fn set_game_loop_ended(&mut self, f: impl FnMut() + Send + 'static) {
        self.game_loop_ended = Some(Box::new(f));
    }

    pub fn set_stats_changed(&mut self, f: impl FnMut(&Stats) + Send + 'static) {
        self.stats_changed = Some(Box::new(f));
    }

    pub fn set_level_up(&mut self, f: impl FnMut(u32) + Send + 'static) {
        self.level_up = Some(Box::new(f));
    }

    /// Called with the final score
    pub fn set_game_over(&mut self, f: impl FnMut(u32) + Send + 'static) {
        self.game_over = Some(Box::new(f));
    }

    /// Point every slot at `sink`, converting each call into a [`GameEvent`]
    pub fn forward_to<F>(&mut self, sink: F)
    where
        F: Fn(GameEvent) + Clone + Send + 'static,
    {
        let s = sink.clone();
        self.set_piece_advanced(move |current, following| {
            s(GameEvent::PieceAdvanced {
                current: PieceSnapshot::from(*current),
                following: PieceSnapshot::from(*following),
            })
        });
        let s = sink.clone();
        self.set_lines_cleared(move |cleared| {
            s(GameEvent::LinesCleared {
                lines: cleared.lines,
                blocks: cleared.blocks.iter().copied().collect(),
            })
        });
        let s = sink.clone();
        self.set_game_loop_started(move |delay_ms| s(GameEvent::GameLoopStarted { delay_ms }));
        let s = sink.clone();
        self.set_game_loop_ended(move || s(GameEvent::GameLoopEnded));
        let s = sink.clone();
        self.set_stats_changed(move |stats| s(GameEvent::StatsChanged { stats: *stats }));
        let s = sink.clone();
        self.set_level_up(move |level| s(GameEvent::LevelUp { level }));
        self.set_game_over(move |final_score| sink(GameEvent::GameOver { final_score }));
    }

    pub(crate) fn piece_advanced(&mut self, current: &GamePiece, following: &GamePiece) {
        if let Some(f) = self.piece_advanced.as_mut() {
            f(current, following);
        }
    }

    pub(crate) fn lines_cleared(&mut self, cleared: &ClearedBlocks) {
        if let Some(f) = self.lines_cleared.as_mut() {
            f(cleared);
        }
    }

    pub(crate) fn game_loop_started(&mut self, delay_ms: u32) {
        if let Some(f) = self.game_loop_started.as_mut() {
            f(delay_ms);
        }
    }

    pub(crate) fn game_loop_ended(&mut self) {
        if let Some(f) = self.game_loop_ended.as_mut() {
            f();
        }
    }

    pub(crate) fn stats_changed(&mut self, stats: &Stats) {
        if let Some(f) = self.stats_changed.as_mut() {
            f(stats);
        }
    }

    pub(crate) fn level_up(&mut self, level: u32) {
        if let Some(f) = self.level_up.as_mut() {
            f(level);
        }
    }

    pub(crate) fn game_over(&mut self, final_score: u32) {
        if let Some(f) = self.game_over.as_mut() {
            f(final_score);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("piece_advanced", &self.piece_advanced.is_some())
            .field("lines_cleared", &self.lines_cleared.is_some())
            .field("game_loop_started", &self.game_loop_started.is_some())
            .field("game_loop_ended", &self.game_loop_ended.is_some())
            .field("stats_changed", &self.stats_changed.is_some())
            .field("level_up", &self.level_up.is_some())
            .field("game_over", &self.game_over.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_last_registration_wins() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::default();

        let h = Arc::clone(&hits);
        listeners.set_level_up(move |level| h.lock().unwrap().push(("first", level)));
        let h = Arc::clone(&hits);
        listeners.set_level_up(move |level| h.lock().unwrap().push(("second", level)));

        listeners.level_up(4);
        assert_eq!(*hits.lock().unwrap(), vec![("second", 4)]);
    }

    #[test]
    fn test_unset_slots_are_silent() {
        let mut listeners = Listeners::default();
        listeners.game_loop_ended();
        listeners.game_over(10);
        assert!(format!("{:?}", listeners).contains("game_over: false"));
    }

    #[test]
    fn test_forward_to_converts_calls() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::default();
        let e = Arc::clone(&events);
        listeners.forward_to(move |event| e.lock().unwrap().push(event));

        listeners.game_loop_started(12_000);
        listeners.game_over(350);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                GameEvent::GameLoopStarted { delay_ms: 12_000 },
                GameEvent::GameOver { final_score: 350 },
            ]
        );
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GameEvent::GameOver { final_score: 70 }).unwrap();
        assert_eq!(json, r#"{"type":"gameOver","final_score":70}"#);
    }
}
