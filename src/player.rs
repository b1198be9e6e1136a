use std::time::Instant;

use crate::board::{Letter, LetterBoard, LetterState};
use crate::timer::{TimerState, DEFAULT_MINUTES, MAX_MINUTES, MIN_MINUTES};

/// Everything one player owns: a display name, an unclamped score, a
/// countdown, a letter board, and a cursor on that board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub name: String,
    pub score: i64,
    pub timer: TimerState,
    pub board: LetterBoard,
    timer_minutes: u8,
    selected: Letter,
}

impl PlayerState {
    /// Fresh state for the player occupying `slot` (1-based), named
    /// "لاعب N" until renamed.
    pub fn new(slot: usize) -> Self {
        Self {
            name: format!("لاعب {slot}"),
            score: 0,
            timer: TimerState::Idle,
            board: LetterBoard::new(),
            timer_minutes: DEFAULT_MINUTES,
            selected: Letter::FIRST,
        }
    }

    pub fn selected_letter(&self) -> Letter {
        self.selected
    }

    pub fn selected_state(&self) -> LetterState {
        self.board.state_of(self.selected)
    }

    pub fn select_next(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.previous();
    }

    /// Cycles the letter under the cursor and returns its new state.
    pub fn cycle_selected(&mut self) -> LetterState {
        self.board.cycle(self.selected)
    }

    /// Scores are unbounded in both directions.
    pub fn adjust_score(&mut self, delta: i64) {
        self.score += delta;
    }

    pub fn timer_minutes(&self) -> u8 {
        self.timer_minutes
    }

    /// Clamps into the 1..=5 minute range. Only affects countdowns started
    /// afterwards; a running or paused timer keeps its remainder.
    pub fn set_timer_minutes(&mut self, minutes: u8) {
        self.timer_minutes = minutes.clamp(MIN_MINUTES, MAX_MINUTES);
    }

    pub fn start_timer(&mut self, now: Instant) {
        self.timer.start(now, self.timer_minutes);
    }

    pub fn stop_timer(&mut self, now: Instant) {
        self.timer.stop(now);
    }

    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        self.timer.remaining_secs(now)
    }

    /// Lazy expiry check, see [`TimerState::expire_if_due`].
    pub fn refresh_timer(&mut self, now: Instant) -> bool {
        self.timer.expire_if_due(now)
    }
}
