use std::time::Instant;

use crate::player::PlayerState;

pub const MIN_PLAYERS: usize = 1;
pub const MAX_PLAYERS: usize = 4;
pub const DEFAULT_PLAYERS: usize = 2;

/// Owner of all game state for one sitting. Players occupy contiguous slots
/// 1..=n; shrinking drops the highest slots, growing appends fresh ones, and
/// the survivors keep their state either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    players: Vec<PlayerState>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYERS)
    }
}

impl GameSession {
    /// Session with `count` fresh players, clamped into 1..=4.
    pub fn new(count: usize) -> Self {
        let count = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        Self {
            players: (1..=count).map(PlayerState::new).collect(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Resizes to `count` players (clamped into 1..=4). Retained slots are
    /// untouched; new slots start fresh.
    pub fn set_player_count(&mut self, count: usize) {
        let count = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self.players.truncate(count);
        while self.players.len() < count {
            self.players.push(PlayerState::new(self.players.len() + 1));
        }
    }

    /// Replaces every player with fresh defaults, keeping the player count.
    pub fn reset_all(&mut self) {
        let count = self.players.len();
        self.players = (1..=count).map(PlayerState::new).collect();
    }

    pub fn player(&self, slot: usize) -> Option<&PlayerState> {
        slot.checked_sub(1).and_then(|i| self.players.get(i))
    }

    pub fn player_mut(&mut self, slot: usize) -> Option<&mut PlayerState> {
        slot.checked_sub(1).and_then(move |i| self.players.get_mut(i))
    }

    /// Occupied slots in order, 1-based.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &PlayerState)> {
        self.players.iter().enumerate().map(|(i, p)| (i + 1, p))
    }

    pub fn rename(&mut self, slot: usize, name: impl Into<String>) {
        if let Some(player) = self.player_mut(slot) {
            player.name = name.into();
        }
    }

    pub fn adjust_score(&mut self, slot: usize, delta: i64) {
        if let Some(player) = self.player_mut(slot) {
            player.adjust_score(delta);
        }
    }

    /// Runs the lazy expiry check on every player's timer. The returned flags
    /// line up with slots 1..=n and are true only for timers that expired on
    /// this observation.
    pub fn refresh_timers(&mut self, now: Instant) -> Vec<bool> {
        self.players
            .iter_mut()
            .map(|player| player.refresh_timer(now))
            .collect()
    }
}
