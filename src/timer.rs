use std::time::{Duration, Instant};

pub const MIN_MINUTES: u8 = 1;
pub const MAX_MINUTES: u8 = 5;
pub const DEFAULT_MINUTES: u8 = 1;

/// Per-player countdown. The timer never ticks on its own; callers pass the
/// current instant to every observation and expiry is detected lazily on the
/// next look.
///
/// `Paused` banks whole seconds, so restarting resumes exactly the banked
/// remainder. `Running` stores only the deadline and derives the remainder
/// from `now` on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Paused {
        remaining: u64,
    },
    Running {
        ends_at: Instant,
    },
}

impl TimerState {
    /// Starts a fresh countdown of `minutes`, or resumes a paused one from
    /// its banked remainder. Starting an already running timer does nothing.
    pub fn start(&mut self, now: Instant, minutes: u8) {
        *self = match *self {
            TimerState::Idle => TimerState::Running {
                ends_at: now + Duration::from_secs(u64::from(minutes) * 60),
            },
            TimerState::Paused { remaining } => TimerState::Running {
                ends_at: now + Duration::from_secs(remaining),
            },
            TimerState::Running { ends_at } => TimerState::Running { ends_at },
        };
    }

    /// Pauses a running countdown, banking the seconds left at `now`.
    /// Idle and already paused timers are left as they are.
    pub fn stop(&mut self, now: Instant) {
        if let TimerState::Running { ends_at } = *self {
            *self = TimerState::Paused {
                remaining: ends_at.saturating_duration_since(now).as_secs(),
            };
        }
    }

    /// Returns the timer to `Idle` when its deadline has passed. The `true`
    /// return fires on exactly one observation per expiry, which lets the
    /// caller flash a one-shot notification.
    pub fn expire_if_due(&mut self, now: Instant) -> bool {
        if let TimerState::Running { ends_at } = *self {
            if now >= ends_at {
                *self = TimerState::Idle;
                return true;
            }
        }
        false
    }

    /// Whole seconds left at `now`, clamped at zero. `None` when idle.
    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        match *self {
            TimerState::Idle => None,
            TimerState::Paused { remaining } => Some(remaining),
            TimerState::Running { ends_at } => {
                Some(ends_at.saturating_duration_since(now).as_secs())
            }
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }
}

/// Formats a second count as zero-padded `MM:SS`.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
