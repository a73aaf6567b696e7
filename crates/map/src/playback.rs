//! # Timeline Playback
//!
//! The year window shown by the timeline scrubber and the tick-driven
//! playback that advances the active year once per tick until it reaches the
//! window end. The host UI owns the clock; this module only decides what each
//! tick does, so playback is cancellable at any tick and has no effect on the
//! derivation pipeline beyond driving the active-year input.
//!
//! ## Table of Contents
//! 1. YearWindow — Visible year range with clamped shifting
//! 2. Playback — Tick-driven year advancement

use crate::config::PlaybackConfig;

// ============================================================================
// 1. YearWindow — Visible year range with clamped shifting
// ============================================================================

/// The visible span of the timeline: `span` years starting at `start`,
/// constrained to the dataset bounds `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    /// First year of the visible window
    pub start: i32,
    /// Window length in years
    pub span: i32,
    /// Lower bound for the window start
    pub min: i32,
    /// Upper bound for the window end
    pub max: i32,
}

impl YearWindow {
    /// Window starting at the lower bound.
    pub fn new(min: i32, max: i32, span: i32) -> Self {
        Self {
            start: min,
            span,
            min,
            max,
        }
    }

    /// Window from the playback section of `map.toml`.
    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new(config.min_year, config.max_year, config.window_span)
    }

    /// Last visible year, clamped to the upper bound.
    pub fn end(&self) -> i32 {
        (self.start + self.span).min(self.max)
    }

    /// Whether a year falls inside the window.
    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end()
    }

    /// Shift the window earlier by `step` years, clamped to `min`.
    pub fn shift_left(&mut self, step: i32) {
        self.start = (self.start - step).max(self.min);
    }

    /// Shift the window later by `step` years; the window end never passes `max`.
    pub fn shift_right(&mut self, step: i32) {
        self.start = (self.start + step).min(self.max - self.span).max(self.min);
    }

    /// Move the window so `year` is visible (used when the active year is set
    /// outside the current window).
    pub fn center_on(&mut self, year: i32) {
        self.start = year.clamp(self.min, (self.max - self.span).max(self.min));
    }
}

// ============================================================================
// 2. Playback — Tick-driven year advancement
// ============================================================================

/// Playback state for the timeline. Each tick advances the active year by one
/// until the window end; reaching the end stops playback. The playback cursor
/// survives pause/resume but resets when the user enters a year manually.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Playback {
    playing: bool,
    cursor: Option<i32>,
}

impl Playback {
    /// Start advancing on ticks.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop advancing; the cursor keeps its position.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Toggle between playing and stopped.
    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Whether playback is currently running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Forget the playback cursor (the user set a year manually).
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Advance one tick. Returns the new active year, or `None` when stopped
    /// or when the next year would leave the window (which stops playback and
    /// keeps the current year in place).
    ///
    /// The advancement seeds from the playback cursor, falling back to the
    /// host's active year, falling back to the window start.
    pub fn tick(&mut self, active_year: Option<i32>, window: &YearWindow) -> Option<i32> {
        if !self.playing {
            return None;
        }
        let current = self.cursor.or(active_year).unwrap_or(window.start);
        let next = current + 1;
        if next > window.end() {
            self.playing = false;
            None
        } else {
            self.cursor = Some(next);
            Some(next)
        }
    }
}
