//! Tick-driven replay of a dataset.
//!
//! [`PlaybackController`] owns the cursor, the pacing, and the
//! [`DisplayState`] it feeds. It is a pure state machine: the host (a CLI
//! replay loop, a UI, a test) calls [`PlaybackController::tick`] and sleeps
//! for [`PlaybackController::tick_interval`] in between. Because the
//! cadence lives here and is re-read before every sleep, pausing or
//! changing speed can never leak a stale timer.

use std::time::Duration;

use log::warn;

use crate::dataset::Dataset;

pub use display::{CurrentReadings, DisplayState, HistoryRow, HISTORY_CAPACITY};

mod display;


/// The discrete speed multipliers the "next speed" control cycles through.
pub const SPEED_STEPS: [f64; 5] = [0.5, 1.0, 2.0, 5.0, 10.0];

/// Errors raised by playback controls.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// A playback action was attempted with no loaded data.
    #[error("no dataset loaded")]
    EmptyDataset,
}

/// Where the cursor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// At index 0, not ticking.
    Stopped,
    /// Advancing one point per tick.
    Playing,
    /// Holding position, not ticking.
    Paused,
    /// Ran off the end of the data; only `reset` or `load` leave this state.
    Finished,
}

/// Timer-paced cursor over a dataset's points.
pub struct PlaybackController {
    dataset: Dataset,
    cursor: usize,
    status: PlaybackStatus,
    speed: f64,
    display: DisplayState,
}

impl PlaybackController {
    /// Controller with nothing loaded.
    pub fn new() -> Self {
        Self {
            dataset: Dataset::empty(),
            cursor: 0,
            status: PlaybackStatus::Stopped,
            speed: 1.0,
            display: DisplayState::new(),
        }
    }

    /// Controller with a dataset already loaded (point 0 emitted).
    pub fn with_dataset(dataset: Dataset) -> Self {
        let mut controller = Self::new();
        controller.load(dataset);
        controller
    }

    /// Replace the loaded dataset.
    ///
    /// Works from any state: the cursor returns to 0, the history window is
    /// cleared, and point 0 is emitted immediately. The swap is a single
    /// `&mut self` call, so the consumer never observes a half-replaced
    /// dataset.
    pub fn load(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.cursor = 0;
        self.status = PlaybackStatus::Stopped;
        self.display.clear();
        self.emit_current();
    }

    /// Start or resume playback.
    ///
    /// No-op when already `Playing` or `Finished`; an error when nothing is
    /// loaded. State is unchanged on error.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        if self.dataset.is_empty() {
            return Err(PlaybackError::EmptyDataset);
        }
        if matches!(self.status, PlaybackStatus::Stopped | PlaybackStatus::Paused) {
            self.status = PlaybackStatus::Playing;
        }
        Ok(())
    }

    /// Hold the cursor at its current position.
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Return to index 0 with a cleared history window; re-emits point 0.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.status = PlaybackStatus::Stopped;
        self.display.clear();
        self.emit_current();
    }

    /// Advance the cursor by one point.
    ///
    /// Only meaningful while `Playing`. Reaching the end of the data flips
    /// the state to `Finished` (the cursor stays on the last point) and
    /// yields `None`; otherwise the newly current point is emitted into the
    /// display state and returned.
    pub fn tick(&mut self) -> Option<&crate::dataset::DataPoint> {
        if self.status != PlaybackStatus::Playing {
            return None;
        }
        if self.cursor + 1 >= self.dataset.len() {
            self.status = PlaybackStatus::Finished;
            return None;
        }
        self.cursor += 1;
        self.emit_current();
        self.dataset.data.get(self.cursor)
    }

    /// Set the speed multiplier for subsequent ticks.
    ///
    /// The cursor is untouched. Non-positive or non-finite multipliers are
    /// ignored.
    pub fn set_speed(&mut self, multiplier: f64) {
        if multiplier.is_finite() && multiplier > 0.0 {
            self.speed = multiplier;
        } else {
            warn!("ignoring invalid speed multiplier {multiplier}");
        }
    }

    /// Advance to the next discrete speed step, wrapping after the last.
    pub fn cycle_speed(&mut self) -> f64 {
        let position = SPEED_STEPS.iter().position(|step| *step == self.speed);
        self.speed = match position {
            Some(i) => SPEED_STEPS[(i + 1) % SPEED_STEPS.len()],
            // A custom multiplier snaps to the next larger step.
            None => SPEED_STEPS
                .iter()
                .copied()
                .find(|step| *step > self.speed)
                .unwrap_or(SPEED_STEPS[0]),
        };
        self.speed
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current lifecycle state.
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Current cursor index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Time until the next tick is due, while `Playing`.
    ///
    /// The cadence is the dataset's interval divided by the speed
    /// multiplier. Parsed files without a usable interval fall back to one
    /// second.
    pub fn tick_interval(&self) -> Option<Duration> {
        if self.status != PlaybackStatus::Playing {
            return None;
        }
        let interval = self.dataset.metadata.time_interval_seconds;
        let interval = if interval > 0.0 { interval } else { 1.0 };
        Some(Duration::from_secs_f64(interval / self.speed))
    }

    /// Read-only view of the latest readings and history window.
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The loaded dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn emit_current(&mut self) {
        if let Some(point) = self.dataset.data.get(self.cursor) {
            self.display.apply(self.cursor, point);
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}
