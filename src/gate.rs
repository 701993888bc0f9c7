//! Commit gating: turns per-frame classifications into committed symbols.
//!
//! A held pose produces the same confident classification for many frames in
//! a row; the gate suppresses the repeats and enforces a minimum time gap
//! between any two commits.

use crate::classify::ClassificationResult;
use crate::defaults;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Trait for time operations, allowing mock time in tests.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Real system clock using `std::time::Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Configuration for the debounce gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateConfig {
    /// Minimum confidence (percent) required to commit.
    pub min_confidence: f32,
    /// Minimum gap between any two commits, regardless of label.
    pub cooldown: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_confidence: defaults::MIN_CONFIDENCE,
            cooldown: Duration::from_millis(defaults::COOLDOWN_MS),
        }
    }
}

/// A symbol the gate has decided to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEvent {
    pub label: String,
}

/// Stateful filter deciding which classifications become committed symbols.
///
/// A commit is emitted only when a classification is present, meets the
/// confidence threshold, differs from the previously committed label, and the
/// cooldown since the last commit has elapsed.
///
/// An absent classification (no hand this frame) clears the remembered label
/// immediately, so the same sign reappearing after a gap may commit again.
/// It does not touch the cooldown timer. A low-confidence but present
/// classification clears nothing: the hand is still in view, just not
/// confidently classified yet.
pub struct DebounceGate<C: Clock = SystemClock> {
    config: GateConfig,
    last_committed: Option<String>,
    last_commit_at: Option<Instant>,
    clock: C,
}

impl<C: Clock> DebounceGate<C> {
    /// Creates a gate with the given configuration and clock.
    pub fn with_clock(config: GateConfig, clock: C) -> Self {
        Self {
            config,
            last_committed: None,
            last_commit_at: None,
            clock,
        }
    }

    /// Feeds one frame's classification (or its absence) through the gate.
    pub fn observe(&mut self, result: Option<&ClassificationResult>) -> Option<CommitEvent> {
        let Some(result) = result else {
            // Losing sight of the hand for even one frame ends the gesture;
            // the cooldown timer deliberately keeps running.
            self.last_committed = None;
            return None;
        };

        if result.confidence < self.config.min_confidence {
            return None;
        }
        if self.last_committed.as_deref() == Some(result.label.as_str()) {
            return None;
        }

        let now = self.clock.now();
        if let Some(at) = self.last_commit_at
            && now.duration_since(at) <= self.config.cooldown
        {
            return None;
        }

        self.last_committed = Some(result.label.clone());
        self.last_commit_at = Some(now);
        Some(CommitEvent {
            label: result.label.clone(),
        })
    }

    /// Clears both the remembered label and the cooldown timer.
    ///
    /// Called when the session's text buffer is cleared, so a fresh round of
    /// typing inherits no suppression state.
    pub fn reset(&mut self) {
        self.last_committed = None;
        self.last_commit_at = None;
    }

    /// The label of the most recent commit still being suppressed, if any.
    pub fn last_committed(&self) -> Option<&str> {
        self.last_committed.as_deref()
    }
}

impl DebounceGate<SystemClock> {
    /// Creates a gate using the system clock.
    pub fn new(config: GateConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

/// Mock clock for testing that allows manual time advancement.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<std::sync::Mutex<Instant>>,
}

#[cfg(test)]
impl MockClock {
    /// Creates a new mock clock starting at the current instant.
    pub fn new() -> Self {
        Self {
            current: Arc::new(std::sync::Mutex::new(Instant::now())),
        }
    }

    /// Advances the mock clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap();
        *current += duration;
    }
}

#[cfg(test)]
impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap()
    }
}
