// Copyright 2025 wrightlabs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Visibility gating.
//!
//! [`VisibilityGate`] turns a stream of raw on-screen ratios from the host's
//! intersection primitive into committed [`VisibilityState`] transitions. It
//! emits only when a threshold is crossed, optionally debounced so that fast
//! scrolling does not flicker the 3D pipeline on and off.

use std::time::{Duration, Instant};

use axon_core::visibility::VisibilityState;

/// Default on-screen fraction that counts as in view.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Default on-screen fraction that counts as fully visible.
pub const DEFAULT_FULLY_VISIBLE_CUTOFF: f32 = 0.95;

/// Configuration for a [`VisibilityGate`].
#[derive(Debug, Clone, Copy)]
pub struct GateConfig {
    /// On-screen fraction at or above which the container is in view.
    pub threshold: f32,
    /// On-screen fraction at or above which the container is fully visible.
    pub fully_visible_cutoff: f32,
    /// Freeze the gate after the first committed entry.
    pub trigger_once: bool,
    /// Hold a state change this long before committing it.
    pub debounce: Option<Duration>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fully_visible_cutoff: DEFAULT_FULLY_VISIBLE_CUTOFF,
            trigger_once: false,
            debounce: None,
        }
    }
}

/// Threshold-crossing filter over raw visibility ratios.
#[derive(Debug)]
pub struct VisibilityGate {
    config: GateConfig,
    state: VisibilityState,
    has_triggered: bool,
    pending: Option<(VisibilityState, Instant)>,
}

impl VisibilityGate {
    /// Creates a gate with the given configuration. Starts out of view.
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            state: VisibilityState::default(),
            has_triggered: false,
            pending: None,
        }
    }

    /// Creates a gate with the default thresholds.
    pub fn with_defaults() -> Self {
        Self::new(GateConfig::default())
    }

    /// The last committed visibility state.
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Classifies a raw ratio against the configured thresholds.
    ///
    /// A ratio of zero is never in view regardless of threshold.
    fn classify(&self, ratio: f32) -> VisibilityState {
        let ratio = ratio.clamp(0.0, 1.0);
        VisibilityState {
            is_intersecting: ratio > 0.0 && ratio >= self.config.threshold,
            ratio,
            fully_visible: ratio >= self.config.fully_visible_cutoff,
        }
    }

    /// Feeds one raw ratio observation.
    ///
    /// Returns the newly committed state when this observation crosses a
    /// threshold (immediately, or once the debounce delay has matured),
    /// `None` otherwise. A reversal back to the committed state cancels any
    /// pending change.
    pub fn observe(&mut self, ratio: f32, now: Instant) -> Option<VisibilityState> {
        if self.config.trigger_once && self.has_triggered {
            return None;
        }

        let candidate = self.classify(ratio);
        let crossing = candidate.is_intersecting != self.state.is_intersecting
            || candidate.fully_visible != self.state.fully_visible;

        if !crossing {
            self.pending = None;
            self.state.ratio = candidate.ratio;
            return None;
        }

        let delay = match self.config.debounce {
            None => return Some(self.commit(candidate)),
            Some(delay) => delay,
        };

        match self.pending {
            Some((held, since)) if same_flags(held, candidate) => {
                if now.duration_since(since) >= delay {
                    self.pending = None;
                    Some(self.commit(candidate))
                } else {
                    None
                }
            }
            _ => {
                self.pending = Some((candidate, now));
                None
            }
        }
    }

    /// Commits a matured pending change without a fresh observation.
    ///
    /// Hosts with a timer can call this to flush a debounced change whose
    /// delay has elapsed since the last `observe`.
    pub fn poll(&mut self, now: Instant) -> Option<VisibilityState> {
        let delay = self.config.debounce?;
        let (held, since) = self.pending?;
        if now.duration_since(since) >= delay {
            self.pending = None;
            return Some(self.commit(held));
        }
        None
    }

    fn commit(&mut self, next: VisibilityState) -> VisibilityState {
        log::trace!(
            "visibility commit: intersecting={} ratio={:.2} fully_visible={}",
            next.is_intersecting,
            next.ratio,
            next.fully_visible
        );
        self.state = next;
        if next.is_intersecting {
            self.has_triggered = true;
        }
        self.state
    }
}

fn same_flags(a: VisibilityState, b: VisibilityState) -> bool {
    a.is_intersecting == b.is_intersecting && a.fully_visible == b.fully_visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_ratio_never_intersects() {
        let mut gate = VisibilityGate::new(GateConfig {
            threshold: 0.0,
            ..GateConfig::default()
        });
        assert!(gate.observe(0.0, Instant::now()).is_none());
        assert!(!gate.state().is_intersecting);
    }

    #[test]
    fn test_threshold_crossing_emits_once() {
        let mut gate = VisibilityGate::with_defaults();
        let now = Instant::now();

        let entered = gate.observe(0.35, now).expect("crossing emits");
        assert!(entered.is_intersecting);
        assert!(!entered.fully_visible);

        // Ratio drift within the same band is tracked silently.
        assert!(gate.observe(0.5, now).is_none());
        assert_eq!(gate.state().ratio, 0.5);

        let exited = gate.observe(0.1, now).expect("exit emits");
        assert!(!exited.is_intersecting);
    }

    #[test]
    fn test_fully_visible_cutoff() {
        let mut gate = VisibilityGate::with_defaults();
        let now = Instant::now();
        gate.observe(0.5, now);

        let full = gate.observe(0.95, now).expect("cutoff crossing emits");
        assert!(full.fully_visible);
        assert!(full.is_intersecting);

        let partial = gate.observe(0.9, now).expect("dropping below cutoff emits");
        assert!(!partial.fully_visible);
        assert!(partial.is_intersecting);
    }

    #[test]
    fn test_trigger_once_freezes_after_entry() {
        let mut gate = VisibilityGate::new(GateConfig {
            trigger_once: true,
            ..GateConfig::default()
        });
        let now = Instant::now();

        assert!(gate.observe(0.4, now).is_some());
        // The gate stays in its entered state no matter what follows.
        assert!(gate.observe(0.0, now).is_none());
        assert!(gate.state().is_intersecting);
    }

    #[test]
    fn test_debounce_commits_after_delay() {
        let mut gate = VisibilityGate::new(GateConfig {
            debounce: Some(Duration::from_millis(200)),
            ..GateConfig::default()
        });
        let t0 = Instant::now();

        assert!(gate.observe(0.4, t0).is_none());
        assert!(gate.observe(0.4, t0 + Duration::from_millis(100)).is_none());
        let committed = gate.observe(0.4, t0 + Duration::from_millis(200));
        assert!(committed.expect("matured change commits").is_intersecting);
    }

    #[test]
    fn test_debounce_reversal_cancels_pending() {
        let mut gate = VisibilityGate::new(GateConfig {
            debounce: Some(Duration::from_millis(200)),
            ..GateConfig::default()
        });
        let t0 = Instant::now();

        assert!(gate.observe(0.4, t0).is_none());
        // Scrolled back out before the delay matured.
        assert!(gate.observe(0.1, t0 + Duration::from_millis(50)).is_none());
        // Maturity passes with nothing pending.
        assert!(gate.poll(t0 + Duration::from_millis(300)).is_none());
        assert!(!gate.state().is_intersecting);
    }

    #[test]
    fn test_poll_flushes_matured_pending() {
        let mut gate = VisibilityGate::new(GateConfig {
            debounce: Some(Duration::from_millis(200)),
            ..GateConfig::default()
        });
        let t0 = Instant::now();

        assert!(gate.observe(0.4, t0).is_none());
        assert!(gate.poll(t0 + Duration::from_millis(100)).is_none());
        let committed = gate.poll(t0 + Duration::from_millis(250));
        assert!(committed.expect("poll commits matured change").is_intersecting);
    }
}
