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

//! Render-mode arbitration.
//!
//! [`SceneDirector`] owns the session's [`RenderMode`] and decides when the
//! 3D path may be attempted at all:
//!
//! - `Idle → PendingLoad` on the high tier once the container has been
//!   continuously in view for the settle delay, or on the medium tier when
//!   the user interacts with the idle presentation.
//! - `PendingLoad → Loaded3D` when the module load resolves cleanly.
//! - `PendingLoad → Fallback2D` on load failure (locked) or when the tier
//!   drops to low while the load is in flight (unlocked).
//! - `Loaded3D → Fallback2D` after sustained throttled summaries below the
//!   FPS floor; this sets the permanent session lock.
//!
//! Once `fallback_locked` is set, no automatic or interactive path leads
//! back to 3D for the rest of the session.

use std::time::{Duration, Instant};

use axon_core::capability::PerformanceTier;
use axon_core::metrics::FrameSummary;
use axon_core::render::{RenderMode, SceneLoadError, SceneVariant};
use axon_core::telemetry::ConversionEvent;
use axon_core::visibility::VisibilityState;

/// Delay between entering view and starting the high-tier load, so the 3D
/// module never competes with critical content.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Consecutive qualifying summaries that count as sustained throttling.
pub const DEFAULT_SUSTAINED_SUMMARIES: u32 = 3;

/// Average FPS below which a throttled summary qualifies for fallback.
pub const DEFAULT_FALLBACK_FPS_FLOOR: f32 = 30.0;

/// Tunables for the [`SceneDirector`].
#[derive(Debug, Clone, Copy)]
pub struct DirectorConfig {
    /// Continuous in-view time required before the high-tier load starts.
    pub settle_delay: Duration,
    /// Qualifying summaries in a row before the fallback lock engages.
    pub sustained_poor_summaries: u32,
    /// Average FPS floor a throttled summary must undercut to qualify.
    pub fallback_fps_floor: f32,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            sustained_poor_summaries: DEFAULT_SUSTAINED_SUMMARIES,
            fallback_fps_floor: DEFAULT_FALLBACK_FPS_FLOOR,
        }
    }
}

/// Handle identifying one scene load attempt.
///
/// The director hands one out when a load starts and honors only the result
/// carrying the matching ticket; anything else is a stale completion from a
/// cancelled or superseded attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    variant: SceneVariant,
}

impl LoadTicket {
    /// Scene variant this load attempt is for.
    pub fn variant(&self) -> SceneVariant {
        self.variant
    }
}

/// The rendering selector state machine.
pub struct SceneDirector {
    config: DirectorConfig,
    tier: PerformanceTier,
    mode: RenderMode,
    fallback_locked: bool,
    in_view: bool,
    visible_since: Option<Instant>,
    generation: u64,
    pending: Option<LoadTicket>,
    poor_streak: u32,
    fallback_reported: bool,
    telemetry: Option<flume::Sender<ConversionEvent>>,
}

impl SceneDirector {
    /// Creates a director for the given initial tier.
    ///
    /// A low tier mounts the 2D fallback immediately; no load is ever
    /// attempted for it.
    pub fn new(tier: PerformanceTier, config: DirectorConfig) -> Self {
        let mode = if tier == PerformanceTier::Low {
            log::info!("low tier, mounting the 2D fallback directly");
            RenderMode::Fallback2D
        } else {
            RenderMode::Idle
        };
        Self {
            config,
            tier,
            mode,
            fallback_locked: false,
            in_view: false,
            visible_since: None,
            generation: 0,
            pending: None,
            poor_streak: 0,
            fallback_reported: false,
            telemetry: None,
        }
    }

    /// Attaches a fire-and-forget telemetry sender.
    pub fn with_telemetry(mut self, sender: flume::Sender<ConversionEvent>) -> Self {
        self.telemetry = Some(sender);
        self
    }

    /// Current render mode.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Current performance tier.
    pub fn tier(&self) -> PerformanceTier {
        self.tier
    }

    /// Whether the permanent session fallback lock is set.
    pub fn is_fallback_locked(&self) -> bool {
        self.fallback_locked
    }

    /// The in-flight load attempt, if any.
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        self.pending
    }

    /// Applies a tier update, typically from the asynchronous battery check.
    ///
    /// A drop to low wins over everything in flight: a pending load is
    /// invalidated and a mounted scene is demoted, in both cases without
    /// engaging the session lock (this is a capability verdict, not a
    /// performance one).
    pub fn set_tier(&mut self, tier: PerformanceTier) {
        if tier == self.tier {
            return;
        }
        log::info!("performance tier {} -> {}", self.tier, tier);
        self.tier = tier;

        if tier == PerformanceTier::Low && self.mode != RenderMode::Fallback2D {
            if self.mode == RenderMode::PendingLoad {
                log::info!("invalidating in-flight load, low tier mounts the 2D fallback");
            } else if self.mode.is_3d() {
                log::warn!("demoting mounted 3D scene, tier dropped to low");
            }
            self.pending = None;
            self.mode = RenderMode::Fallback2D;
        }
    }

    /// Feeds a committed visibility state from the gate.
    pub fn on_visibility(&mut self, visibility: VisibilityState, now: Instant) {
        if visibility.is_intersecting {
            if self.visible_since.is_none() {
                self.visible_since = Some(now);
            }
        } else {
            self.visible_since = None;
        }
        self.in_view = visibility.is_intersecting;
    }

    /// Feeds a qualifying user interaction (hover or click on the idle
    /// presentation).
    ///
    /// Promotes medium-tier sessions to the instanced load; the high-tier
    /// path is owned by the settle timer and the low tier never loads.
    pub fn on_interaction(&mut self) -> Option<LoadTicket> {
        if self.fallback_locked
            || self.tier != PerformanceTier::Medium
            || self.mode != RenderMode::Idle
        {
            return None;
        }
        Some(self.start_load(SceneVariant::Instanced))
    }

    /// Advances time-driven transitions.
    ///
    /// Returns a [`LoadTicket`] when the settle delay has matured on the
    /// high tier and the full-scene load should start.
    pub fn tick(&mut self, now: Instant) -> Option<LoadTicket> {
        if self.fallback_locked || self.mode != RenderMode::Idle {
            return None;
        }
        if self.tier != PerformanceTier::High || !self.in_view {
            return None;
        }
        let since = self.visible_since?;
        if now.duration_since(since) >= self.config.settle_delay {
            return Some(self.start_load(SceneVariant::Full));
        }
        None
    }

    /// Commits the outcome of a load attempt.
    ///
    /// Results carrying a stale ticket are discarded. The tier is re-checked
    /// at commit time: a load that resolved after a drop to low mounts the
    /// 2D fallback instead, regardless of the result.
    pub fn resolve_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<(), SceneLoadError>,
    ) -> RenderMode {
        if self.pending != Some(ticket) {
            log::debug!("discarding stale {} load result", ticket.variant.as_str());
            return self.mode;
        }
        self.pending = None;

        if self.tier == PerformanceTier::Low {
            log::info!("tier dropped to low during load, mounting the 2D fallback");
            self.mode = RenderMode::Fallback2D;
            return self.mode;
        }

        match result {
            Ok(()) => {
                self.mode = RenderMode::Loaded3D(ticket.variant);
                self.poor_streak = 0;
                log::info!("3D scene mounted ({})", ticket.variant.as_str());
            }
            Err(err) => {
                log::warn!("3D scene load failed, locking the 2D fallback: {err}");
                self.lock_fallback(ConversionEvent::render_exception());
            }
        }
        self.mode
    }

    /// Abandons an in-flight load, returning to idle.
    ///
    /// The outstanding ticket becomes stale; a completion that still arrives
    /// for it is discarded.
    pub fn cancel_load(&mut self) {
        if self.mode == RenderMode::PendingLoad {
            log::debug!("cancelling in-flight scene load");
            self.pending = None;
            self.mode = RenderMode::Idle;
        }
    }

    /// Feeds a frame summary from the monitor.
    ///
    /// Only mounted 3D scenes are graded. A throttled summary under the FPS
    /// floor extends the poor streak; anything else resets it. Reaching the
    /// configured streak locks the 2D fallback for the session and emits the
    /// one-time telemetry event.
    pub fn on_summary(&mut self, summary: &FrameSummary) -> RenderMode {
        if !self.mode.is_3d() {
            return self.mode;
        }

        if summary.is_throttled && summary.average_fps < self.config.fallback_fps_floor {
            self.poor_streak += 1;
            log::debug!(
                "throttled summary {}/{} ({:.1} avg fps)",
                self.poor_streak,
                self.config.sustained_poor_summaries,
                summary.average_fps
            );
            if self.poor_streak >= self.config.sustained_poor_summaries {
                log::warn!(
                    "sustained {:.1} avg fps under throttle, locking the 2D fallback",
                    summary.average_fps
                );
                self.lock_fallback(ConversionEvent::performance_fallback(summary.average_fps));
            }
        } else if self.poor_streak != 0 {
            log::trace!("throttle streak reset");
            self.poor_streak = 0;
        }
        self.mode
    }

    /// One-call arbitration combining every input.
    ///
    /// Applies tier, visibility, interaction, timer, and metrics in that
    /// order and returns the resulting mode. A load started by this call is
    /// observable through [`SceneDirector::pending_ticket`].
    pub fn select_mode(
        &mut self,
        tier: PerformanceTier,
        visibility: VisibilityState,
        metrics: Option<&FrameSummary>,
        user_interacted: bool,
        now: Instant,
    ) -> RenderMode {
        self.set_tier(tier);
        self.on_visibility(visibility, now);
        if user_interacted {
            let _ = self.on_interaction();
        }
        let _ = self.tick(now);
        if let Some(summary) = metrics {
            let _ = self.on_summary(summary);
        }
        self.mode
    }

    fn start_load(&mut self, variant: SceneVariant) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
            variant,
        };
        self.pending = Some(ticket);
        self.mode = RenderMode::PendingLoad;
        log::info!("starting {} scene load", variant.as_str());
        ticket
    }

    fn lock_fallback(&mut self, event: ConversionEvent) {
        self.mode = RenderMode::Fallback2D;
        self.fallback_locked = true;
        self.pending = None;
        self.poor_streak = 0;
        if !self.fallback_reported {
            self.fallback_reported = true;
            self.emit(event);
        }
    }

    fn emit(&self, event: ConversionEvent) {
        let Some(sender) = &self.telemetry else {
            return;
        };
        if sender.send(event).is_err() {
            log::debug!("telemetry receiver dropped, event discarded");
        }
    }
}
