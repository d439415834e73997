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

//! Frame-rate monitoring.
//!
//! [`FrameMonitor`] is driven by the host render loop: one [`FrameMonitor::on_frame`]
//! call per displayed frame. Every [`SAMPLE_INTERVAL_FRAMES`] frames it derives
//! an FPS sample from elapsed wall-clock time, folds it into a rolling window,
//! and publishes a fresh [`FrameSummary`]. Between samples it accumulates
//! GPU-cost hints reported by the renderer.
//!
//! The monitor is pure observation. If the host never drives it, the summary
//! stays at its optimistic default (60 FPS, excellent); that is an accepted
//! degraded-observability state, not an error.

use std::time::{Duration, Instant};

use axon_core::metrics::{FrameSample, FrameSummary, PerformanceGrade};

use crate::history::RingBuffer;

/// Number of render-loop callbacks between FPS samples.
pub const SAMPLE_INTERVAL_FRAMES: u32 = 30;

/// Capacity of the rolling FPS window; the oldest sample is evicted first.
pub const HISTORY_CAPACITY: usize = 20;

/// Average FPS below which the window counts as throttled.
pub const THROTTLE_FLOOR_FPS: f32 = 45.0;

/// The throttle flag stays `false` until the window holds this many samples.
pub const THROTTLE_MIN_SAMPLES: usize = 4;

/// Wall-clock interval after which accumulated GPU-cost hints reset.
pub const HINT_RESET_INTERVAL: Duration = Duration::from_millis(5000);

/// Minimum average FPS and maximum min/max spread for the excellent grade.
pub const EXCELLENT_THRESHOLDS: (f32, f32) = (55.0, 10.0);
/// Minimum average FPS and maximum min/max spread for the good grade.
pub const GOOD_THRESHOLDS: (f32, f32) = (45.0, 15.0);
/// Minimum average FPS and maximum min/max spread for the fair grade.
pub const FAIR_THRESHOLDS: (f32, f32) = (30.0, 20.0);

/// Grades a window by average FPS and the spread between its extremes.
///
/// A tight, high average grades excellent; progressively lower averages or
/// wider spreads fall through to good, fair, and finally poor.
pub fn classify_grade(average_fps: f32, spread: f32) -> PerformanceGrade {
    if average_fps >= EXCELLENT_THRESHOLDS.0 && spread < EXCELLENT_THRESHOLDS.1 {
        PerformanceGrade::Excellent
    } else if average_fps >= GOOD_THRESHOLDS.0 && spread < GOOD_THRESHOLDS.1 {
        PerformanceGrade::Good
    } else if average_fps >= FAIR_THRESHOLDS.0 && spread < FAIR_THRESHOLDS.1 {
        PerformanceGrade::Fair
    } else {
        PerformanceGrade::Poor
    }
}

/// GPU-cost counters accumulated between resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpuHints {
    /// Draw calls reported since the last reset.
    pub draw_calls: u32,
    /// Triangles reported since the last reset.
    pub triangles: u32,
}

/// Rolling frame-rate sampler fed by the host render loop.
#[derive(Debug)]
pub struct FrameMonitor {
    window: RingBuffer<f32, HISTORY_CAPACITY>,
    frames_in_interval: u32,
    interval_start: Option<Instant>,
    last_sample: Option<FrameSample>,
    summary: FrameSummary,
    hints: GpuHints,
    hints_reset_at: Option<Instant>,
    heap_used_mb: Option<f32>,
}

impl FrameMonitor {
    /// Creates a monitor with the optimistic default summary.
    pub fn new() -> Self {
        Self {
            window: RingBuffer::new(),
            frames_in_interval: 0,
            interval_start: None,
            last_sample: None,
            summary: FrameSummary::default(),
            hints: GpuHints::default(),
            hints_reset_at: None,
            heap_used_mb: None,
        }
    }

    /// Records one rendered frame.
    ///
    /// Returns a fresh [`FrameSummary`] when this frame completes a sampling
    /// interval, `None` otherwise. The very first call only anchors the
    /// interval clock.
    pub fn on_frame(&mut self, now: Instant) -> Option<FrameSummary> {
        let start = match self.interval_start {
            Some(start) => start,
            None => {
                self.interval_start = Some(now);
                self.hints_reset_at.get_or_insert(now);
                return None;
            }
        };

        self.frames_in_interval += 1;
        if self.frames_in_interval < SAMPLE_INTERVAL_FRAMES {
            return None;
        }

        let elapsed = now.duration_since(start);
        self.interval_start = Some(now);
        self.frames_in_interval = 0;
        self.maybe_reset_hints(now);

        let elapsed_ms = elapsed.as_secs_f32() * 1000.0;
        if elapsed_ms <= f32::EPSILON {
            // A zero-length interval carries no rate information.
            return None;
        }

        let fps = SAMPLE_INTERVAL_FRAMES as f32 * 1000.0 / elapsed_ms;
        let sample = FrameSample {
            fps,
            frame_time_ms: elapsed_ms / SAMPLE_INTERVAL_FRAMES as f32,
            at: now,
        };
        self.window.push(fps);
        self.last_sample = Some(sample);
        self.recompute();
        Some(self.summary)
    }

    /// Latest published summary (the optimistic default until sampling starts).
    pub fn summary(&self) -> FrameSummary {
        self.summary
    }

    /// Most recent raw sample, if any interval has completed.
    pub fn last_sample(&self) -> Option<FrameSample> {
        self.last_sample
    }

    /// Accumulates renderer-reported draw calls and triangles.
    pub fn record_gpu_cost(&mut self, draw_calls: u32, triangles: u32, now: Instant) {
        self.maybe_reset_hints(now);
        self.hints.draw_calls = self.hints.draw_calls.saturating_add(draw_calls);
        self.hints.triangles = self.hints.triangles.saturating_add(triangles);
    }

    /// GPU-cost counters accumulated since the last reset interval.
    pub fn gpu_hints(&self) -> GpuHints {
        self.hints
    }

    /// Records a host-provided heap usage estimate, for diagnostics only.
    ///
    /// Never consulted by grading.
    pub fn record_heap_used(&mut self, megabytes: f32) {
        self.heap_used_mb = Some(megabytes);
    }

    /// Latest heap usage estimate, if the host reported one.
    pub fn heap_used_mb(&self) -> Option<f32> {
        self.heap_used_mb
    }

    fn maybe_reset_hints(&mut self, now: Instant) {
        let reset_at = *self.hints_reset_at.get_or_insert(now);
        if now.duration_since(reset_at) > HINT_RESET_INTERVAL {
            self.hints = GpuHints::default();
            self.hints_reset_at = Some(now);
        }
    }

    fn recompute(&mut self) {
        let count = self.window.count();
        let average = self.window.average();
        let min = self.window.min().unwrap_or(average);
        let max = self.window.max().unwrap_or(average);
        let spread = max - min;
        let current = self.last_sample.map(|s| s.fps).unwrap_or(average);

        self.summary = FrameSummary {
            current_fps: current,
            average_fps: average,
            min_fps: min,
            max_fps: max,
            is_throttled: average < THROTTLE_FLOOR_FPS && count >= THROTTLE_MIN_SAMPLES,
            grade: classify_grade(average, spread),
            sample_count: count,
        };
        log::trace!(
            "frame summary: {:.1} avg fps, spread {:.1}, grade {}",
            average,
            spread,
            self.summary.grade.as_str()
        );
    }
}

impl Default for FrameMonitor {
    fn default() -> Self {
        Self::new()
    }
}
