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

//! Frame-rate measurement types produced by the monitor in `axon-control`.

use std::time::Instant;

/// One frame-rate measurement taken over a sampling interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Instantaneous frames-per-second over the interval.
    pub fps: f32,
    /// Mean frame time over the interval, in milliseconds.
    pub frame_time_ms: f32,
    /// When the sample was taken.
    pub at: Instant,
}

/// Qualitative classification of the recent frame-rate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PerformanceGrade {
    /// High average with a tight spread.
    #[default]
    Excellent,
    /// Comfortable average with moderate spread.
    Good,
    /// Borderline average or a loose spread.
    Fair,
    /// Anything worse.
    Poor,
}

impl PerformanceGrade {
    /// Stable lowercase label for telemetry payloads and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// Aggregate view over the rolling frame-rate window.
///
/// The default value is the optimistic degraded-observability state: when
/// the host never delivers refresh callbacks the pipeline keeps reporting
/// 60 FPS / `Excellent` rather than erroring out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    /// FPS of the most recent sample.
    pub current_fps: f32,
    /// Mean FPS over the retained window.
    pub average_fps: f32,
    /// Minimum FPS over the retained window.
    pub min_fps: f32,
    /// Maximum FPS over the retained window.
    pub max_fps: f32,
    /// Whether the average sits below the throttle floor with enough
    /// samples to trust it.
    pub is_throttled: bool,
    /// Qualitative grade derived from average and spread.
    pub grade: PerformanceGrade,
    /// Number of samples currently retained in the window.
    pub sample_count: usize,
}

impl FrameSummary {
    /// Spread between the best and worst retained sample.
    pub fn spread(&self) -> f32 {
        self.max_fps - self.min_fps
    }
}

impl Default for FrameSummary {
    fn default() -> Self {
        Self {
            current_fps: 60.0,
            average_fps: 60.0,
            min_fps: 60.0,
            max_fps: 60.0,
            is_throttled: false,
            grade: PerformanceGrade::Excellent,
            sample_count: 0,
        }
    }
}
