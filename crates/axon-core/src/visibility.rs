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

//! On-screen visibility state emitted by the gate in `axon-control`.

/// How much of the observed container is currently on screen.
///
/// Invariants maintained by the gate: a ratio of `0.0` always means
/// `is_intersecting == false`, and a ratio at or above the configured
/// fully-visible cutoff always means `fully_visible == true`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisibilityState {
    /// Whether the container crosses the configured visibility threshold.
    pub is_intersecting: bool,
    /// Fraction of the container on screen, in `0.0..=1.0`.
    pub ratio: f32,
    /// Whether the container is effectively fully on screen.
    pub fully_visible: bool,
}
