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

//! Scene lanes - the interchangeable renderers behind one contract.

use crate::layout::NeuralLayout;
use axon_core::render::FramePass;

mod full;
mod instanced;
mod vector;

pub use full::*;
pub use instanced::*;
pub use vector::*;

/// Per-triangle share of the abstract GPU cost unit.
pub const TRIANGLE_COST: f32 = 0.001;

/// Fixed overhead per draw call in the same unit.
pub const DRAW_CALL_COST: f32 = 0.1;

/// Tessellation of an ambient particle sphere.
pub const PARTICLE_DETAIL: (u32, u32) = (4, 3);

/// Radial segments of the shared connection cylinder.
pub const CYLINDER_RADIAL_SEGMENTS: u32 = 6;

/// Radius of the shared connection cylinder before scaling.
pub const CYLINDER_RADIUS: f32 = 0.005;

/// Triangle count of a UV sphere with the given segment counts.
pub fn sphere_triangles(width_segments: u32, height_segments: u32) -> u32 {
    2 * width_segments * height_segments.saturating_sub(1)
}

/// Triangle count of the capped unit cylinder.
pub fn cylinder_triangles() -> u32 {
    CYLINDER_RADIAL_SEGMENTS * 4
}

/// A trait defining the behavior of a scene lane.
///
/// Scene lanes render the layered node-and-connection network produced by
/// [`NeuralLayout`](crate::layout::NeuralLayout). Different implementations
/// trade fidelity for cost: the full lane draws every element individually,
/// the instanced lane batches shared geometry, and the vector lane is a
/// static 2D document with no GPU footprint at all.
///
/// The director selects between them without being coupled to any specific
/// implementation; a lane never decides on its own when it runs.
pub trait SceneLane: Send + Sync {
    /// Returns a human-readable identifier for this rendering strategy.
    fn variant_name(&self) -> &'static str;

    /// Encodes one frame of the layout at the given scene time.
    ///
    /// Returns the pass statistics for the frame; hosts feed these into the
    /// frame monitor's GPU hints.
    fn render(&self, layout: &NeuralLayout, time: f32) -> FramePass;

    /// Estimates the GPU cost of rendering the layout with this strategy.
    ///
    /// Measured in abstract units where triangles carry a small per-triangle
    /// cost and each draw call a fixed overhead. Higher values indicate more
    /// expensive rendering.
    fn estimate_cost(&self, layout: &NeuralLayout) -> f32;

    /// The static vector document, for lanes that have one.
    fn svg_document(&self) -> Option<&'static str> {
        None
    }
}

/// Folds raw pass counts into the abstract cost unit.
pub(crate) fn cost_of(draw_calls: u32, triangles: u32) -> f32 {
    triangles as f32 * TRIANGLE_COST + draw_calls as f32 * DRAW_CALL_COST
}
