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

//! The instanced lane.
//!
//! Structurally equivalent to the full lane, but nodes share one sphere
//! geometry, connections share one unit cylinder, and particles share one
//! small sphere, each submitted as a single instanced draw. The draw-call
//! count is bounded by the number of element kinds, never by the layout
//! size. Connection instancing is skipped entirely on the low tier.

use super::{cost_of, cylinder_triangles, sphere_triangles, SceneLane, PARTICLE_DETAIL};
use crate::layout::{ConnectionTransform, NeuralLayout};
use crate::motion;
use axon_core::capability::PerformanceTier;
use axon_core::render::{FramePass, NetworkDensity, SceneQuality};

/// Sphere radius shared by every instanced node.
pub const INSTANCED_NODE_RADIUS: f32 = 0.08;

/// Animated state of one node instance for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    /// Pulsed uniform scale.
    pub scale: f32,
    /// Brightness multiplier applied to the node tint.
    pub color_intensity: f32,
}

/// A lane that batches shared geometry into instanced draws.
pub struct InstancedLane {
    quality: SceneQuality,
    density: NetworkDensity,
    node_detail: (u32, u32),
    connections_enabled: bool,
}

impl InstancedLane {
    /// Creates the lane with the rows for `tier`.
    ///
    /// Instancing affords finer spheres than the per-draw variant, so the
    /// detail table here is richer than [`NetworkDensity::node_detail`].
    pub fn for_tier(tier: PerformanceTier) -> Self {
        let node_detail = match tier {
            PerformanceTier::High => (16, 12),
            PerformanceTier::Medium => (12, 8),
            PerformanceTier::Low => (8, 6),
        };
        Self {
            quality: SceneQuality::for_tier(tier),
            density: NetworkDensity::for_tier(tier),
            node_detail,
            connections_enabled: tier != PerformanceTier::Low,
        }
    }

    /// The quality row this lane was configured with.
    pub fn quality(&self) -> SceneQuality {
        self.quality
    }

    /// Per-instance animation state for the node batch.
    pub fn instance_transforms(&self, layout: &NeuralLayout, time: f32) -> Vec<InstanceTransform> {
        (0..layout.nodes.len())
            .map(|index| InstanceTransform {
                scale: motion::instanced_pulse(index, time),
                color_intensity: motion::instanced_color_intensity(index, time),
            })
            .collect()
    }

    /// Static cylinder placements for the connection batch.
    ///
    /// Empty when connection instancing is disabled for this tier.
    pub fn connection_instances(&self, layout: &NeuralLayout) -> Vec<ConnectionTransform> {
        if !self.connections_enabled {
            return Vec::new();
        }
        layout
            .connections
            .iter()
            .map(|connection| layout.connection_transform(connection))
            .collect()
    }
}

impl SceneLane for InstancedLane {
    fn variant_name(&self) -> &'static str {
        "instanced"
    }

    fn render(&self, layout: &NeuralLayout, time: f32) -> FramePass {
        let nodes = self.instance_transforms(layout, time);
        let connections = self.connection_instances(layout);
        let particles = layout.particles.len() as u32;
        let (width, height) = self.node_detail;

        let mut draw_calls = 0;
        if !nodes.is_empty() {
            draw_calls += 1;
        }
        if !connections.is_empty() {
            draw_calls += 1;
        }
        if particles > 0 {
            draw_calls += 1;
        }

        let triangles = nodes.len() as u32 * sphere_triangles(width, height)
            + connections.len() as u32 * cylinder_triangles()
            + particles * sphere_triangles(PARTICLE_DETAIL.0, PARTICLE_DETAIL.1);
        let instances = nodes.len() as u32 + connections.len() as u32 + particles;

        log::trace!("instanced pass: {draw_calls} draws, {instances} instances");
        FramePass {
            draw_calls,
            triangles,
            instances,
        }
    }

    fn estimate_cost(&self, layout: &NeuralLayout) -> f32 {
        let pass = self.render(layout, 0.0);
        cost_of(pass.draw_calls, pass.triangles)
    }
}
