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

//! The naive full-fidelity lane.
//!
//! Every node, connection, and particle is its own draw, so the draw-call
//! count grows linearly with the layout. This is the highest-quality variant
//! and the most expensive one; the director only picks it on the high tier.

use super::{cost_of, cylinder_triangles, sphere_triangles, SceneLane, PARTICLE_DETAIL};
use crate::layout::NeuralLayout;
use crate::motion;
use axon_core::capability::PerformanceTier;
use axon_core::math::Vec3;
use axon_core::render::{FramePass, NetworkDensity, SceneQuality};

/// Animated placement of one node for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Drifted position.
    pub position: Vec3,
    /// Pulsed uniform scale.
    pub scale: f32,
    /// Y rotation in radians.
    pub rotation_y: f32,
}

/// A lane that draws every scene element individually.
pub struct FullLane {
    quality: SceneQuality,
    density: NetworkDensity,
}

impl FullLane {
    /// Creates the lane with the quality and density rows for `tier`.
    pub fn for_tier(tier: PerformanceTier) -> Self {
        Self {
            quality: SceneQuality::for_tier(tier),
            density: NetworkDensity::for_tier(tier),
        }
    }

    /// The quality row this lane was configured with.
    pub fn quality(&self) -> SceneQuality {
        self.quality
    }

    /// Animated node placements for the current frame.
    ///
    /// A host with a GPU uploads one transform per draw; the showcase prints
    /// a sample of them.
    pub fn node_transforms(&self, layout: &NeuralLayout, time: f32) -> Vec<NodeTransform> {
        let speed = self.density.animation_speed;
        layout
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| NodeTransform {
                position: motion::drifted_node_position(node.position, index, time, speed),
                scale: motion::pulsed_node_scale(node.scale, index, time, speed),
                rotation_y: motion::node_spin(time, speed),
            })
            .collect()
    }

    /// Animated particle positions for the current frame.
    pub fn particle_positions(&self, layout: &NeuralLayout, time: f32) -> Vec<Vec3> {
        let speed = self.density.animation_speed;
        layout
            .particles
            .iter()
            .map(|site| motion::drifted_particle_position(site, time, speed))
            .collect()
    }
}

impl SceneLane for FullLane {
    fn variant_name(&self) -> &'static str {
        "full"
    }

    fn render(&self, layout: &NeuralLayout, time: f32) -> FramePass {
        let nodes = self.node_transforms(layout, time);
        let particles = self.particle_positions(layout, time);
        let (width, height) = self.density.node_detail;

        let draw_calls = (nodes.len() + layout.connections.len() + particles.len()) as u32;
        let triangles = nodes.len() as u32 * sphere_triangles(width, height)
            + layout.connections.len() as u32 * cylinder_triangles()
            + particles.len() as u32 * sphere_triangles(PARTICLE_DETAIL.0, PARTICLE_DETAIL.1);

        log::trace!("full pass: {draw_calls} draws, {triangles} triangles");
        FramePass {
            draw_calls,
            triangles,
            instances: 0,
        }
    }

    fn estimate_cost(&self, layout: &NeuralLayout) -> f32 {
        let pass = self.render(layout, 0.0);
        cost_of(pass.draw_calls, pass.triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn layout() -> NeuralLayout {
        NeuralLayout::generate(&NetworkDensity::for_tier(PerformanceTier::High), 42)
    }

    #[test]
    fn test_one_draw_per_element() {
        let lane = FullLane::for_tier(PerformanceTier::High);
        let layout = layout();

        let pass = lane.render(&layout, 0.0);
        let elements =
            (layout.nodes.len() + layout.connections.len() + layout.particles.len()) as u32;
        assert_eq!(pass.draw_calls, elements);
        assert_eq!(pass.instances, 0);
    }

    #[test]
    fn test_triangle_totals_follow_the_detail_row() {
        let lane = FullLane::for_tier(PerformanceTier::High);
        let layout = layout();
        let pass = lane.render(&layout, 0.0);

        // High tier spheres are (8, 6): 2 * 8 * 5 = 80 triangles each.
        let expected = layout.nodes.len() as u32 * 80
            + layout.connections.len() as u32 * 24
            + layout.particles.len() as u32 * 16;
        assert_eq!(pass.triangles, expected);
    }

    #[test]
    fn test_pass_counts_are_time_invariant() {
        let lane = FullLane::for_tier(PerformanceTier::Medium);
        let layout = NeuralLayout::generate(&NetworkDensity::for_tier(PerformanceTier::Medium), 7);

        assert_eq!(lane.render(&layout, 0.0), lane.render(&layout, 12.5));
    }

    #[test]
    fn test_transforms_animate_but_stay_near_rest() {
        let lane = FullLane::for_tier(PerformanceTier::High);
        let layout = layout();

        let at_rest = lane.node_transforms(&layout, 0.0);
        let later = lane.node_transforms(&layout, 1.3);
        assert_eq!(at_rest.len(), layout.nodes.len());
        assert_ne!(at_rest, later);

        for (transform, node) in later.iter().zip(layout.nodes.iter()) {
            assert_eq!(transform.position.x, node.position.x);
            assert!((transform.position.y - node.position.y).abs() <= 0.05 + f32::EPSILON);
            assert!((transform.scale - node.scale).abs() <= node.scale * 0.1 + f32::EPSILON);
        }
    }

    #[test]
    fn test_cost_combines_triangles_and_draw_overhead() {
        let lane = FullLane::for_tier(PerformanceTier::Low);
        let layout = NeuralLayout::generate(&NetworkDensity::for_tier(PerformanceTier::Low), 3);
        let pass = lane.render(&layout, 0.0);

        let expected = pass.triangles as f32 * 0.001 + pass.draw_calls as f32 * 0.1;
        assert_relative_eq!(lane.estimate_cost(&layout), expected);
    }
}
