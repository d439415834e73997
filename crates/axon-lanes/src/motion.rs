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

//! Per-frame motion math shared by the 3D lanes.
//!
//! All functions are pure in `time`, so a host that freezes the clock (for
//! reduced-motion preferences) gets the resting pose back.

use crate::layout::ParticleSite;
use axon_core::math::Vec3;

/// Floating offset applied to a node's resting position.
///
/// The index staggers the phase so nodes do not bob in unison.
pub fn drifted_node_position(base: Vec3, index: usize, time: f32, speed: f32) -> Vec3 {
    let y = base.y + (time * speed + index as f32 * 0.5).sin() * 0.05;
    Vec3::new(base.x, y, base.z)
}

/// Gentle pulse applied to a node's resting scale, within ±10%.
pub fn pulsed_node_scale(base_scale: f32, index: usize, time: f32, speed: f32) -> f32 {
    base_scale * (1.0 + (time * speed * 2.0 + index as f32).sin() * 0.1)
}

/// Slow continuous Y rotation, shared by all nodes.
pub fn node_spin(time: f32, speed: f32) -> f32 {
    time * speed * 0.2
}

/// Drift applied to an ambient particle's resting position.
pub fn drifted_particle_position(site: &ParticleSite, time: f32, speed: f32) -> Vec3 {
    let t = time * site.speed * speed;
    Vec3::new(
        site.position.x + (t * 0.5 + site.phase).cos() * 0.2,
        site.position.y + (t + site.phase).sin() * 0.3,
        site.position.z,
    )
}

/// Pulse factor for one instanced node, within ±20%.
pub fn instanced_pulse(index: usize, time: f32) -> f32 {
    1.0 + (time * 2.0 + index as f32 * 0.1).sin() * 0.2
}

/// Brightness multiplier for one instanced node's tint, in `[0.4, 1.0]`.
pub fn instanced_color_intensity(index: usize, time: f32) -> f32 {
    0.7 + (time * 3.0 + index as f32 * 0.2).sin() * 0.3
}
