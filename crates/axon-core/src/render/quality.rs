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

//! Tier-keyed quality configuration shared by every scene variant.
//!
//! Both tables are fixed per [`PerformanceTier`]: the prober picks the tier
//! once, and every lane reads the same rows, so the variants stay visually
//! interchangeable at a given tier.

use crate::capability::PerformanceTier;
use serde::{Deserialize, Serialize};

/// Rendering quality toggles for a scene, keyed by tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneQuality {
    /// Whether environment lighting is enabled.
    pub environment: bool,
    /// Whether meshes cast and receive shadows.
    pub shadows: bool,
    /// Key light intensity multiplier.
    pub light_intensity: f32,
    /// Allowed device-pixel-ratio range `(min, max)`.
    pub dpr_range: (f32, f32),
    /// Whether anti-aliasing is requested.
    pub antialias: bool,
}

impl SceneQuality {
    /// Returns the quality row for `tier`.
    pub fn for_tier(tier: PerformanceTier) -> Self {
        match tier {
            PerformanceTier::High => Self {
                environment: true,
                shadows: true,
                light_intensity: 1.0,
                dpr_range: (1.0, 2.0),
                antialias: true,
            },
            PerformanceTier::Medium => Self {
                environment: false,
                shadows: false,
                light_intensity: 0.8,
                dpr_range: (1.0, 1.5),
                antialias: true,
            },
            PerformanceTier::Low => Self {
                environment: false,
                shadows: false,
                light_intensity: 0.6,
                dpr_range: (1.0, 1.0),
                antialias: false,
            },
        }
    }
}

impl Default for SceneQuality {
    /// The middle row; hosts that skip probing get a safe baseline.
    fn default() -> Self {
        Self::for_tier(PerformanceTier::Medium)
    }
}

/// Structural density of the generated node-and-connection network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkDensity {
    /// Number of network nodes.
    pub node_count: u32,
    /// Maximum number of connections between adjacent layers.
    pub connection_count: u32,
    /// Sphere tessellation `(width_segments, height_segments)` per node.
    pub node_detail: (u32, u32),
    /// Animation speed multiplier for the idle pulse.
    pub animation_speed: f32,
    /// Number of ambient particles.
    pub particle_count: u32,
}

impl NetworkDensity {
    /// Returns the density row for `tier`.
    pub fn for_tier(tier: PerformanceTier) -> Self {
        match tier {
            PerformanceTier::High => Self {
                node_count: 12,
                connection_count: 15,
                node_detail: (8, 6),
                animation_speed: 1.0,
                particle_count: 8,
            },
            PerformanceTier::Medium => Self {
                node_count: 8,
                connection_count: 10,
                node_detail: (6, 4),
                animation_speed: 0.7,
                particle_count: 4,
            },
            PerformanceTier::Low => Self {
                node_count: 6,
                connection_count: 6,
                node_detail: (4, 3),
                animation_speed: 0.5,
                particle_count: 2,
            },
        }
    }
}

impl Default for NetworkDensity {
    fn default() -> Self {
        Self::for_tier(PerformanceTier::Medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_degrades_monotonically() {
        let high = SceneQuality::for_tier(PerformanceTier::High);
        let medium = SceneQuality::for_tier(PerformanceTier::Medium);
        let low = SceneQuality::for_tier(PerformanceTier::Low);

        assert!(high.environment && high.shadows);
        assert!(!medium.environment && !medium.shadows);
        assert!(high.light_intensity > medium.light_intensity);
        assert!(medium.light_intensity > low.light_intensity);
        assert!(high.dpr_range.1 > medium.dpr_range.1);
        assert_eq!(low.dpr_range, (1.0, 1.0));
        assert!(!low.antialias);
    }

    #[test]
    fn test_density_degrades_monotonically() {
        let high = NetworkDensity::for_tier(PerformanceTier::High);
        let medium = NetworkDensity::for_tier(PerformanceTier::Medium);
        let low = NetworkDensity::for_tier(PerformanceTier::Low);

        assert!(high.node_count > medium.node_count);
        assert!(medium.node_count > low.node_count);
        assert!(high.connection_count > medium.connection_count);
        assert!(high.particle_count > medium.particle_count);
        assert!(high.node_detail.0 > low.node_detail.0);
        assert!(high.animation_speed > low.animation_speed);
    }
}
