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

//! Procedural layout of the layered node-and-connection network.
//!
//! Generation is a pure function of a [`NetworkDensity`] row and a seed, so
//! the same inputs always produce the same structure. The 3D lanes consume
//! the layout read-only; nothing here touches a graphics API.

use axon_core::math::Vec3;
use axon_core::render::NetworkDensity;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Z depth of each node layer, input to output.
pub const LAYER_DEPTHS: [f32; 3] = [-2.0, 0.0, 2.0];

/// Share of `node_count` placed on each layer. Shares are rounded up per
/// layer, so the generated total can slightly exceed `node_count`.
pub const LAYER_FRACTIONS: [f32; 3] = [0.4, 0.4, 0.2];

/// Ring radius of the innermost layer.
pub const RING_BASE_RADIUS: f32 = 1.5;

/// Ring radius growth per layer.
pub const RING_RADIUS_STEP: f32 = 0.3;

/// Sphere radius of a single node before per-node scaling.
pub const NODE_RADIUS: f32 = 0.1;

/// Node tint of the middle (hidden) layer.
pub const CORE_LAYER_COLOR: &str = "#00ffff";

/// Node tint of the outer (input/output) layers.
pub const SHELL_LAYER_COLOR: &str = "#0088ff";

/// Fraction of candidate connections dropped so the network does not read
/// as fully connected.
const CONNECTION_DROP_RATE: f32 = 0.4;

/// Ambient particles are scattered in a box of this half-open extent.
const PARTICLE_SPREAD: Vec3 = Vec3::new(6.0, 6.0, 4.0);

/// One node of the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSite {
    /// Resting position on the layer ring.
    pub position: Vec3,
    /// Per-node scale jitter in `[0.8, 1.2)`.
    pub scale: f32,
    /// Hex tint, keyed by layer.
    pub color: &'static str,
    /// Index into [`LAYER_DEPTHS`].
    pub layer: usize,
}

/// A connection between two nodes on adjacent layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Index of the start node in [`NeuralLayout::nodes`].
    pub start: usize,
    /// Index of the end node in [`NeuralLayout::nodes`].
    pub end: usize,
}

/// Placement of a unit cylinder along one connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionTransform {
    /// Cylinder center.
    pub midpoint: Vec3,
    /// Unit vector from start to end.
    pub direction: Vec3,
    /// Distance between the endpoints; the cylinder's Y scale.
    pub length: f32,
}

/// One ambient particle drifting around the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSite {
    /// Resting position inside the particle box.
    pub position: Vec3,
    /// Individual drift speed multiplier in `[0.5, 1.0)`.
    pub speed: f32,
    /// Phase offset so particles do not drift in lockstep.
    pub phase: f32,
}

/// The static structure every 3D lane renders.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralLayout {
    /// All nodes, grouped by layer in generation order.
    pub nodes: Vec<NodeSite>,
    /// Connections between adjacent layers.
    pub connections: Vec<Connection>,
    /// Ambient particles.
    pub particles: Vec<ParticleSite>,
}

impl NeuralLayout {
    /// Generates the layout for a density row.
    ///
    /// Deterministic: the same `density` and `seed` always yield the same
    /// layout, so tests and the instanced/full lanes agree on structure.
    pub fn generate(density: &NetworkDensity, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let layer_counts: Vec<usize> = LAYER_FRACTIONS
            .iter()
            .map(|fraction| (density.node_count as f32 * fraction).ceil() as usize)
            .collect();

        let mut nodes = Vec::with_capacity(layer_counts.iter().sum());
        for (layer, (&count, &depth)) in layer_counts.iter().zip(LAYER_DEPTHS.iter()).enumerate() {
            let radius = RING_BASE_RADIUS + layer as f32 * RING_RADIUS_STEP;
            for i in 0..count {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                nodes.push(NodeSite {
                    position: Vec3::new(angle.cos() * radius, angle.sin() * radius, depth),
                    scale: 0.8 + rng.gen::<f32>() * 0.4,
                    color: if layer == 1 {
                        CORE_LAYER_COLOR
                    } else {
                        SHELL_LAYER_COLOR
                    },
                    layer,
                });
            }
        }

        let mut connections = Vec::new();
        let mut layer_start = 0;
        'layers: for layer in 0..layer_counts.len() - 1 {
            let next_start = layer_start + layer_counts[layer];
            for i in 0..layer_counts[layer] {
                for j in 0..layer_counts[layer + 1] {
                    if connections.len() as u32 >= density.connection_count {
                        break 'layers;
                    }
                    if rng.gen::<f32>() > CONNECTION_DROP_RATE {
                        connections.push(Connection {
                            start: layer_start + i,
                            end: next_start + j,
                        });
                    }
                }
            }
            layer_start = next_start;
        }

        let particles: Vec<ParticleSite> = (0..density.particle_count)
            .map(|i| ParticleSite {
                position: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD.x,
                    (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD.y,
                    (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD.z,
                ),
                speed: 0.5 + rng.gen::<f32>() * 0.5,
                phase: i as f32 * 0.5,
            })
            .collect();

        log::debug!(
            "generated layout: {} nodes, {} connections, {} particles",
            nodes.len(),
            connections.len(),
            particles.len()
        );

        Self {
            nodes,
            connections,
            particles,
        }
    }

    /// Cylinder placement for one connection.
    pub fn connection_transform(&self, connection: &Connection) -> ConnectionTransform {
        let start = self.nodes[connection.start].position;
        let end = self.nodes[connection.end].position;
        ConnectionTransform {
            midpoint: Vec3::midpoint(start, end),
            direction: (end - start).normalize(),
            length: Vec3::distance(start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn density() -> NetworkDensity {
        NetworkDensity {
            node_count: 12,
            connection_count: 15,
            node_detail: (8, 6),
            animation_speed: 1.0,
            particle_count: 8,
        }
    }

    #[test]
    fn test_same_seed_reproduces_layout() {
        let a = NeuralLayout::generate(&density(), 42);
        let b = NeuralLayout::generate(&density(), 42);
        assert_eq!(a, b);

        let c = NeuralLayout::generate(&density(), 43);
        assert_ne!(a, c);
    }

    #[test]
    fn test_layers_follow_the_fraction_table() {
        let layout = NeuralLayout::generate(&density(), 1);

        // ceil(12 * 0.4) = 5, ceil(12 * 0.4) = 5, ceil(12 * 0.2) = 3.
        let per_layer: Vec<usize> = (0..3)
            .map(|layer| layout.nodes.iter().filter(|n| n.layer == layer).count())
            .collect();
        assert_eq!(per_layer, vec![5, 5, 3]);

        for node in &layout.nodes {
            assert_relative_eq!(node.position.z, LAYER_DEPTHS[node.layer]);
            let radius = RING_BASE_RADIUS + node.layer as f32 * RING_RADIUS_STEP;
            let ring = (node.position.x * node.position.x + node.position.y * node.position.y)
                .sqrt();
            assert_relative_eq!(ring, radius, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_middle_layer_gets_the_core_tint() {
        let layout = NeuralLayout::generate(&density(), 1);
        for node in &layout.nodes {
            let expected = if node.layer == 1 {
                CORE_LAYER_COLOR
            } else {
                SHELL_LAYER_COLOR
            };
            assert_eq!(node.color, expected);
        }
    }

    #[test]
    fn test_scale_jitter_stays_in_range() {
        let layout = NeuralLayout::generate(&density(), 99);
        for node in &layout.nodes {
            assert!(node.scale >= 0.8 && node.scale < 1.2, "scale {}", node.scale);
        }
    }

    #[test]
    fn test_connections_respect_the_cap_and_adjacency() {
        let layout = NeuralLayout::generate(&density(), 7);
        assert!(layout.connections.len() as u32 <= density().connection_count);
        assert!(!layout.connections.is_empty());

        for connection in &layout.connections {
            let from = layout.nodes[connection.start].layer;
            let to = layout.nodes[connection.end].layer;
            assert_eq!(to, from + 1, "connections only span adjacent layers");
        }
    }

    #[test]
    fn test_connection_transform_math() {
        let layout = NeuralLayout::generate(&density(), 7);
        let connection = layout.connections[0];
        let transform = layout.connection_transform(&connection);

        let start = layout.nodes[connection.start].position;
        let end = layout.nodes[connection.end].position;
        assert_relative_eq!(transform.midpoint, Vec3::midpoint(start, end));
        assert_relative_eq!(transform.length, Vec3::distance(start, end));
        assert_relative_eq!(transform.direction.length(), 1.0, epsilon = 1e-5);
        // Direction points from start towards end.
        assert_relative_eq!(
            start + transform.direction * transform.length,
            end,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_particle_count_and_spread() {
        let layout = NeuralLayout::generate(&density(), 3);
        assert_eq!(layout.particles.len(), 8);
        for particle in &layout.particles {
            assert!(particle.position.x.abs() <= 3.0);
            assert!(particle.position.y.abs() <= 3.0);
            assert!(particle.position.z.abs() <= 2.0);
            assert!(particle.speed >= 0.5 && particle.speed < 1.0);
        }
    }
}
