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

//! Render mode vocabulary, tier-keyed quality tables, and frame accounting.

pub mod error;
pub mod quality;

pub use error::SceneLoadError;
pub use quality::{NetworkDensity, SceneQuality};

/// Which 3D scene implementation is mounted or being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneVariant {
    /// One mesh per node and connection; the richest presentation.
    Full,
    /// Shared-geometry instancing; draw calls bounded independent of node
    /// count.
    Instanced,
}

impl SceneVariant {
    /// Stable lowercase label for telemetry payloads and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Instanced => "instanced",
        }
    }
}

/// The single piece of mutable presentation state owned by the director.
///
/// Automatic transitions are one-directional: once `Fallback2D` is reached
/// through degradation, no automatic path leads back to a 3D mode within the
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Nothing decided yet; the host presents the 2D diagram meanwhile.
    #[default]
    Idle,
    /// A 3D scene module load is in flight.
    PendingLoad,
    /// A 3D scene is mounted.
    Loaded3D(SceneVariant),
    /// The static 2D vector diagram is the final presentation.
    Fallback2D,
}

impl RenderMode {
    /// `true` while a 3D scene is mounted.
    pub fn is_3d(&self) -> bool {
        matches!(self, Self::Loaded3D(_))
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::PendingLoad => f.write_str("pending_load"),
            Self::Loaded3D(variant) => write!(f, "loaded_3d:{}", variant.as_str()),
            Self::Fallback2D => f.write_str("fallback_2d"),
        }
    }
}

/// Draw accounting for one rendered frame, reported by a scene lane.
///
/// These numbers feed the frame monitor's GPU-cost hints; the instanced lane
/// exists to keep `draw_calls` constant while `triangles` tracks the actual
/// geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FramePass {
    /// Number of draw calls issued.
    pub draw_calls: u32,
    /// Number of triangles submitted across all draws.
    pub triangles: u32,
    /// Number of instances submitted through instanced draws.
    pub instances: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mode_display() {
        assert_eq!(RenderMode::Idle.to_string(), "idle");
        assert_eq!(
            RenderMode::Loaded3D(SceneVariant::Instanced).to_string(),
            "loaded_3d:instanced"
        );
        assert_eq!(RenderMode::Fallback2D.to_string(), "fallback_2d");
    }

    #[test]
    fn test_only_loaded_modes_are_3d() {
        assert!(RenderMode::Loaded3D(SceneVariant::Full).is_3d());
        assert!(!RenderMode::Idle.is_3d());
        assert!(!RenderMode::PendingLoad.is_3d());
        assert!(!RenderMode::Fallback2D.is_3d());
    }
}
