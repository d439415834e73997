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

//! Asynchronous scene loading.
//!
//! The director never constructs a lane directly: it hands a ticket to the
//! host, the host drives a [`SceneSource`], and the result comes back as an
//! explicit `Result` the director commits or discards. A rejected load is
//! data, not a panic.

use crate::layout::NeuralLayout;
use crate::scene_lane::{FullLane, InstancedLane, SceneLane};
use async_trait::async_trait;
use axon_core::capability::PerformanceTier;
use axon_core::render::{NetworkDensity, SceneLoadError, SceneVariant};

/// Layout seed used when the host does not supply one.
pub const DEFAULT_LAYOUT_SEED: u64 = 42;

/// A trait for a system that resolves a scene variant into a ready lane.
///
/// Since fetching and initializing a 3D module can be a slow I/O operation,
/// the method is asynchronous. Any rejection reason is carried in
/// [`SceneLoadError`]; callers treat every variant of it identically.
#[async_trait]
pub trait SceneSource: Send + Sync {
    /// Asynchronously loads the lane for `variant`, configured for `tier`.
    async fn load(
        &self,
        variant: SceneVariant,
        tier: PerformanceTier,
    ) -> Result<Box<dyn SceneLane>, SceneLoadError>;
}

/// The production source: lanes are compiled in, so loading never fails and
/// resolves immediately.
pub struct LaneCatalog {
    seed: u64,
}

impl LaneCatalog {
    /// Creates a catalog with the default layout seed.
    pub fn new() -> Self {
        Self {
            seed: DEFAULT_LAYOUT_SEED,
        }
    }

    /// Creates a catalog that generates layouts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Generates the layout matching `tier`'s density row.
    pub fn layout_for(&self, tier: PerformanceTier) -> NeuralLayout {
        NeuralLayout::generate(&NetworkDensity::for_tier(tier), self.seed)
    }
}

impl Default for LaneCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SceneSource for LaneCatalog {
    async fn load(
        &self,
        variant: SceneVariant,
        tier: PerformanceTier,
    ) -> Result<Box<dyn SceneLane>, SceneLoadError> {
        log::info!("loading {} lane for {} tier", variant.as_str(), tier);
        let lane: Box<dyn SceneLane> = match variant {
            SceneVariant::Full => Box::new(FullLane::for_tier(tier)),
            SceneVariant::Instanced => Box::new(InstancedLane::for_tier(tier)),
        };
        Ok(lane)
    }
}
