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

//! # Axon Core
//!
//! Foundational crate containing the shared vocabulary of the Axon engine:
//! performance tiers and device capability contracts, render modes, frame
//! metrics, visibility states, tier-keyed scene quality tables, and the
//! telemetry event types exchanged between the higher-level crates.

#![warn(missing_docs)]

pub mod capability;
pub mod event;
pub mod math;
pub mod metrics;
pub mod render;
pub mod telemetry;
pub mod visibility;

pub use capability::PerformanceTier;
pub use render::{RenderMode, SceneVariant};
