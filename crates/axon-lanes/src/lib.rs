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

//! # Axon Lanes
//!
//! Scene variant implementations: the procedural network layout, the
//! per-frame motion math, the three interchangeable renderers behind the
//! [`SceneLane`] contract, and the asynchronous [`SceneSource`] seam the
//! director loads them through.

#![warn(missing_docs)]

pub mod layout;
pub mod motion;
pub mod scene_lane;
pub mod source;

pub use layout::NeuralLayout;
pub use scene_lane::{FullLane, InstancedLane, SceneLane, VectorLane};
pub use source::{LaneCatalog, SceneSource};
