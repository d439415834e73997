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

//! # Axon Control
//!
//! The adaptive control plane: resolves a device capability report into a
//! performance tier, tracks the live frame rate, gates work on container
//! visibility, and arbitrates which rendering mode the session runs in.
//!
//! The flow between the pieces is one-directional: [`resolve_tier`] and
//! [`refine_with_battery`] produce the tier, [`VisibilityGate`] and
//! [`FrameMonitor`] produce observations, and [`SceneDirector`] folds all of
//! them into the session's [`RenderMode`](axon_core::render::RenderMode).

#![warn(missing_docs)]

pub mod director;
pub mod history;
pub mod monitor;
pub mod tier;
pub mod visibility;

pub use director::{DirectorConfig, LoadTicket, SceneDirector};
pub use monitor::FrameMonitor;
pub use tier::{probe_device, refine_with_battery, resolve_tier};
pub use visibility::{GateConfig, VisibilityGate};
