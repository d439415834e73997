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

//! # Axon Telemetry
//!
//! Conversion-event collection for the adaptive pipeline. The
//! [`AnalyticsService`] fronts a pluggable [`EventBackend`]: producers
//! either hand it events directly or publish through a cloned
//! [`AnalyticsService::event_sender`] handle that the owner drains on
//! its update cadence. Tracking is fire-and-forget; storage failures
//! never propagate to event producers.

#![warn(missing_docs)]

pub mod service;
pub mod storage;

pub use service::{
    AnalyticsService, ChatAction, SceneInteraction, SessionData, DEFAULT_DRAIN_INTERVAL,
};
pub use storage::{BackendStats, EventBackend, InMemoryBackend, LogBackend};
