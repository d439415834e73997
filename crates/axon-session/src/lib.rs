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

//! # Axon Session
//!
//! Visitor-facing session state: the persisted [`VisitorProfile`] with its
//! explicit load/save lifecycle, the [`InteractionCounters`] fed by raw
//! input trackers, the pure segmentation scorer ([`score`]), and the
//! content recommendations derived from its outcome.
//!
//! [`SessionContext`] is the assembled unit: one per page session, owning
//! the profile, the counters, and the store handle.

#![warn(missing_docs)]

pub mod content;
pub mod context;
pub mod counters;
pub mod profile;
pub mod segment;

pub use content::{recommend, PersonalizedContent};
pub use context::SessionContext;
pub use counters::{ClickCadence, ClickTracker, InteractionCounters, MouseTracker, SectionKind};
pub use profile::{
    classify_device, classify_referrer, DeviceKind, JsonFileStore, MemoryProfileStore,
    ProfileError, ProfileStore, ReferrerKind, VisitorProfile,
};
pub use segment::{score, Behavior, Segment, SegmentScore};
