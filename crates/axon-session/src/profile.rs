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

//! The persisted visitor profile and its storage contract.
//!
//! A [`VisitorProfile`] is the only state that outlives a session. It is
//! loaded through a [`ProfileStore`] exactly once when the session begins
//! and written back on every refresh; no code reads or writes ambient
//! global storage. [`MemoryProfileStore`] backs tests and ephemeral runs,
//! [`JsonFileStore`] persists across processes.

use crate::segment::{Behavior, Segment, SEGMENT_ANNOUNCE_CONFIDENCE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Device form factor the session runs on, from the user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Phone-class device.
    Mobile,
    /// Tablet-class device.
    Tablet,
    /// Everything else.
    #[default]
    Desktop,
}

impl DeviceKind {
    /// Lowercase label used on telemetry events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

/// Traffic source the visitor arrived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferrerKind {
    /// A search engine results page.
    Search,
    /// A social or professional network.
    Social,
    /// Any other linking page.
    Referral,
    /// No referrer; typed or bookmarked.
    Direct,
    /// Not classified yet.
    #[default]
    Unknown,
}

/// Classifies a raw user-agent string into a [`DeviceKind`].
///
/// Phone markers win over tablet markers: an Android tablet UA that also
/// says `mobile` is treated as a phone.
pub fn classify_device(user_agent: &str) -> DeviceKind {
    let ua = user_agent.to_lowercase();
    if ua.contains("mobile") || ua.contains("android") || ua.contains("iphone") {
        DeviceKind::Mobile
    } else if ua.contains("tablet") || ua.contains("ipad") {
        DeviceKind::Tablet
    } else {
        DeviceKind::Desktop
    }
}

/// Classifies a referrer URL into a [`ReferrerKind`].
pub fn classify_referrer(referrer: &str) -> ReferrerKind {
    let referrer = referrer.to_lowercase();
    if referrer.contains("google") || referrer.contains("bing") {
        ReferrerKind::Search
    } else if referrer.contains("linkedin") || referrer.contains("twitter") {
        ReferrerKind::Social
    } else if !referrer.is_empty() {
        ReferrerKind::Referral
    } else {
        ReferrerKind::Direct
    }
}

/// Everything the site remembers about one visitor across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorProfile {
    /// Stable identifier minted on first visit.
    pub visitor_id: Uuid,
    /// Resolved segment, once the scorer picks one.
    #[serde(default)]
    pub segment: Option<Segment>,
    /// Content-focus classification from the scorer.
    #[serde(default)]
    pub behavior: Behavior,
    /// Scorer confidence in the current segment, `0.0..=0.9`.
    #[serde(default)]
    pub confidence: f32,
    /// Sessions begun by this visitor, current one included.
    #[serde(default)]
    pub visit_count: u32,
    /// Time spent in the current session, refreshed periodically.
    #[serde(default)]
    pub time_on_site_ms: u64,
    /// Flat engagement measure from the interaction counters.
    #[serde(default)]
    pub interaction_depth: f32,
    /// Device class detected at session start.
    #[serde(default)]
    pub device: DeviceKind,
    /// Traffic source detected at session start.
    #[serde(default)]
    pub referrer: ReferrerKind,
    /// Interest tags carried through the stored document.
    #[serde(default)]
    pub primary_interests: Vec<String>,
}

impl Default for VisitorProfile {
    fn default() -> Self {
        Self {
            visitor_id: Uuid::new_v4(),
            segment: None,
            behavior: Behavior::default(),
            confidence: 0.0,
            visit_count: 0,
            time_on_site_ms: 0,
            interaction_depth: 0.0,
            device: DeviceKind::default(),
            referrer: ReferrerKind::default(),
            primary_interests: Vec::new(),
        }
    }
}

impl VisitorProfile {
    /// Loads the stored profile, or mints a fresh one when the store is
    /// empty.
    pub fn load_or_create(store: &dyn ProfileStore) -> Result<Self, ProfileError> {
        Ok(store.load()?.unwrap_or_default())
    }

    /// Whether the scorer is confident enough to personalize content.
    pub fn is_segmented(&self) -> bool {
        self.confidence > SEGMENT_ANNOUNCE_CONFIDENCE
    }
}

/// An error raised by a profile store.
#[derive(Debug)]
pub enum ProfileError {
    /// The backing medium could not be read or written.
    Io(String),
    /// The stored document does not parse as a profile.
    InvalidFormat(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(reason) => write!(f, "profile store I/O failure: {reason}"),
            Self::InvalidFormat(reason) => write!(f, "stored profile is malformed: {reason}"),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Storage contract for the visitor profile.
///
/// `load` returns `Ok(None)` for a first-time visitor; corruption and I/O
/// failures are errors, absence is not.
pub trait ProfileStore: Send + Sync {
    /// Reads the stored profile, if any exists.
    fn load(&self) -> Result<Option<VisitorProfile>, ProfileError>;
    /// Writes the profile, replacing any previous document.
    fn save(&self, profile: &VisitorProfile) -> Result<(), ProfileError>;
}

/// In-memory store; clones share one slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    slot: Arc<RwLock<Option<VisitorProfile>>>,
}

impl MemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Option<VisitorProfile>, ProfileError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| ProfileError::Io("profile slot poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, profile: &VisitorProfile) -> Result<(), ProfileError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| ProfileError::Io("profile slot poisoned".to_string()))?;
        *slot = Some(profile.clone());
        Ok(())
    }
}

/// Stores the profile as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the given file path. The file is created
    /// on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Option<VisitorProfile>, ProfileError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(ProfileError::Io(err.to_string())),
        };
        let profile =
            serde_json::from_str(&raw).map_err(|e| ProfileError::InvalidFormat(e.to_string()))?;
        Ok(Some(profile))
    }

    fn save(&self, profile: &VisitorProfile) -> Result<(), ProfileError> {
        let raw = serde_json::to_string(profile)
            .map_err(|e| ProfileError::InvalidFormat(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| ProfileError::Io(e.to_string()))
    }
}
