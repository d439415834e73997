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

//! Device capability vocabulary and the traits host integrations implement.
//!
//! The tier prober in `axon-control` consumes a [`DeviceReport`] snapshot; a
//! host produces one through [`DeviceProbe`]. Battery state is the only
//! reading that resolves asynchronously, so it lives behind its own
//! [`BatteryRead`] trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Coarse device capability classification.
///
/// Ordered so that `Low < Medium < High`, which lets downgrade logic use
/// [`PerformanceTier::capped_at`] without special cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    /// Weak or power-constrained device; only the 2D fallback is allowed.
    Low,
    /// Capable device with a caveat (integrated GPU, limited memory, mobile).
    Medium,
    /// Full desktop-class device.
    High,
}

impl PerformanceTier {
    /// Returns the lower of `self` and `ceiling`. Downgrades never upgrade.
    #[inline]
    pub fn capped_at(self, ceiling: Self) -> Self {
        self.min(ceiling)
    }

    /// Stable lowercase label used in telemetry payloads and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renderer-string substrings that identify an integrated or low-power GPU.
pub const LOW_POWER_GPU_SIGNATURES: &[&str] = &["intel", "integrated"];

/// Returns `true` when a GPU renderer string matches a low-power signature.
///
/// Matching is case-insensitive substring search; an unrecognized string is
/// treated as a capable GPU (absence of evidence never downgrades).
pub fn is_low_power_renderer(renderer: &str) -> bool {
    let lower = renderer.to_ascii_lowercase();
    LOW_POWER_GPU_SIGNATURES
        .iter()
        .any(|sig| lower.contains(sig))
}

/// Effective network class as reported by the host connection API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkClass {
    /// Broadband-equivalent connectivity.
    #[serde(rename = "4g")]
    FourG,
    /// Slow mobile connectivity.
    #[serde(rename = "3g")]
    ThreeG,
    /// Very slow mobile connectivity.
    #[serde(rename = "2g")]
    TwoG,
    /// Worst-case mobile connectivity.
    #[serde(rename = "slow-2g")]
    SlowTwoG,
}

impl NetworkClass {
    /// `true` for classes slow enough to rule the 3D path out entirely.
    pub fn is_slow(&self) -> bool {
        !matches!(self, Self::FourG)
    }
}

/// Broad form-factor split used by the prober and the segmentation scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Desktop or laptop.
    #[default]
    Desktop,
    /// Phone or tablet.
    Mobile,
}

impl DeviceClass {
    /// Stable lowercase label for telemetry payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

/// Battery charge fraction below which the device is treated as critical.
pub const BATTERY_CRITICAL_LEVEL: f32 = 0.20;

/// A point-in-time battery reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryReading {
    /// Charge fraction in `0.0..=1.0`.
    pub level: f32,
    /// Whether the device is currently charging.
    pub charging: bool,
}

impl BatteryReading {
    /// `true` when the charge has dropped below [`BATTERY_CRITICAL_LEVEL`].
    ///
    /// Charging state is reported for diagnostics but does not affect the
    /// classification.
    pub fn is_critical(&self) -> bool {
        self.level < BATTERY_CRITICAL_LEVEL
    }
}

/// A snapshot of every synchronous capability reading the host could take.
///
/// Absent readings are `None` and are never treated as downgrade evidence;
/// the one exception is `graphics_context`, whose absence is itself the
/// strongest possible downgrade signal.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceReport {
    /// Whether a graphics context could be created at all.
    pub graphics_context: bool,
    /// Unmasked GPU renderer string, when obtainable.
    pub gpu_renderer: Option<String>,
    /// Reported device memory in GiB, when obtainable.
    pub device_memory_gb: Option<f32>,
    /// Effective network class, when obtainable.
    pub network: Option<NetworkClass>,
    /// Form factor of the device.
    pub device_class: DeviceClass,
    /// Synchronously available battery reading, if the host has one cached.
    pub battery: Option<BatteryReading>,
}

impl Default for DeviceReport {
    /// A report carrying no evidence beyond a working graphics context.
    fn default() -> Self {
        Self {
            graphics_context: true,
            gpu_renderer: None,
            device_memory_gb: None,
            network: None,
            device_class: DeviceClass::Desktop,
            battery: None,
        }
    }
}

/// Trait for taking the synchronous capability readings of the host.
pub trait DeviceProbe: Send + Sync {
    /// Whether a graphics context can be created.
    fn supports_graphics(&self) -> bool;
    /// Unmasked GPU renderer string, when obtainable.
    fn gpu_renderer(&self) -> Option<String>;
    /// Reported device memory in GiB, when obtainable.
    fn device_memory_gb(&self) -> Option<f32>;
    /// Effective network class, when obtainable.
    fn network_class(&self) -> Option<NetworkClass>;
    /// Form factor of the device.
    fn device_class(&self) -> DeviceClass;

    /// Assembles the synchronous readings into a [`DeviceReport`].
    ///
    /// The battery field stays `None` here; battery resolution is the
    /// asynchronous concern of [`BatteryRead`].
    fn report(&self) -> DeviceReport {
        DeviceReport {
            graphics_context: self.supports_graphics(),
            gpu_renderer: self.gpu_renderer(),
            device_memory_gb: self.device_memory_gb(),
            network: self.network_class(),
            device_class: self.device_class(),
            battery: None,
        }
    }
}

/// Trait for the asynchronous battery reading.
///
/// The reading may resolve well after an initial tier has been published;
/// the prober applies it as a final, winning downgrade.
#[async_trait]
pub trait BatteryRead: Send + Sync {
    /// Returns the current battery reading, or `None` when the host cannot
    /// take one.
    async fn battery(&self) -> Option<BatteryReading>;
}
