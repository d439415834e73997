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

//! Device tier resolution.
//!
//! [`resolve_tier`] folds a [`DeviceReport`] into a [`PerformanceTier`]
//! through a priority-ordered ladder of checks, each of which may only
//! downgrade the running result. [`refine_with_battery`] applies the one
//! reading that resolves asynchronously; its verdict wins over an already
//! published tier.

use axon_core::capability::{
    is_low_power_renderer, BatteryRead, DeviceClass, DeviceProbe, DeviceReport, PerformanceTier,
};

/// Device memory below which the device is forced to the low tier (GiB).
pub const MEMORY_FLOOR_LOW_GB: f32 = 4.0;

/// Device memory below which the device is capped at the medium tier (GiB).
pub const MEMORY_FLOOR_MEDIUM_GB: f32 = 8.0;

/// Classifies a device report into a performance tier.
///
/// Pure and infallible: absent readings are never downgrade evidence, with
/// the one exception of a missing graphics context, which is the strongest
/// downgrade signal there is.
pub fn resolve_tier(report: &DeviceReport) -> PerformanceTier {
    if !report.graphics_context {
        log::info!("no graphics context available, resolving low tier");
        return PerformanceTier::Low;
    }

    let mut tier = PerformanceTier::High;

    if let Some(renderer) = report.gpu_renderer.as_deref() {
        if is_low_power_renderer(renderer) {
            log::debug!("low-power gpu detected ({renderer}), capping at medium");
            tier = tier.capped_at(PerformanceTier::Medium);
        }
    }

    if let Some(memory_gb) = report.device_memory_gb {
        if memory_gb < MEMORY_FLOOR_LOW_GB {
            log::debug!("device memory {memory_gb:.1} GiB below low floor");
            tier = PerformanceTier::Low;
        } else if memory_gb < MEMORY_FLOOR_MEDIUM_GB {
            tier = tier.capped_at(PerformanceTier::Medium);
        }
    }

    if let Some(network) = report.network {
        if network.is_slow() {
            log::debug!("slow network class, forcing low tier");
            tier = PerformanceTier::Low;
        }
    }

    if report.device_class == DeviceClass::Mobile && tier == PerformanceTier::High {
        tier = PerformanceTier::Medium;
    }

    if let Some(battery) = report.battery {
        if battery.is_critical() {
            log::debug!("battery at {:.0}%, forcing low tier", battery.level * 100.0);
            tier = PerformanceTier::Low;
        }
    }

    log::info!("resolved performance tier: {tier}");
    tier
}

/// Applies the asynchronous battery reading on top of an already resolved tier.
///
/// A critical charge forces `Low`; any other outcome, including a host that
/// cannot read the battery at all, leaves the tier untouched.
pub async fn refine_with_battery(
    tier: PerformanceTier,
    battery: &dyn BatteryRead,
) -> PerformanceTier {
    match battery.battery().await {
        Some(reading) if reading.is_critical() => {
            log::info!(
                "battery at {:.0}% ({}), forcing low tier",
                reading.level * 100.0,
                if reading.charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            PerformanceTier::Low
        }
        _ => tier,
    }
}

/// Runs the full probe sequence: synchronous report, then battery refinement.
pub async fn probe_device(
    probe: &dyn DeviceProbe,
    battery: &dyn BatteryRead,
) -> PerformanceTier {
    let tier = resolve_tier(&probe.report());
    refine_with_battery(tier, battery).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axon_core::capability::{BatteryReading, NetworkClass};

    struct StubBattery(Option<BatteryReading>);

    #[async_trait]
    impl BatteryRead for StubBattery {
        async fn battery(&self) -> Option<BatteryReading> {
            self.0
        }
    }

    #[test]
    fn test_no_graphics_context_always_resolves_low() {
        let profiles = [
            DeviceReport::default(),
            DeviceReport {
                gpu_renderer: Some("NVIDIA GeForce RTX 4090".into()),
                device_memory_gb: Some(64.0),
                ..DeviceReport::default()
            },
            DeviceReport {
                device_class: DeviceClass::Mobile,
                ..DeviceReport::default()
            },
        ];
        for profile in profiles {
            let report = DeviceReport {
                graphics_context: false,
                ..profile
            };
            assert_eq!(resolve_tier(&report), PerformanceTier::Low);
        }
    }

    #[test]
    fn test_memory_below_floor_forces_low_regardless_of_gpu() {
        let report = DeviceReport {
            gpu_renderer: Some("NVIDIA GeForce RTX 4090".into()),
            device_memory_gb: Some(3.9),
            ..DeviceReport::default()
        };
        assert_eq!(resolve_tier(&report), PerformanceTier::Low);
    }

    #[test]
    fn test_memory_between_floors_caps_at_medium() {
        let report = DeviceReport {
            device_memory_gb: Some(6.0),
            ..DeviceReport::default()
        };
        assert_eq!(resolve_tier(&report), PerformanceTier::Medium);
    }

    #[test]
    fn test_integrated_gpu_caps_at_medium() {
        let report = DeviceReport {
            gpu_renderer: Some("Intel(R) Iris(R) Xe Graphics".into()),
            device_memory_gb: Some(16.0),
            ..DeviceReport::default()
        };
        assert_eq!(resolve_tier(&report), PerformanceTier::Medium);
    }

    #[test]
    fn test_slow_network_forces_low() {
        let report = DeviceReport {
            device_memory_gb: Some(16.0),
            network: Some(NetworkClass::ThreeG),
            ..DeviceReport::default()
        };
        assert_eq!(resolve_tier(&report), PerformanceTier::Low);
    }

    #[test]
    fn test_mobile_only_downgrades_from_high() {
        let mobile_fast = DeviceReport {
            device_class: DeviceClass::Mobile,
            ..DeviceReport::default()
        };
        assert_eq!(resolve_tier(&mobile_fast), PerformanceTier::Medium);

        // Already medium from the gpu check; mobile leaves it alone.
        let mobile_integrated = DeviceReport {
            gpu_renderer: Some("Intel UHD Graphics".into()),
            device_class: DeviceClass::Mobile,
            ..DeviceReport::default()
        };
        assert_eq!(resolve_tier(&mobile_integrated), PerformanceTier::Medium);
    }

    #[test]
    fn test_cached_critical_battery_forces_low() {
        let report = DeviceReport {
            battery: Some(BatteryReading {
                level: 0.1,
                charging: false,
            }),
            ..DeviceReport::default()
        };
        assert_eq!(resolve_tier(&report), PerformanceTier::Low);
    }

    #[test]
    fn test_absent_readings_resolve_high() {
        assert_eq!(
            resolve_tier(&DeviceReport::default()),
            PerformanceTier::High
        );
    }

    #[tokio::test]
    async fn test_battery_refinement_forces_low() {
        let battery = StubBattery(Some(BatteryReading {
            level: 0.15,
            charging: true,
        }));
        let tier = refine_with_battery(PerformanceTier::High, &battery).await;
        assert_eq!(tier, PerformanceTier::Low);
    }

    #[tokio::test]
    async fn test_unreadable_battery_keeps_tier() {
        let battery = StubBattery(None);
        let tier = refine_with_battery(PerformanceTier::High, &battery).await;
        assert_eq!(tier, PerformanceTier::High);

        let healthy = StubBattery(Some(BatteryReading {
            level: 0.8,
            charging: false,
        }));
        let tier = refine_with_battery(PerformanceTier::Medium, &healthy).await;
        assert_eq!(tier, PerformanceTier::Medium);
    }
}
