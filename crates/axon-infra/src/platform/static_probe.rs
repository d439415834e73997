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

//! A probe that answers from a fixed, caller-supplied report.

use async_trait::async_trait;
use axon_core::capability::{
    BatteryRead, BatteryReading, DeviceClass, DeviceProbe, DeviceReport, NetworkClass,
};

/// Capability probe over a synthetic [`DeviceReport`].
///
/// Used by tests and the showcase to replay a chosen device profile
/// instead of inspecting the local host.
#[derive(Debug, Clone)]
pub struct StaticProbe {
    report: DeviceReport,
    battery: Option<BatteryReading>,
}

impl StaticProbe {
    /// Creates a probe that answers from `report`; the asynchronous
    /// battery reading stays absent.
    pub fn new(report: DeviceReport) -> Self {
        Self {
            report,
            battery: None,
        }
    }

    /// Sets the battery reading the probe resolves asynchronously.
    pub fn with_battery(mut self, reading: BatteryReading) -> Self {
        self.battery = Some(reading);
        self
    }
}

impl DeviceProbe for StaticProbe {
    fn supports_graphics(&self) -> bool {
        self.report.graphics_context
    }

    fn gpu_renderer(&self) -> Option<String> {
        self.report.gpu_renderer.clone()
    }

    fn device_memory_gb(&self) -> Option<f32> {
        self.report.device_memory_gb
    }

    fn network_class(&self) -> Option<NetworkClass> {
        self.report.network
    }

    fn device_class(&self) -> DeviceClass {
        self.report.device_class
    }
}

#[async_trait]
impl BatteryRead for StaticProbe {
    async fn battery(&self) -> Option<BatteryReading> {
        self.battery
    }
}
