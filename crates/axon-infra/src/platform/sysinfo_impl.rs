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

//! sysinfo-based implementation of the capability probe traits.

use async_trait::async_trait;
use axon_core::capability::{BatteryRead, BatteryReading, DeviceClass, DeviceProbe, NetworkClass};
use std::sync::{Arc, Mutex};
use sysinfo::System;

const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

/// A capability probe that reads the local host through the `sysinfo`
/// crate.
///
/// sysinfo covers memory and CPU; it has no view of the GPU, the network
/// link, or the battery, so those readings come back absent and never
/// count as downgrade evidence.
pub struct SysinfoProbe {
    system: Arc<Mutex<System>>,
}

impl SysinfoProbe {
    /// Creates a probe with a fully refreshed system snapshot.
    pub fn new() -> Self {
        let mut system = System::new_all();
        system.refresh_all();
        log::debug!(
            "sysinfo probe initialized: {} cpus, {:.1} GiB memory",
            system.cpus().len(),
            system.total_memory() as f64 / BYTES_PER_GIB as f64
        );
        Self {
            system: Arc::new(Mutex::new(system)),
        }
    }

    /// Refreshes the underlying CPU and memory data.
    pub fn refresh(&self) {
        if let Ok(mut system) = self.system.lock() {
            system.refresh_cpu_all();
            system.refresh_memory();
        }
    }

    /// Number of logical CPUs, for diagnostics.
    pub fn cpu_count(&self) -> usize {
        if let Ok(system) = self.system.lock() {
            system.cpus().len()
        } else {
            0
        }
    }

    /// Global CPU load in `0.0..=1.0`, for diagnostics.
    pub fn cpu_load(&self) -> f32 {
        if let Ok(system) = self.system.lock() {
            system.global_cpu_usage() / 100.0
        } else {
            0.0
        }
    }
}

impl DeviceProbe for SysinfoProbe {
    // A native process that got this far has a working context; sysinfo
    // has no reading that could say otherwise.
    fn supports_graphics(&self) -> bool {
        true
    }

    fn gpu_renderer(&self) -> Option<String> {
        None
    }

    fn device_memory_gb(&self) -> Option<f32> {
        if let Ok(system) = self.system.lock() {
            Some((system.total_memory() as f64 / BYTES_PER_GIB as f64) as f32)
        } else {
            None
        }
    }

    fn network_class(&self) -> Option<NetworkClass> {
        None
    }

    fn device_class(&self) -> DeviceClass {
        DeviceClass::Desktop
    }
}

#[async_trait]
impl BatteryRead for SysinfoProbe {
    // sysinfo doesn't expose battery state on all platforms.
    async fn battery(&self) -> Option<BatteryReading> {
        None
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}
