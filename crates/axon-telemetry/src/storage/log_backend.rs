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

use crate::storage::backend::EventBackend;
use axon_core::telemetry::{ConversionEvent, TelemetryError};

/// Write-only backend that emits each event as a structured log line.
///
/// Nothing is retained: `list` and `count` always report an empty store.
/// Useful in development, or composed next to a real sink.
#[derive(Debug, Default)]
pub struct LogBackend;

impl LogBackend {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

impl EventBackend for LogBackend {
    fn record(&self, event: ConversionEvent) -> Result<(), TelemetryError> {
        log::info!(
            target: "axon_telemetry",
            "event {} ({}): {}",
            event.name,
            event.category,
            event.to_json()
        );
        Ok(())
    }

    fn list(&self) -> Vec<ConversionEvent> {
        Vec::new()
    }

    fn count(&self) -> usize {
        0
    }

    fn clear(&self) -> Result<(), TelemetryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_backend_retains_nothing() {
        let backend = LogBackend::new();
        backend
            .record(ConversionEvent::performance_fallback(18.0))
            .unwrap();
        assert_eq!(backend.count(), 0);
        assert!(backend.list().is_empty());
        assert!(backend.clear().is_ok());
    }
}
