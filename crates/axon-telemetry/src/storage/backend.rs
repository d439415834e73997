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

//! The storage contract for conversion events.

use axon_core::telemetry::{ConversionEvent, TelemetryError};
use std::fmt::Debug;

/// Trait defining the interface for event storage backends.
///
/// `record` and `clear` are fallible; the inspection methods degrade to
/// empty results rather than fail, so dashboards and tests can always
/// read.
pub trait EventBackend: Send + Sync + Debug {
    /// Appends one event to the store.
    fn record(&self, event: ConversionEvent) -> Result<(), TelemetryError>;

    /// Returns every stored event in arrival order.
    fn list(&self) -> Vec<ConversionEvent>;

    /// Returns the number of stored events.
    fn count(&self) -> usize;

    /// Removes all stored events.
    fn clear(&self) -> Result<(), TelemetryError>;
}

/// Per-category counts over a backend's stored events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendStats {
    /// Total number of stored events.
    pub total_events: usize,
    /// Events in the rendering-fallback category.
    pub rendering_events: usize,
    /// Events in the scene quality/load-path category.
    pub visualization_events: usize,
    /// Events in the segmentation/personalization category.
    pub personalization_events: usize,
    /// Events in the chat widget category.
    pub chat_events: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock backend for testing
    #[derive(Debug)]
    struct MockBackend;

    impl EventBackend for MockBackend {
        fn record(&self, _event: ConversionEvent) -> Result<(), TelemetryError> {
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

    #[test]
    fn test_backend_trait_compilation() {
        let backend = MockBackend;
        assert_eq!(backend.count(), 0);
        assert!(backend.record(ConversionEvent::render_exception()).is_ok());
        assert!(backend.list().is_empty());
    }
}
