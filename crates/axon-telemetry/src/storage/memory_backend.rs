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

use crate::storage::backend::{BackendStats, EventBackend};
use axon_core::telemetry::{
    ConversionEvent, TelemetryError, CATEGORY_3D_RENDERING, CATEGORY_3D_VISUALIZATION,
    CATEGORY_AI_FEATURES, CATEGORY_PERSONALIZATION,
};
use std::sync::RwLock;

/// In-memory event backend using `RwLock<Vec>`.
///
/// Events arrive rarely (a handful per session), so a plain appended
/// vector under a read-write lock is plenty: concurrent readers, one
/// writer, arrival order preserved.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    events: RwLock<Vec<ConversionEvent>>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored event in the given category.
    pub fn events_in_category(&self, category: &str) -> Vec<ConversionEvent> {
        if let Ok(events) = self.events.read() {
            events
                .iter()
                .filter(|event| event.category == category)
                .cloned()
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Per-category counts over the stored events.
    pub fn get_stats(&self) -> BackendStats {
        let mut stats = BackendStats::default();
        if let Ok(events) = self.events.read() {
            stats.total_events = events.len();
            for event in events.iter() {
                match event.category.as_str() {
                    CATEGORY_3D_RENDERING => stats.rendering_events += 1,
                    CATEGORY_3D_VISUALIZATION => stats.visualization_events += 1,
                    CATEGORY_PERSONALIZATION => stats.personalization_events += 1,
                    CATEGORY_AI_FEATURES => stats.chat_events += 1,
                    _ => {}
                }
            }
        }
        stats
    }
}

impl EventBackend for InMemoryBackend {
    fn record(&self, event: ConversionEvent) -> Result<(), TelemetryError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| TelemetryError::Storage("failed to acquire write lock".to_string()))?;
        events.push(event);
        Ok(())
    }

    fn list(&self) -> Vec<ConversionEvent> {
        if let Ok(events) = self.events.read() {
            events.clone()
        } else {
            Vec::new()
        }
    }

    fn count(&self) -> usize {
        if let Ok(events) = self.events.read() {
            events.len()
        } else {
            0
        }
    }

    fn clear(&self) -> Result<(), TelemetryError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| TelemetryError::Storage("failed to acquire write lock".to_string()))?;
        events.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_arrival_order() {
        let backend = InMemoryBackend::new();
        backend
            .record(ConversionEvent::render_exception())
            .unwrap();
        backend
            .record(ConversionEvent::performance_fallback(24.0))
            .unwrap();

        let events = backend.list();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "exception");
        assert_eq!(events[1].name, "performance_fallback");
        assert_eq!(backend.count(), 2);
    }

    #[test]
    fn test_clear_empties_the_store() {
        let backend = InMemoryBackend::new();
        backend
            .record(ConversionEvent::segment_identified("individual", 0.8))
            .unwrap();
        assert_eq!(backend.count(), 1);

        backend.clear().unwrap();
        assert_eq!(backend.count(), 0);
        assert!(backend.list().is_empty());
    }

    #[test]
    fn test_category_filter() {
        let backend = InMemoryBackend::new();
        backend
            .record(ConversionEvent::render_exception())
            .unwrap();
        backend
            .record(ConversionEvent::segment_identified("enterprise", 0.7))
            .unwrap();

        let rendering = backend.events_in_category(CATEGORY_3D_RENDERING);
        assert_eq!(rendering.len(), 1);
        assert_eq!(rendering[0].name, "exception");
        assert!(backend.events_in_category("no_such_category").is_empty());
    }

    #[test]
    fn test_stats_count_per_category() {
        let backend = InMemoryBackend::new();
        backend
            .record(ConversionEvent::render_exception())
            .unwrap();
        backend
            .record(ConversionEvent::performance_fallback(20.0))
            .unwrap();
        backend
            .record(ConversionEvent::segment_identified("individual", 0.9))
            .unwrap();
        backend
            .record(ConversionEvent::new("chatbot_interaction", CATEGORY_AI_FEATURES))
            .unwrap();

        let stats = backend.get_stats();
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.rendering_events, 2);
        assert_eq!(stats.personalization_events, 1);
        assert_eq!(stats.chat_events, 1);
        assert_eq!(stats.visualization_events, 0);
    }
}
