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

//! Conversion-event types exchanged with the analytics service.
//!
//! Events are fire-and-forget: producers publish them and never observe a
//! response. Event names and categories are free-form strings so new sinks
//! never require a vocabulary change here; the constants and named
//! constructors below cover the vocabulary the pipeline itself emits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of events emitted by the rendering fallback pipeline.
pub const CATEGORY_3D_RENDERING: &str = "3D_rendering";
/// Category of scene quality and load-path tracking events.
pub const CATEGORY_3D_VISUALIZATION: &str = "3d_visualization";
/// Category of segmentation and content-personalization events.
pub const CATEGORY_PERSONALIZATION: &str = "personalization";
/// Category of chat widget events.
pub const CATEGORY_AI_FEATURES: &str = "ai_features";

/// One fire-and-forget analytics event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionEvent {
    /// Event name, e.g. `performance_fallback`.
    #[serde(rename = "event")]
    pub name: String,
    /// Free-form grouping for downstream filtering.
    pub category: String,
    /// Optional qualifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Optional numeric payload (FPS, confidence percentage, milliseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// Visitor segment label, once one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_segment: Option<String>,
    /// Visitor behavior label from the segmentation scorer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_behavior: Option<String>,
    /// Device form-factor label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

impl ConversionEvent {
    /// Creates an event with just a name and category.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            label: None,
            value: None,
            user_segment: None,
            user_behavior: None,
            device_type: None,
        }
    }

    /// Attaches a free-form qualifier.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attaches a numeric payload.
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Attaches the visitor segment label.
    pub fn with_user_segment(mut self, segment: impl Into<String>) -> Self {
        self.user_segment = Some(segment.into());
        self
    }

    /// Attaches the visitor behavior label.
    pub fn with_user_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.user_behavior = Some(behavior.into());
        self
    }

    /// Attaches the device form-factor label.
    pub fn with_device_type(mut self, device: impl Into<String>) -> Self {
        self.device_type = Some(device.into());
        self
    }

    /// Emitted once when the director locks the 2D fallback after sustained
    /// low frame rates. Carries the offending average FPS.
    pub fn performance_fallback(average_fps: f32) -> Self {
        let fps = average_fps.round() as i64;
        Self::new("performance_fallback", CATEGORY_3D_RENDERING)
            .with_label(format!("fps_{fps}"))
            .with_value(fps)
    }

    /// Emitted when a 3D scene module fails to load or initialize.
    pub fn render_exception() -> Self {
        Self::new("exception", CATEGORY_3D_RENDERING).with_label("3D_render_fallback")
    }

    /// Emitted when the segmentation scorer settles on a new segment with
    /// enough confidence to announce it.
    pub fn segment_identified(segment: &str, confidence: f32) -> Self {
        Self::new("segment_identified", CATEGORY_PERSONALIZATION)
            .with_label("behavior_analysis")
            .with_value((confidence * 100.0).round() as i64)
            .with_user_segment(segment)
    }

    /// Serializes the event for structured sinks.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Errors a telemetry storage backend may report.
///
/// These never reach event producers: the analytics service logs and
/// swallows them, keeping `track` infallible.
#[derive(Debug)]
pub enum TelemetryError {
    /// The backing store rejected the write.
    Storage(String),
    /// The service or its channel has shut down.
    Closed,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(reason) => write!(f, "telemetry storage failure: {reason}"),
            Self::Closed => write!(f, "telemetry service closed"),
        }
    }
}

impl std::error::Error for TelemetryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_constructors_use_stable_names() {
        let fallback = ConversionEvent::performance_fallback(22.4);
        assert_eq!(fallback.name, "performance_fallback");
        assert_eq!(fallback.category, CATEGORY_3D_RENDERING);
        assert_eq!(fallback.label.as_deref(), Some("fps_22"));
        assert_eq!(fallback.value, Some(22));

        let exception = ConversionEvent::render_exception();
        assert_eq!(exception.name, "exception");
        assert_eq!(exception.label.as_deref(), Some("3D_render_fallback"));

        let segment = ConversionEvent::segment_identified("enterprise", 0.75);
        assert_eq!(segment.category, CATEGORY_PERSONALIZATION);
        assert_eq!(segment.label.as_deref(), Some("behavior_analysis"));
        assert_eq!(segment.user_segment.as_deref(), Some("enterprise"));
        assert_eq!(segment.value, Some(75));
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let event = ConversionEvent::new("contact_attempt", "conversion_funnel");
        let json = event.to_json();
        assert_eq!(json["event"], "contact_attempt");
        assert_eq!(json["category"], "conversion_funnel");
        assert!(json.get("label").is_none());
        assert!(json.get("value").is_none());
        assert!(json.get("user_segment").is_none());
    }

    #[test]
    fn test_builder_chain() {
        let event = ConversionEvent::new("chatbot_interaction", CATEGORY_AI_FEATURES)
            .with_label("message_sent_text")
            .with_value(1)
            .with_user_segment("individual")
            .with_user_behavior("technical_focused")
            .with_device_type("mobile");
        assert_eq!(event.label.as_deref(), Some("message_sent_text"));
        assert_eq!(event.user_behavior.as_deref(), Some("technical_focused"));
        assert_eq!(event.device_type.as_deref(), Some("mobile"));
    }
}
