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

//! The analytics service: infallible event intake over a pluggable store.

use crate::storage::{EventBackend, InMemoryBackend};
use axon_core::capability::PerformanceTier;
use axon_core::event::EventBus;
use axon_core::telemetry::{
    ConversionEvent, CATEGORY_3D_VISUALIZATION, CATEGORY_AI_FEATURES, CATEGORY_PERSONALIZATION,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How often `tick` drains the event bus by default.
pub const DEFAULT_DRAIN_INTERVAL: Duration = Duration::from_millis(500);

/// How a 3D scene load (or unload) came about, for performance events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneInteraction {
    /// The director mounted the scene on its own after the settle delay.
    AutoLoad,
    /// The visitor asked for it.
    UserInteraction,
    /// The scene was torn down in favor of the 2D fallback.
    Fallback,
}

impl SceneInteraction {
    /// Label fragment used on `3d_performance` events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoLoad => "auto_load",
            Self::UserInteraction => "user_interaction",
            Self::Fallback => "fallback",
        }
    }
}

/// Chat widget actions reported to analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    /// The widget was opened.
    Open,
    /// The visitor sent a message.
    MessageSent,
    /// A reply arrived.
    MessageReceived,
    /// The widget was closed.
    Close,
}

impl ChatAction {
    /// Label fragment used on `chatbot_interaction` events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::MessageSent => "message_sent",
            Self::MessageReceived => "message_received",
            Self::Close => "close",
        }
    }
}

/// Snapshot of the service's session identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// Identifier minted when the service was created.
    pub session_id: Uuid,
    /// Caller-supplied user identifier, once known.
    pub user_id: Option<String>,
    /// Whether `initialize` has run.
    pub initialized: bool,
}

/// Fire-and-forget analytics over a pluggable [`EventBackend`].
///
/// `track` never fails from the caller's point of view: backend errors
/// are logged at `warn` and swallowed. Producers that should not hold
/// the service publish through [`AnalyticsService::event_sender`]; the
/// owner drains them with [`AnalyticsService::tick`].
#[derive(Debug)]
pub struct AnalyticsService {
    session_id: Uuid,
    user_id: Option<String>,
    initialized: bool,
    backend: Arc<dyn EventBackend>,
    bus: EventBus<ConversionEvent>,
    last_drain: Instant,
    drain_interval: Duration,
}

impl AnalyticsService {
    /// Creates a service over a fresh [`InMemoryBackend`] with the default
    /// drain interval.
    pub fn new() -> Self {
        Self::with_backend(Arc::new(InMemoryBackend::new()))
    }

    /// Creates a service over the given backend with the default drain
    /// interval.
    pub fn with_backend(backend: Arc<dyn EventBackend>) -> Self {
        Self::with_drain_interval(backend, DEFAULT_DRAIN_INTERVAL)
    }

    /// Creates a service that drains its bus at the given interval.
    pub fn with_drain_interval(backend: Arc<dyn EventBackend>, drain_interval: Duration) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_id: None,
            initialized: false,
            backend,
            bus: EventBus::new(),
            last_drain: Instant::now(),
            drain_interval,
        }
    }

    /// The identifier stamped on this analytics session.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The backend events are recorded into.
    pub fn backend(&self) -> &Arc<dyn EventBackend> {
        &self.backend
    }

    /// Marks the service ready and optionally binds a user identifier.
    /// Calling it again is a no-op.
    pub fn initialize(&mut self, user_id: Option<&str>) {
        if self.initialized {
            return;
        }
        if let Some(user_id) = user_id {
            self.user_id = Some(user_id.to_string());
        }
        self.initialized = true;
        log::info!(
            "analytics session {} initialized (user: {})",
            self.session_id,
            self.user_id.as_deref().unwrap_or("anonymous")
        );
    }

    /// Snapshot of the session identity.
    pub fn session_data(&self) -> SessionData {
        SessionData {
            session_id: self.session_id,
            user_id: self.user_id.clone(),
            initialized: self.initialized,
        }
    }

    /// Hands out a producer handle onto the service's event bus.
    pub fn event_sender(&self) -> flume::Sender<ConversionEvent> {
        self.bus.sender()
    }

    /// Should be called periodically. Once per drain interval, moves every
    /// queued bus event into the backend; returns how many were recorded.
    pub fn tick(&mut self) -> usize {
        if self.last_drain.elapsed() < self.drain_interval {
            return 0;
        }
        self.last_drain = Instant::now();

        let pending = self.bus.drain_pending();
        let drained = pending.len();
        for event in pending {
            self.track(event);
        }
        drained
    }

    /// Records one event. Backend failures are logged and swallowed;
    /// callers never observe an error.
    pub fn track(&self, event: ConversionEvent) {
        log::debug!("conversion event: {}", event.to_json());
        if let Err(err) = self.backend.record(event) {
            log::warn!("analytics backend rejected event: {err}");
        }
    }

    /// Tracks a generic engagement action.
    pub fn track_engagement(
        &self,
        action: &str,
        category: &str,
        label: Option<&str>,
        value: Option<i64>,
    ) {
        let mut event = ConversionEvent::new(action, category);
        if let Some(label) = label {
            event = event.with_label(label);
        }
        if let Some(value) = value {
            event = event.with_value(value);
        }
        self.track(event);
    }

    /// Tracks a personalization event: confidence is reported as a rounded
    /// percentage, the interaction type becomes the label.
    pub fn track_personalization(
        &self,
        name: &str,
        segment: &str,
        confidence: f32,
        interaction_type: &str,
    ) {
        self.track(
            ConversionEvent::new(name, CATEGORY_PERSONALIZATION)
                .with_label(interaction_type)
                .with_value((confidence * 100.0).round() as i64)
                .with_user_segment(segment),
        );
    }

    /// Tracks that segment-tailored content was shown.
    pub fn track_adaptive_content(&self, segment: &str, content_type: &str) {
        self.track_personalization("adaptive_content_shown", segment, 1.0, content_type);
    }

    /// Tracks that the chat widget switched to a segment-tailored persona.
    pub fn track_chatbot_personalized(&self, segment: &str) {
        self.track_personalization("chatbot_personalized", segment, 1.0, "chatbot_response");
    }

    /// Tracks 3D scene performance against the path that mounted it.
    pub fn track_3d_performance(
        &self,
        tier: PerformanceTier,
        fps: f32,
        interaction: SceneInteraction,
    ) {
        self.track(
            ConversionEvent::new("3d_performance", CATEGORY_3D_VISUALIZATION)
                .with_label(format!("{}_{}", tier.as_str(), interaction.as_str()))
                .with_value(fps.round() as i64),
        );
    }

    /// Tracks a chat widget interaction.
    pub fn track_chatbot_interaction(
        &self,
        action: ChatAction,
        user_segment: Option<&str>,
        message_type: Option<&str>,
    ) {
        let mut event = ConversionEvent::new("chatbot_interaction", CATEGORY_AI_FEATURES)
            .with_label(format!(
                "{}_{}",
                action.as_str(),
                message_type.unwrap_or("unknown")
            ));
        if let Some(segment) = user_segment {
            event = event.with_user_segment(segment);
        }
        self.track(event);
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_core::telemetry::TelemetryError;

    #[derive(Debug)]
    struct RejectingBackend;

    impl EventBackend for RejectingBackend {
        fn record(&self, _event: ConversionEvent) -> Result<(), TelemetryError> {
            Err(TelemetryError::Storage("sink offline".to_string()))
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

    fn shared_service() -> (AnalyticsService, Arc<InMemoryBackend>) {
        let store = Arc::new(InMemoryBackend::new());
        let service = AnalyticsService::with_drain_interval(store.clone(), Duration::ZERO);
        (service, store)
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (mut service, _store) = shared_service();
        assert!(!service.session_data().initialized);

        service.initialize(Some("visitor-7"));
        service.initialize(Some("someone-else"));

        let data = service.session_data();
        assert!(data.initialized);
        assert_eq!(data.user_id.as_deref(), Some("visitor-7"));
        assert_eq!(data.session_id, service.session_id());
    }

    #[test]
    fn test_track_reaches_the_backend() {
        let (service, store) = shared_service();
        service.track(ConversionEvent::performance_fallback(22.0));

        let events = store.list();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "performance_fallback");
    }

    #[test]
    fn test_track_swallows_backend_failures() {
        let service = AnalyticsService::with_backend(Arc::new(RejectingBackend));
        // Must not panic or surface the storage error.
        service.track(ConversionEvent::render_exception());
    }

    #[test]
    fn test_tick_drains_bus_producers() {
        let (mut service, store) = shared_service();
        let sender = service.event_sender();
        sender
            .send(ConversionEvent::render_exception())
            .expect("bus is alive");
        sender
            .send(ConversionEvent::segment_identified("enterprise", 0.7))
            .expect("bus is alive");

        assert_eq!(service.tick(), 2);
        assert_eq!(store.count(), 2);
        assert_eq!(service.tick(), 0, "nothing left to drain");
    }

    #[test]
    fn test_tick_respects_the_drain_interval() {
        let store = Arc::new(InMemoryBackend::new());
        let mut service =
            AnalyticsService::with_drain_interval(store.clone(), Duration::from_secs(3600));
        service
            .event_sender()
            .send(ConversionEvent::render_exception())
            .expect("bus is alive");

        assert_eq!(service.tick(), 0, "interval has not passed");
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_3d_performance_label_combines_tier_and_path() {
        let (service, store) = shared_service();
        service.track_3d_performance(PerformanceTier::High, 58.6, SceneInteraction::AutoLoad);

        let events = store.list();
        assert_eq!(events[0].name, "3d_performance");
        assert_eq!(events[0].category, CATEGORY_3D_VISUALIZATION);
        assert_eq!(events[0].label.as_deref(), Some("high_auto_load"));
        assert_eq!(events[0].value, Some(59));
    }

    #[test]
    fn test_chatbot_label_defaults_the_message_type() {
        let (service, store) = shared_service();
        service.track_chatbot_interaction(ChatAction::Open, None, None);
        service.track_chatbot_interaction(
            ChatAction::MessageSent,
            Some("individual"),
            Some("text"),
        );

        let events = store.list();
        assert_eq!(events[0].label.as_deref(), Some("open_unknown"));
        assert_eq!(events[0].user_segment, None);
        assert_eq!(events[1].label.as_deref(), Some("message_sent_text"));
        assert_eq!(events[1].user_segment.as_deref(), Some("individual"));
    }

    #[test]
    fn test_personalization_reports_confidence_as_percentage() {
        let (service, store) = shared_service();
        service.track_personalization("segment_identified", "enterprise", 0.849, "behavior_analysis");

        let events = store.list();
        assert_eq!(events[0].category, CATEGORY_PERSONALIZATION);
        assert_eq!(events[0].value, Some(85));
        assert_eq!(events[0].user_segment.as_deref(), Some("enterprise"));
    }

    #[test]
    fn test_adaptive_content_event_shape() {
        let (service, store) = shared_service();
        service.track_adaptive_content("individual", "hero_copy");
        service.track_chatbot_personalized("individual");

        let events = store.list();
        assert_eq!(events[0].name, "adaptive_content_shown");
        assert_eq!(events[0].label.as_deref(), Some("hero_copy"));
        assert_eq!(events[0].value, Some(100));
        assert_eq!(events[1].name, "chatbot_personalized");
        assert_eq!(events[1].label.as_deref(), Some("chatbot_response"));
    }

    #[test]
    fn test_engagement_builder_skips_absent_fields() {
        let (service, store) = shared_service();
        service.track_engagement("cta_click", "conversion_funnel", Some("primary_hero"), None);

        let events = store.list();
        assert_eq!(events[0].name, "cta_click");
        assert_eq!(events[0].label.as_deref(), Some("primary_hero"));
        assert_eq!(events[0].value, None);
    }
}
