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

//! The explicit session context.
//!
//! One [`SessionContext`] is created per page session and passed to
//! whatever needs visitor state; there is no ambient storage. It owns the
//! persisted [`VisitorProfile`], the session-local [`InteractionCounters`],
//! and the raw-input trackers. Interaction entry points only mutate
//! counters; [`SessionContext::refresh`] is the single point where the
//! scorer runs, the profile is updated and saved, and a segment
//! announcement may be produced.

use crate::content::{recommend, PersonalizedContent};
use crate::counters::{ClickTracker, InteractionCounters, MouseTracker, SectionKind};
use crate::profile::{
    classify_device, classify_referrer, ProfileError, ProfileStore, VisitorProfile,
};
use crate::segment::{score, SEGMENT_ANNOUNCE_CONFIDENCE};
use axon_core::telemetry::ConversionEvent;
use std::time::{Duration, Instant};

/// Visitor state for one page session.
pub struct SessionContext {
    profile: VisitorProfile,
    counters: InteractionCounters,
    mouse: MouseTracker,
    clicks: ClickTracker,
    store: Box<dyn ProfileStore>,
    session_start: Instant,
}

impl SessionContext {
    /// Starts a session: loads (or mints) the profile, bumps the visit
    /// count, classifies device and referrer, and writes the profile back.
    pub fn begin(
        store: Box<dyn ProfileStore>,
        user_agent: &str,
        referrer: &str,
        now: Instant,
    ) -> Result<Self, ProfileError> {
        let mut profile = VisitorProfile::load_or_create(store.as_ref())?;
        profile.visit_count += 1;
        profile.device = classify_device(user_agent);
        profile.referrer = classify_referrer(referrer);
        profile.time_on_site_ms = 0;
        store.save(&profile)?;

        log::info!(
            "visitor {} starting visit {} ({} device, {:?} referrer)",
            profile.visitor_id,
            profile.visit_count,
            profile.device.as_str(),
            profile.referrer
        );

        let counters = InteractionCounters {
            device: profile.device,
            ..InteractionCounters::default()
        };
        Ok(Self {
            profile,
            counters,
            mouse: MouseTracker::new(),
            clicks: ClickTracker::new(),
            store,
            session_start: now,
        })
    }

    /// The current profile.
    pub fn profile(&self) -> &VisitorProfile {
        &self.profile
    }

    /// The accumulated interaction counters.
    pub fn counters(&self) -> &InteractionCounters {
        &self.counters
    }

    /// Time elapsed in this session.
    pub fn time_on_site(&self, now: Instant) -> Duration {
        now.duration_since(self.session_start)
    }

    /// Records a hero call-to-action click. Only the primary CTA counts
    /// towards the hero click counter.
    pub fn cta_clicked(&mut self, primary: bool, now: Instant) {
        if primary {
            self.counters.hero_cta_clicks += 1;
        }
        self.mark_first_interaction(now);
    }

    /// Records a direct manipulation of the 3D visualization.
    pub fn three_d_interaction(&mut self, now: Instant) {
        self.counters.three_d_interactions += 1;
        self.mark_first_interaction(now);
    }

    /// Credits a completed section visit. Section visibility is not a
    /// user gesture, so it never stamps the first interaction.
    pub fn section_viewed(&mut self, section: SectionKind, dwell: Duration) {
        self.counters.record_section_view(section, dwell);
    }

    /// Records a scroll position, `0.0..=1.0` of the page.
    pub fn scrolled(&mut self, depth: f32, now: Instant) {
        self.counters.record_scroll_depth(depth);
        self.mark_first_interaction(now);
    }

    /// Records one pointer position; precision readings fold into the
    /// counters as they are produced.
    pub fn pointer_moved(&mut self, x: f32, y: f32, now: Instant) {
        if let Some(precision) = self.mouse.record(x, y) {
            self.counters.record_mouse_precision(precision);
        }
        self.mark_first_interaction(now);
    }

    /// Records one click anywhere on the page for cadence analysis.
    pub fn pointer_clicked(&mut self, now: Instant) {
        if let Some(cadence) = self.clicks.record(now) {
            self.counters.click_cadence = cadence;
        }
        self.mark_first_interaction(now);
    }

    /// Adds a case-study engagement score.
    pub fn case_study_engaged(&mut self, engagement: f32) {
        self.counters.case_study_engagement += engagement;
    }

    /// Re-scores the session, updates and saves the profile, and returns a
    /// telemetry event when the resolved segment changed to a concrete one
    /// with enough confidence to announce.
    pub fn refresh(&mut self, now: Instant) -> Result<Option<ConversionEvent>, ProfileError> {
        let outcome = score(&self.counters);
        let previous = self.profile.segment;

        self.profile.segment = outcome.segment;
        self.profile.behavior = outcome.behavior;
        self.profile.confidence = outcome.confidence;
        self.profile.interaction_depth = self.counters.interaction_depth();
        self.profile.time_on_site_ms = self.time_on_site(now).as_millis() as u64;
        self.store.save(&self.profile)?;

        let announcement = match outcome.segment {
            Some(segment)
                if previous != Some(segment)
                    && outcome.confidence > SEGMENT_ANNOUNCE_CONFIDENCE =>
            {
                log::info!(
                    "segment resolved: {} (confidence {:.2})",
                    segment.as_str(),
                    outcome.confidence
                );
                Some(ConversionEvent::segment_identified(
                    segment.as_str(),
                    outcome.confidence,
                ))
            }
            _ => None,
        };
        Ok(announcement)
    }

    /// Content recommendation for the current profile.
    pub fn personalized_content(&self) -> PersonalizedContent {
        recommend(self.profile.segment, self.profile.behavior)
    }

    fn mark_first_interaction(&mut self, now: Instant) {
        if self.counters.time_to_first_interaction.is_none() {
            self.counters.time_to_first_interaction = Some(now.duration_since(self.session_start));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::ClickCadence;
    use crate::profile::{DeviceKind, MemoryProfileStore, ReferrerKind};
    use crate::segment::Segment;

    const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
    const PHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";

    struct FailingStore;

    impl ProfileStore for FailingStore {
        fn load(&self) -> Result<Option<VisitorProfile>, ProfileError> {
            Ok(None)
        }
        fn save(&self, _profile: &VisitorProfile) -> Result<(), ProfileError> {
            Err(ProfileError::Io("disk full".to_string()))
        }
    }

    fn desktop_session(store: MemoryProfileStore, t0: Instant) -> SessionContext {
        SessionContext::begin(Box::new(store), DESKTOP_UA, "", t0)
            .expect("session begins against a healthy store")
    }

    /// Piles up every individual signal: 3D play, technical dwell, precise
    /// pointer runs, and a fast first interaction.
    fn drive_individual_signals(ctx: &mut SessionContext, t0: Instant) {
        for _ in 0..4 {
            ctx.three_d_interaction(t0 + Duration::from_secs(2));
        }
        ctx.section_viewed(SectionKind::Services, Duration::from_secs(21));
        for i in 0..10 {
            ctx.pointer_moved(i as f32 * 10.0, 0.0, t0 + Duration::from_secs(2));
        }
    }

    #[test]
    fn test_begin_counts_visits_and_keeps_the_visitor_id() {
        let store = MemoryProfileStore::new();
        let t0 = Instant::now();

        let first = desktop_session(store.clone(), t0);
        assert_eq!(first.profile().visit_count, 1);
        let visitor_id = first.profile().visitor_id;
        drop(first);

        let second = desktop_session(store, t0);
        assert_eq!(second.profile().visit_count, 2);
        assert_eq!(second.profile().visitor_id, visitor_id);
    }

    #[test]
    fn test_begin_classifies_device_and_referrer() {
        let store = MemoryProfileStore::new();
        let ctx = SessionContext::begin(
            Box::new(store),
            PHONE_UA,
            "https://www.google.com/search?q=ai",
            Instant::now(),
        )
        .unwrap();
        assert_eq!(ctx.profile().device, DeviceKind::Mobile);
        assert_eq!(ctx.profile().referrer, ReferrerKind::Search);
        assert_eq!(ctx.counters().device, DeviceKind::Mobile);
    }

    #[test]
    fn test_begin_surfaces_store_failures() {
        let result = SessionContext::begin(Box::new(FailingStore), DESKTOP_UA, "", Instant::now());
        assert!(matches!(result, Err(ProfileError::Io(_))));
    }

    #[test]
    fn test_first_interaction_is_stamped_once() {
        let t0 = Instant::now();
        let mut ctx = desktop_session(MemoryProfileStore::new(), t0);

        ctx.pointer_moved(0.0, 0.0, t0 + Duration::from_secs(2));
        ctx.scrolled(0.5, t0 + Duration::from_secs(5));
        assert_eq!(
            ctx.counters().time_to_first_interaction,
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn test_only_the_primary_cta_counts() {
        let t0 = Instant::now();
        let mut ctx = desktop_session(MemoryProfileStore::new(), t0);

        ctx.cta_clicked(true, t0 + Duration::from_secs(1));
        ctx.cta_clicked(false, t0 + Duration::from_secs(2));
        assert_eq!(ctx.counters().hero_cta_clicks, 1);
    }

    #[test]
    fn test_pointer_stream_feeds_precision_and_cadence() {
        let t0 = Instant::now();
        let mut ctx = desktop_session(MemoryProfileStore::new(), t0);

        for i in 0..10 {
            ctx.pointer_moved(i as f32 * 10.0, 0.0, t0);
        }
        assert!(
            ctx.counters().mouse_precision > 0.9,
            "straight run should read as precise"
        );

        ctx.pointer_clicked(t0);
        ctx.pointer_clicked(t0 + Duration::from_millis(100));
        ctx.pointer_clicked(t0 + Duration::from_millis(200));
        assert_eq!(ctx.counters().click_cadence, ClickCadence::Rapid);
    }

    #[test]
    fn test_refresh_announces_a_new_segment_once() {
        let t0 = Instant::now();
        let mut ctx = desktop_session(MemoryProfileStore::new(), t0);
        drive_individual_signals(&mut ctx, t0);

        let event = ctx
            .refresh(t0 + Duration::from_secs(30))
            .unwrap()
            .expect("first resolution announces the segment");
        assert_eq!(event.name, "segment_identified");
        assert_eq!(event.user_segment.as_deref(), Some("individual"));
        assert_eq!(event.value, Some(90));

        let repeat = ctx.refresh(t0 + Duration::from_secs(31)).unwrap();
        assert_eq!(repeat, None, "unchanged segment stays quiet");
    }

    #[test]
    fn test_refresh_updates_profile_insights() {
        let t0 = Instant::now();
        let store = MemoryProfileStore::new();
        let mut ctx = desktop_session(store.clone(), t0);
        drive_individual_signals(&mut ctx, t0);

        ctx.refresh(t0 + Duration::from_secs(30)).unwrap();
        assert_eq!(ctx.profile().segment, Some(Segment::Individual));
        assert!(ctx.profile().is_segmented());
        assert_eq!(ctx.profile().time_on_site_ms, 30_000);
        assert!(ctx.profile().interaction_depth > 0.0);

        let persisted = store.load().unwrap().expect("refresh persists the profile");
        assert_eq!(persisted.segment, Some(Segment::Individual));
    }

    #[test]
    fn test_weak_evidence_stays_quiet() {
        let t0 = Instant::now();
        let mut ctx = desktop_session(MemoryProfileStore::new(), t0);
        ctx.section_viewed(SectionKind::Services, Duration::from_secs(21));

        let event = ctx.refresh(t0 + Duration::from_secs(25)).unwrap();
        assert_eq!(event, None);
        assert_eq!(ctx.profile().segment, None);
        assert!(!ctx.profile().is_segmented());
    }

    #[test]
    fn test_segment_flip_reannounces() {
        let t0 = Instant::now();
        let mut ctx = desktop_session(MemoryProfileStore::new(), t0);

        // Enterprise first: repeated process visits, a long business pitch
        // read, deep scrolling.
        for _ in 0..3 {
            ctx.section_viewed(SectionKind::Process, Duration::from_secs(1));
        }
        ctx.section_viewed(SectionKind::Benefits, Duration::from_secs(31));
        ctx.scrolled(0.9, t0 + Duration::from_secs(1));

        let first = ctx
            .refresh(t0 + Duration::from_secs(40))
            .unwrap()
            .expect("enterprise resolution announces");
        assert_eq!(first.user_segment.as_deref(), Some("enterprise"));

        // Heavy hands-on activity then outweighs the enterprise evidence.
        drive_individual_signals(&mut ctx, t0);
        let second = ctx
            .refresh(t0 + Duration::from_secs(80))
            .unwrap()
            .expect("flipping to individual announces again");
        assert_eq!(second.user_segment.as_deref(), Some("individual"));
    }

    #[test]
    fn test_case_study_engagement_accumulates() {
        let t0 = Instant::now();
        let mut ctx = desktop_session(MemoryProfileStore::new(), t0);
        ctx.case_study_engaged(0.4);
        ctx.case_study_engaged(0.4);
        assert!((ctx.counters().case_study_engagement - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_personalized_content_matches_the_profile() {
        let t0 = Instant::now();
        let mut ctx = desktop_session(MemoryProfileStore::new(), t0);

        let generic = ctx.personalized_content();
        assert_eq!(generic.cta_primary, "Schedule Free Discovery Call");

        drive_individual_signals(&mut ctx, t0);
        ctx.refresh(t0 + Duration::from_secs(30)).unwrap();
        let tailored = ctx.personalized_content();
        assert_eq!(
            tailored.hero_message,
            "Custom AI Development for Technical Teams"
        );
    }
}
