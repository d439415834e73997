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

//! Interaction counters and the raw-input trackers that feed them.
//!
//! [`InteractionCounters`] is the single, well-defined input of the
//! segmentation scorer: every signal the scorer weighs lives here as a
//! plain field. The trackers ([`MouseTracker`], [`ClickTracker`]) reduce
//! noisy pointer streams into the precision and cadence fields; section
//! dwell times are credited through [`InteractionCounters::record_section_view`].
//! Nothing in this module performs I/O.

use crate::profile::DeviceKind;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Dwell time on the FAQ section that counts as full engagement.
pub const FAQ_FULL_ENGAGEMENT: Duration = Duration::from_secs(10);

/// Pointer samples retained for precision analysis.
const MOUSE_SAMPLE_CAP: usize = 50;
/// Precision is measured over this many trailing pointer samples.
const PRECISION_WINDOW: usize = 10;
/// Click timestamps retained for cadence analysis.
const CLICK_SAMPLE_CAP: usize = 10;
/// Minimum recorded clicks before a cadence is reported.
const CADENCE_MIN_CLICKS: usize = 3;
/// Mean inter-click gaps below this read as [`ClickCadence::Rapid`].
const RAPID_BELOW: Duration = Duration::from_millis(500);
/// Mean inter-click gaps above this read as [`ClickCadence::Careful`].
const CAREFUL_ABOVE: Duration = Duration::from_millis(2000);

/// How deliberately the visitor clicks, from mean inter-click gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickCadence {
    /// Long pauses between clicks; reading before acting.
    Careful,
    /// Sub-second click bursts.
    Rapid,
    /// Everything in between, and the state before enough clicks exist.
    #[default]
    Exploring,
}

/// Page sections whose dwell time is credited to the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Service catalogue; technical content.
    Services,
    /// Engagement process walkthrough; technical content.
    Process,
    /// Frequently asked questions.
    Faq,
    /// Business benefits pitch.
    Benefits,
    /// Closing call-to-action block.
    Cta,
}

/// Scorer input: one session's accumulated interaction signals.
///
/// Counters only ever grow (or, for the ratio fields, keep their maximum),
/// so a segment decision can only be displaced by stronger evidence, never
/// by silence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionCounters {
    /// Primary hero call-to-action clicks.
    pub hero_cta_clicks: u32,
    /// Total dwell time on the services section.
    pub services_view_time: Duration,
    /// Direct manipulations of the 3D visualization.
    pub three_d_interactions: u32,
    /// Visits to the process walkthrough section.
    pub process_step_views: u32,
    /// FAQ engagement, one point per fully-read visit.
    pub faq_engagement: f32,
    /// Deepest scroll position reached, `0.0..=1.0`.
    pub scroll_depth: f32,
    /// Delay from session start to the first user gesture.
    pub time_to_first_interaction: Option<Duration>,
    /// Straightest pointer run observed, `0.0..=1.0`.
    pub mouse_precision: f32,
    /// Latest click cadence classification.
    pub click_cadence: ClickCadence,
    /// Total dwell time on technically-oriented sections.
    pub technical_content_time: Duration,
    /// Total dwell time on business-oriented sections.
    pub business_benefits_time: Duration,
    /// Accumulated case-study engagement score.
    pub case_study_engagement: f32,
    /// Device class the session runs on.
    pub device: DeviceKind,
}

impl InteractionCounters {
    /// Credits a section visit to the matching counters.
    ///
    /// Services and process dwell counts as technical content, benefits and
    /// CTA dwell as business content. FAQ visits convert to an engagement
    /// score that saturates at [`FAQ_FULL_ENGAGEMENT`].
    pub fn record_section_view(&mut self, section: SectionKind, dwell: Duration) {
        match section {
            SectionKind::Services => {
                self.services_view_time += dwell;
                self.technical_content_time += dwell;
            }
            SectionKind::Process => {
                self.process_step_views += 1;
                self.technical_content_time += dwell;
            }
            SectionKind::Faq => {
                let engagement = dwell.as_secs_f32() / FAQ_FULL_ENGAGEMENT.as_secs_f32();
                self.faq_engagement += engagement.min(1.0);
            }
            SectionKind::Benefits | SectionKind::Cta => {
                self.business_benefits_time += dwell;
            }
        }
    }

    /// Keeps the deepest scroll position seen so far.
    pub fn record_scroll_depth(&mut self, depth: f32) {
        self.scroll_depth = self.scroll_depth.max(depth.clamp(0.0, 1.0));
    }

    /// Keeps the straightest pointer run seen so far.
    pub fn record_mouse_precision(&mut self, precision: f32) {
        self.mouse_precision = self.mouse_precision.max(precision);
    }

    /// Flat engagement measure: the sum of every numeric counter, scaled
    /// down so dwell milliseconds dominate without exploding the range.
    pub fn interaction_depth(&self) -> f32 {
        let first_interaction_ms = self
            .time_to_first_interaction
            .map_or(0.0, |t| t.as_millis() as f32);
        (self.hero_cta_clicks as f32
            + self.services_view_time.as_millis() as f32
            + self.three_d_interactions as f32
            + self.process_step_views as f32
            + self.faq_engagement
            + self.scroll_depth
            + first_interaction_ms
            + self.mouse_precision
            + self.technical_content_time.as_millis() as f32
            + self.business_benefits_time.as_millis() as f32
            + self.case_study_engagement)
            / 100.0
    }
}

/// One recorded pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MousePoint {
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels.
    pub y: f32,
}

fn distance(a: MousePoint, b: MousePoint) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Reduces a pointer stream to a precision ratio.
///
/// Precision is the straight-line distance over the traveled distance for
/// the last [`PRECISION_WINDOW`] samples: `1.0` is a perfectly straight
/// run, winding movement trends towards `0.0`. A reading is produced on
/// every tenth sample; once the buffer saturates at its cap the length
/// stays a multiple of ten, so every further sample produces one.
#[derive(Debug, Default)]
pub struct MouseTracker {
    samples: VecDeque<MousePoint>,
}

impl MouseTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(MOUSE_SAMPLE_CAP),
        }
    }

    /// Records one pointer position, yielding a precision reading when the
    /// window fills.
    pub fn record(&mut self, x: f32, y: f32) -> Option<f32> {
        if self.samples.len() == MOUSE_SAMPLE_CAP {
            self.samples.pop_front();
        }
        self.samples.push_back(MousePoint { x, y });
        if self.samples.len() % PRECISION_WINDOW == 0 {
            Some(self.precision())
        } else {
            None
        }
    }

    fn precision(&self) -> f32 {
        if self.samples.len() < PRECISION_WINDOW {
            return 0.0;
        }
        let start = self.samples.len() - PRECISION_WINDOW;
        let mut traveled = 0.0_f32;
        for i in (start + 1)..self.samples.len() {
            traveled += distance(self.samples[i - 1], self.samples[i]);
        }
        let direct = distance(self.samples[start], self.samples[self.samples.len() - 1]);
        direct / traveled.max(1.0)
    }
}

/// Reduces click timestamps to a [`ClickCadence`].
#[derive(Debug, Default)]
pub struct ClickTracker {
    times: VecDeque<Instant>,
}

impl ClickTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            times: VecDeque::with_capacity(CLICK_SAMPLE_CAP),
        }
    }

    /// Records one click, yielding a cadence once enough clicks exist.
    pub fn record(&mut self, at: Instant) -> Option<ClickCadence> {
        if self.times.len() == CLICK_SAMPLE_CAP {
            self.times.pop_front();
        }
        self.times.push_back(at);
        if self.times.len() < CADENCE_MIN_CLICKS {
            return None;
        }

        let mut total = Duration::ZERO;
        let mut gaps = 0_u32;
        let mut prev: Option<Instant> = None;
        for &time in &self.times {
            if let Some(prev) = prev {
                total += time.duration_since(prev);
                gaps += 1;
            }
            prev = Some(time);
        }
        let mean = total / gaps;

        Some(if mean < RAPID_BELOW {
            ClickCadence::Rapid
        } else if mean > CAREFUL_ABOVE {
            ClickCadence::Careful
        } else {
            ClickCadence::Exploring
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_precision_reports_every_tenth_sample() {
        let mut tracker = MouseTracker::new();
        for i in 0..9 {
            assert_eq!(
                tracker.record(i as f32 * 10.0, 0.0),
                None,
                "no reading before the window fills"
            );
        }
        let reading = tracker.record(90.0, 0.0);
        assert!(reading.is_some(), "tenth sample must produce a reading");
        assert_relative_eq!(reading.unwrap(), 1.0);
    }

    #[test]
    fn test_winding_path_scores_below_straight_path() {
        let mut straight = MouseTracker::new();
        let mut winding = MouseTracker::new();
        let mut straight_reading = None;
        let mut winding_reading = None;
        for i in 0..10 {
            straight_reading = straight.record(i as f32 * 10.0, 0.0);
            let y = if i % 2 == 0 { 0.0 } else { 40.0 };
            winding_reading = winding.record(i as f32 * 10.0, y);
        }
        let straight_reading = straight_reading.expect("reading after ten samples");
        let winding_reading = winding_reading.expect("reading after ten samples");
        assert!(
            winding_reading < straight_reading,
            "zigzag {winding_reading} should score below straight {straight_reading}"
        );
    }

    #[test]
    fn test_saturated_tracker_reports_on_every_sample() {
        let mut tracker = MouseTracker::new();
        for i in 0..MOUSE_SAMPLE_CAP {
            tracker.record(i as f32, 0.0);
        }
        assert!(
            tracker.record(999.0, 0.0).is_some(),
            "a full buffer stays a multiple of the window"
        );
        assert!(tracker.record(1000.0, 0.0).is_some());
    }

    #[test]
    fn test_tiny_movements_never_divide_by_zero() {
        let mut tracker = MouseTracker::new();
        let mut reading = None;
        for _ in 0..10 {
            reading = tracker.record(5.0, 5.0);
        }
        assert_relative_eq!(reading.expect("reading after ten samples"), 0.0);
    }

    #[test]
    fn test_click_cadence_classification() {
        let t0 = Instant::now();

        let mut rapid = ClickTracker::new();
        rapid.record(t0);
        rapid.record(t0 + Duration::from_millis(100));
        assert_eq!(rapid.record(t0 + Duration::from_millis(200)), Some(ClickCadence::Rapid));

        let mut careful = ClickTracker::new();
        careful.record(t0);
        careful.record(t0 + Duration::from_secs(3));
        assert_eq!(careful.record(t0 + Duration::from_secs(6)), Some(ClickCadence::Careful));

        let mut exploring = ClickTracker::new();
        exploring.record(t0);
        exploring.record(t0 + Duration::from_secs(1));
        assert_eq!(exploring.record(t0 + Duration::from_secs(2)), Some(ClickCadence::Exploring));
    }

    #[test]
    fn test_too_few_clicks_yield_no_cadence() {
        let t0 = Instant::now();
        let mut tracker = ClickTracker::new();
        assert_eq!(tracker.record(t0), None);
        assert_eq!(tracker.record(t0 + Duration::from_millis(100)), None);
    }

    #[test]
    fn test_section_views_credit_content_buckets() {
        let mut counters = InteractionCounters::default();

        counters.record_section_view(SectionKind::Services, Duration::from_secs(5));
        assert_eq!(counters.services_view_time, Duration::from_secs(5));
        assert_eq!(counters.technical_content_time, Duration::from_secs(5));

        counters.record_section_view(SectionKind::Process, Duration::from_secs(2));
        assert_eq!(counters.process_step_views, 1);
        assert_eq!(counters.technical_content_time, Duration::from_secs(7));

        counters.record_section_view(SectionKind::Benefits, Duration::from_secs(3));
        counters.record_section_view(SectionKind::Cta, Duration::from_secs(1));
        assert_eq!(counters.business_benefits_time, Duration::from_secs(4));
    }

    #[test]
    fn test_faq_engagement_saturates_per_visit() {
        let mut counters = InteractionCounters::default();
        counters.record_section_view(SectionKind::Faq, Duration::from_secs(5));
        assert_relative_eq!(counters.faq_engagement, 0.5);

        // A marathon read still counts as one fully-engaged visit.
        counters.record_section_view(SectionKind::Faq, Duration::from_secs(60));
        assert_relative_eq!(counters.faq_engagement, 1.5);
    }

    #[test]
    fn test_scroll_depth_keeps_the_maximum() {
        let mut counters = InteractionCounters::default();
        counters.record_scroll_depth(0.3);
        counters.record_scroll_depth(0.8);
        counters.record_scroll_depth(0.5);
        assert_relative_eq!(counters.scroll_depth, 0.8);

        counters.record_scroll_depth(1.2);
        assert_relative_eq!(counters.scroll_depth, 1.0);
    }

    #[test]
    fn test_interaction_depth_sums_the_numeric_signals() {
        let counters = InteractionCounters {
            hero_cta_clicks: 2,
            services_view_time: Duration::from_millis(400),
            three_d_interactions: 5,
            process_step_views: 3,
            faq_engagement: 0.5,
            scroll_depth: 0.9,
            time_to_first_interaction: Some(Duration::from_millis(150)),
            mouse_precision: 0.6,
            technical_content_time: Duration::from_millis(500),
            business_benefits_time: Duration::from_millis(300),
            case_study_engagement: 1.0,
            ..InteractionCounters::default()
        };
        let expected = (2.0 + 400.0 + 5.0 + 3.0 + 0.5 + 0.9 + 150.0 + 0.6 + 500.0 + 300.0 + 1.0) / 100.0;
        assert_relative_eq!(counters.interaction_depth(), expected);
    }

    #[test]
    fn test_unset_first_interaction_contributes_nothing() {
        let counters = InteractionCounters {
            hero_cta_clicks: 1,
            ..InteractionCounters::default()
        };
        assert_relative_eq!(counters.interaction_depth(), 0.01);
    }
}
