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

//! The segmentation scorer.
//!
//! [`score`] is a pure function from [`InteractionCounters`] to a
//! [`SegmentScore`]: no I/O, no clock, no hidden state. Each visitor
//! segment has a weighted checklist of signals; a segment is chosen only
//! when its sum clears [`SEGMENT_SCORE_FLOOR`], and confidence is capped
//! at [`CONFIDENCE_CEILING`] so a single session never reads as certainty.

use crate::counters::{ClickCadence, InteractionCounters};
use crate::profile::DeviceKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum weighted sum before a segment is assigned at all.
pub const SEGMENT_SCORE_FLOOR: f32 = 0.4;
/// Upper bound on reported confidence.
pub const CONFIDENCE_CEILING: f32 = 0.9;
/// Confidence required before a segment is announced or acted upon.
pub const SEGMENT_ANNOUNCE_CONFIDENCE: f32 = 0.6;
/// One content-time must exceed the other by this factor to set a focus.
pub const CONTENT_FOCUS_RATIO: f32 = 1.5;

/// Visitor segment the scorer can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Organization evaluating a vendor: deliberate, process-oriented.
    Enterprise,
    /// Individual practitioner: fast, technically curious.
    Individual,
}

impl Segment {
    /// Lowercase label used on telemetry events and stored documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enterprise => "enterprise",
            Self::Individual => "individual",
        }
    }
}

/// Where the visitor's attention goes, from section dwell times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Technical sections dominate.
    TechnicalFocused,
    /// Business sections dominate.
    BusinessFocused,
    /// Neither side dominates yet.
    #[default]
    Exploring,
}

impl Behavior {
    /// Lowercase label used on telemetry events and stored documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TechnicalFocused => "technical_focused",
            Self::BusinessFocused => "business_focused",
            Self::Exploring => "exploring",
        }
    }
}

/// Outcome of one scoring pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentScore {
    /// The resolved segment, or `None` while evidence is weak.
    pub segment: Option<Segment>,
    /// Content-focus classification.
    pub behavior: Behavior,
    /// Confidence in `segment`; for `None`, the strongest candidate sum.
    pub confidence: f32,
    /// Raw weighted sum of the enterprise signals.
    pub enterprise_score: f32,
    /// Raw weighted sum of the individual signals.
    pub individual_score: f32,
}

/// Scores one session's counters into a segment decision.
///
/// Enterprise signals: repeated process-section visits, long dwell on the
/// business pitch, deep scrolling, careful clicking, a desktop device.
/// Individual signals: playing with the 3D scene, long dwell on technical
/// content, precise pointer runs, a fast first interaction, a phone.
/// When both sums clear the floor the stronger one wins; an exact tie
/// goes to `Individual`.
pub fn score(counters: &InteractionCounters) -> SegmentScore {
    let mut enterprise = 0.0_f32;
    if counters.process_step_views > 2 {
        enterprise += 0.3;
    }
    if counters.business_benefits_time > Duration::from_millis(30_000) {
        enterprise += 0.25;
    }
    if counters.scroll_depth > 0.8 {
        enterprise += 0.2;
    }
    if counters.click_cadence == ClickCadence::Careful {
        enterprise += 0.15;
    }
    if counters.device == DeviceKind::Desktop {
        enterprise += 0.1;
    }

    let mut individual = 0.0_f32;
    if counters.three_d_interactions > 3 {
        individual += 0.3;
    }
    if counters.technical_content_time > Duration::from_millis(20_000) {
        individual += 0.25;
    }
    if counters.mouse_precision > 0.7 {
        individual += 0.2;
    }
    if matches!(counters.time_to_first_interaction, Some(t) if t < Duration::from_millis(5_000)) {
        individual += 0.15;
    }
    if counters.device == DeviceKind::Mobile {
        individual += 0.1;
    }

    let technical_ms = counters.technical_content_time.as_millis() as f32;
    let business_ms = counters.business_benefits_time.as_millis() as f32;
    let behavior = if technical_ms > business_ms * CONTENT_FOCUS_RATIO {
        Behavior::TechnicalFocused
    } else if business_ms > technical_ms * CONTENT_FOCUS_RATIO {
        Behavior::BusinessFocused
    } else {
        Behavior::Exploring
    };

    let (segment, confidence) = if enterprise > individual && enterprise > SEGMENT_SCORE_FLOOR {
        (Some(Segment::Enterprise), enterprise.min(CONFIDENCE_CEILING))
    } else if individual > SEGMENT_SCORE_FLOOR {
        (Some(Segment::Individual), individual.min(CONFIDENCE_CEILING))
    } else {
        (None, enterprise.max(individual))
    };

    SegmentScore {
        segment,
        behavior,
        confidence,
        enterprise_score: enterprise,
        individual_score: individual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn counters() -> InteractionCounters {
        // Tablet so neither segment collects a device bonus by default.
        InteractionCounters {
            device: DeviceKind::Tablet,
            ..InteractionCounters::default()
        }
    }

    #[test]
    fn test_quiet_session_resolves_nothing() {
        let outcome = score(&counters());
        assert_eq!(outcome.segment, None);
        assert_relative_eq!(outcome.confidence, 0.0);
        assert_eq!(outcome.behavior, Behavior::Exploring);
    }

    #[test]
    fn test_enterprise_signals_win() {
        let mut input = counters();
        input.process_step_views = 3;
        input.business_benefits_time = Duration::from_secs(31);
        input.scroll_depth = 0.9;
        input.device = DeviceKind::Desktop;

        let outcome = score(&input);
        assert_eq!(outcome.segment, Some(Segment::Enterprise));
        assert_relative_eq!(outcome.enterprise_score, 0.85);
        assert_relative_eq!(outcome.confidence, 0.85);
    }

    #[test]
    fn test_individual_signals_win() {
        let mut input = counters();
        input.three_d_interactions = 4;
        input.technical_content_time = Duration::from_secs(21);
        input.mouse_precision = 0.8;
        input.device = DeviceKind::Mobile;

        let outcome = score(&input);
        assert_eq!(outcome.segment, Some(Segment::Individual));
        assert_relative_eq!(outcome.individual_score, 0.85);
        assert_eq!(outcome.behavior, Behavior::TechnicalFocused);
    }

    #[test]
    fn test_weak_evidence_stays_unresolved() {
        let mut input = counters();
        input.three_d_interactions = 4;

        let outcome = score(&input);
        assert_eq!(outcome.segment, None, "0.3 does not clear the floor");
        assert_relative_eq!(outcome.confidence, 0.3);
    }

    #[test]
    fn test_confidence_is_capped() {
        let mut input = counters();
        input.process_step_views = 5;
        input.business_benefits_time = Duration::from_secs(40);
        input.scroll_depth = 1.0;
        input.click_cadence = ClickCadence::Careful;
        input.device = DeviceKind::Desktop;

        let outcome = score(&input);
        assert_relative_eq!(outcome.enterprise_score, 1.0);
        assert_relative_eq!(outcome.confidence, CONFIDENCE_CEILING);
    }

    #[test]
    fn test_exact_tie_goes_to_individual() {
        let mut input = counters();
        // Enterprise: 0.3 + 0.2 = 0.5; individual: 0.3 + 0.2 = 0.5.
        input.process_step_views = 3;
        input.scroll_depth = 0.9;
        input.three_d_interactions = 4;
        input.mouse_precision = 0.8;

        let outcome = score(&input);
        assert_relative_eq!(outcome.enterprise_score, outcome.individual_score);
        assert_eq!(outcome.segment, Some(Segment::Individual));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut input = counters();
        input.process_step_views = 2;
        input.business_benefits_time = Duration::from_millis(30_000);
        input.scroll_depth = 0.8;
        input.three_d_interactions = 3;
        input.technical_content_time = Duration::from_millis(20_000);
        input.mouse_precision = 0.7;
        input.time_to_first_interaction = Some(Duration::from_millis(5_000));

        let outcome = score(&input);
        assert_relative_eq!(outcome.enterprise_score, 0.0);
        assert_relative_eq!(outcome.individual_score, 0.0);
    }

    #[test]
    fn test_unset_first_interaction_scores_nothing() {
        let mut passive = counters();
        passive.time_to_first_interaction = None;
        let mut eager = counters();
        eager.time_to_first_interaction = Some(Duration::from_secs(2));

        assert_relative_eq!(score(&passive).individual_score, 0.0);
        assert_relative_eq!(score(&eager).individual_score, 0.15);
    }

    #[test]
    fn test_behavior_tracks_the_content_ratio() {
        let mut technical = counters();
        technical.technical_content_time = Duration::from_secs(31);
        technical.business_benefits_time = Duration::from_secs(20);
        assert_eq!(score(&technical).behavior, Behavior::TechnicalFocused);

        let mut business = counters();
        business.technical_content_time = Duration::from_secs(20);
        business.business_benefits_time = Duration::from_secs(31);
        assert_eq!(score(&business).behavior, Behavior::BusinessFocused);

        let mut balanced = counters();
        balanced.technical_content_time = Duration::from_secs(20);
        balanced.business_benefits_time = Duration::from_secs(25);
        assert_eq!(score(&balanced).behavior, Behavior::Exploring);
    }

    #[test]
    fn test_stronger_enterprise_sum_beats_individual() {
        let mut input = counters();
        input.process_step_views = 3;
        input.business_benefits_time = Duration::from_secs(31);
        input.scroll_depth = 0.9;
        input.click_cadence = ClickCadence::Careful;
        input.three_d_interactions = 4;
        input.technical_content_time = Duration::from_secs(21);

        let outcome = score(&input);
        assert!(outcome.enterprise_score > outcome.individual_score);
        assert_eq!(outcome.segment, Some(Segment::Enterprise));
    }
}
