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

//! Content recommendations derived from the resolved segment.
//!
//! All copy is static; [`recommend`] only selects between variants, so the
//! same profile always yields the same content.

use crate::segment::{Behavior, Segment};

/// Copy and emphasis choices for one visitor segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalizedContent {
    /// Hero headline.
    pub hero_message: &'static str,
    /// Primary call-to-action label.
    pub cta_primary: &'static str,
    /// Secondary call-to-action label.
    pub cta_secondary: &'static str,
    /// Topics to surface first.
    pub focus_areas: &'static [&'static str],
    /// Which testimonial set to show.
    pub testimonial_type: &'static str,
    /// Which case-study angle to lead with.
    pub case_study_focus: &'static str,
}

/// Picks the content variant for a segment and behavior.
///
/// Enterprise visitors with a technical focus get the engineering-forward
/// headline, all other enterprise visitors the strategy one; individual
/// visitors are mirrored (the business-focused minority gets the outcome
/// headline). Unresolved segments get the generic pitch.
pub fn recommend(segment: Option<Segment>, behavior: Behavior) -> PersonalizedContent {
    match segment {
        Some(Segment::Enterprise) => PersonalizedContent {
            hero_message: if behavior == Behavior::TechnicalFocused {
                "Enterprise AI Solutions with Technical Excellence"
            } else {
                "Transform Your Business with Enterprise AI Strategy"
            },
            cta_primary: "Schedule Enterprise Consultation",
            cta_secondary: "View Enterprise Solutions",
            focus_areas: &["ROI metrics", "scalability", "compliance", "integration"],
            testimonial_type: "enterprise",
            case_study_focus: "business_transformation",
        },
        Some(Segment::Individual) => PersonalizedContent {
            hero_message: if behavior == Behavior::BusinessFocused {
                "AI Tools That Accelerate Your Projects"
            } else {
                "Custom AI Development for Technical Teams"
            },
            cta_primary: "Start Your AI Project",
            cta_secondary: "Explore Technical Docs",
            focus_areas: &[
                "quick_implementation",
                "developer_tools",
                "documentation",
                "support",
            ],
            testimonial_type: "developer",
            case_study_focus: "technical_implementation",
        },
        None => PersonalizedContent {
            hero_message: "Custom AI Development & Machine Learning Consulting",
            cta_primary: "Schedule Free Discovery Call",
            cta_secondary: "Learn More",
            focus_areas: &["versatility", "expertise", "custom_solutions"],
            testimonial_type: "mixed",
            case_study_focus: "general",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterprise_copy_follows_behavior() {
        let technical = recommend(Some(Segment::Enterprise), Behavior::TechnicalFocused);
        assert_eq!(
            technical.hero_message,
            "Enterprise AI Solutions with Technical Excellence"
        );

        let strategic = recommend(Some(Segment::Enterprise), Behavior::BusinessFocused);
        assert_eq!(
            strategic.hero_message,
            "Transform Your Business with Enterprise AI Strategy"
        );
        // Exploring enterprise visitors also get the strategy headline.
        assert_eq!(
            recommend(Some(Segment::Enterprise), Behavior::Exploring).hero_message,
            strategic.hero_message
        );

        assert_eq!(technical.cta_primary, "Schedule Enterprise Consultation");
        assert_eq!(technical.case_study_focus, "business_transformation");
    }

    #[test]
    fn test_individual_copy_follows_behavior() {
        let technical = recommend(Some(Segment::Individual), Behavior::TechnicalFocused);
        assert_eq!(
            technical.hero_message,
            "Custom AI Development for Technical Teams"
        );

        let outcome_led = recommend(Some(Segment::Individual), Behavior::BusinessFocused);
        assert_eq!(
            outcome_led.hero_message,
            "AI Tools That Accelerate Your Projects"
        );

        assert_eq!(technical.cta_secondary, "Explore Technical Docs");
        assert_eq!(technical.testimonial_type, "developer");
        assert_eq!(technical.focus_areas.len(), 4);
    }

    #[test]
    fn test_unresolved_segment_gets_the_generic_pitch() {
        let generic = recommend(None, Behavior::Exploring);
        assert_eq!(
            generic.hero_message,
            "Custom AI Development & Machine Learning Consulting"
        );
        assert_eq!(generic.cta_primary, "Schedule Free Discovery Call");
        assert_eq!(generic.testimonial_type, "mixed");
        assert_eq!(generic.focus_areas, &["versatility", "expertise", "custom_solutions"]);
    }
}
