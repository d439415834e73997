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

//! The universal safe fallback: a fixed 2D vector diagram.
//!
//! Requires no capability probing, no layout, and no GPU; every degraded or
//! locked session ends up here. Motion is limited to declarative SVG
//! animation baked into the document.

use super::SceneLane;
use crate::layout::NeuralLayout;
use axon_core::render::FramePass;

/// The embedded diagram: a simplified node-and-connection network with a
/// slowly rotating center emblem and a few drifting accent dots.
pub const VECTOR_DOCUMENT: &str = r##"<svg width="400" height="400" viewBox="0 0 400 400" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="nodeGradient2D" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" stop-color="rgba(0, 255, 255, 0.8)"/>
      <stop offset="100%" stop-color="rgba(0, 136, 255, 0.6)"/>
    </linearGradient>
    <linearGradient id="connectionGradient2D" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" stop-color="rgba(0, 255, 255, 0.4)"/>
      <stop offset="100%" stop-color="transparent"/>
    </linearGradient>
  </defs>
  <g opacity="0.6">
    <line x1="100" y1="100" x2="200" y2="150" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="200" y1="150" x2="300" y2="100" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="300" y1="100" x2="350" y2="200" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="350" y1="200" x2="300" y2="300" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="300" y1="300" x2="200" y2="320" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="200" y1="320" x2="100" y2="280" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="100" y1="280" x2="50" y2="200" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="50" y1="200" x2="100" y2="100" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="200" y1="150" x2="200" y2="200" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="200" y1="200" x2="200" y2="320" stroke="url(#connectionGradient2D)" stroke-width="2"/>
    <line x1="100" y1="100" x2="300" y2="100" stroke="url(#connectionGradient2D)" stroke-width="1"/>
    <line x1="50" y1="200" x2="350" y2="200" stroke="url(#connectionGradient2D)" stroke-width="1"/>
  </g>
  <g>
    <circle cx="100" cy="100" r="12" fill="url(#nodeGradient2D)" opacity="0.9"/>
    <circle cx="200" cy="150" r="16" fill="url(#nodeGradient2D)" opacity="1"/>
    <circle cx="300" cy="100" r="12" fill="url(#nodeGradient2D)" opacity="0.9"/>
    <circle cx="350" cy="200" r="10" fill="url(#nodeGradient2D)" opacity="0.8"/>
    <circle cx="300" cy="300" r="12" fill="url(#nodeGradient2D)" opacity="0.9"/>
    <circle cx="200" cy="320" r="14" fill="url(#nodeGradient2D)" opacity="0.9"/>
    <circle cx="100" cy="280" r="10" fill="url(#nodeGradient2D)" opacity="0.8"/>
    <circle cx="50" cy="200" r="10" fill="url(#nodeGradient2D)" opacity="0.8"/>
    <circle cx="200" cy="200" r="20" fill="url(#nodeGradient2D)" opacity="1"/>
  </g>
  <g transform="translate(200, 200)">
    <circle r="25" fill="none" stroke="rgba(0, 255, 255, 0.6)" stroke-width="2" stroke-dasharray="5,5" opacity="0.8">
      <animateTransform attributeName="transform" type="rotate" values="0;360" dur="20s" repeatCount="indefinite"/>
    </circle>
    <circle r="15" fill="rgba(0, 255, 255, 0.2)" stroke="rgba(0, 255, 255, 0.8)" stroke-width="2"/>
    <text text-anchor="middle" dy="0.3em" font-size="10" fill="rgba(0, 255, 255, 0.9)" font-weight="bold">AI</text>
  </g>
  <g opacity="0.6">
    <circle cx="80" cy="60" r="3" fill="rgba(0, 255, 255, 0.7)">
      <animate attributeName="cy" values="60;80;60" dur="3s" repeatCount="indefinite"/>
    </circle>
    <circle cx="320" cy="70" r="2" fill="rgba(0, 255, 255, 0.7)">
      <animate attributeName="cy" values="70;50;70" dur="4s" repeatCount="indefinite"/>
    </circle>
    <circle cx="380" cy="160" r="2" fill="rgba(0, 255, 255, 0.7)">
      <animate attributeName="cx" values="380;360;380" dur="5s" repeatCount="indefinite"/>
    </circle>
    <circle cx="30" cy="250" r="3" fill="rgba(0, 255, 255, 0.7)">
      <animate attributeName="cy" values="250;270;250" dur="3.5s" repeatCount="indefinite"/>
    </circle>
  </g>
</svg>
"##;

/// The static 2D fallback lane.
#[derive(Debug, Default, Clone, Copy)]
pub struct VectorLane;

impl VectorLane {
    /// Creates the lane. It has no tier-dependent configuration.
    pub fn new() -> Self {
        Self
    }
}

impl SceneLane for VectorLane {
    fn variant_name(&self) -> &'static str {
        "vector"
    }

    /// No GPU pass; the document is composited by the host.
    fn render(&self, _layout: &NeuralLayout, _time: f32) -> FramePass {
        FramePass {
            draw_calls: 0,
            triangles: 0,
            instances: 0,
        }
    }

    fn estimate_cost(&self, _layout: &NeuralLayout) -> f32 {
        0.0
    }

    fn svg_document(&self) -> Option<&'static str> {
        Some(VECTOR_DOCUMENT)
    }
}
