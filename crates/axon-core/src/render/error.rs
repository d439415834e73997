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

//! Error type for the asynchronous 3D scene module load.
//!
//! Load failures are never surfaced to the end user: the director treats any
//! variant below identically and degrades to the 2D fallback.

use std::fmt;

/// Why a 3D scene module failed to load or initialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneLoadError {
    /// The scene module or one of its assets could not be fetched.
    ModuleUnavailable {
        /// Host-provided description of what was missing.
        reason: String,
    },
    /// A graphics context existed at probe time but was gone or unusable at
    /// load time.
    ContextLost {
        /// Host-provided description of the failure.
        reason: String,
    },
    /// The load was cancelled because its ticket was invalidated.
    Cancelled,
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModuleUnavailable { reason } => {
                write!(f, "scene module unavailable: {reason}")
            }
            Self::ContextLost { reason } => {
                write!(f, "graphics context lost during load: {reason}")
            }
            Self::Cancelled => write!(f, "scene load cancelled"),
        }
    }
}

impl std::error::Error for SceneLoadError {}
