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

//! # Axon Chat
//!
//! The concierge chat widget's session machinery: a [`Persona`] registry
//! keyed by industry, keyword [`detect_industry`] resolution from intake
//! answers, and a [`ChatSession`] transcript that talks to any
//! [`ChatModel`] backend and degrades to a fixed apology when the backend
//! fails.

#![warn(missing_docs)]

pub mod model;
pub mod persona;
pub mod session;

pub use model::{ChatModel, ChatModelError, ChatProfile, ChatReply, ChatRequest, ChatRole, ChatTurn};
pub use persona::{detect_industry, persona, Industry, Persona, PersonaMeta};
pub use session::{ChatMessage, ChatSession, APOLOGY, HISTORY_WINDOW};
