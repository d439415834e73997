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

//! Conversation state for one chat widget session.
//!
//! [`ChatSession`] owns the transcript and the model handle. Its one hard
//! rule: the visitor never sees a failure. A model error becomes the
//! standing apology message and the session keeps accepting input.

use crate::model::{ChatModel, ChatProfile, ChatRequest, ChatRole, ChatTurn};
use crate::persona::{detect_industry, persona, Industry, PersonaMeta};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How many trailing transcript messages accompany each model request.
pub const HISTORY_WINDOW: usize = 6;

/// Appended verbatim whenever the model fails.
pub const APOLOGY: &str = "I apologize, but I'm experiencing technical \
     difficulties. Please try again in a moment, or feel free to schedule a \
     direct consultation with our team.";

const DEFAULT_WELCOME: &str = "Hi! I'm the Wright AI Solutions assistant. I \
     can help you understand our AI services, discuss technical solutions, or \
     connect you with our experts. What would you like to know about AI \
     development?";

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who spoke.
    pub role: ChatRole,
    /// What they said.
    pub content: String,
    /// Persona identity for assistant messages that carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<PersonaMeta>,
}

/// Transcript, persona, and pending state for one conversation.
#[derive(Debug)]
pub struct ChatSession {
    model: Arc<dyn ChatModel>,
    profile: ChatProfile,
    industry: Industry,
    transcript: Vec<ChatMessage>,
    active_persona: Option<PersonaMeta>,
    pending: bool,
}

impl ChatSession {
    /// Opens a conversation with no intake answers: the generic welcome,
    /// answered by the default technology persona.
    pub fn open(model: Arc<dyn ChatModel>) -> Self {
        let mut session = Self::bare(model, ChatProfile::default(), Industry::Technology);
        session.push_assistant(DEFAULT_WELCOME.to_string(), None);
        session
    }

    /// Opens a conversation from completed intake answers. The industry is
    /// detected from the profile and a personalized welcome is appended.
    pub fn open_with_profile(model: Arc<dyn ChatModel>, profile: ChatProfile) -> Self {
        let industry = detect_industry(
            profile.role.as_deref().unwrap_or(""),
            profile.industry.as_deref(),
        );
        let welcome = intake_welcome(&profile, industry);
        let mut session = Self::bare(model, profile, industry);
        session.push_assistant(welcome, Some(PersonaMeta::industry_expert(industry)));
        log::info!(
            "chat session opened for the {} persona",
            session.industry.as_str()
        );
        session
    }

    fn bare(model: Arc<dyn ChatModel>, profile: ChatProfile, industry: Industry) -> Self {
        Self {
            model,
            profile,
            industry,
            transcript: Vec::new(),
            active_persona: None,
            pending: false,
        }
    }

    /// Sends one visitor message and waits for the reply.
    ///
    /// Blank input and input sent while a turn is already pending are
    /// dropped (`None`). Otherwise the user message is appended, the model
    /// is asked exactly once, and the returned message is either its reply
    /// or [`APOLOGY`]; the session stays usable either way.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() || self.pending {
            return None;
        }
        self.pending = true;

        let request = ChatRequest {
            message: text.to_string(),
            history: self.history_window(),
            persona: persona(self.industry),
            profile: self.profile.clone(),
        };
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            content: text.to_string(),
            persona: None,
        });

        match self.model.generate(request).await {
            Ok(reply) => {
                self.active_persona = Some(reply.persona.clone());
                self.push_assistant(reply.text, Some(reply.persona));
            }
            Err(err) => {
                log::warn!("chat model failed, serving the standing apology: {err}");
                self.push_assistant(APOLOGY.to_string(), Some(PersonaMeta::fallback()));
            }
        }

        self.pending = false;
        self.transcript.last()
    }

    /// The trailing [`HISTORY_WINDOW`] transcript messages as model turns,
    /// oldest first.
    pub fn history_window(&self) -> Vec<ChatTurn> {
        let start = self.transcript.len().saturating_sub(HISTORY_WINDOW);
        self.transcript[start..]
            .iter()
            .map(|message| ChatTurn {
                role: message.role,
                content: message.content.clone(),
            })
            .collect()
    }

    /// The whole conversation, oldest first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Persona identity of the most recent successful reply.
    pub fn active_persona(&self) -> Option<&PersonaMeta> {
        self.active_persona.as_ref()
    }

    /// The industry persona requests are generated under.
    pub fn industry(&self) -> Industry {
        self.industry
    }

    /// Intake answers this session was opened with.
    pub fn profile(&self) -> &ChatProfile {
        &self.profile
    }

    /// True while a model turn is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn push_assistant(&mut self, content: String, persona: Option<PersonaMeta>) {
        self.transcript.push(ChatMessage {
            role: ChatRole::Assistant,
            content,
            persona,
        });
    }
}

fn intake_welcome(profile: &ChatProfile, industry: Industry) -> String {
    let name = profile.name.as_deref().unwrap_or("there");
    let company = match profile.company.as_deref() {
        Some(company) => format!("{company}'s"),
        None => "your team's".to_string(),
    };
    let role = profile.role.as_deref().unwrap_or("a technology leader");
    format!(
        "Hello {name}! I'm your dedicated AI consultant specializing in \
         {industry} solutions. I understand the unique challenges and \
         opportunities in your industry, and I'm here to help you explore how \
         Wright AI Solutions can accelerate {company} success.\n\nBased on \
         your role as {role}, I can provide specific insights about AI \
         implementations that will resonate with your technical and business \
         objectives. What AI challenges or opportunities are you most \
         interested in discussing?",
        industry = industry.display_name(),
    )
}
