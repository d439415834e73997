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

//! The [`ChatModel`] contract and the request/reply types that cross it.
//!
//! The language model is an opaque collaborator: the session hands it a
//! [`ChatRequest`] with everything a backend needs (question, trimmed
//! history, resolved persona, intake profile) and gets back either a
//! [`ChatReply`] or a [`ChatModelError`]. How a backend turns the request
//! into completions is its own business.

use crate::persona::{Persona, PersonaMeta};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The visitor.
    User,
    /// The consultant persona.
    Assistant,
}

impl ChatRole {
    /// Stable lowercase identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One history entry as seen by the model: author and text, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who spoke.
    pub role: ChatRole,
    /// What they said.
    pub content: String,
}

/// Intake answers the visitor chose to share. Every field is optional;
/// detection and welcome copy degrade gracefully around gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatProfile {
    /// The visitor's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Their organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Free-text industry hint, e.g. "hospital network".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Free-text role, e.g. "general contractor".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Everything a model backend needs to answer one question.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The question being asked now.
    pub message: String,
    /// The trailing window of the conversation, oldest first. Does not
    /// include `message`.
    pub history: Vec<ChatTurn>,
    /// The persona the reply should speak as.
    pub persona: &'static Persona,
    /// Intake answers, for backends that tailor beyond the persona.
    pub profile: ChatProfile,
}

/// A successful model completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The reply text.
    #[serde(rename = "response")]
    pub text: String,
    /// The persona identity the reply was generated under.
    pub persona: PersonaMeta,
}

/// Ways a model backend can fail. None of these reach the visitor: the
/// session converts every one into the standing apology.
#[derive(Debug, Error)]
pub enum ChatModelError {
    /// The backend has no credentials or endpoint to talk to.
    #[error("chat model is not configured")]
    Unconfigured,
    /// The request never produced a response.
    #[error("chat model transport failed: {0}")]
    Transport(String),
    /// A response arrived but carried no usable text.
    #[error("chat model returned an unusable reply: {0}")]
    UnusableReply(String),
}

/// An asynchronous completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync + std::fmt::Debug {
    /// Produces one reply for the request.
    async fn generate(&self, request: ChatRequest) -> Result<ChatReply, ChatModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{persona, Industry};

    #[derive(Debug)]
    struct EchoModel;

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn generate(&self, request: ChatRequest) -> Result<ChatReply, ChatModelError> {
            Ok(ChatReply {
                text: request.message,
                persona: PersonaMeta::from_persona(request.persona),
            })
        }
    }

    #[tokio::test]
    async fn test_model_trait_is_object_safe() {
        let model: Box<dyn ChatModel> = Box::new(EchoModel);
        let request = ChatRequest {
            message: "How does AI reduce downtime?".to_string(),
            history: Vec::new(),
            persona: persona(Industry::Manufacturing),
            profile: ChatProfile::default(),
        };

        let reply = model.generate(request).await.unwrap();
        assert_eq!(reply.text, "How does AI reduce downtime?");
        assert_eq!(reply.persona.industry, Industry::Manufacturing);
    }

    #[test]
    fn test_error_messages_name_the_failure() {
        let transport = ChatModelError::Transport("connection reset".to_string());
        assert_eq!(
            transport.to_string(),
            "chat model transport failed: connection reset"
        );
        assert_eq!(
            ChatModelError::Unconfigured.to_string(),
            "chat model is not configured"
        );
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        assert_eq!(ChatRole::User.as_str(), "user");
        assert_eq!(ChatRole::Assistant.as_str(), "assistant");
    }
}
