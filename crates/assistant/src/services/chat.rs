//! Conversation service for the AI plan assistant.
//!
//! Handles the complete flow of an exchange:
//! 1. Validating the question and user identity
//! 2. Saving the user message
//! 3. Calling the AI answer flow
//! 4. Saving the assistant response

use std::sync::Arc;

use tracing::{error, instrument};

use planwise_core::UserId;

use crate::ai::AiApi;
use crate::db::ChatHistory;
use crate::models::chat::ChatMessage;

/// Validation message for a blank question.
const MISSING_QUESTION_TEXT: &str = "Please provide a question.";

/// Validation message for a blank user id.
const NOT_AUTHENTICATED_TEXT: &str = "User not authenticated.";

/// Apology shown when the AI answer flow fails.
const FAILED_TEXT: &str = "I'm sorry, but I encountered an error. Please try again.";

/// Outcome of an ask exchange.
///
/// `ask` never fails; validation problems and AI failures come back as
/// tagged variants so callers can branch programmatically. [`Display`]
/// (and [`text`]) render the exact user-facing strings.
///
/// [`Display`]: std::fmt::Display
/// [`text`]: Self::text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// The AI answered; carries the answer text.
    Answer(String),
    /// The question was empty or whitespace.
    MissingQuestion,
    /// No user id was supplied.
    NotAuthenticated,
    /// The AI answer flow failed; the user message is still recorded.
    Failed,
}

impl ChatReply {
    /// The user-facing text for this reply.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Answer(answer) => answer,
            Self::MissingQuestion => MISSING_QUESTION_TEXT,
            Self::NotAuthenticated => NOT_AUTHENTICATED_TEXT,
            Self::Failed => FAILED_TEXT,
        }
    }
}

impl std::fmt::Display for ChatReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Conversation service.
///
/// Records per-user chat history around calls to the AI answer flow.
pub struct ConversationService {
    history: Arc<ChatHistory>,
    ai: Arc<dyn AiApi>,
}

impl ConversationService {
    /// Create a conversation service.
    #[must_use]
    pub fn new(history: Arc<ChatHistory>, ai: Arc<dyn AiApi>) -> Self {
        Self { history, ai }
    }

    /// Answer a user's question and record the exchange.
    ///
    /// The whole exchange runs under the user's history guard, so
    /// concurrent asks for the same user are serialized. The user message
    /// is recorded before the AI call and stays recorded even if the call
    /// fails; the assistant message is recorded only on success.
    #[instrument(skip(self, question), fields(user_id = %user_id))]
    pub async fn ask(&self, question: &str, user_id: &str) -> ChatReply {
        if question.trim().is_empty() {
            return ChatReply::MissingQuestion;
        }
        if user_id.trim().is_empty() {
            return ChatReply::NotAuthenticated;
        }

        let user_id = UserId::new(user_id);
        let _guard = self.history.user_guard(&user_id).await;

        self.history
            .append(&user_id, ChatMessage::user(question))
            .await;

        match self.ai.answer_question(question).await {
            Ok(answer) => {
                self.history
                    .append(&user_id, ChatMessage::assistant(answer.clone()))
                    .await;
                ChatReply::Answer(answer)
            }
            Err(e) => {
                error!(error = %e, "AI answer flow failed");
                ChatReply::Failed
            }
        }
    }

    /// Ordered chat history for a user.
    ///
    /// Returns an empty list for a blank or unknown user id; never fails.
    pub async fn history(&self, user_id: &str) -> Vec<ChatMessage> {
        if user_id.trim().is_empty() {
            return Vec::new();
        }
        self.history.messages(&UserId::new(user_id)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;

    use planwise_core::ChatRole;

    use crate::ai::AiError;
    use crate::models::prediction::CarrierPrediction;

    use super::*;

    /// AI double that echoes the question back.
    struct EchoAi;

    #[async_trait]
    impl AiApi for EchoAi {
        async fn answer_question(&self, question: &str) -> Result<String, AiError> {
            Ok(format!("echo: {question}"))
        }

        async fn predict_signal(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<Vec<CarrierPrediction>, AiError> {
            Ok(Vec::new())
        }
    }

    /// AI double that always fails.
    struct FailingAi;

    #[async_trait]
    impl AiApi for FailingAi {
        async fn answer_question(&self, _question: &str) -> Result<String, AiError> {
            Err(AiError::Api {
                status: 503,
                message: "model unavailable".to_string(),
            })
        }

        async fn predict_signal(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<Vec<CarrierPrediction>, AiError> {
            Err(AiError::Api {
                status: 503,
                message: "model unavailable".to_string(),
            })
        }
    }

    fn service(ai: Arc<dyn AiApi>) -> ConversationService {
        ConversationService::new(Arc::new(ChatHistory::new()), ai)
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected_without_history() {
        let chat = service(Arc::new(EchoAi));

        let reply = chat.ask("", "u1").await;
        assert_eq!(reply, ChatReply::MissingQuestion);
        assert_eq!(reply.to_string(), "Please provide a question.");
        assert!(chat.history("u1").await.is_empty());

        // Whitespace counts as blank too
        assert_eq!(chat.ask("   ", "u1").await, ChatReply::MissingQuestion);
        assert!(chat.history("u1").await.is_empty());
    }

    #[tokio::test]
    async fn test_blank_user_id_is_rejected() {
        let chat = service(Arc::new(EchoAi));
        let reply = chat.ask("What plan is best?", "").await;
        assert_eq!(reply, ChatReply::NotAuthenticated);
        assert_eq!(reply.to_string(), "User not authenticated.");
    }

    #[tokio::test]
    async fn test_exchange_records_both_messages() {
        let chat = service(Arc::new(EchoAi));

        let reply = chat.ask("What plan is best?", "u1").await;
        assert_eq!(
            reply,
            ChatReply::Answer("echo: What plan is best?".to_string())
        );

        let history = chat.history("u1").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[0].content, "What plan is best?");
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(history[1].content, "echo: What plan is best?");
    }

    #[tokio::test]
    async fn test_two_exchanges_keep_order() {
        let chat = service(Arc::new(EchoAi));

        chat.ask("What plan is best?", "u1").await;
        chat.ask("Another?", "u1").await;

        let history = chat.history("u1").await;
        assert_eq!(history.len(), 4);

        let roles: Vec<ChatRole> = history.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            [
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant
            ]
        );

        // Message ids are unique within the history
        let mut ids: Vec<&str> = history.iter().map(|m| m.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[tokio::test]
    async fn test_failed_ai_call_keeps_user_message() {
        let chat = service(Arc::new(FailingAi));

        let reply = chat.ask("What plan is best?", "u1").await;
        assert_eq!(reply, ChatReply::Failed);
        assert_eq!(
            reply.to_string(),
            "I'm sorry, but I encountered an error. Please try again."
        );

        let history = chat.history("u1").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, ChatRole::User);
    }

    #[tokio::test]
    async fn test_history_for_unknown_user_is_empty() {
        let chat = service(Arc::new(EchoAi));
        assert!(chat.history("nonexistent").await.is_empty());
        assert!(chat.history("").await.is_empty());
    }
}
