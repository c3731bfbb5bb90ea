//! Integration tests for the conversation flow.
//!
//! Exercises ask/history through a full [`AppState`] with scripted AI
//! doubles.

use std::sync::Arc;

use planwise_core::ChatRole;

use planwise_assistant::services::ChatReply;
use planwise_integration_tests::{ScriptedAi, UnavailableAi, init_tracing, memory_state};

#[tokio::test]
async fn two_exchanges_build_ordered_history() {
    init_tracing();
    let state = memory_state(Arc::new(ScriptedAi::answering(
        "The Airtel 5G plan fits your usage.",
    )));
    let chat = state.conversation();

    let first = chat.ask("What plan is best?", "u1").await;
    assert_eq!(
        first,
        ChatReply::Answer("The Airtel 5G plan fits your usage.".to_string())
    );

    let second = chat.ask("Another?", "u1").await;
    assert!(matches!(second, ChatReply::Answer(_)));

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
    assert_eq!(history[0].content, "What plan is best?");
    assert_eq!(history[2].content, "Another?");

    // Appends never reorder earlier messages
    assert!(history.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

#[tokio::test]
async fn validation_rejections_leave_history_untouched() {
    init_tracing();
    let state = memory_state(Arc::new(ScriptedAi::answering("unused")));
    let chat = state.conversation();

    let blank_question = chat.ask("", "u1").await;
    assert_eq!(blank_question, ChatReply::MissingQuestion);
    assert_eq!(blank_question.text(), "Please provide a question.");

    let blank_user = chat.ask("What plan is best?", "").await;
    assert_eq!(blank_user, ChatReply::NotAuthenticated);
    assert_eq!(blank_user.text(), "User not authenticated.");

    assert!(chat.history("u1").await.is_empty());
}

#[tokio::test]
async fn failed_answer_flow_keeps_only_the_user_message() {
    init_tracing();
    let state = memory_state(Arc::new(UnavailableAi));
    let chat = state.conversation();

    let reply = chat.ask("What plan is best?", "u1").await;
    assert_eq!(reply, ChatReply::Failed);
    assert_eq!(
        reply.text(),
        "I'm sorry, but I encountered an error. Please try again."
    );

    let history = chat.history("u1").await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[0].content, "What plan is best?");
}

#[tokio::test]
async fn histories_are_isolated_per_user() {
    init_tracing();
    let state = memory_state(Arc::new(ScriptedAi::answering("ok")));
    let chat = state.conversation();

    chat.ask("Question from u1", "u1").await;
    chat.ask("Question from u2", "u2").await;

    assert_eq!(chat.history("u1").await.len(), 2);
    assert_eq!(chat.history("u2").await.len(), 2);
    assert!(chat.history("nonexistent").await.is_empty());
}

#[tokio::test]
async fn concurrent_asks_for_one_user_are_serialized() {
    init_tracing();
    let state = memory_state(Arc::new(ScriptedAi::answering("ok")));

    let mut handles = Vec::new();
    for i in 0..5 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state.conversation().ask(&format!("question {i}"), "u1").await
        }));
    }
    for handle in handles {
        let reply = handle.await.expect("task completes");
        assert!(matches!(reply, ChatReply::Answer(_)));
    }

    // Every exchange is complete: user and assistant messages alternate
    let history = state.conversation().history("u1").await;
    assert_eq!(history.len(), 10);
    for (i, message) in history.iter().enumerate() {
        let expected = if i % 2 == 0 {
            ChatRole::User
        } else {
            ChatRole::Assistant
        };
        assert_eq!(message.role, expected, "position {i}");
    }
}
