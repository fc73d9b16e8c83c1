//! Conversation history on top of a [`ChatController`].

use chrono::Utc;

use ragchat_core::models::{Message, Role};

use crate::chat::{ChatController, ChatError, ChatState};

/// One user's conversation: ordered messages plus the controller that
/// answers them. Lives only as long as the process.
pub struct ChatSession {
    controller: ChatController,
    messages: Vec<Message>,
    last_id: i64,
}

impl ChatSession {
    pub fn new(controller: ChatController) -> Self {
        Self {
            controller,
            messages: Vec::new(),
            last_id: 0,
        }
    }

    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// End the session, keeping its history.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    pub fn state(&self) -> ChatState {
        self.controller.state()
    }

    /// Send `input` and record the exchange.
    ///
    /// Blank input is ignored and yields `Ok(None)`. On failure the user
    /// message stays in the history but no assistant message is added.
    pub async fn submit(&mut self, input: &str) -> Result<Option<&Message>, ChatError> {
        let query = input.trim();
        if query.is_empty() {
            return Ok(None);
        }
        if self.controller.state().is_busy() {
            return Err(ChatError::Busy);
        }

        let user = Message::new(self.next_id(), Role::User, query);
        self.messages.push(user);

        let history = &self.messages[..self.messages.len() - 1];
        let answer = self.controller.generate_response(query, history).await?;

        let assistant = Message::new(self.next_id(), Role::Assistant, answer);
        self.messages.push(assistant);
        Ok(self.messages.last())
    }

    /// Forget every message. The controller state is untouched.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn retry(&self) {
        self.controller.retry_last_request();
    }

    /// Millisecond timestamp, bumped so IDs strictly increase.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{KeywordRetriever, TemplateGenerator};
    use crate::traits::{DocumentRetriever, ResponseGenerator, Retrieval};
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use ragchat_core::search::SearchParams;
    use ragchat_core::store::knowledge::react_knowledge_base;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Records the history length it was handed.
    struct HistoryProbe {
        seen: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl ResponseGenerator for HistoryProbe {
        async fn generate(
            &self,
            query: &str,
            _r: &Retrieval,
            history: &[Message],
        ) -> Result<String> {
            self.seen.lock().unwrap().push(history.len());
            Ok(format!("echo: {query}"))
        }
    }

    struct Broken;

    #[async_trait]
    impl DocumentRetriever for Broken {
        async fn retrieve(&self, _query: &str) -> Result<Retrieval> {
            bail!("boom")
        }
    }

    fn retriever() -> Arc<KeywordRetriever> {
        Arc::new(KeywordRetriever::new(
            Arc::new(react_knowledge_base()),
            SearchParams::default(),
            Duration::ZERO,
        ))
    }

    fn session() -> ChatSession {
        ChatSession::new(ChatController::new(
            retriever(),
            Arc::new(TemplateGenerator::new(Duration::ZERO)),
        ))
    }

    #[tokio::test]
    async fn submit_appends_user_and_assistant() {
        let mut s = session();
        let reply = s.submit("  Como usar useMemo?  ").await.unwrap();
        let reply = reply.cloned().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.starts_with("# Como usar useMemo"));

        let msgs = s.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, Role::User);
        assert_eq!(msgs[0].content, "Como usar useMemo?");
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut s = session();
        assert!(s.submit("   ").await.unwrap().is_none());
        assert!(s.messages().is_empty());
        assert_eq!(s.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn generator_sees_prior_history_only() {
        let probe = Arc::new(HistoryProbe {
            seen: Mutex::new(Vec::new()),
        });
        let mut s = ChatSession::new(ChatController::new(retriever(), probe.clone()));
        s.submit("first").await.unwrap();
        s.submit("second").await.unwrap();
        assert_eq!(*probe.seen.lock().unwrap(), vec![0, 2]);
    }

    #[tokio::test]
    async fn failure_keeps_user_message_only() {
        let mut s = ChatSession::new(ChatController::new(
            Arc::new(Broken),
            Arc::new(TemplateGenerator::new(Duration::ZERO)),
        ));
        let err = s.submit("hooks").await.unwrap_err();
        assert!(matches!(err, ChatError::Generation(_)));
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].role, Role::User);
        assert_eq!(s.state(), ChatState::Error);

        s.retry();
        assert_eq!(s.state(), ChatState::Idle);
        assert_eq!(s.controller().error(), None);
        assert_eq!(s.messages().len(), 1);
    }

    #[tokio::test]
    async fn ids_strictly_increase() {
        let mut s = session();
        for q in ["hooks", "button", "memo"] {
            s.submit(q).await.unwrap();
        }
        let ids: Vec<i64> = s.messages().iter().map(|m| m.id.parse().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids {ids:?}");
    }

    #[tokio::test]
    async fn clear_empties_history() {
        let mut s = session();
        s.submit("hooks").await.unwrap();
        s.clear();
        assert!(s.messages().is_empty());
    }
}
