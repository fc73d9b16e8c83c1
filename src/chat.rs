//! Chat controller state machine.
//!
//! Sequences one request at a time through a [`DocumentRetriever`] and a
//! [`ResponseGenerator`], exposing the current [`ChatState`] so a front end
//! can show what is happening.
//!
//! # Transitions
//!
//! ```text
//!            generate_response()
//!   idle ───────────────┐
//!   error ──────────────┤
//!                       ▼
//!                    loading ──(retriever ok)──▶ streaming ──(generator ok)──▶ idle
//!                       │                            │
//!                       └────────(failure)───────────┴──────────▶ error
//!
//!   error ──retry_last_request()──▶ idle
//! ```
//!
//! A call made while `loading` or `streaming` is rejected with
//! [`ChatError::Busy`] and does not disturb the request in flight.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use ragchat_core::models::Message;

use crate::traits::{DocumentRetriever, ResponseGenerator};

/// Buffered transitions per subscriber before old ones are dropped.
const TRANSITION_CAPACITY: usize = 16;

/// Lifecycle of the current chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatState {
    Idle,
    Loading,
    Streaming,
    Error,
}

impl ChatState {
    /// True while a request is in flight.
    pub fn is_busy(self) -> bool {
        matches!(self, ChatState::Loading | ChatState::Streaming)
    }
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChatState::Idle => "idle",
            ChatState::Loading => "loading",
            ChatState::Streaming => "streaming",
            ChatState::Error => "error",
        };
        f.write_str(s)
    }
}

/// Failures surfaced by [`ChatController::generate_response`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("response generation failed: {0}")]
    Generation(String),
    #[error("a response is already being generated")]
    Busy,
}

#[derive(Debug)]
struct Status {
    state: ChatState,
    error: Option<String>,
}

/// Drives one chat session's requests.
pub struct ChatController {
    retriever: Arc<dyn DocumentRetriever>,
    generator: Arc<dyn ResponseGenerator>,
    status: Mutex<Status>,
    transitions: broadcast::Sender<ChatState>,
}

impl ChatController {
    pub fn new(
        retriever: Arc<dyn DocumentRetriever>,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_CAPACITY);
        Self {
            retriever,
            generator,
            status: Mutex::new(Status {
                state: ChatState::Idle,
                error: None,
            }),
            transitions,
        }
    }

    pub fn state(&self) -> ChatState {
        self.lock().state
    }

    /// Message of the last failure. `Some` only in [`ChatState::Error`].
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Receive every state transition from now on, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatState> {
        self.transitions.subscribe()
    }

    /// Answer `query`, given the messages exchanged so far.
    ///
    /// On failure the controller moves to [`ChatState::Error`] and keeps the
    /// message; the caller should not record a partial answer.
    pub async fn generate_response(
        &self,
        query: &str,
        history: &[Message],
    ) -> Result<String, ChatError> {
        {
            let mut status = self.lock();
            if status.state.is_busy() {
                warn!(state = %status.state, "rejected request while busy");
                return Err(ChatError::Busy);
            }
            status.error = None;
            self.transition(&mut status, ChatState::Loading);
        }
        info!(query, history = history.len(), "generating response");

        match self.run(query, history).await {
            Ok(answer) => {
                let mut status = self.lock();
                self.transition(&mut status, ChatState::Idle);
                Ok(answer)
            }
            Err(e) => {
                let message = format!("{e:#}");
                warn!(error = %message, "response generation failed");
                let mut status = self.lock();
                status.error = Some(message.clone());
                self.transition(&mut status, ChatState::Error);
                Err(ChatError::Generation(message))
            }
        }
    }

    async fn run(&self, query: &str, history: &[Message]) -> anyhow::Result<String> {
        let retrieval = self.retriever.retrieve(query).await?;
        {
            let mut status = self.lock();
            self.transition(&mut status, ChatState::Streaming);
        }
        self.generator.generate(query, &retrieval, history).await
    }

    /// Clear a failure so the user can submit again.
    ///
    /// Does not replay the failed query. Has no effect while busy.
    pub fn retry_last_request(&self) {
        let mut status = self.lock();
        if status.state.is_busy() {
            return;
        }
        status.error = None;
        if status.state != ChatState::Idle {
            self.transition(&mut status, ChatState::Idle);
        }
    }

    fn transition(&self, status: &mut Status, next: ChatState) {
        debug!(from = %status.state, to = %next, "chat state transition");
        status.state = next;
        // No subscribers is fine.
        let _ = self.transitions.send(next);
    }

    fn lock(&self) -> MutexGuard<'_, Status> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
