//! # ragchat
//!
//! A terminal chat assistant that simulates retrieval-augmented generation
//! over a small, fixed React knowledge base.
//!
//! "Retrieval" is keyword substring scoring and "generation" is canned
//! template selection; both live in [`ragchat_core`]. This crate adds the
//! async pipeline, the chat state machine, and the CLI around them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────────┐   ┌───────────────────┐
//! │ Session  │──▶│ ChatController │──▶│ DocumentRetriever │──▶ ranker + formatter
//! │ history  │   │ idle/loading/  │   └───────────────────┘
//! └──────────┘   │ streaming/error│   ┌───────────────────┐
//!                │                │──▶│ ResponseGenerator │──▶ response rules
//!                └────────────────┘   └───────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`traits`] | Retriever and generator capabilities |
//! | [`pipeline`] | Simulated retriever and generator |
//! | [`chat`] | Chat controller state machine |
//! | [`session`] | Message history |
//! | [`progress`] | State indicators |
//! | [`chat_cmd`] | Interactive chat and one-shot ask |
//! | [`search`] | Search and document listing commands |
//! | [`eval`] | Heuristic evaluation harness |

pub mod chat;
pub mod chat_cmd;
pub mod config;
pub mod eval;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod search;
pub mod session;
pub mod traits;
