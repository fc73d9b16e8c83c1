//! Core data models used throughout ragchat.
//!
//! These types represent the documents, search results, and chat messages
//! that flow through the retrieval and response pipeline.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File format a document was originally authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Txt,
    Md,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Txt => "txt",
            DocumentType::Md => "md",
        };
        f.write_str(s)
    }
}

/// Provenance attached to every [`Document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Where the document came from (e.g. `"react-docs"`).
    pub source: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub created: DateTime<Utc>,
}

/// An immutable knowledge-base document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// A ranked document returned by [`search_documents`](crate::search::search_documents).
///
/// `document` is shared with the store it was ranked against; a result
/// never refers to a document outside that store.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub document: Arc<Document>,
    /// Sum of keyword bonuses. Unbounded, typically `0.0..=3.0`.
    pub score: f64,
    /// The line (or fallback excerpt) most relevant to the query.
    pub relevant_chunk: String,
}

/// Author of a chat [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Millisecond creation timestamp, rendered as a string.
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }
}
