//! # ragchat Core
//!
//! Shared, runtime-free logic for ragchat: data models, the document store
//! abstraction with its built-in knowledge base, the keyword ranker, the
//! context formatter, and the canned response rules.
//!
//! This crate contains no tokio, filesystem I/O, or other native-only
//! dependencies. Everything here is a pure function over immutable data.

pub mod context;
pub mod models;
pub mod respond;
pub mod search;
pub mod store;
