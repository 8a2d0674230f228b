//! Read-only constant tables: folder taxonomy, stop words, intent markers,
//! geographic modifiers, synonym groups.
//!
//! Built once at process start and shared by reference; nothing here mutates.

pub mod folders;
pub mod intents;
pub mod stopwords;
