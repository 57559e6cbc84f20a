//! Storyforge: document tree for a writing studio
//!
//! A forest of documents and folders held in memory behind one lock, with
//! lookups, edits, moves, filtered views, and project statistics. Around the
//! store sit the editor workflows (starter content, templates, assistant
//! generation), layered configuration, logging, and the CLI.

pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod store;
pub mod text;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod views;
pub mod workflow;
