#![forbid(unsafe_code)]

//! Core domain model and session logic for the Recall flashcard trainer.
//!
//! This crate provides:
//! - The ordered card store (terms, definitions, mistake counters)
//! - Quiz sampling and answer grading
//! - The interactive command loop and its session transcript
//! - Deck file persistence and configuration

pub mod error;
pub mod deck;
pub mod quiz;
pub mod transcript;
pub mod storage;
pub mod config;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use deck::{Card, Deck};
pub use quiz::Verdict;
pub use transcript::Transcript;
pub use config::Config;
pub use session::{Command, Session, SessionEnd, SessionOptions};
