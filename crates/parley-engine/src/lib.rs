//! Response engine for Parley.
//!
//! Maps a user message to a reply: an exact knowledge-base hit on the
//! message's canonical phrase, else a person/location acknowledgement for
//! multi-token input, else a fixed "don't understand" reply.

pub mod engine;
pub mod error;
pub mod knowledge;

pub use engine::{APOLOGY, NOT_UNDERSTOOD, Reply, ResponseEngine, UnreachablePhrase};
pub use error::{EngineError, KnowledgeError, Result};
pub use knowledge::KnowledgeBase;
