//! Narration capability
//!
//! The coaching text layer is optional: when a narrator backend is
//! configured it turns the [`CoachContext`] into prose, and when it is not
//! (or a call fails) the rule-based nudges in [`rules`] take over. Core
//! analytics never branch on narrator availability; callers hold an
//! `Option<Box<dyn Narrator>>` and fall back themselves.

mod openai;
pub mod rules;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CoachContext;

pub use openai::OpenAiNarrator;
pub use rules::{rule_based_answer, rule_based_nudges};

/// A backend that can ground generated coaching text on a context object.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Produce a short coaching note for the user's current finances.
    async fn narrate(&self, context: &CoachContext) -> Result<String>;

    /// Answer a free-form question about the user's spending.
    async fn answer(&self, question: &str, context: &CoachContext) -> Result<String>;
}

/// Build a narrator from the environment, if one is configured.
///
/// Currently the only backend is the OpenAI-compatible chat API, enabled
/// by `OPENAI_API_KEY`.
pub fn from_env() -> Option<Box<dyn Narrator>> {
    OpenAiNarrator::from_env().map(|n| Box::new(n) as Box<dyn Narrator>)
}
