//! Reply generation: knowledge-base lookup with a named-entity fallback.

use std::fmt;
use std::path::Path;

use parley_nlp::{EntityKind, LinguisticPipeline, ModelPaths, NormalizedQuery, PipelineError};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::knowledge::KnowledgeBase;

/// Reply when nothing matched.
pub const NOT_UNDERSTOOD: &str =
    "I'm sorry, I don't understand that. Could you please rephrase your question?";

/// Reply when the pipeline failed on a query.
pub const APOLOGY: &str = "I'm sorry, something went wrong while processing your message.";

/// The branch a query ended up in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Knowledge-base hit.
    Answer { text: String },
    /// Both a person and a location were recognized.
    PersonAndLocation { person: String, location: String },
    /// Only a person was recognized.
    Person { person: String },
    /// Only a location was recognized.
    Location { location: String },
    /// No knowledge-base hit and no entity.
    NotUnderstood,
}

impl Reply {
    /// The text shown to the user.
    pub fn text(&self) -> String {
        match self {
            Self::Answer { text } => text.clone(),
            Self::PersonAndLocation { person, location } => format!(
                "I recognize that {person} is a person and {location} is a location. That's interesting!"
            ),
            Self::Person { person } => format!("I know that {person} is a person."),
            Self::Location { location } => format!("I can see that {location} is a location."),
            Self::NotUnderstood => NOT_UNDERSTOOD.to_string(),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// A knowledge-base phrase that its own normalization does not reproduce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreachablePhrase {
    pub phrase: String,
    pub normalized: String,
}

/// Answers queries against an immutable knowledge base.
#[derive(Debug)]
pub struct ResponseEngine {
    pipeline: LinguisticPipeline,
    knowledge: KnowledgeBase,
}

impl ResponseEngine {
    pub fn new(pipeline: LinguisticPipeline, knowledge: KnowledgeBase) -> Self {
        Self {
            pipeline,
            knowledge,
        }
    }

    /// Load the models and, if given, a knowledge file; otherwise the
    /// built-in knowledge base is used.
    pub fn load(models: &ModelPaths, knowledge: Option<&Path>) -> Result<Self> {
        let pipeline = LinguisticPipeline::initialize(models)?;
        let knowledge = match knowledge {
            Some(path) => KnowledgeBase::load(path)?,
            None => KnowledgeBase::builtin(),
        };
        Ok(Self::new(pipeline, knowledge))
    }

    pub fn pipeline(&self) -> &LinguisticPipeline {
        &self.pipeline
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Work out the reply for `input`.
    ///
    /// Single-token inputs never reach the entity recognizers. Person and
    /// location are searched independently, on the raw input.
    pub fn reply(&self, input: &str) -> std::result::Result<Reply, PipelineError> {
        let query = self.pipeline.analyze(input)?;
        self.reply_to(input, &query)
    }

    /// Like [`reply`](Self::reply), reusing an already analyzed query.
    pub fn reply_to(
        &self,
        input: &str,
        query: &NormalizedQuery,
    ) -> std::result::Result<Reply, PipelineError> {
        if let Some(answer) = self.knowledge.get(&query.canonical) {
            debug!(phrase = %query.canonical, "Knowledge base hit");
            return Ok(Reply::Answer {
                text: answer.to_string(),
            });
        }

        if query.tokens.len() > 1 {
            let person = self.pipeline.find_entity(EntityKind::Person, input)?;
            let location = self.pipeline.find_entity(EntityKind::Location, input)?;

            let reply = match (person, location) {
                (Some(person), Some(location)) => Some(Reply::PersonAndLocation {
                    person: person.text,
                    location: location.text,
                }),
                (Some(person), None) => Some(Reply::Person {
                    person: person.text,
                }),
                (None, Some(location)) => Some(Reply::Location {
                    location: location.text,
                }),
                (None, None) => None,
            };
            if let Some(reply) = reply {
                return Ok(reply);
            }
        }

        debug!(phrase = %query.canonical, "No match");
        Ok(Reply::NotUnderstood)
    }

    /// The reply text for `input`; pipeline failures become [`APOLOGY`].
    pub fn respond(&self, input: &str) -> String {
        match self.reply(input) {
            Ok(reply) => reply.text(),
            Err(e) => {
                warn!(error = %e, "Failed to process message");
                APOLOGY.to_string()
            }
        }
    }

    /// Knowledge-base phrases that do not normalize to themselves.
    ///
    /// Such a phrase relies on lemma forms the current models never
    /// produce, so no input can reach it.
    pub fn audit(&self) -> std::result::Result<Vec<UnreachablePhrase>, PipelineError> {
        let mut unreachable = Vec::new();
        for phrase in self.knowledge.phrases() {
            let normalized = self.pipeline.normalize(phrase)?;
            if normalized != phrase {
                unreachable.push(UnreachablePhrase {
                    phrase: phrase.to_string(),
                    normalized,
                });
            }
        }
        Ok(unreachable)
    }
}
