//! CLI command handlers.

pub mod analyze;
pub mod ask;
pub mod chat;
pub mod kb;
pub mod repl;

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::Style;
use parley_config::{DEFAULT_MODELS_DIR, ParleyConfig};
use parley_engine::{EngineError, KnowledgeBase, ResponseEngine};
use parley_nlp::{ArtifactKind, ModelPaths};

/// Shown instead of a reply when the models cannot be loaded.
pub const SETUP_FAILURE: &str =
    "I'm sorry, I'm having trouble with my NLP models. Please check your project setup.";

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolved model artifact locations.
    pub models: ModelPaths,
    /// Knowledge file, or `None` for the built-in question set.
    pub knowledge: Option<PathBuf>,
    /// Chat greeting.
    pub greeting: String,
    /// Chat input prompt.
    pub prompt: String,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Combine the loaded config with CLI overrides (CLI wins).
    pub fn new(
        config: ParleyConfig,
        models_dir: Option<PathBuf>,
        knowledge: Option<PathBuf>,
        json_output: bool,
        verbose: bool,
    ) -> Self {
        let dir = models_dir
            .or_else(|| config.models_dir().cloned())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODELS_DIR));
        let models = resolve_model_paths(&config, &dir);

        Self {
            models,
            knowledge: knowledge.or_else(|| config.knowledge_path().cloned()),
            greeting: config.greeting().to_string(),
            prompt: config.prompt().to_string(),
            json_output,
            verbose,
        }
    }

    /// Load the configured knowledge base without touching the models.
    pub fn load_knowledge(&self) -> Result<KnowledgeBase> {
        Ok(match &self.knowledge {
            Some(path) => KnowledgeBase::load(path)?,
            None => KnowledgeBase::builtin(),
        })
    }

    /// Load models and knowledge.
    ///
    /// A model failure prints the setup-failure reply before the error is
    /// returned.
    pub fn load_engine(&self) -> Result<ResponseEngine> {
        match ResponseEngine::load(&self.models, self.knowledge.as_deref()) {
            Ok(engine) => Ok(engine),
            Err(e) => {
                if matches!(e, EngineError::Models(_)) {
                    let red = Style::new().red();
                    println!("{}", red.apply_to(SETUP_FAILURE));
                }
                Err(e.into())
            }
        }
    }
}

/// Default file names under `dir`, with `[models]` overrides applied.
/// Relative overrides resolve against `dir`.
fn resolve_model_paths(config: &ParleyConfig, dir: &Path) -> ModelPaths {
    let mut paths = ModelPaths::in_dir(dir);
    if let Some(models) = &config.models {
        for (name, path) in models.overrides() {
            if let Some(kind) = ArtifactKind::ALL.into_iter().find(|k| k.as_str() == name) {
                paths = paths.with(kind, dir.join(path));
            }
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let config = ParleyConfig::from_toml(
            r#"
[models]
dir = "/config/models"

[knowledge]
path = "config.toml"
"#,
        )
        .unwrap();
        let ctx = Context::new(
            config,
            Some(PathBuf::from("/cli/models")),
            Some(PathBuf::from("cli.toml")),
            false,
            false,
        );
        assert_eq!(ctx.models, ModelPaths::in_dir("/cli/models"));
        assert_eq!(ctx.knowledge, Some(PathBuf::from("cli.toml")));
    }

    #[test]
    fn test_defaults() {
        let ctx = Context::new(ParleyConfig::new(), None, None, true, false);
        assert_eq!(ctx.models, ModelPaths::in_dir(DEFAULT_MODELS_DIR));
        assert!(ctx.knowledge.is_none());
        assert_eq!(ctx.greeting, parley_config::DEFAULT_GREETING);
        assert!(ctx.json_output);
    }

    #[test]
    fn test_artifact_overrides_resolve_against_dir() {
        let config = ParleyConfig::from_toml(
            r#"
[models]
dir = "/srv/models"
person = "people.json"
location = "/abs/places.json"
"#,
        )
        .unwrap();
        let ctx = Context::new(config, None, None, false, false);
        assert_eq!(ctx.models.person, PathBuf::from("/srv/models/people.json"));
        assert_eq!(ctx.models.location, PathBuf::from("/abs/places.json"));
        assert_eq!(
            ctx.models.tokenizer,
            PathBuf::from("/srv/models/en-token.json")
        );
    }
}
