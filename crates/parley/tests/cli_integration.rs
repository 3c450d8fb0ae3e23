//! CLI integration tests for the Parley command-line interface.
//!
//! Every command runs in a scratch working directory with a scratch config
//! directory, so neither a local `parley.toml` nor the user's config leaks
//! in. Commands that need models point `--models` at the shipped set.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn models_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models")
}

/// A parley command isolated from the environment.
struct Sandbox {
    work: TempDir,
    config: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            work: TempDir::new().unwrap(),
            config: TempDir::new().unwrap(),
        }
    }

    fn parley(&self) -> Command {
        let mut cmd = Command::cargo_bin("parley").unwrap();
        cmd.current_dir(self.work.path())
            .env("PARLEY_CONFIG_DIR", self.config.path())
            .env_remove("PARLEY_MODELS_DIR")
            .env_remove("PARLEY_KNOWLEDGE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// A parley command using the shipped models.
    fn with_models(&self) -> Command {
        let mut cmd = self.parley();
        cmd.arg("--models").arg(models_dir());
        cmd
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    Sandbox::new()
        .parley()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parley"))
        .stdout(predicate::str::contains("FAQ chatbot"));
}

#[test]
fn test_version_displays() {
    Sandbox::new()
        .parley()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("parley"));
}

#[test]
fn test_help_lists_subcommands() {
    Sandbox::new()
        .parley()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("kb"));
}

#[test]
fn test_no_subcommand_fails() {
    Sandbox::new().parley().assert().failure();
}

#[test]
fn test_ask_requires_question() {
    Sandbox::new().parley().arg("ask").assert().failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Ask
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_ask_knowledge_question() {
    Sandbox::new()
        .with_models()
        .args(["ask", "What is the capital of France?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The capital of France is Paris."));
}

#[test]
fn test_ask_joins_words() {
    Sandbox::new()
        .with_models()
        .args(["ask", "how", "are", "you"])
        .assert()
        .success()
        .stdout(predicate::str::contains("I'm doing great, thank you for asking!"));
}

#[test]
fn test_ask_entity_fallback() {
    Sandbox::new()
        .with_models()
        .args(["ask", "John visited Berlin"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "I recognize that John is a person and Berlin is a location. That's interesting!",
        ));
}

#[test]
fn test_ask_not_understood() {
    Sandbox::new()
        .with_models()
        .args(["ask", "xyzzy plugh"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "I'm sorry, I don't understand that. Could you please rephrase your question?",
        ));
}

#[test]
fn test_ask_json() {
    let output = Sandbox::new()
        .with_models()
        .args(["--json", "ask", "Hi"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["question"], "Hi");
    assert_eq!(json["text"], "Hello! How can I assist you today?");
    assert_eq!(json["reply"]["kind"], "answer");
}

#[test]
fn test_models_dir_from_env() {
    Sandbox::new()
        .parley()
        .env("PARLEY_MODELS_DIR", models_dir())
        .args(["ask", "Bye"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye! Have a nice day!"));
}

#[test]
fn test_models_dir_from_project_config() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.work.path().join("parley.toml"),
        format!("[models]\ndir = {:?}\n", models_dir().display().to_string()),
    )
    .unwrap();

    sandbox
        .parley()
        .args(["ask", "Hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello there! What's on your mind?"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Setup Failures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_models_reports_setup_failure() {
    let sandbox = Sandbox::new();
    sandbox
        .parley()
        .args(["--models", "no-such-dir", "ask", "Hi"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "I'm sorry, I'm having trouble with my NLP models. Please check your project setup.",
        ))
        .stderr(predicate::str::contains("en-token.json"));
}

#[test]
fn test_chat_with_missing_models_accepts_no_queries() {
    let sandbox = Sandbox::new();
    sandbox
        .parley()
        .args(["--models", "no-such-dir", "chat"])
        .write_stdin("Hi\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("having trouble with my NLP models"))
        .stdout(predicate::str::contains("Hello! How can I assist you today?").not());
}

#[test]
fn test_bad_knowledge_file_fails() {
    let sandbox = Sandbox::new();
    let path = sandbox.work.path().join("faq.toml");
    fs::write(&path, "[[entry]]\nphrase = \"What?\"\nanswer = \"x\"\n").unwrap();

    sandbox
        .with_models()
        .arg("--knowledge")
        .arg(&path)
        .args(["ask", "Hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not canonical"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_chat_session() {
    Sandbox::new()
        .with_models()
        .arg("chat")
        .write_stdin("Hi\n\nWho invented the light bulb?\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Hello! I'm an NLP-powered chatbot. How can I help you today?",
        ))
        .stdout(predicate::str::contains("You: Hi"))
        .stdout(predicate::str::contains(
            "Chatbot: Hello! How can I assist you today?",
        ))
        .stdout(predicate::str::contains(
            "Thomas Edison is credited with inventing the practical incandescent light bulb.",
        ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Analyze and Knowledge Base
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_analyze_json() {
    let output = Sandbox::new()
        .with_models()
        .args(["--json", "analyze", "John visited Berlin"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["canonical"], "john visit berlin");
    assert_eq!(json["tags"][1], "VBD");
    assert_eq!(json["entities"][0]["kind"], "person");
    assert_eq!(json["entities"][0]["text"], "John");
    assert_eq!(json["entities"][1]["kind"], "location");
    assert_eq!(json["reply"]["kind"], "person_and_location");
}

#[test]
fn test_analyze_text() {
    Sandbox::new()
        .with_models()
        .args(["analyze", "How are you?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("how be you"));
}

#[test]
fn test_kb_list_needs_no_models() {
    Sandbox::new()
        .parley()
        .args(["--models", "no-such-dir", "kb", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("what be the capital of france"))
        .stdout(predicate::str::contains("17 entries"));
}

#[test]
fn test_kb_check_builtin() {
    Sandbox::new()
        .with_models()
        .args(["kb", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All 17 phrases are reachable"));
}

#[test]
fn test_kb_check_reports_unreachable_phrase() {
    let sandbox = Sandbox::new();
    let path = sandbox.work.path().join("faq.toml");
    fs::write(
        &path,
        "[[entry]]\nphrase = \"what is rust\"\nanswer = \"A language.\"\n",
    )
    .unwrap();

    sandbox
        .with_models()
        .arg("--knowledge")
        .arg(&path)
        .args(["kb", "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("what be rust"));
}
