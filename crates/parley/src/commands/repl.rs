//! REPL (Read-Eval-Print Loop) implementation for interactive chat.
//!
//! Output goes through [`Term`] so that a failed write ends the session
//! with an error instead of being dropped.

use anyhow::Result;
use console::{Style, Term, style};
use parley_engine::ResponseEngine;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

use super::analyze::Analysis;

/// REPL state and configuration.
pub struct Repl {
    engine: ResponseEngine,
    greeting: Option<String>,
    prompt: String,
    editor: Editor<(), DefaultHistory>,
    term: Term,
}

impl Repl {
    /// Create a new REPL instance.
    pub fn new(engine: ResponseEngine, greeting: Option<String>, prompt: String) -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();

        let editor = Editor::with_config(config)?;

        Ok(Self {
            engine,
            greeting,
            prompt,
            editor,
            term: Term::stdout(),
        })
    }

    /// Run the REPL loop.
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome()?;

        loop {
            match self.editor.readline(&self.prompt) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        match self.handle_slash_command(line)? {
                            ControlFlow::Continue => continue,
                            ControlFlow::Exit => break,
                        }
                    }

                    self.send_message(line)?;
                }
                Err(ReadlineError::Interrupted) => {
                    self.print_dim("(Interrupted - type /quit to exit)")?;
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(e) => {
                    self.print_error(&format!("Input error: {}", e))?;
                    break;
                }
            }
        }

        self.print_dim("Goodbye!")?;
        Ok(())
    }

    /// Echo the message and print the chatbot's reply.
    fn send_message(&mut self, message: &str) -> Result<()> {
        let reply = self.engine.respond(message);

        self.term
            .write_line(&format!("{} {}", style("You:").bold().blue(), message))?;
        self.print_chatbot(&reply)?;
        self.term.write_line("")?;
        Ok(())
    }

    /// Handle a slash command.
    fn handle_slash_command(&mut self, input: &str) -> Result<ControlFlow> {
        let (cmd, rest) = input[1..]
            .split_once(char::is_whitespace)
            .unwrap_or((&input[1..], ""));
        let rest = rest.trim();

        match cmd {
            "quit" | "q" | "exit" => {
                return Ok(ControlFlow::Exit);
            }
            "help" | "h" | "?" => {
                self.print_help()?;
            }
            "clear" | "cls" => {
                self.term.clear_screen()?;
            }
            "analyze" if !rest.is_empty() => match Analysis::of(&self.engine, rest) {
                Ok(analysis) => {
                    for line in analysis.lines() {
                        self.term.write_line(&line)?;
                    }
                    self.term.write_line("")?;
                }
                Err(e) => {
                    self.print_error(&format!("Analysis failed: {}", e))?;
                }
            },
            "analyze" => {
                self.print_dim("Usage: /analyze <text>")?;
            }
            "" => {
                self.print_dim("Type /help for available commands")?;
            }
            _ => {
                self.print_error(&format!("Unknown command: /{}", cmd))?;
                self.print_dim("Type /help for available commands")?;
            }
        }

        Ok(ControlFlow::Continue)
    }

    fn print_welcome(&self) -> Result<()> {
        let dim = Style::new().dim();
        self.term
            .write_line(&style("Parley Chat").bold().cyan().to_string())?;
        self.term
            .write_line(&dim.apply_to("─".repeat(40)).to_string())?;
        self.term.write_line(
            &dim.apply_to("Use /help for commands, Ctrl+D to exit.")
                .to_string(),
        )?;
        self.term.write_line("")?;

        if let Some(greeting) = &self.greeting {
            self.print_chatbot(greeting)?;
            self.term.write_line("")?;
        }
        Ok(())
    }

    fn print_help(&self) -> Result<()> {
        let dim = Style::new().dim();
        let lines = [
            style("Available Commands").bold().to_string(),
            dim.apply_to("─".repeat(40)).to_string(),
            format!("  {}  - Exit the REPL", style("/quit, /q").cyan()),
            format!("  {}  - Show this help", style("/help, /h, /?").cyan()),
            format!("  {}  - Clear the screen", style("/clear").cyan()),
            format!(
                "  {}  - Show tokens, tags, lemmas and entities",
                style("/analyze <text>").cyan()
            ),
            String::new(),
        ];
        for line in lines {
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    fn print_chatbot(&self, text: &str) -> Result<()> {
        self.term
            .write_line(&format!("{} {}", style("Chatbot:").bold().green(), text))?;
        Ok(())
    }

    fn print_dim(&self, msg: &str) -> Result<()> {
        let dim = Style::new().dim();
        self.term.write_line(&dim.apply_to(msg).to_string())?;
        Ok(())
    }

    fn print_error(&self, msg: &str) -> Result<()> {
        let red = Style::new().red();
        self.term
            .write_line(&format!("{} {}", red.apply_to("Error:"), msg))?;
        Ok(())
    }
}

/// Control flow for the REPL.
pub enum ControlFlow {
    Continue,
    Exit,
}
