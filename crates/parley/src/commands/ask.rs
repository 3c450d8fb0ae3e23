//! Ask command - one-shot question to the chatbot.

use anyhow::Result;
use clap::Args;
use console::Style;
use parley_engine::{APOLOGY, Reply};
use serde::Serialize;
use tracing::warn;

use super::Context;

/// Arguments for the ask command.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to ask
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

#[derive(Serialize)]
struct AskOutput<'a> {
    question: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<&'a Reply>,
}

/// Run the ask command.
pub fn run(args: AskArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.load_engine()?;
    let question = args.question.join(" ");

    if ctx.verbose {
        let dim = Style::new().dim();
        eprintln!(
            "{}",
            dim.apply_to(format!(
                "Knowledge base: {} entries ({})",
                engine.knowledge().len(),
                ctx.knowledge
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "built-in".to_string())
            ))
        );
    }

    let reply = match engine.reply(&question) {
        Ok(reply) => Some(reply),
        Err(e) => {
            warn!(error = %e, "Failed to process message");
            None
        }
    };
    let text = reply
        .as_ref()
        .map(Reply::text)
        .unwrap_or_else(|| APOLOGY.to_string());

    if ctx.json_output {
        let output = AskOutput {
            question: &question,
            text: &text,
            reply: reply.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", text);
    }

    Ok(())
}
