//! Analyze command - show how the pipeline reads a piece of text.

use anyhow::Result;
use clap::Args;
use console::{Style, style};
use parley_engine::{Reply, ResponseEngine};
use parley_nlp::{EntityKind, EntityMatch, NormalizedQuery};
use serde::Serialize;

use super::Context;

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// The text to analyze
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// Everything the engine sees for one input.
#[derive(Debug, Serialize)]
pub struct Analysis {
    pub input: String,
    #[serde(flatten)]
    pub query: NormalizedQuery,
    pub entities: Vec<EntityMatch>,
    pub reply: Reply,
}

impl Analysis {
    pub fn of(engine: &ResponseEngine, input: &str) -> Result<Self> {
        let pipeline = engine.pipeline();
        let query = pipeline.analyze(input)?;

        let mut entities = Vec::new();
        for kind in EntityKind::ALL {
            if let Some(found) = pipeline.find_entity(kind, input)? {
                entities.push(found);
            }
        }
        let reply = engine.reply_to(input, &query)?;

        Ok(Self {
            input: input.to_string(),
            query,
            entities,
            reply,
        })
    }

    /// Human-readable rendering, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let dim = Style::new().dim();
        let mut lines = vec![
            style("Analysis").bold().to_string(),
            dim.apply_to("─".repeat(50)).to_string(),
        ];

        let width = self
            .query
            .tokens
            .iter()
            .map(|t| t.text.chars().count())
            .max()
            .unwrap_or(0);
        for ((token, tag), lemma) in self
            .query
            .tokens
            .iter()
            .zip(&self.query.tags)
            .zip(&self.query.lemmas)
        {
            lines.push(format!(
                "  {:<width$}  {:<5} {}",
                token.text,
                style(tag).cyan(),
                dim.apply_to(lemma)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Canonical: {}", style(&self.query.canonical).bold()));

        if self.entities.is_empty() {
            lines.push(format!("Entities:  {}", dim.apply_to("none")));
        } else {
            for entity in &self.entities {
                lines.push(format!(
                    "Entity:    {} {} {}",
                    entity.text,
                    style(entity.kind).yellow(),
                    dim.apply_to(format!("[{}..{}]", entity.range.start, entity.range.end))
                ));
            }
        }

        lines.push(format!("Reply:     {}", self.reply));
        lines
    }
}

/// Run the analyze command.
pub fn run(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.load_engine()?;
    let analysis = Analysis::of(&engine, &args.text.join(" "))?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        for line in analysis.lines() {
            println!("{}", line);
        }
    }

    Ok(())
}
