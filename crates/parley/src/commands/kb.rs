//! Knowledge base command - list entries and check they are reachable.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::{Style, style};
use serde::Serialize;

use super::Context;

/// Arguments for the kb command.
#[derive(Args, Debug)]
pub struct KbArgs {
    #[command(subcommand)]
    pub command: Option<KbCommand>,
}

#[derive(Subcommand, Debug)]
pub enum KbCommand {
    /// List all knowledge entries (default)
    List,

    /// Check that every phrase can be reached through normalization
    Check,
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    phrase: &'a str,
    answer: &'a str,
}

/// Run the kb command.
pub fn run(args: KbArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(KbCommand::List) {
        KbCommand::List => list(ctx),
        KbCommand::Check => check(ctx),
    }
}

fn list(ctx: &Context) -> Result<()> {
    let knowledge = ctx.load_knowledge()?;
    let entries = knowledge.entries();

    if ctx.json_output {
        let output: Vec<EntryOutput> = entries
            .iter()
            .map(|&(phrase, answer)| EntryOutput { phrase, answer })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    println!(
        "{} {}",
        style("Knowledge Base").bold(),
        dim.apply_to(format!("({} entries)", entries.len()))
    );
    println!("{}", dim.apply_to("─".repeat(50)));
    for (phrase, answer) in entries {
        println!("{}", style(phrase).cyan());
        println!("  {}", answer);
    }

    Ok(())
}

fn check(ctx: &Context) -> Result<()> {
    let engine = ctx.load_engine()?;
    let unreachable = engine.audit()?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&unreachable)?);
    } else if unreachable.is_empty() {
        let green = Style::new().green();
        println!(
            "{} All {} phrases are reachable",
            green.apply_to("✓"),
            engine.knowledge().len()
        );
    } else {
        let red = Style::new().red();
        let dim = Style::new().dim();
        for entry in &unreachable {
            println!(
                "{} {} {}",
                red.apply_to("✗"),
                entry.phrase,
                dim.apply_to(format!("(normalizes to '{}')", entry.normalized))
            );
        }
    }

    if !unreachable.is_empty() {
        bail!("{} knowledge phrase(s) can never match", unreachable.len());
    }
    Ok(())
}
