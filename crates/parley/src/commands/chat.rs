//! Chat command - interactive REPL mode.

use anyhow::Result;
use clap::Args;

use super::Context;
use super::repl::Repl;

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Skip the greeting
    #[arg(long)]
    pub quiet: bool,
}

/// Run the chat command (REPL).
pub fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.load_engine()?;

    let greeting = if args.quiet {
        None
    } else {
        Some(ctx.greeting.clone())
    };
    let mut repl = Repl::new(engine, greeting, ctx.prompt.clone())?;
    repl.run()
}
