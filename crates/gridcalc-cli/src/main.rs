//! gridcalc CLI - run sheet scripts against an in-memory sheet

mod script;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use script::{Command, Runner};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Evaluate spreadsheet scripts")]
struct Cli {
    /// Script file, one command per line (default: stdin)
    script: Option<PathBuf>,

    /// Stop at the first failing line
    #[arg(long)]
    fail_fast: bool,

    /// Table to print once the script has finished
    #[arg(long, value_enum, default_value = "none")]
    dump: Dump,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Dump {
    /// Computed values
    Values,
    /// Cell texts as written
    Texts,
    /// Nothing
    None,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = match &cli.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            source
        }
    };

    let stdout = io::stdout();
    let mut runner = Runner::new(stdout.lock());
    let failures = runner.run(&source, cli.fail_fast)?;

    match cli.dump {
        Dump::Values => runner.execute(&Command::Values)?,
        Dump::Texts => runner.execute(&Command::Texts)?,
        Dump::None => {}
    }

    if failures > 0 {
        bail!("{} line(s) failed", failures);
    }
    Ok(())
}
