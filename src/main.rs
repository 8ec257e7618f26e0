use std::path::PathBuf;
use std::process;

use clap::Parser as ClapParser;

use loxide::lox::Lox;

/// Tree-walking interpreter for the Lox language.
#[derive(ClapParser, Debug)]
#[command(name = "lox", version, about, long_about = None)]
struct Cli {
    /// Script to execute; starts an interactive prompt when omitted.
    script: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Cli = Cli::parse();

    // Checked by hand so the conventional exit code survives.
    if args.script.len() > 1 {
        eprintln!("Usage: lox [script]");
        process::exit(64);
    }

    let mut lox = Lox::new();

    match args.script.first() {
        Some(path) => {
            let code = lox.run_file(path)?;

            if code != 0 {
                process::exit(code);
            }
        }

        None => lox.run_prompt()?,
    }

    Ok(())
}
