use anyhow::Result;
use clap::{Parser, Subcommand};
use grader::{Config, Session, logging};
use std::{io, path::PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (default: grader.toml beside the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the secN.csv roster files
    #[arg(short, long)]
    roster_dir: Option<PathBuf>,

    /// Directory the grade sheet is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a formatted .xlsx copy of a grade sheet for review
    Export {
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    match args.command {
        Some(Command::Export { input, output }) => {
            let path = grader::export::export_review(input, output)?;
            println!("Review workbook written: {}", path.display());
        }
        None => {
            let config = Config::discover(args.config.as_deref())?
                .with_overrides(args.roster_dir, args.output_dir);
            let stdin = io::stdin();
            let mut session = Session::new(stdin.lock(), io::stdout(), config);
            session.run()?;
        }
    }
    Ok(())
}
