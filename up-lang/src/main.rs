use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use up_lang::error::UpError;
use up_lang::parser;
use up_lang::runtime::{Executor, StreamConsole, VarKind, console};
use up_lang::source;

#[derive(Parser)]
#[command(name = "up")]
#[command(about = "Interpreter for the UP teaching language", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs a .up program
    Run {
        /// Program file, asked for interactively when missing
        input: Option<PathBuf>,

        /// Trace every executed statement on stderr
        #[arg(short, long)]
        verbose: bool,

        /// Print the grouped blocks before running
        #[arg(long)]
        show_blocks: bool,
    },

    /// Show statements and blocks without running
    Parse {
        /// Program file
        input: PathBuf,
    },

    /// List declaration keywords
    Keywords,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli.command) {
        eprintln!("ERROR : {}", e);
        process::exit(1);
    }
}

fn execute(command: Commands) -> Result<(), UpError> {
    match command {
        Commands::Run { input, verbose, show_blocks } => {
            let path = match input {
                Some(path) => path,
                None => match ask_for_file()? {
                    Some(path) => path,
                    None => return Ok(()),
                },
            };

            let source = source::load(&path)?;
            let blocks = parser::parse(&source);

            if show_blocks {
                for block in &blocks {
                    println!("{}", block);
                }
            }
            if verbose {
                eprintln!("trace: running {} ({} blocks)", path.display(), blocks.len());
            }

            let mut console = StreamConsole::stdio();
            Executor::new(&mut console).with_verbose(verbose).run(&blocks)?;
        }
        Commands::Parse { input } => {
            let source = source::load(&input)?;

            println!("=== SOURCE ===");
            println!("{}", source);
            println!("=== STATEMENTS ===");
            for statement in parser::statements(&source) {
                println!("{:>4}  {}", statement.line, statement);
            }
            println!("=== BLOCKS ===");
            for block in parser::parse(&source) {
                println!("{}", block);
            }
        }
        Commands::Keywords => {
            println!("Declaration keywords:");
            for kind in VarKind::all() {
                println!("  {:9} - {}", kind.keyword(), kind.description());
            }
        }
    }

    Ok(())
}

/// Asks for a program file until a valid one is named; `q` or end of input quits.
fn ask_for_file() -> Result<Option<PathBuf>, UpError> {
    let stdin = io::stdin();
    loop {
        let Some(answer) = console::prompt(&stdin, "Source-code filename : ")? else {
            return Ok(None);
        };
        if answer == "q" {
            return Ok(None);
        }

        let path = PathBuf::from(answer);
        match source::validate(&path) {
            Ok(()) => return Ok(Some(path)),
            Err(e) => eprintln!("{}", e),
        }
    }
}
