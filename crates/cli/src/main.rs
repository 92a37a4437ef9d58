use std::io::{self, BufRead, Write};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use fare_eval::config::help_text;
use fare_eval::{AdvisoryService, Dispatcher, NoopAdvisory};
use fare_storage::MemoryStore;

/// Fare booking command language toolchain.
#[derive(Parser)]
#[command(
    name = "fare",
    version,
    about = "Fare booking command language CLI",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one booking command line and print the result
    Exec {
        /// The command text, e.g. "view bookings"
        command: Vec<String>,
    },

    /// Interactive session: one booking command per line
    Repl,

    /// Print the command reference
    Help,
}

/// Picks the advisory backend. With the `anthropic` feature compiled in and
/// `ANTHROPIC_API_KEY` set, explanations come from the Anthropic API;
/// otherwise every advisory call degrades to fallback text.
fn advisory() -> Arc<dyn AdvisoryService> {
    #[cfg(feature = "anthropic")]
    {
        if let Ok(client) = fare_eval::llm::AnthropicClient::from_env() {
            return Arc::new(fare_eval::llm::LlmAdvisory::new(client));
        }
    }
    Arc::new(NoopAdvisory)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let dispatcher = Dispatcher::new(MemoryStore::new(), advisory());

    match cli.command {
        Commands::Exec { command } => {
            let line = command.join(" ");
            match dispatcher.process(&line).await {
                Ok(result) => println!("{}", result),
                Err(err) => {
                    eprintln!("System Error: {}", err);
                    process::exit(1);
                }
            }
        }

        Commands::Repl => {
            println!("{}", help_text());
            println!("\nEnter a command (or 'help', 'quit'):");
            let stdin = io::stdin();
            loop {
                print!("> ");
                let _ = io::stdout().flush();
                let mut line = String::new();
                match stdin.lock().read_line(&mut line) {
                    Ok(0) => break, // EOF
                    Ok(_) => {}
                    Err(err) => {
                        eprintln!("System Error: {}", err);
                        process::exit(1);
                    }
                }
                let line = line.trim();
                match line {
                    "quit" | "exit" => break,
                    "help" => {
                        println!("{}", help_text());
                        continue;
                    }
                    _ => {}
                }
                match dispatcher.process(line).await {
                    Ok(result) => println!("{}", result),
                    Err(err) => {
                        eprintln!("System Error: {}", err);
                        process::exit(1);
                    }
                }
            }
        }

        Commands::Help => println!("{}", help_text()),
    }
}
