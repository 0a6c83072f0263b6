use clap::{Parser as ClapParser, Subcommand};
use mongo_analyzer::cli::{self, CheckOptions, CliError, RunOptions};
use mongo_analyzer::output::{AnalysisResponse, to_json, to_json_pretty};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "mongo-analyzer")]
#[command(about = "Lexical, syntactic and semantic analyzer for MongoDB shell commands")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single shell command
    Check {
        /// The shell command, e.g. 'db.usuarios.find({edad: 30})'
        command: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Run the command against an in-memory store when it is valid
        #[arg(short, long)]
        execute: bool,
    },

    /// Analyze and execute a script, one command per line
    Run {
        /// Script file (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'mongo-analyzer docs' to list categories)
        category: String,
    },

    /// Serve the analyzer over HTTP
    #[cfg(feature = "server")]
    Serve {
        #[arg(long, env = "MONGO_ANALYZER_HOST", default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "MONGO_ANALYZER_PORT", default_value_t = 8080)]
        port: u16,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mongo_analyzer=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            command,
            pretty,
            execute,
        } => run_check(command, pretty, execute),
        Commands::Run { file, pretty } => run_script(file, pretty),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(true)
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
            true
        }),
        #[cfg(feature = "server")]
        Commands::Serve { host, port } => run_serve(host, port),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn render(response: &AnalysisResponse, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        to_json_pretty(response)
    } else {
        to_json(response)
    }?;
    Ok(json)
}

/// Prints the analysis; `Ok(false)` when the command is invalid.
fn run_check(command: String, pretty: bool, execute: bool) -> Result<bool, CliError> {
    let result = cli::execute_check(&CheckOptions { command, execute })?;
    println!("{}", render(&AnalysisResponse::from(&result), pretty)?);
    Ok(result.is_valid)
}

fn run_script(file: Option<String>, pretty: bool) -> Result<bool, CliError> {
    let script = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let entries = cli::execute_run(&RunOptions { script })?;
    let mut all_valid = true;
    for entry in &entries {
        all_valid &= entry.result.is_valid;
        let response = AnalysisResponse::from(&entry.result);
        println!("{}: {}", entry.line, entry.input);
        println!("{}", render(&response, pretty)?);
    }
    Ok(all_valid)
}

#[cfg(feature = "server")]
fn run_serve(host: String, port: u16) -> Result<bool, CliError> {
    use mongo_analyzer::MemoryExecutor;
    use mongo_analyzer::server::{self, ServerConfig};
    use std::sync::Arc;

    let config = ServerConfig { host, port };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(&config, Arc::new(MemoryExecutor::new())))?;
    Ok(true)
}
