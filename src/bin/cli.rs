//! kvline CLI Client
//!
//! Command-line interface for querying a JSON key-value server.

use clap::{Parser, Subcommand};
use kvline::{Client, ClientConfig, Command, Framing, ParsedResponse};
use tracing_subscriber::{fmt, EnvFilter};

/// kvline CLI
#[derive(Parser, Debug)]
#[command(name = "kvline-cli")]
#[command(about = "CLI for line-oriented JSON key-value stores")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "9999")]
    port: u16,

    /// Connect/read/write timeout in milliseconds (0 disables)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    /// Framing: document, line, length-prefixed or single-read
    #[arg(short, long, default_value = "document")]
    framing: Framing,

    /// Largest accepted response in bytes
    #[arg(long, default_value = "65536")]
    max_response_bytes: usize,

    /// Print the response on one line
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a document by key
    Get {
        /// The key to get
        key: String,
    },

    /// Store a JSON document under a key
    Set {
        /// The key to set
        key: String,

        /// The value, as a JSON document
        value: String,
    },

    /// Send a pre-formatted request line
    Raw {
        /// The request line, e.g. "GET projects"
        line: String,
    },
}

fn main() {
    // Logs go to stderr so stdout carries only the response
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ClientConfig::builder()
        .host(&args.host)
        .port(args.port)
        .framing(args.framing)
        .max_response_size(args.max_response_bytes)
        .timeout_ms(args.timeout_ms)
        .build();

    tracing::debug!("kvline-cli v{} -> {}", kvline::VERSION, config.addr());

    match run(config, args.command) {
        Ok(response) => {
            let rendered = if args.compact {
                serde_json::to_string(&response)
            } else {
                serde_json::to_string_pretty(&response)
            };
            match rendered {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    tracing::error!("Failed to render response: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run(config: ClientConfig, command: Commands) -> kvline::Result<ParsedResponse> {
    let client = Client::new(config)?;

    match command {
        Commands::Get { key } => client.execute(&Command::get(key)?),
        Commands::Set { key, value } => {
            let value = serde_json::from_str(&value)?;
            client.execute(&Command::set(key, value)?)
        }
        Commands::Raw { line } => client.execute_raw(&line),
    }
}
