//! Hashtag service CLI binary.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP service
//! - `generate` - Run the pipeline once and print the result
//! - `config` - Print the effective configuration

use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hashtags::{
    server::{AppState, Server, ServerConfig},
    Config, HashtagError, HashtagRequest, HashtagService, VERSION,
};

#[derive(Parser)]
#[command(name = "hashtags")]
#[command(version = VERSION)]
#[command(about = "Hashtag generation backed by a local LLM", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/hashtags/config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Backend timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen host
        #[arg(long)]
        host: Option<String>,

        /// Bind to all interfaces
        #[arg(long)]
        bind_all: bool,

        /// Default model for requests that name none
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Generate hashtags for one text
    Generate {
        /// Text to summarize (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Number of hashtags (clamped to 1..=30)
        #[arg(short = 'n', long)]
        count: Option<i64>,

        /// Model override
        #[arg(short, long)]
        model: Option<String>,

        /// Output as pretty-printed JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.backend.timeout_secs = timeout;
    }

    match cli.command {
        Commands::Serve {
            port,
            host,
            bind_all,
            model,
        } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(model) = model {
                config.backend.default_model = model;
            }
            cmd_serve(&config, bind_all)
        },
        Commands::Generate {
            input,
            file,
            count,
            model,
            pretty,
        } => cmd_generate(&config, input, file, count, model, pretty),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        },
    }
}

fn init_logging(verbose: bool, json: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn cmd_serve(config: &Config, bind_all: bool) -> anyhow::Result<()> {
    config.validate()?;

    let mut server_config = ServerConfig::try_from(&config.server)?;
    if bind_all {
        server_config = server_config.bind_all();
    }

    let service = HashtagService::from_config(&config.backend)?;

    tracing::info!("Starting hashtag server on {}", server_config.addr);
    tracing::info!(
        "Backend: {} (model {}, timeout {}s)",
        config.backend.base_url,
        config.backend.default_model,
        config.backend.timeout_secs
    );

    let server = Server::new(AppState::new(server_config, service));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async { server.run().await })?;
    Ok(())
}

fn cmd_generate(
    config: &Config,
    input: Option<String>,
    file: Option<PathBuf>,
    count: Option<i64>,
    model: Option<String>,
    pretty: bool,
) -> anyhow::Result<()> {
    config.validate()?;

    let text = read_input(input, file)?;
    let request = HashtagRequest {
        text: Some(text),
        count,
        model,
    };

    let service = HashtagService::from_config(&config.backend)?;

    let runtime = tokio::runtime::Runtime::new()?;
    match runtime.block_on(service.generate(&request)) {
        Ok(response) => {
            let output = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{output}");
            Ok(())
        },
        Err(e) => {
            eprintln!("{}", e.to_body());
            std::process::exit(exit_code(&e));
        },
    }
}

fn exit_code(err: &HashtagError) -> i32 {
    if err.status_code().is_client_error() {
        2
    } else {
        1
    }
}

// Helper functions

fn read_input(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        Ok(std::fs::read_to_string(path)?)
    } else if let Some(s) = input {
        if s == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        } else {
            Ok(s)
        }
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}
