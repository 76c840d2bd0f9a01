//! # ethutil
//!
//! Command-line front end for the ethutil ABI codec.
//!
//! ## Usage
//!
//! ```bash
//! # Encode call data
//! ethutil encode-param "transfer(address,uint256)" 0x8F36975cdeA2e6E64f85719788C8EFBBe89DFBbb 1e18
//! ethutil encode-param "(uint256,address[],bool)" 123 "[0x8F36...Bbb,0x8F36...Bbb]" true
//! ethutil encode-param transfer 0x... 1 --abi-file Token.json
//!
//! # Decode call output
//! ethutil decode-output "balanceOf(address) returns (uint256 balance)" 0x...
//!
//! # Selectors and hashes
//! ethutil sig "function transfer(address to, uint256 amount)"
//! ethutil keccak contract.bin
//! ```

use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use ethutil_abi::DebugOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Ethereum ABI codec utility
#[derive(Parser, Debug)]
#[command(name = "ethutil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log the encoded call data
    #[arg(long, global = true)]
    show_input_data: bool,

    /// Log the raw output bytes before decoding
    #[arg(long, global = true)]
    show_raw_output: bool,

    /// Log filter such as "warn" or "ethutil_abi=debug" (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode function arguments as call data
    EncodeParam(commands::encode::EncodeParamArgs),
    /// Decode raw call output into named values
    DecodeOutput(commands::decode::DecodeOutputArgs),
    /// Print the canonical signature and its selector
    Sig {
        /// Function signature
        signature: String,
    },
    /// Keccak-256 of files or stdin
    Keccak(commands::keccak::KeccakArgs),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set whether call data is logged by default
        #[arg(long)]
        set_show_input_data: Option<bool>,
        /// Set whether raw output is logged by default
        #[arg(long)]
        set_show_raw_output: Option<bool>,
        /// Set the default log filter
        #[arg(long)]
        set_log_level: Option<String>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays machine-readable
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal()),
            )
            .init();
    }
}

fn main() {
    let cli = Cli::parse();

    // Load config
    let mut config = Config::load();

    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_tracing(&log_level, cli.json);

    let options: DebugOptions = config.debug_options(cli.show_input_data, cli.show_raw_output);

    let result = match cli.command {
        Commands::EncodeParam(args) => args.execute(&options, cli.json),
        Commands::DecodeOutput(args) => args.execute(&options, cli.json),
        Commands::Sig { signature } => commands::sig::execute(&signature, cli.json),
        Commands::Keccak(args) => args.execute(cli.json),
        Commands::Config {
            show,
            set_show_input_data,
            set_show_raw_output,
            set_log_level,
        } => handle_config(
            &mut config,
            show,
            set_show_input_data,
            set_show_raw_output,
            set_log_level,
            cli.json,
        ),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_show_input_data: Option<bool>,
    set_show_raw_output: Option<bool>,
    set_log_level: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(value) = set_show_input_data {
        config.show_input_data = value;
        modified = true;
    }

    if let Some(value) = set_show_raw_output {
        config.show_raw_output = value;
        modified = true;
    }

    if let Some(level) = set_log_level {
        EnvFilter::try_new(&level)
            .map_err(|e| CliError::InvalidInput(format!("log level `{}`: {}", level, e)))?;
        config.log_level = level;
        modified = true;
    }

    if modified {
        let path = config.save()?;
        tracing::debug!(path = %path.display(), "configuration written");
        Output::new(json)
            .field("status", "saved")
            .field("path", &path.display().to_string())
            .line("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field_value("show_input_data", config.show_input_data.into())
            .field_value("show_raw_output", config.show_raw_output.into())
            .field("log_level", &config.log_level)
            .line(format!("show_input_data: {}", config.show_input_data))
            .line(format!("show_raw_output: {}", config.show_raw_output))
            .line(format!("log_level: {}", config.log_level))
            .print();
    } else {
        Output::new(json)
            .line("Use --show to display config, or --set-show-input-data/--set-show-raw-output/--set-log-level to modify")
            .print();
    }

    Ok(())
}
