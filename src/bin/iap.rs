//! iAP General lingo CLI binary.
//!
//! # Commands
//!
//! - `replay` - Run a JSON-lines request script through a session
//! - `fid` - Encode FID tokens to their acknowledgment records
//! - `config` - Print the default configuration

use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use iap_general::{
    protocol::{encode_fid_tokens, parse_script, FidToken},
    Config, Session, VirtualDevice, VERSION,
};

#[derive(Parser)]
#[command(name = "iap")]
#[command(version = VERSION)]
#[command(about = "iAP General lingo session handler", long_about = None)]
struct Cli {
    /// Enable debug logging
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
    /// Replay a request script against a virtual device
    Replay {
        /// Script path (or - for stdin)
        input: Option<String>,

        /// Config file (default: <config dir>/iap/config.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print outbound messages
        #[arg(long)]
        pretty: bool,
    },

    /// Encode FID tokens given as type:subtype (e.g. 0:0 0x00:0x07)
    Fid {
        /// Tokens to encode
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Print the default configuration
    Config {
        /// Print the default config file location instead
        #[arg(long)]
        path: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Replay {
            input,
            config,
            pretty,
        } => cmd_replay(input, config, pretty),

        Commands::Fid { tokens } => cmd_fid(&tokens),

        Commands::Config { path } => cmd_config(path),
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = path.or_else(|| Config::default_path().filter(|p| p.exists()));
    let config = match path {
        Some(path) => {
            tracing::info!("Using config {}", path.display());
            let mut config = Config::from_file(path)?;
            config.apply_env();
            config
        },
        None => Config::from_env(),
    };
    config.validate()?;
    Ok(config)
}

fn cmd_replay(input: Option<String>, config: Option<PathBuf>, pretty: bool) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let script = read_input(input)?;
    let requests = parse_script(&script)?;

    let device = VirtualDevice::new(config.device.clone());
    let mut session = Session::with_dispatcher(device, config.policy.dispatcher());
    tracing::info!(
        "Session {} replaying {} requests",
        session.id(),
        requests.len()
    );

    for request in &requests {
        for outbound in session.process(request) {
            let line = if pretty {
                outbound.to_json_pretty()?
            } else {
                outbound.to_json()?
            };
            println!("{line}");
        }
    }

    let stats = session.stats();
    eprintln!();
    eprintln!("Session Statistics:");
    eprintln!("  Session:      {}", stats.session_id);
    eprintln!("  State:        {:?}", stats.state);
    eprintln!("  Requests:     {}", stats.requests_received);
    eprintln!("  Responses:    {}", stats.messages_sent);
    eprintln!("  Silent:       {}", stats.silent_requests);
    eprintln!("  IDPS starts:  {}", stats.idps_attempts);
    eprintln!("  Dev auth:     {}", stats.dev_auth_requested);

    Ok(())
}

fn cmd_fid(tokens: &[String]) -> anyhow::Result<()> {
    let tokens = tokens
        .iter()
        .map(|s| parse_token(s))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let acks = encode_fid_tokens(&tokens);
    let hex = acks
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ");

    println!("count: {}", tokens.len());
    println!("acks:  {hex}");
    Ok(())
}

fn parse_token(s: &str) -> anyhow::Result<FidToken> {
    let (fid_type, fid_subtype) = s
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Invalid token '{s}', expected type:subtype"))?;
    Ok(FidToken::new(parse_byte(fid_type)?, parse_byte(fid_subtype)?))
}

fn parse_byte(s: &str) -> anyhow::Result<u8> {
    let s = s.trim();
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16)?,
        None => s.parse()?,
    };
    Ok(value)
}

fn cmd_config(path: bool) -> anyhow::Result<()> {
    if path {
        match Config::default_path() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("No config directory on this platform"),
        }
        return Ok(());
    }

    print!("{}", Config::default().to_toml()?);
    Ok(())
}

fn read_input(input: Option<String>) -> anyhow::Result<String> {
    match input.as_deref() {
        Some("-") | None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        },
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}
