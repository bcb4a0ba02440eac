//! gRPC blocker server.
//!
//! Listens for HTTP traffic, rejects gRPC calls to denylisted services and
//! relays everything else to a single upstream.
//!
//! ```text
//!   client ──▶ request id ─▶ trace ─▶ timeout ─▶ gate ──▶ upstream
//!                                                 │
//!                                                 └─▶ 403 "This gRPC service is blocked"
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use grpc_blocker::config::{load_config, validate_config, AppConfig, ConfigError};
use grpc_blocker::observability::init_logging;
use grpc_blocker::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "grpc-blocker")]
#[command(about = "Blocks gRPC calls to denylisted services")]
#[command(version)]
struct Args {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "GRPC_BLOCKER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short = 'L', long)]
    log_level: Option<String>,

    /// Print example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

const EXAMPLE_CONFIG: &str = r#"# gRPC blocker configuration

[listener]
bind_address = "0.0.0.0:8080"

[upstream]
address = "127.0.0.1:50051"
http2_only = true          # h2c prior knowledge, required by gRPC upstreams
timeout_secs = 30

[blocker]
blocked_services = [
    "grpc.reflection.v1.ServerReflection",
    "myapp.internal.AdminService",
]
enable_logging = false     # per-request debug lines

[observability]
log_level = "info"
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", EXAMPLE_CONFIG);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let config = AppConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };

    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    init_logging(log_level);

    tracing::info!(
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        blocked_services = config.blocker.blocked_services.len(),
        "Configuration loaded"
    );

    if args.validate {
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
