//! Money Transfers - in-memory ledger service
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌─────────────────────┐
//! │   HTTP   │───▶│ Service  │───▶│ AccountRegistry     │
//! │ Gateway  │    │(Coord.)  │───▶│ TransferLedger      │
//! └──────────┘    └──────────┘    └─────────────────────┘
//! ```
//!
//! Usage: `money_transfers [--env <name>] [--port <n>]`

use std::sync::Arc;

use money_transfers::config::AppConfig;
use money_transfers::service::Service;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<Result<u16, String>> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            let raw = &args[i + 1];
            return Some(raw.parse().map_err(|_| raw.clone()));
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    let _log_guard = money_transfers::logging::init_logging(&app_config);

    match get_port_override() {
        Some(Ok(port)) => app_config.gateway.port = port,
        Some(Err(raw)) => tracing::warn!(
            "Invalid port number: {}, starting with default port {}",
            raw,
            app_config.gateway.port
        ),
        None => {}
    }

    tracing::info!("Starting money transfers service in {} mode", env);

    let service = Arc::new(Service::in_memory());
    money_transfers::gateway::run_server(&app_config.gateway, service).await
}
