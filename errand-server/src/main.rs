use std::sync::Arc;

use clap::Parser;
use errand_core::TaskResult;
use errand_server::AppState;

#[derive(Parser)]
#[command(name = "errand-server")]
#[command(about = "Mock todo collection API", long_about = None)]
struct Cli {
    /// Address to bind; BIND_ADDRESS overrides when set
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Start with an empty collection instead of the seed data
    #[arg(long)]
    empty: bool,
}

#[tokio::main]
async fn main() -> TaskResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "errand_server=debug,tower_http=debug".to_string()),
        )
        .init();

    let cli = Cli::parse();
    let addr = std::env::var("BIND_ADDRESS").unwrap_or(cli.bind);

    let state = Arc::new(if cli.empty {
        AppState::empty()
    } else {
        AppState::seeded()
    });

    tracing::info!("Starting mock todo API on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%e, addr = %addr, "failed to bind");
            return Ok(());
        }
    };

    if let Err(e) = errand_server::serve(listener, state).await {
        tracing::error!(%e, addr = %addr, "server stopped");
    }

    Ok(())
}
