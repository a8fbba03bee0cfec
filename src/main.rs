use std::error::Error;
use std::sync::Arc;

use portfolio_server::app::build_app;
use portfolio_server::config::Config;
use portfolio_server::{logger, server};

fn main() -> Result<(), Box<dyn Error>> {
    let cfg = Config::load()?;

    // Single-threaded, event-driven: every request/response cycle is
    // multiplexed onto one cooperative execution context
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn Error>> {
    let addr = cfg.socket_addr()?;
    let port = cfg.server.port;
    let mode = cfg.server.mode;

    let listener = server::create_reusable_listener(addr)?;

    // No bundler is wired here; local interactive development attaches
    // one through `build_app` in its own harness
    let app = Arc::new(build_app(cfg, None));

    logger::info(&format!("Server running on port {port} in {mode} mode"));

    let local = tokio::task::LocalSet::new();
    local.run_until(server::run(listener, app)).await
}
