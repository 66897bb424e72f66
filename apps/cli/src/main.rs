mod args;
mod config;
mod dirs;

use std::io;
use std::net::{IpAddr, SocketAddr};

use app_api::AppContext;
use http_api::HttpState;
use revisent_app::{AppPaths, AppState, ensure_app_data_dir};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::parse_args(std::env::args().skip(1)).map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;
    if args.help {
        args::print_help();
        return Ok(());
    }

    let config = config::load_or_create().map_err(io::Error::other)?;
    init_tracing(&config.config.log_level);
    if config.created {
        info!(
            path = %config.paths.file.display(),
            port = config.config.port,
            "created default config"
        );
    }

    let data_dir = dirs::resolve_data_dir(args.data_dir).map_err(io::Error::other)?;
    info!(path = %data_dir.display(), "using data dir");

    let paths = AppPaths::new(data_dir);
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;

    let app_state = AppState::new(paths.db_path, paths.impact_defaults_path);
    let is_fresh_db = app_state.is_fresh_db();
    if let Err(err) = app_state.setup_db() {
        return Err(io::Error::other(format!("failed to initialize database: {}", err)).into());
    }
    if is_fresh_db
        && let Err(err) = app_state.apply_impact_defaults()
    {
        warn!(error = %err, "failed to apply impact defaults");
    }
    if let Err(err) = app_state.sync_impact_defaults() {
        warn!(error = %err, "failed to sync impact defaults");
    }

    let context = AppContext {
        app_state,
        app_data_dir: paths.app_data_dir,
    };
    let router = http_api::router(HttpState::new(context));

    let host: IpAddr = config.config.host.parse().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid host in config: {}", config.config.host),
        )
    })?;
    let port = args.port.unwrap_or(config.config.port);
    let (listener, actual_port, used_fallback) = bind_port(host, port).await?;

    if used_fallback {
        warn!(
            configured = port,
            actual = actual_port,
            "configured port was unavailable; using an ephemeral port for this run"
        );
    }

    println!("Revisent is running at http://{}", SocketAddr::new(host, actual_port));
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn bind_port(host: IpAddr, port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::new(host, 0)).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    match tokio::net::TcpListener::bind(SocketAddr::new(host, port)).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener = tokio::net::TcpListener::bind(SocketAddr::new(host, 0)).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
