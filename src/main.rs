use std::{net::Ipv4Addr, process::ExitCode, sync::Arc};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use todo_server::{config::Config, create_app, db, AppState};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let db = match db::init_db(&config.db_path) {
        Ok(db) => db,
        Err(err) => {
            error!(%err, path = %config.db_path.display(), "initializing database");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState {
        db,
        jwt_secret: Arc::new(config.jwt_secret),
        base_path: Arc::new(config.base_path),
        static_dir: config.static_dir.map(Arc::new),
    };
    let app = create_app(state);
    let addr = (Ipv4Addr::UNSPECIFIED, config.port);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%err, port = config.port, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("server has started on {addr:?}");

    if let Err(err) = axum::serve(listener, app).await {
        error!(%err, "failed serving");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
