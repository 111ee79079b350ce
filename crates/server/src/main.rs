use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use log::info;

use crate::{config::Config, routes::AppState, store::Storage};

mod config;
mod error;
mod routes;
mod store;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let storage = Storage::new(&config);
    let state = Arc::new(AppState { storage });

    let app = Router::new()
        .route(
            "/leaderboard",
            get(routes::list).post(routes::submit).delete(routes::clear),
        )
        .route("/leaderboard/cleanup", post(routes::cleanup))
        .with_state(state);

    info!("Launching leaderboard service on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
