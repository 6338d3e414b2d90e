use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use paywatch::{config::Config, handlers::*, services::*};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting paywatch gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Operator wallet: {}", config.wallet_address);

    // One shared client; the timeout is the per-call deadline for every
    // upstream request
    let client = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()?;

    let state = AppState {
        trongrid: Arc::new(TrongridSource::new(
            client.clone(),
            config.trongrid_api_url.clone(),
        )),
        etherscan: Arc::new(EtherscanSource::new(
            client.clone(),
            config.etherscan_api_url.clone(),
            config.etherscan_api_key.clone(),
        )),
        tronscan: Arc::new(TronscanClient::new(
            client.clone(),
            config.tronscan_api_url.clone(),
            config.tronscan_api_key.clone(),
        )),
        tether: Arc::new(TetherClient::new(
            client,
            config.tether_api_url.clone(),
            config.tether_api_key.clone(),
            config.tether_api_secret.clone(),
        )),
        started_at: Instant::now(),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/tron_api/transactions/", post(tron_transactions))
        .route("/erc20_api/transactions/", post(erc20_transactions))
        .route("/utils/qr_code/", post(qr_code))
        .route("/tronscan/balance/:wallet_address", get(tronscan_balance))
        .route(
            "/tronscan/transactions/:wallet_address",
            get(tronscan_transactions),
        )
        .route("/tether/balances", get(tether_balances))
        .route("/tether/transactions", get(tether_transactions))
        .route(
            "/tether/transactions/page/:page",
            get(tether_transactions_page),
        )
        .route(
            "/tether/transactions/:transaction_id",
            get(tether_transaction_by_id),
        )
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl+c");
    tracing::info!("Shutting down gracefully...");
}
