use axum::middleware;
use screening_dashboard::{
    config::{get_config, init_config},
    gateway::{Gateway, HttpGateway},
    middleware::rate_limit::{rps_middleware, RateLimiter},
    routes, AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    init_config()?;
    let config = get_config();

    let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(
        config.api_base_url.clone(),
        config.request_timeout,
    )?);
    info!(api = %config.api_base_url, "Using screening API");

    let app_state = AppState::new(gateway);
    let limiter = RateLimiter::new(config.dashboard_rps);

    let app = routes::dashboard_router()
        .layer(middleware::from_fn_with_state(limiter, rps_middleware))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Dashboard listening on {}", addr);
    info!("Serving static files from {}", config.static_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
