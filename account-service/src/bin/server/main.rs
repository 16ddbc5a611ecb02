use std::sync::Arc;

use account_service::config::Config;
use account_service::config::DEFAULT_LOG_FILTER;
use account_service::domain::auth::service::AuthService;
use account_service::domain::subscription::service::SubscriptionService;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::AppState;
use account_service::outbound::observability::TracingOutcomeRecorder;
use account_service::outbound::repositories::PostgresSubscriptionRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::Authenticator;
use auth::KeyMaterial;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        private_key_path = %config.jwt.private_key_path.display(),
        public_key_path = %config.jwt.public_key_path.display(),
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    // Refuse to start without a usable signing key pair.
    let keys = KeyMaterial::from_files(&config.jwt.private_key_path, &config.jwt.public_key_path)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load token key material");
            e
        })?;
    tracing::info!(algorithm = "RS256", "Token key pair loaded");

    let password_hasher = PasswordHasher::with_cost(
        config.password.memory_cost_kib,
        config.password.time_cost,
        config.password.parallelism,
    )?;

    let mut authenticator = Authenticator::new(keys, config.jwt.token_ttl())
        .with_password_hasher(password_hasher.clone());
    if let Some(issuer) = &config.jwt.issuer {
        authenticator = authenticator.with_issuer(issuer.as_str());
    }
    let authenticator = Arc::new(authenticator);

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let subscription_repository = Arc::new(PostgresSubscriptionRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            password_hasher,
        )),
        auth_service: Arc::new(AuthService::new(
            user_repository,
            Arc::new(TracingOutcomeRecorder::new()),
            authenticator,
        )),
        subscription_service: Arc::new(SubscriptionService::new(subscription_repository)),
        login_timeout: config.auth.login_timeout(),
        validation_timeout: config.auth.validation_timeout(),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
