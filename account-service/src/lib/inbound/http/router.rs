use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::assign_subscription::assign_subscription;
use super::handlers::create_user::create_user;
use super::handlers::get_subscription::get_subscription;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::list_user_subscriptions::list_user_subscriptions;
use super::handlers::login::login;
use super::handlers::update_user::update_user;
use super::handlers::update_user_subscription::update_user_subscription;
use super::handlers::validate_token::validate_token;
use super::middleware::authenticate;
use super::middleware::require_owner;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::subscription::ports::SubscriptionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub subscription_service: Arc<dyn SubscriptionServicePort>,
    pub login_timeout: Duration,
    pub validation_timeout: Duration,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/validate", post(validate_token))
        .route("/user", post(create_user))
        .route("/subscription/:subscription_id", get(get_subscription))
        .route("/health", get(health))
        .route("/ready", get(health));

    // Layers run bottom-up: authenticate first, then the ownership check.
    let owner_routes = Router::new()
        .route("/user/:user_id", get(get_user).patch(update_user))
        .route("/user/:user_id/subscription", get(list_user_subscriptions))
        .route(
            "/user/:user_id/subscription/:subscription_id",
            post(assign_subscription).patch(update_user_subscription),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(owner_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
