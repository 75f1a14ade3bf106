//! Booking API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Public routes serve the booking form; protected routes serve the
//! admin panel and require the admin bearer token.

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the booking API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer); endpoint handlers use `State<ApiContext>`.
pub fn booking_router(ctx: ApiContext) -> Router {
    // Public routes — booking form surface
    let public = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/servicos", get(endpoints::servicos::list))
        .route("/clientes", get(endpoints::clientes::list))
        .route("/clientes", post(endpoints::clientes::create))
        .route(
            "/clientes/verificar-duplicata",
            post(endpoints::clientes::verificar_duplicata),
        )
        .route(
            "/clientes/verificar-nome",
            get(endpoints::clientes::verificar_nome),
        )
        .route(
            "/clientes/verificar-email",
            get(endpoints::clientes::verificar_email),
        )
        .route(
            "/clientes/verificar-telefone",
            get(endpoints::clientes::verificar_telefone),
        )
        .route("/agendamentos", post(endpoints::agendamentos::create))
        .route(
            "/agendamentos-data",
            get(endpoints::agendamentos::list_por_data),
        )
        .with_state(ctx.clone());

    // Protected routes — admin panel, bearer token required
    let protected = Router::new()
        .route("/agendamentos", get(endpoints::agendamentos::list))
        .route(
            "/agendamentos/:id",
            patch(endpoints::agendamentos::update_status),
        )
        .route("/disponibilidade", get(endpoints::disponibilidade::grade))
        .route(
            "/verificar-horario",
            get(endpoints::disponibilidade::verificar_horario),
        )
        .route(
            "/datas-bloqueadas",
            post(endpoints::datas_bloqueadas::bloquear),
        )
        .route(
            "/datas-bloqueadas",
            get(endpoints::datas_bloqueadas::list),
        )
        .route(
            "/datas-bloqueadas/:data",
            delete(endpoints::datas_bloqueadas::desbloquear),
        )
        .route("/logs-agendamentos", get(endpoints::logs::list))
        .with_state(ctx.clone())
        .route_layer(axum::middleware::from_fn(middleware::auth::require_admin));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(CorsLayer::permissive())
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx))
}
