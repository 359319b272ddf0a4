//! HTTP surface: router, shared state, banner and fallback
//!
//! All 19 `/api` routes plus the service banner. Routes with a static
//! suffix (`/top/etoiles`, `/stats/par-type`, …) are registered as their own
//! patterns, so the `{id}` routes can never capture them — disambiguation is
//! the router's job, not the handlers'.

pub mod hotels;
pub mod reservations;
pub mod rooms;

use axum::http::{Method, header};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::store::Store;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

/// Assemble the application router around a connected store.
pub fn build_router(store: Store) -> Router {
    let state = AppState { store };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(banner))
        // Hotels
        .route("/api/hotels", post(hotels::create).get(hotels::list))
        .route("/api/hotels/recherche/avancee", get(hotels::search))
        .route("/api/hotels/top/etoiles", get(hotels::top_by_stars))
        .route(
            "/api/hotels/{id}",
            put(hotels::update).delete(hotels::remove),
        )
        // Rooms
        .route("/api/rooms", post(rooms::create).get(rooms::list))
        .route("/api/rooms/stats/par-type", get(rooms::stats_by_type))
        .route("/api/rooms/plus-reservees", get(rooms::most_booked))
        .route("/api/rooms/{id}", put(rooms::update).delete(rooms::remove))
        // Reservations
        .route(
            "/api/reservations",
            post(reservations::create).get(reservations::list),
        )
        .route("/api/reservations/stats", get(reservations::stats))
        .route("/api/reservations/completes", get(reservations::completes))
        .route(
            "/api/reservations/{id}",
            put(reservations::update).delete(reservations::remove),
        )
        .fallback(route_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /` — service banner.
async fn banner() -> Json<Value> {
    Json(json!({
        "message": "API de réservation d'hôtel",
        "version": env!("CARGO_PKG_VERSION"),
        "totalRoutes": 19
    }))
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route non trouvée")
}
