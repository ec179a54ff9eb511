use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, auth, bookings, catalog};
use crate::middleware::auth::{auth_middleware, require_admin, require_customer};
use crate::middleware::rate_limit::create_public_governor;
use crate::middleware::role_rate_limit::create_customer_governor;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let customer_governor = create_customer_governor();
    // IP-based governor for unauthenticated routes
    let public_governor = create_public_governor();

    // Public routes (rate limited per IP)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(public_governor.clone());

    // Public catalog and availability routes
    let public_routes = Router::new()
        .route("/movies", get(catalog::list_movies))
        .route("/movies/{id}", get(catalog::get_movie))
        .route("/movies/{id}/shows", get(catalog::movie_shows))
        .route("/movies/{id}/alternatives", get(catalog::alternatives))
        .route("/shows/{id}", get(catalog::get_show))
        .route("/shows/{id}/seats", get(catalog::show_seats))
        .route("/shows/{id}/consecutive", get(catalog::consecutive_seats))
        .route("/availability", post(catalog::availability))
        .layer(public_governor);

    // Admin routes (requires auth + admin role)
    let admin_routes = Router::new()
        // Theater management
        .route("/theaters", post(admin::create_theater))
        .route("/theaters", get(admin::list_theaters))
        .route("/theaters/{id}", put(admin::update_theater))
        .route("/theaters/{id}", delete(admin::delete_theater))
        .route("/theaters/{id}/halls", get(admin::theater_halls))
        // Hall management
        .route("/halls", post(admin::create_hall))
        .route("/halls/{id}/layout", post(admin::provision_layout))
        // Movie management
        .route("/movies", post(admin::create_movie))
        .route("/movies/{id}", put(admin::update_movie))
        .route("/movies/{id}", delete(admin::delete_movie))
        // Show management
        .route("/shows", post(admin::create_show))
        .route("/shows/{id}", put(admin::update_show))
        .route("/shows/{id}", delete(admin::delete_show))
        // Booking oversight
        .route("/bookings", get(admin::list_all_bookings))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Customer booking routes (requires auth + customer role)
    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/", get(bookings::my_bookings))
        .route("/group", post(bookings::create_group_booking))
        .route("/group/consecutive", post(bookings::create_consecutive_booking))
        .route("/{id}/cancel", put(bookings::cancel_booking))
        .layer(customer_governor)
        .layer(middleware::from_fn(require_customer))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", public_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/bookings", booking_routes)
        .with_state(state)
}
