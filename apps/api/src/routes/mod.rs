pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::certificates::handlers as certificates;
use crate::designer::handlers as designer;
use crate::residents::handlers as residents;
use crate::state::AppState;
use crate::templates::handlers as templates;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/users/login", post(auth::handle_login))
        .route("/api/users/logout", post(auth::handle_logout))
        .route("/api/users/me", get(auth::handle_me))
        // Users
        .route(
            "/api/users",
            get(users::handle_list_users).post(users::handle_create_user),
        )
        .route(
            "/api/users/:id",
            get(users::handle_get_user)
                .put(users::handle_update_user)
                .delete(users::handle_delete_user),
        )
        // Residents
        .route(
            "/api/residents",
            get(residents::handle_list_residents).post(residents::handle_create_resident),
        )
        .route(
            "/api/residents/:id",
            get(residents::handle_get_resident)
                .put(residents::handle_update_resident)
                .delete(residents::handle_delete_resident),
        )
        // Document templates
        .route(
            "/api/documents",
            get(templates::handle_list_templates).post(templates::handle_create_template),
        )
        .route(
            "/api/documents/placeholders",
            get(templates::handle_list_placeholders),
        )
        .route(
            "/api/documents/:id",
            get(templates::handle_get_template)
                .put(templates::handle_replace_template)
                .delete(templates::handle_delete_template),
        )
        .route(
            "/api/documents/:id/preview/:resident_id",
            get(templates::handle_preview),
        )
        .route(
            "/api/documents/:id/print/:resident_id",
            get(templates::handle_print),
        )
        // Designer
        .route("/api/designer/sessions", post(designer::handle_open_session))
        .route(
            "/api/designer/sessions/:sid",
            get(designer::handle_get_session).delete(designer::handle_close_session),
        )
        .route(
            "/api/designer/sessions/:sid/ops",
            post(designer::handle_apply_op),
        )
        .route(
            "/api/designer/sessions/:sid/save",
            post(designer::handle_save_session),
        )
        // Certificates
        .route(
            "/api/certificates",
            get(certificates::handle_list_certificates).post(certificates::handle_issue_certificate),
        )
        .route(
            "/api/certificates/:id",
            get(certificates::handle_get_certificate),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
