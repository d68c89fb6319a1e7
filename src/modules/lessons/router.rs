use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{create_lesson, delete_lesson, get_lesson_by_name, get_lessons};

/// Routes: POST /, GET /, GET /by-name/{name}, DELETE /{id}
///
/// The whole nest sits behind the teaching-staff layer; create and delete
/// additionally check for the admin or manager role in their handlers.
pub fn init_lessons_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lesson).get(get_lessons))
        .route("/by-name/{name}", get(get_lesson_by_name))
        .route("/{id}", delete(delete_lesson))
}
