use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    choose_lesson_programs, create_student, get_student_by_id, get_students, update_student,
    update_student_self, update_student_status,
};

/// Routes: POST /, GET /, PATCH /me, POST /me/lesson-programs,
/// GET /{id}, PUT /{id}, PATCH /{id}/status
///
/// The `/me` routes are student self-service; the rest is
/// management-scoped. Role checks run inside the handlers.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route("/me", patch(update_student_self))
        .route("/me/lesson-programs", post(choose_lesson_programs))
        .route("/{id}", get(get_student_by_id).put(update_student))
        .route("/{id}/status", patch(update_student_status))
}
