use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    add_teacher_lesson_programs, create_teacher, delete_advisor_teacher, get_advisor_teachers,
    get_my_advisees, get_teacher_by_id, save_advisor_teacher, update_teacher,
};

/// Routes: POST /, GET /advisors, POST /advisors/{id},
/// DELETE /advisors/{id}, GET /me/advisees, GET /{id}, PUT /{id},
/// POST /{id}/lesson-programs
///
/// Static segments are registered before `{id}` captures; role checks run
/// inside the handlers since advisee listing is teacher-scoped while the
/// rest is management-scoped.
pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_teacher))
        .route("/advisors", get(get_advisor_teachers))
        .route(
            "/advisors/{id}",
            post(save_advisor_teacher).delete(delete_advisor_teacher),
        )
        .route("/me/advisees", get(get_my_advisees))
        .route("/{id}", get(get_teacher_by_id).put(update_teacher))
        .route("/{id}/lesson-programs", post(add_teacher_lesson_programs))
}
