use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_lesson_program, delete_lesson_program, get_assigned_lesson_programs,
    get_lesson_program_by_id, get_lesson_programs, get_unassigned_lesson_programs,
};

/// Routes: POST /, GET /, GET /assigned, GET /unassigned, GET /{id},
/// DELETE /{id}
///
/// Reads are open to any authenticated user; writes check for the admin or
/// manager role inside the handlers.
pub fn init_lesson_programs_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lesson_program).get(get_lesson_programs))
        .route("/assigned", get(get_assigned_lesson_programs))
        .route("/unassigned", get(get_unassigned_lesson_programs))
        .route(
            "/{id}",
            get(get_lesson_program_by_id).delete(delete_lesson_program),
        )
}
