use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_education_term, delete_education_term, get_education_term_by_id, get_education_terms,
    update_education_term,
};

/// Routes: POST /, GET /, GET /{id}, PUT /{id}, DELETE /{id}
///
/// Reads are open to any authenticated user; writes check for the admin or
/// manager role inside the handlers.
pub fn init_education_terms_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_education_term).get(get_education_terms))
        .route(
            "/{id}",
            get(get_education_term_by_id)
                .put(update_education_term)
                .delete(delete_education_term),
        )
}
