use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_user, delete_user, get_user_by_id, get_users, update_user};

/// Routes: POST /, GET /, GET /{id}, PUT /{id}, DELETE /{id}
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(get_users))
        .route(
            "/{id}",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
}
