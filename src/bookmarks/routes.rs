use axum::{
    Router,
    routing::get,
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_bookmarks).post(handler::create_bookmark))
        .route(
            "/:id",
            get(handler::get_bookmark)
                .patch(handler::update_bookmark)
                .delete(handler::delete_bookmark),
        )
}
