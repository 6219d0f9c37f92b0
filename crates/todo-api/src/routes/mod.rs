use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(handlers::health::health_check))

        // Task endpoints
        .route(
            "/tasks",
            get(handlers::task::list_tasks).post(handlers::task::create_task),
        )
        .route(
            "/tasks/:task_id",
            get(handlers::task::get_task)
                .put(handlers::task::update_task)
                .delete(handlers::task::delete_task),
        )

        // Add state
        .with_state(state)

        // Request tracing
        .layer(TraceLayer::new_for_http())

        // Any origin, method and header, with credentials; origins are mirrored
        // since credentials rule out a literal `*`
        .layer(CorsLayer::very_permissive())
}
