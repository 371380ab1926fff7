use axum::{
    Router,
    http::{HeaderName, Method},
    routing::{get, patch, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    interface::http::students_handler::{
        create_student, delete_student, filter_students, find_students_by_age,
        find_students_by_name, get_student, healthcheck, list_students, rename_student,
    },
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/health", get(healthcheck))
        .route("/students", post(create_student).get(list_students))
        .route("/students/names", get(find_students_by_name))
        .route("/students/ages", get(find_students_by_age))
        .route("/students/filters", get(filter_students))
        .route("/students/:id", get(get_student).delete(delete_student))
        .route("/students/:id/:name", patch(rename_student))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .with_state(state)
}
