use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    application::dto::{
        AgeQueryRequest, CreateStudentRequest, FilterQueryRequest, HealthResponse,
        NameQueryRequest, StudentResponse, into_responses,
    },
    domain::errors::DomainError,
    interface::http::problem::ApiResult,
    state::AppState,
};

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> ApiResult<(StatusCode, Json<StudentResponse>)> {
    let created = state
        .student_service
        .create_student(request.into_new_student()?)
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<StudentResponse>>> {
    let students = state.student_service.list_students().await?;
    Ok(Json(into_responses(students)))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudentResponse>> {
    let student = state.student_service.get_student(parse_id(&id)?).await?;
    Ok(Json(student.into()))
}

pub async fn rename_student(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> ApiResult<(StatusCode, Json<StudentResponse>)> {
    let renamed = state
        .student_service
        .rename_student(parse_id(&id)?, name)
        .await?;

    Ok((StatusCode::PARTIAL_CONTENT, Json(renamed.into())))
}

/// Answers 204; hyper drops the confirmation body on the wire.
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, &'static str)> {
    let confirmation = state.student_service.delete_student(parse_id(&id)?).await?;
    Ok((StatusCode::NO_CONTENT, confirmation))
}

pub async fn find_students_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQueryRequest>,
) -> ApiResult<Json<Vec<StudentResponse>>> {
    let students = state.student_service.find_by_name(&query.into_name()?).await?;
    Ok(Json(into_responses(students)))
}

pub async fn find_students_by_age(
    State(state): State<AppState>,
    Query(query): Query<AgeQueryRequest>,
) -> ApiResult<Json<Vec<StudentResponse>>> {
    let students = state.student_service.find_by_age(query.into_age()?).await?;
    Ok(Json(into_responses(students)))
}

pub async fn filter_students(
    State(state): State<AppState>,
    Query(query): Query<FilterQueryRequest>,
) -> ApiResult<Json<Vec<StudentResponse>>> {
    let students = state
        .student_service
        .filter_students(query.into_filter()?)
        .await?;
    Ok(Json(into_responses(students)))
}

fn parse_id(raw: &str) -> Result<i64, DomainError> {
    raw.parse::<i64>()
        .map_err(|_| DomainError::validation("id must be an integer"))
}
