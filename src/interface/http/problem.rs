use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub type ApiResult<T> = Result<T, ApiProblem>;

#[derive(Debug)]
pub struct ApiProblem {
    status: StatusCode,
    title: &'static str,
    detail: String,
    kind: &'static str,
    correlation_id: String,
}

impl ApiProblem {
    pub fn from_domain(error: DomainError) -> Self {
        match error {
            DomainError::Validation(detail) => Self::new(
                StatusCode::BAD_REQUEST,
                "Validation failed",
                "/problems/validation",
                detail,
            ),
            DomainError::NotFound(detail) => Self::new(
                StatusCode::NOT_FOUND,
                "Not found",
                "/problems/not-found",
                detail,
            ),
            DomainError::Storage(detail) => {
                let problem = Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error",
                    "/problems/storage",
                    detail,
                );
                error!(correlation_id = %problem.correlation_id, detail = %problem.detail, "storage failure");
                problem
            }
            DomainError::Internal(detail) => {
                let problem = Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "/problems/internal",
                    detail,
                );
                error!(correlation_id = %problem.correlation_id, detail = %problem.detail, "internal failure");
                problem
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn new(
        status: StatusCode,
        title: &'static str,
        kind: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status,
            title,
            detail: detail.into(),
            kind,
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

impl From<DomainError> for ApiProblem {
    fn from(error: DomainError) -> Self {
        Self::from_domain(error)
    }
}

#[derive(Debug, Serialize)]
struct ProblemDetails {
    #[serde(rename = "type")]
    kind: String,
    title: String,
    status: u16,
    detail: String,
    correlation_id: String,
}

impl IntoResponse for ApiProblem {
    fn into_response(self) -> Response {
        let payload = ProblemDetails {
            kind: self.kind.to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            detail: self.detail,
            correlation_id: self.correlation_id,
        };

        let mut response = (self.status, Json(payload)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::student_not_found(7), StatusCode::NOT_FOUND),
            (DomainError::storage("disk"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::internal("bug"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiProblem::from(error).status(), expected);
        }
    }

    #[test]
    fn problem_response_uses_problem_json_content_type() {
        let response = ApiProblem::from_domain(DomainError::student_not_found(7)).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }
}
