//! # students-api
//!
//! REST CRUD service for student records.
//!
//! Requests flow through three layers:
//! - [`interface::http`] maps routes to service calls and domain errors to
//!   `application/problem+json` responses.
//! - [`application::student_service::StudentService`] runs CRUD operations and
//!   picks the lookup behind `GET /students/filters`.
//! - [`infrastructure::StudentRepository`] is the store contract, with an
//!   in-memory and an SQLite implementation.
//!
//! ```ignore
//! let repository = infrastructure::open_repository(None, 1).await?;
//! let service = Arc::new(StudentService::new(repository));
//! let app = build_router(AppState::new(service));
//! ```

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod state;

pub use app::build_router;
