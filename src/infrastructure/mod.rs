use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{
    errors::DomainError,
    student::{CompoundCriteria, NewStudent, Student},
};

pub mod in_memory_student_repository;
pub mod sqlite_student_repository;

use in_memory_student_repository::InMemoryStudentRepository;
use sqlite_student_repository::SqliteStudentRepository;

/// Persistence contract for student records. Every listing is ordered by ascending id.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create(&self, student: NewStudent) -> Result<Student, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Student>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, DomainError>;
    async fn find_by_age(&self, age: i64) -> Result<Vec<Student>, DomainError>;
    /// Lowest-id record matching every supplied field.
    async fn find_by_compound(
        &self,
        criteria: &CompoundCriteria,
    ) -> Result<Option<Student>, DomainError>;
    /// Replaces the stored record with the same id. `None` when it no longer exists.
    async fn update(&self, student: Student) -> Result<Option<Student>, DomainError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, DomainError>;
}

/// Opens the SQLite store when a database URL is configured, the in-memory store otherwise.
pub async fn open_repository(
    database_url: Option<&str>,
    max_connections: u32,
) -> Result<Arc<dyn StudentRepository>, DomainError> {
    match database_url {
        Some(url) => {
            let repository = SqliteStudentRepository::connect(url, max_connections).await?;
            info!(database_url = %url, "using sqlite student store");
            Ok(Arc::new(repository))
        }
        None => {
            info!("using in-memory student store");
            Ok(Arc::new(InMemoryStudentRepository::new()))
        }
    }
}
