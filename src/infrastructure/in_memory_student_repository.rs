use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::DomainError,
        student::{CompoundCriteria, NewStudent, Student},
    },
    infrastructure::StudentRepository,
};

#[derive(Default)]
pub struct InMemoryStudentRepository {
    state: RwLock<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    students_by_id: BTreeMap<i64, Student>,
    last_id: i64,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect_where(&self, predicate: impl Fn(&Student) -> bool) -> Vec<Student> {
        self.state
            .read()
            .await
            .students_by_id
            .values()
            .filter(|student| predicate(student))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn create(&self, student: NewStudent) -> Result<Student, DomainError> {
        let mut state = self.state.write().await;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| DomainError::internal("student id sequence exhausted"))?;

        let created = student.into_student(id);
        state.last_id = id;
        state.students_by_id.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError> {
        Ok(self.state.read().await.students_by_id.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Student>, DomainError> {
        Ok(self.collect_where(|_| true).await)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, DomainError> {
        Ok(self.collect_where(|student| student.name == name).await)
    }

    async fn find_by_age(&self, age: i64) -> Result<Vec<Student>, DomainError> {
        Ok(self.collect_where(|student| student.age == Some(age)).await)
    }

    async fn find_by_compound(
        &self,
        criteria: &CompoundCriteria,
    ) -> Result<Option<Student>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .students_by_id
            .values()
            .find(|student| criteria.matches(student))
            .cloned())
    }

    async fn update(&self, student: Student) -> Result<Option<Student>, DomainError> {
        let mut state = self.state.write().await;
        let Some(existing) = state.students_by_id.get_mut(&student.id) else {
            return Ok(None);
        };

        *existing = student;
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.state.write().await.students_by_id.remove(&id).is_some())
    }
}
