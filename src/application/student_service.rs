use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::DomainError,
        filter::{StudentFilter, StudentLookup},
        student::{NewStudent, Student},
    },
    infrastructure::StudentRepository,
};

pub const DELETE_CONFIRMATION: &str = "Student deleted";

#[derive(Clone)]
pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_student(&self, student: NewStudent) -> Result<Student, DomainError> {
        let created = self.repository.create(student).await?;
        info!(student_id = created.id, "student created");
        Ok(created)
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, DomainError> {
        self.repository.find_all().await
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, DomainError> {
        let Some(student) = self.repository.find_by_id(id).await? else {
            warn!(student_id = id, "student not found");
            return Err(DomainError::student_not_found(id));
        };
        Ok(student)
    }

    pub async fn rename_student(&self, id: i64, name: String) -> Result<Student, DomainError> {
        let mut student = self.get_student(id).await?;
        student.name = name;

        // The row can disappear between the read and the write.
        let Some(updated) = self.repository.update(student).await? else {
            warn!(student_id = id, "student removed before rename");
            return Err(DomainError::student_not_found(id));
        };

        info!(student_id = id, student_name = %updated.name, "student renamed");
        Ok(updated)
    }

    pub async fn delete_student(&self, id: i64) -> Result<&'static str, DomainError> {
        let student = self.get_student(id).await?;

        if !self.repository.delete_by_id(student.id).await? {
            warn!(student_id = id, "student removed before delete");
            return Err(DomainError::student_not_found(id));
        }

        info!(student_id = id, "student deleted");
        Ok(DELETE_CONFIRMATION)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, DomainError> {
        let students = self.repository.find_by_name(name).await?;
        debug!(student_name = name, matches = students.len(), "lookup by name");
        Ok(students)
    }

    pub async fn find_by_age(&self, age: i64) -> Result<Vec<Student>, DomainError> {
        let students = self.repository.find_by_age(age).await?;
        debug!(age, matches = students.len(), "lookup by age");
        Ok(students)
    }

    pub async fn filter_students(&self, filter: StudentFilter) -> Result<Vec<Student>, DomainError> {
        match filter.resolve() {
            StudentLookup::ByName(name) => self.find_by_name(&name).await,
            StudentLookup::ByAge(age) => self.find_by_age(age).await,
            StudentLookup::Compound(criteria) => {
                if criteria.is_empty() {
                    debug!("compound lookup without criteria");
                    return Ok(Vec::new());
                }

                let found = self.repository.find_by_compound(&criteria).await?;
                debug!(?criteria, found = found.is_some(), "compound lookup");
                Ok(found.into_iter().collect())
            }
        }
    }
}
