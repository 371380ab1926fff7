use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::DomainError,
    filter::StudentFilter,
    student::{NewStudent, Student},
};

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub document: Option<String>,
    pub address: Option<String>,
}

impl CreateStudentRequest {
    pub fn into_new_student(self) -> Result<NewStudent, DomainError> {
        let Some(name) = self.name else {
            return Err(DomainError::validation("name must not be null"));
        };

        Ok(NewStudent {
            name,
            age: self.age,
            document: self.document,
            address: self.address,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub document: Option<String>,
    pub address: Option<String>,
}

impl From<Student> for StudentResponse {
    fn from(value: Student) -> Self {
        Self {
            id: value.id,
            name: value.name,
            age: value.age,
            document: value.document,
            address: value.address,
        }
    }
}

pub fn into_responses(students: Vec<Student>) -> Vec<StudentResponse> {
    students.into_iter().map(StudentResponse::from).collect()
}

#[derive(Debug, Deserialize)]
pub struct NameQueryRequest {
    pub name: Option<String>,
}

impl NameQueryRequest {
    pub fn into_name(self) -> Result<String, DomainError> {
        self.name
            .ok_or_else(|| DomainError::validation("name query parameter is required"))
    }
}

/// Ages arrive as raw strings so a malformed value surfaces as a validation problem.
#[derive(Debug, Deserialize)]
pub struct AgeQueryRequest {
    pub age: Option<String>,
}

impl AgeQueryRequest {
    pub fn into_age(self) -> Result<i64, DomainError> {
        parse_age(self.age.as_deref())?
            .ok_or_else(|| DomainError::validation("age query parameter is required"))
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterQueryRequest {
    pub name: Option<String>,
    pub age: Option<String>,
    pub document: Option<String>,
}

impl FilterQueryRequest {
    pub fn into_filter(self) -> Result<StudentFilter, DomainError> {
        let age = parse_age(self.age.as_deref())?;
        Ok(StudentFilter::new(self.name, age, self.document))
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

fn parse_age(raw: Option<&str>) -> Result<Option<i64>, DomainError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| DomainError::validation("age must be an integer"))
}
