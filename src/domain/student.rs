use serde::{Deserialize, Serialize};

/// A stored student record. `id` is assigned by the repository and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub document: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: Option<i64>,
    pub document: Option<String>,
    pub address: Option<String>,
}

impl NewStudent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
            document: None,
            address: None,
        }
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            age: self.age,
            document: self.document,
            address: self.address,
        }
    }
}

/// Exact-match criteria for a compound lookup. `None` leaves a field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundCriteria {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub document: Option<String>,
}

impl CompoundCriteria {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.document.is_none()
    }

    pub fn matches(&self, student: &Student) -> bool {
        if let Some(name) = &self.name {
            if &student.name != name {
                return false;
            }
        }
        if let Some(age) = self.age {
            if student.age != Some(age) {
                return false;
            }
        }
        if let Some(document) = &self.document {
            if student.document.as_deref() != Some(document.as_str()) {
                return false;
            }
        }
        true
    }
}
