//! Lookup selection for `GET /students/filters`.
//!
//! A filter with only a name runs the multi-match name lookup, one with only an
//! age runs the multi-match age lookup, and every other combination becomes a
//! single-match compound lookup over whichever fields were supplied.

use super::student::CompoundCriteria;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub document: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentLookup {
    ByName(String),
    ByAge(i64),
    /// Zero or one record. Empty criteria never match.
    Compound(CompoundCriteria),
}

impl StudentFilter {
    /// Blank strings count as absent.
    pub fn new(name: Option<String>, age: Option<i64>, document: Option<String>) -> Self {
        Self {
            name: non_blank(name),
            age,
            document: non_blank(document),
        }
    }

    pub fn resolve(self) -> StudentLookup {
        match (self.name, self.age, self.document) {
            (Some(name), None, None) => StudentLookup::ByName(name),
            (None, Some(age), None) => StudentLookup::ByAge(age),
            (name, age, document) => StudentLookup::Compound(CompoundCriteria {
                name,
                age,
                document,
            }),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
