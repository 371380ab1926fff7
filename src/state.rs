use std::sync::Arc;

use crate::application::student_service::StudentService;

#[derive(Clone)]
pub struct AppState {
    pub student_service: Arc<StudentService>,
}

impl AppState {
    pub fn new(student_service: Arc<StudentService>) -> Self {
        Self { student_service }
    }
}
