pub mod problem;
pub mod students_handler;
