pub mod dto;
pub mod student_service;
