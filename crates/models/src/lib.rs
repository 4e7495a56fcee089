pub mod access;
pub mod status;
pub mod student_status;
