pub mod attendances;
pub mod course_subjects;
pub mod courses;
pub mod grades;
pub mod school_classes;
pub mod students;
pub mod subjects;
pub mod teacher_school_classes;
pub mod teacher_subjects;
pub mod teachers;
