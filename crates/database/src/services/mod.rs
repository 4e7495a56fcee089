pub mod attendance;
pub mod enrollment;
pub mod grade;
pub mod records;
pub mod school_class;
pub mod student;
pub mod teacher;

#[cfg(test)]
pub(crate) mod fixtures;
