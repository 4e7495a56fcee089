pub mod class;
pub mod record;
pub mod student;

/// Grades are stored at full precision and shown with two decimals
pub fn round_grade(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
