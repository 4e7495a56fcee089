use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Enrollment state of a student
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum StudentStatus {
    /// Registered but not yet approved
    #[default]
    Pending,
    Active,
    Inactive,
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for StudentStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "StudentStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<StudentStatus> for Value {
    fn from(status: StudentStatus) -> Self {
        Value::String(Some(Box::new(status.to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for StudentStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to parse StudentStatus from {val:?}: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for StudentStatus {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_status_round_trips_through_text() {
        for status in StudentStatus::iter() {
            assert_eq!(StudentStatus::from_str(&status.to_string()), Ok(status));
        }
    }

    #[test]
    fn test_status_parse_ignores_case() {
        assert_eq!(StudentStatus::from_str("active"), Ok(StudentStatus::Active));
        assert!(StudentStatus::from_str("graduated").is_err());
    }

    #[test]
    fn test_new_students_are_pending() {
        assert_eq!(StudentStatus::default(), StudentStatus::Pending);
    }
}
