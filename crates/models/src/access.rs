use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Role granted to an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Admin,
    Employee,
    Student,
    Anonymous,
}

impl Role {
    /// Picks the most privileged recognised role out of a token's role claims
    pub fn from_claims<S: AsRef<str>>(roles: &[S]) -> Self {
        roles
            .iter()
            .filter_map(|role| role.as_ref().parse::<Role>().ok())
            .min_by_key(|role| role.rank())
            .unwrap_or(Role::Anonymous)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Admin => 0,
            Self::Employee => 1,
            Self::Student => 2,
            Self::Anonymous => 3,
        }
    }

    fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Employee)
    }
}

/// Something a caller must be allowed to do before a service touches the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read grades, attendance and enrollment of one student
    ViewStudentRecords(i32),
    /// Read the roll-ups of a whole school class
    ViewClassRecords,
    /// Create, edit or delete grades and attendance
    ManageRecords,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{role} may not {action}")]
pub struct AccessDenied {
    pub role: Role,
    pub action: String,
}

/// Identity of the caller, passed explicitly into every service operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    /// Identity-provider subject, if authenticated
    pub subject: Option<String>,
    pub role: Role,
    /// Student record linked to the caller, for the `Student` role
    pub student_id: Option<i32>,
}

impl AccessContext {
    pub fn new(subject: Option<String>, role: Role, student_id: Option<i32>) -> Self {
        Self {
            subject,
            role,
            student_id,
        }
    }

    pub fn staff(subject: impl Into<String>, role: Role) -> Self {
        Self::new(Some(subject.into()), role, None)
    }

    pub fn student(subject: impl Into<String>, student_id: i32) -> Self {
        Self::new(Some(subject.into()), Role::Student, Some(student_id))
    }

    pub fn anonymous() -> Self {
        Self::new(None, Role::Anonymous, None)
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewStudentRecords(student_id) => {
                self.role.is_staff()
                    || (self.role == Role::Student && self.student_id == Some(student_id))
            }
            Capability::ViewClassRecords | Capability::ManageRecords => self.role.is_staff(),
        }
    }

    pub fn check(&self, capability: Capability) -> Result<(), AccessDenied> {
        if self.allows(capability) {
            return Ok(());
        }

        let action = match capability {
            Capability::ViewStudentRecords(id) => format!("view records of student {id}"),
            Capability::ViewClassRecords => "view class records".to_string(),
            Capability::ManageRecords => "manage grades and attendance".to_string(),
        };

        Err(AccessDenied {
            role: self.role,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_claims_prefers_most_privileged() {
        assert_eq!(Role::from_claims(&["student", "Employee"]), Role::Employee);
        assert_eq!(Role::from_claims(&["ADMIN", "employee"]), Role::Admin);
        assert_eq!(Role::from_claims(&["teacher", "guest"]), Role::Anonymous);
        assert_eq!(Role::from_claims::<&str>(&[]), Role::Anonymous);
    }

    #[test]
    fn test_staff_can_do_everything() {
        for role in [Role::Admin, Role::Employee] {
            let ctx = AccessContext::staff("staff-1", role);
            assert!(ctx.allows(Capability::ViewStudentRecords(42)));
            assert!(ctx.allows(Capability::ViewClassRecords));
            assert!(ctx.allows(Capability::ManageRecords));
        }
    }

    #[test]
    fn test_student_sees_only_own_records() {
        let ctx = AccessContext::student("kid", 7);
        assert!(ctx.check(Capability::ViewStudentRecords(7)).is_ok());
        assert!(ctx.check(Capability::ViewStudentRecords(8)).is_err());
        assert!(ctx.check(Capability::ViewClassRecords).is_err());
        assert!(ctx.check(Capability::ManageRecords).is_err());
    }

    #[test]
    fn test_student_role_without_record_sees_nothing() {
        let ctx = AccessContext::new(Some("kid".into()), Role::Student, None);
        assert!(!ctx.allows(Capability::ViewStudentRecords(7)));
    }

    #[test]
    fn test_denial_message() {
        let err = AccessContext::anonymous()
            .check(Capability::ManageRecords)
            .unwrap_err();
        assert_eq!(err.to_string(), "Anonymous may not manage grades and attendance");
    }
}
