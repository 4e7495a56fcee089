use crate::routes::error_status;
use axum::{
    Extension, RequestPartsExt,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use database::{error::ServiceError, services::student::StudentService};
use log::debug;
use models::access::{AccessContext, Role};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// JWT claims the resource server validates and hands to the handlers
#[derive(Clone, Debug, Deserialize)]
pub struct SchoolClaims {
    pub sub: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// The authenticated caller, resolved from the token and the student records
pub struct Caller(pub AccessContext);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(claims) = parts
            .extract::<Extension<SchoolClaims>>()
            .await
            .map_err(|_| StatusCode::UNAUTHORIZED)?;
        let Extension(db) = parts
            .extract::<Extension<DatabaseConnection>>()
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let role = Role::from_claims(&claims.roles);
        let student_id = match (role, claims.sub.as_deref()) {
            (Role::Student, Some(sub)) => StudentService::find_by_user_id(&db, sub)
                .await
                .map_err(|err| error_status(ServiceError::from(err)))?
                .map(|student| student.id),
            _ => None,
        };

        let access = access_context(&claims, student_id);
        debug!("Request from {:?} as {}", access.subject, access.role);
        Ok(Caller(access))
    }
}

/// Builds the access context of a token. Only students carry a student id.
pub fn access_context(claims: &SchoolClaims, student_id: Option<i32>) -> AccessContext {
    let role = Role::from_claims(&claims.roles);
    let student_id = if role == Role::Student {
        student_id
    } else {
        None
    };

    AccessContext::new(claims.sub.clone(), role, student_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::access::Capability;

    fn claims(json: &str) -> SchoolClaims {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_claims_without_roles() {
        let claims = claims(r#"{"sub": "oidc|42"}"#);
        assert!(claims.roles.is_empty());

        let access = access_context(&claims, None);
        assert_eq!(access.role, Role::Anonymous);
        assert_eq!(access.subject.as_deref(), Some("oidc|42"));
        assert!(!access.allows(Capability::ViewClassRecords));
    }

    #[test]
    fn test_student_context_keeps_student_id() {
        let claims = claims(r#"{"sub": "oidc|7", "roles": ["student"]}"#);
        let access = access_context(&claims, Some(7));

        assert_eq!(access, AccessContext::student("oidc|7", 7));
        assert!(access.allows(Capability::ViewStudentRecords(7)));
    }

    #[test]
    fn test_staff_context_drops_student_id() {
        let claims = claims(r#"{"sub": "oidc|1", "roles": ["student", "employee"]}"#);
        let access = access_context(&claims, Some(7));

        assert_eq!(access.role, Role::Employee);
        assert_eq!(access.student_id, None);
        assert!(access.allows(Capability::ManageRecords));
    }
}
