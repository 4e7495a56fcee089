use crate::routes::{classes, health, records, root, students, teachers};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        root::root,
        students::get_student,
        students::get_student_subjects,
        students::get_student_attendance,
        students::get_subject_attendance,
        students::get_student_grades,
        students::get_subject_grade,
        students::get_my_attendance,
        students::get_my_grades,
        classes::get_available_classes,
        classes::get_class_students,
        classes::get_class_attendance,
        classes::get_class_grades,
        teachers::get_teacher_subjects,
        teachers::get_teacher_classes,
        records::create_grade,
        records::update_grade,
        records::delete_grade,
        records::create_attendance,
        records::update_attendance,
        records::delete_attendance
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Authentication related endpoints"),
        (name = "Students", description = "Enrollment, attendance and grades of one student"),
        (name = "Classes", description = "School class listings and roll-ups"),
        (name = "Teachers", description = "Teacher assignments"),
        (name = "Records", description = "Recording grades and attendance"),
    ),
    info(
        title = "School Records API",
        version = "1.0.0",
        description = "Attendance and grade aggregation for school management",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
