use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Aggregations always filter by (student_id, subject_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_grades_student_subject")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendances_student_subject")
                    .table(Attendances::Table)
                    .col(Attendances::StudentId)
                    .col(Attendances::SubjectId)
                    .to_owned(),
            )
            .await?;

        // Index on students.school_class_id for class roll-ups
        manager
            .create_index(
                Index::create()
                    .name("idx_students_school_class_id")
                    .table(Students::Table)
                    .col(Students::SchoolClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_school_classes_course_id")
                    .table(SchoolClasses::Table)
                    .col(SchoolClasses::CourseId)
                    .to_owned(),
            )
            .await?;

        // Reverse lookups on the junction tables
        manager
            .create_index(
                Index::create()
                    .name("idx_course_subjects_subject_id")
                    .table(CourseSubjects::Table)
                    .col(CourseSubjects::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teacher_subjects_subject_id")
                    .table(TeacherSubjects::Table)
                    .col(TeacherSubjects::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teacher_school_classes_school_class_id")
                    .table(TeacherSchoolClasses::Table)
                    .col(TeacherSchoolClasses::SchoolClassId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_teacher_school_classes_school_class_id",
            "idx_teacher_subjects_subject_id",
            "idx_course_subjects_subject_id",
            "idx_school_classes_course_id",
            "idx_students_school_class_id",
            "idx_attendances_student_subject",
            "idx_grades_student_subject",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Grades {
    Table,
    StudentId,
    SubjectId,
}

#[derive(Iden)]
enum Attendances {
    Table,
    StudentId,
    SubjectId,
}

#[derive(Iden)]
enum Students {
    Table,
    SchoolClassId,
}

#[derive(Iden)]
enum SchoolClasses {
    Table,
    CourseId,
}

#[derive(Iden)]
enum CourseSubjects {
    Table,
    SubjectId,
}

#[derive(Iden)]
enum TeacherSubjects {
    Table,
    SubjectId,
}

#[derive(Iden)]
enum TeacherSchoolClasses {
    Table,
    SchoolClassId,
}
