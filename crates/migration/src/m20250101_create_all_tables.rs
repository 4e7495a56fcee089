use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(ColumnDef::new(Courses::Duration).integer().not_null())
                    .col(
                        ColumnDef::new(Courses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create subjects table
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(ColumnDef::new(Subjects::Description).text())
                    .col(ColumnDef::new(Subjects::Credits).integer().not_null())
                    .col(
                        ColumnDef::new(Subjects::TotalClasses)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Subjects::TotalClasses).gte(0)),
                    )
                    .to_owned(),
            )
            .await?;

        // Create school_classes table, a cohort optionally following one course
        manager
            .create_table(
                Table::create()
                    .table(SchoolClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolClasses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SchoolClasses::ClassName).string().not_null())
                    .col(ColumnDef::new(SchoolClasses::CourseId).integer())
                    .col(ColumnDef::new(SchoolClasses::StartDate).date())
                    .col(ColumnDef::new(SchoolClasses::EndDate).date())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-school_classes-course_id")
                            .from(SchoolClasses::Table, SchoolClasses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::UserId).string().unique_key())
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::EnrollmentDate).date())
                    .col(
                        ColumnDef::new(Students::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Students::SchoolClassId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-school_class_id")
                            .from(Students::Table, Students::SchoolClassId)
                            .to(SchoolClasses::Table, SchoolClasses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create teachers table
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teachers::UserId).string().unique_key())
                    .col(ColumnDef::new(Teachers::FirstName).string().not_null())
                    .col(ColumnDef::new(Teachers::LastName).string().not_null())
                    .col(ColumnDef::new(Teachers::HireDate).date())
                    .to_owned(),
            )
            .await?;

        // Create grades table
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).integer().not_null())
                    .col(ColumnDef::new(Grades::SubjectId).integer().not_null())
                    .col(ColumnDef::new(Grades::Value).double().not_null())
                    .col(ColumnDef::new(Grades::EvaluationDate).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-grades-student_id")
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-grades-subject_id")
                            .from(Grades::Table, Grades::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create attendances table, one row per recorded absence
        manager
            .create_table(
                Table::create()
                    .table(Attendances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendances::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendances::StudentId).integer().not_null())
                    .col(ColumnDef::new(Attendances::SubjectId).integer().not_null())
                    .col(ColumnDef::new(Attendances::Date).date_time().not_null())
                    .col(ColumnDef::new(Attendances::Description).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attendances-student_id")
                            .from(Attendances::Table, Attendances::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attendances-subject_id")
                            .from(Attendances::Table, Attendances::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create course_subjects junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(CourseSubjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseSubjects::CourseId).integer().not_null())
                    .col(ColumnDef::new(CourseSubjects::SubjectId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CourseSubjects::CourseId)
                            .col(CourseSubjects::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_subjects-course_id")
                            .from(CourseSubjects::Table, CourseSubjects::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_subjects-subject_id")
                            .from(CourseSubjects::Table, CourseSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create teacher_subjects junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(TeacherSubjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeacherSubjects::TeacherId).integer().not_null())
                    .col(ColumnDef::new(TeacherSubjects::SubjectId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(TeacherSubjects::TeacherId)
                            .col(TeacherSubjects::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teacher_subjects-teacher_id")
                            .from(TeacherSubjects::Table, TeacherSubjects::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teacher_subjects-subject_id")
                            .from(TeacherSubjects::Table, TeacherSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create teacher_school_classes junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(TeacherSchoolClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherSchoolClasses::TeacherId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSchoolClasses::SchoolClassId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TeacherSchoolClasses::TeacherId)
                            .col(TeacherSchoolClasses::SchoolClassId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teacher_school_classes-teacher_id")
                            .from(TeacherSchoolClasses::Table, TeacherSchoolClasses::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teacher_school_classes-school_class_id")
                            .from(
                                TeacherSchoolClasses::Table,
                                TeacherSchoolClasses::SchoolClassId,
                            )
                            .to(SchoolClasses::Table, SchoolClasses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order of dependencies
        manager
            .drop_table(Table::drop().table(TeacherSchoolClasses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TeacherSubjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseSubjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Attendances::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SchoolClasses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Description,
    Duration,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Subjects {
    Table,
    Id,
    Name,
    Description,
    Credits,
    TotalClasses,
}

#[derive(Iden)]
enum SchoolClasses {
    Table,
    Id,
    ClassName,
    CourseId,
    StartDate,
    EndDate,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    EnrollmentDate,
    Status,
    SchoolClassId,
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    HireDate,
}

#[derive(Iden)]
enum Grades {
    Table,
    Id,
    StudentId,
    SubjectId,
    Value,
    EvaluationDate,
}

#[derive(Iden)]
enum Attendances {
    Table,
    Id,
    StudentId,
    SubjectId,
    Date,
    Description,
}

#[derive(Iden)]
enum CourseSubjects {
    Table,
    CourseId,
    SubjectId,
}

#[derive(Iden)]
enum TeacherSubjects {
    Table,
    TeacherId,
    SubjectId,
}

#[derive(Iden)]
enum TeacherSchoolClasses {
    Table,
    TeacherId,
    SchoolClassId,
}
