use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub total_classes: i32, // Scheduled sessions, the attendance denominator
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_subjects::Entity")]
    CourseSubjects,
    #[sea_orm(has_many = "super::teacher_subjects::Entity")]
    TeacherSubjects,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
    #[sea_orm(has_many = "super::attendances::Entity")]
    Attendances,
}

impl Related<super::course_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseSubjects.def()
    }
}

impl Related<super::teacher_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubjects.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl Related<super::attendances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
}

// Many-to-many relationship with courses
impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_subjects::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_subjects::Relation::Subject.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
