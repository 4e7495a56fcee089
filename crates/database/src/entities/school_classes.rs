use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "school_classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub class_name: String,
    pub course_id: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_many = "super::teacher_school_classes::Entity")]
    TeacherSchoolClasses,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::teacher_school_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSchoolClasses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A class can be assigned to a course only while it has none
    pub fn is_available(&self) -> bool {
        self.course_id.is_none()
    }
}
