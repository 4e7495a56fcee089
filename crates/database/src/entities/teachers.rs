use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub hire_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::teacher_subjects::Entity")]
    TeacherSubjects,
    #[sea_orm(has_many = "super::teacher_school_classes::Entity")]
    TeacherSchoolClasses,
}

impl Related<super::teacher_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubjects.def()
    }
}

impl Related<super::teacher_school_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSchoolClasses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
