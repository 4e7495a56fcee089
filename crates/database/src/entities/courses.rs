use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub duration: i32, // Weeks
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::school_classes::Entity")]
    SchoolClasses,
    #[sea_orm(has_many = "super::course_subjects::Entity")]
    CourseSubjects,
}

impl Related<super::school_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolClasses.def()
    }
}

impl Related<super::course_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseSubjects.def()
    }
}

// Many-to-many relationship with subjects
impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_subjects::Relation::Subject.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_subjects::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
