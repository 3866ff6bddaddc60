//! 课程知识点实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub topic_id: i64,
    pub course_id: i64,
    pub module_name: String,
    pub topic_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::CourseId"
    )]
    Course,
    #[sea_orm(has_many = "super::student_topic_progress::Entity")]
    Progress,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_topic(self) -> crate::models::topics::entities::CourseTopic {
        crate::models::topics::entities::CourseTopic {
            topic_id: self.topic_id,
            course_id: self.course_id,
            module_name: self.module_name,
            topic_name: self.topic_name,
        }
    }
}
