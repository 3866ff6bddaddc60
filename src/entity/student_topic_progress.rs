//! 学生知识点进度实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_topic_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub topic_id: i64,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub marks: Option<i32>,
    pub sign: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::StudentId"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course_topics::Entity",
        from = "Column::TopicId",
        to = "super::course_topics::Column::TopicId"
    )]
    Topic,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_progress(self) -> crate::models::progress::entities::TopicProgress {
        crate::models::progress::entities::TopicProgress {
            id: self.id,
            student_id: self.student_id,
            topic_id: self.topic_id,
            start_date: self.start_date,
            end_date: self.end_date,
            marks: self.marks,
            sign: self.sign,
        }
    }
}
