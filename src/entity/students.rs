//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub student_id: i64,
    pub student_name: String,
    pub join_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    pub course_id: i64,
    pub staff_id: Option<i64>,
    pub batch_id: Option<i64>,
    #[sea_orm(unique)]
    pub student_email: String,
    pub student_contact: String,
    /// true = 线下, false = 线上
    pub mode: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::CourseId"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::StaffId"
    )]
    Staff,
    #[sea_orm(
        belongs_to = "super::batches::Entity",
        from = "Column::BatchId",
        to = "super::batches::Column::BatchId"
    )]
    Batch,
    #[sea_orm(has_many = "super::student_topic_progress::Entity")]
    Progress,
    #[sea_orm(has_many = "super::student_attendance::Entity")]
    Attendance,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl Related<super::batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Student, StudentMode};

        Student {
            student_id: self.student_id,
            student_name: self.student_name,
            join_date: self.join_date,
            end_date: self.end_date,
            course_id: self.course_id,
            staff_id: self.staff_id,
            batch_id: self.batch_id,
            student_email: self.student_email,
            student_contact: self.student_contact,
            mode: StudentMode::from_flag(self.mode),
        }
    }
}
